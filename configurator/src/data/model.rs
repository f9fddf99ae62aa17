// Serializable shapes exchanged with the persisted store and the checkout flow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ColorValue, Fabric, ShoeSize};
use crate::part::Part;

/// Confirmed configuration, written at confirm time and read by checkout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedConfiguration {
    pub colors: BTreeMap<Part, ColorValue>,
    pub fabrics: BTreeMap<Part, Fabric>,
    pub size: ShoeSize,
    #[serde(default)]
    pub initials: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
