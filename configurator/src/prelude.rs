//! Minimal prelude for SDK consumers.

pub use crate::catalog::{ColorValue, Fabric, ShoeSize, SWATCHES};
pub use crate::config::{settings_from_env, ConfiguratorSettings};
pub use crate::data::{ConfigStore, JsonFileStore, MemoryStore, SavedConfiguration};
pub use crate::part::Part;
pub use crate::sdk::ConfiguratorBuilder;
pub use crate::state::{CompletenessPolicy, ConfiguratorState};
