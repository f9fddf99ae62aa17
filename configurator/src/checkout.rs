//! Downstream order flow: price summary, customer details and the order
//! hand-off written for the network layer to submit.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::{ColorValue, Fabric, ShoeSize};
use crate::data::{ConfigStore, SavedConfiguration, StoreResource};
use crate::error::{CheckoutError, StoreError};
use crate::events::PlaceOrderRequested;
use crate::part::Part;
use crate::scene::{reset_appearance, AppliedFabric, ConfiguratorSet, PartAppearance};
use crate::state::{ConfiguratorState, StatusMessage};

pub const BASE_PRICE: u32 = 230;
pub const SHIPPING_COST: u32 = 20;
pub const PRODUCT_ID: &str = "shoe1234";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceSummary {
    pub unit_price: u32,
    pub quantity: u32,
    pub shipping: u32,
}

impl PriceSummary {
    pub fn for_quantity(quantity: u32) -> Self {
        Self {
            unit_price: BASE_PRICE,
            quantity,
            shipping: SHIPPING_COST,
        }
    }

    /// Saturates instead of overflowing for absurd quantities.
    pub fn subtotal(&self) -> u32 {
        self.unit_price.saturating_mul(self.quantity)
    }

    pub fn total(&self) -> u32 {
        self.subtotal().saturating_add(self.shipping)
    }
}

impl fmt::Display for PriceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${} + ${} shipping = ${}",
            self.subtotal(),
            self.shipping,
            self.total()
        )
    }
}

/// Raw text from the checkout form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
}

impl CustomerForm {
    pub fn validate(&self) -> Result<CustomerInfo, CheckoutError> {
        let required = |value: &str, field: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(CheckoutError::InvalidCustomer(field))
            } else {
                Ok(value.to_string())
            }
        };

        let first_name = required(&self.first_name, "your first name")?;
        let last_name = required(&self.last_name, "your last name")?;
        let email = required(&self.email, "a valid email")?;
        if !email.contains('@') {
            return Err(CheckoutError::InvalidCustomer("a valid email"));
        }
        let address = required(&self.address, "your address")?;
        let postal_code = self
            .postal_code
            .trim()
            .parse::<u32>()
            .map_err(|_| CheckoutError::InvalidCustomer("a numeric postal code"))?;

        Ok(CustomerInfo {
            first_name,
            last_name,
            email,
            address,
            postal_code,
            city: required(&self.city, "your city")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub postal_code: u32,
    pub city: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    pub product_id: String,
    pub colors: BTreeMap<Part, ColorValue>,
    pub fabrics: BTreeMap<Part, Fabric>,
    pub size: ShoeSize,
    pub initials: Option<String>,
    pub price: u32,
    pub quantity: u32,
}

/// Order body in the shape the order service accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: CustomerInfo,
    pub total_price: u32,
    pub shipping_cost: u32,
    pub status: String,
    pub products: Vec<OrderProduct>,
}

impl OrderDraft {
    pub fn new(config: SavedConfiguration, customer: CustomerInfo) -> Self {
        let price = PriceSummary::for_quantity(config.quantity);
        Self {
            customer,
            total_price: price.total(),
            shipping_cost: price.shipping,
            status: "Pending".to_string(),
            products: vec![OrderProduct {
                product_id: PRODUCT_ID.to_string(),
                colors: config.colors,
                fabrics: config.fabrics,
                size: config.size,
                initials: config.initials,
                price: price.unit_price,
                quantity: config.quantity,
            }],
        }
    }
}

/// JSON-lines file the order submitter picks drafts up from.
#[derive(Resource, Clone, Debug)]
pub struct OrderOutbox {
    path: PathBuf,
}

impl OrderOutbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, order: &OrderDraft) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let mut line = serde_json::to_string(order)?;
        line.push('\n');
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(io_error)
    }
}

/// Turns the stored configuration into an order, queues it and clears the
/// store. The store is left alone when anything before that fails.
pub fn place_order(
    store: &mut dyn ConfigStore,
    outbox: &OrderOutbox,
    customer: CustomerInfo,
) -> Result<OrderDraft, CheckoutError> {
    let config = store.load()?.ok_or(CheckoutError::NoConfiguration)?;
    let order = OrderDraft::new(config, customer);
    outbox.write(&order)?;
    store.clear()?;
    info!(
        "configurator: queued order for {} ({} total) in {}",
        order.customer.email,
        order.total_price,
        outbox.path().display()
    );
    Ok(order)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Customizing,
    /// Confirmed and waiting for customer details.
    Checkout(SavedConfiguration),
    ThankYou(OrderDraft),
}

#[derive(Resource, Debug, Default)]
pub struct CheckoutState {
    pub phase: CheckoutPhase,
}

impl CheckoutState {
    pub fn open(&mut self, config: SavedConfiguration) {
        self.phase = CheckoutPhase::Checkout(config);
    }

    pub fn back_to_customizing(&mut self) {
        self.phase = CheckoutPhase::Customizing;
    }
}

pub fn checkout_plugin(app: &mut App) {
    app.init_resource::<CheckoutState>()
        .add_systems(Update, handle_place_order.in_set(ConfiguratorSet::Apply));
}

/// Places the order and starts a fresh session on success.
#[allow(clippy::too_many_arguments)]
pub fn handle_place_order(
    mut commands: Commands,
    mut requests: EventReader<PlaceOrderRequested>,
    mut store: ResMut<StoreResource>,
    outbox: Res<OrderOutbox>,
    mut state: ResMut<ConfiguratorState>,
    mut checkout: ResMut<CheckoutState>,
    mut status: ResMut<StatusMessage>,
    mut parts: Query<(Entity, &mut PartAppearance, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for PlaceOrderRequested(form) in requests.read() {
        let placed = form
            .validate()
            .and_then(|customer| place_order(store.0.as_mut(), &outbox, customer));
        let order = match placed {
            Ok(order) => order,
            Err(err) => {
                warn!("configurator: order not placed: {err}");
                status.error(err);
                continue;
            }
        };

        state.reset();
        for (entity, mut appearance, handle) in &mut parts {
            if let Some(material) = materials.get_mut(&handle.0) {
                reset_appearance(material, &mut appearance);
            }
            commands.entity(entity).remove::<AppliedFabric>();
        }
        status.info("Order placed successfully!");
        checkout.phase = CheckoutPhase::ThankYou(order);
    }
}
