//! Sneaker configurator: a 3D shoe whose parts can be picked, highlighted,
//! colored and given a fabric before the configuration is ordered.
//!
//! Library root: state, scene systems, data layer and the SDK builder.

pub mod camera;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod part;
pub mod scene;
pub mod state;
mod ui;

pub mod prelude;
pub mod sdk;

pub use catalog::{ColorValue, Fabric, ShoeSize};
pub use error::{CheckoutError, ConfiguratorError, IncompleteConfiguration};
pub use part::Part;
