//! Error types for the configurator, built with `thiserror`.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::part::Part;

/// Failures of the customization operations. None of them are fatal: the UI
/// surfaces the message and the user keeps editing.
#[derive(Error, Debug)]
pub enum ConfiguratorError {
    #[error("Select a part of the shoe first")]
    NoPartSelected,

    #[error("Unknown fabric {0:?}")]
    UnknownFabric(String),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Size {0} is not available")]
    InvalidSize(u8),

    #[error(transparent)]
    Incomplete(#[from] IncompleteConfiguration),

    #[error("Could not save configuration: {0}")]
    Store(#[from] StoreError),
}

/// What is still missing before an order can be confirmed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
pub struct IncompleteConfiguration {
    pub missing_colors: Vec<Part>,
    pub missing_fabrics: Vec<Part>,
    /// Set under the any-part policy when no part has both a color and a fabric.
    pub missing_any_part: bool,
    pub missing_size: bool,
    pub missing_quantity: bool,
}

impl IncompleteConfiguration {
    pub fn is_empty(&self) -> bool {
        self.missing_colors.is_empty()
            && self.missing_fabrics.is_empty()
            && !self.missing_any_part
            && !self.missing_size
            && !self.missing_quantity
    }
}

impl fmt::Display for IncompleteConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing_colors.is_empty() {
            parts.push(format!("a color for {}", join_names(&self.missing_colors)));
        }
        if !self.missing_fabrics.is_empty() {
            parts.push(format!("a fabric for {}", join_names(&self.missing_fabrics)));
        }
        if self.missing_any_part {
            parts.push("a color and a fabric for at least one part".to_string());
        }
        if self.missing_size {
            parts.push("a size".to_string());
        }
        if self.missing_quantity {
            parts.push("a quantity".to_string());
        }
        write!(f, "Please choose {}", parts.join(", "))
    }
}

fn join_names(parts: &[Part]) -> String {
    parts
        .iter()
        .map(|p| p.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Persisted-store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Texture fetch failures for a fabric. The previous material stays in place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FabricLoadError {
    #[error("texture map {path} is missing or unreadable: {reason}")]
    MissingMap { path: PathBuf, reason: String },

    #[error("fabric loader thread is not running")]
    WorkerGone,
}

/// Downstream checkout failures.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("No shoe configuration found")]
    NoConfiguration,

    #[error("Please fill in {0}")]
    InvalidCustomer(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}
