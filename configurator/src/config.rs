//! Env parsing and defaults for the configurator.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::state::CompletenessPolicy;

const DEFAULT_ASSET_ROOT: &str = "assets";
const DEFAULT_MODEL: &str = "shoe.glb";
const DEFAULT_STORE_PATH: &str = "shoe_config.json";
const DEFAULT_OUTBOX_PATH: &str = "orders/outbox.json";
const DEFAULT_FOCUS_SECS: f32 = 1.0;

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct ConfiguratorSettings {
    /// Directory the asset server and fabric loader read from.
    pub asset_root: PathBuf,
    /// Model path relative to `asset_root`.
    pub model: PathBuf,
    pub store_path: PathBuf,
    pub outbox_path: PathBuf,
    pub completeness: CompletenessPolicy,
    pub focus_duration: f32,
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            asset_root: DEFAULT_ASSET_ROOT.into(),
            model: DEFAULT_MODEL.into(),
            store_path: DEFAULT_STORE_PATH.into(),
            outbox_path: DEFAULT_OUTBOX_PATH.into(),
            completeness: CompletenessPolicy::default(),
            focus_duration: DEFAULT_FOCUS_SECS,
        }
    }
}

/// Reads `CONFIGURATOR_*` env vars. Unset vars keep their defaults; invalid
/// values are logged and ignored.
pub fn settings_from_env() -> ConfiguratorSettings {
    let mut settings = ConfiguratorSettings::default();
    let path_var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

    if let Some(root) = path_var("CONFIGURATOR_ASSET_ROOT") {
        settings.asset_root = root.into();
    }
    if let Some(model) = path_var("CONFIGURATOR_MODEL") {
        settings.model = model.into();
    }
    if let Some(store) = path_var("CONFIGURATOR_STORE_PATH") {
        settings.store_path = store.into();
    }
    if let Some(outbox) = path_var("CONFIGURATOR_OUTBOX_PATH") {
        settings.outbox_path = outbox.into();
    }
    if let Ok(raw) = std::env::var("CONFIGURATOR_COMPLETENESS") {
        match raw.parse::<CompletenessPolicy>() {
            Ok(policy) => settings.completeness = policy,
            Err(err) => warn!("configurator: invalid CONFIGURATOR_COMPLETENESS: {err}"),
        }
    }
    if let Ok(raw) = std::env::var("CONFIGURATOR_FOCUS_SECS") {
        match raw.trim().parse::<f32>() {
            Ok(secs) if secs.is_finite() && secs >= 0.0 => settings.focus_duration = secs,
            _ => warn!("configurator: invalid CONFIGURATOR_FOCUS_SECS {raw:?}"),
        }
    }
    settings
}
