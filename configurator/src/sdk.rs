//! SDK entry point and builder for composing the configurator app.

use bevy::prelude::*;

use crate::camera::{focus_camera_plugin, orbit_camera_plugin};
use crate::checkout::{checkout_plugin, OrderOutbox};
use crate::config::{self, ConfiguratorSettings};
use crate::data::{init_fabric_channel, ConfigStore, JsonFileStore, StoreResource};
use crate::events::register_events;
use crate::scene::customizer_plugin;
use crate::state::{ConfiguratorState, HoverController, StatusMessage};
use crate::ui::ui_plugin;

/// Builder for the configurator app with optional controls and panels.
pub struct ConfiguratorBuilder {
    settings: Option<ConfiguratorSettings>,
    store: Option<Box<dyn ConfigStore>>,
    window_title: String,
    window_resolution: (f32, f32),
    clear_color: Color,
    enable_orbit_camera: bool,
    enable_panels: bool,
}

impl Default for ConfiguratorBuilder {
    fn default() -> Self {
        Self {
            settings: None,
            store: None,
            window_title: "Sneaker Configurator".to_string(),
            window_resolution: (1280.0, 720.0),
            clear_color: Color::srgb(0.93, 0.93, 0.95),
            enable_orbit_camera: true,
            enable_panels: true,
        }
    }
}

impl ConfiguratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: ConfiguratorSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Read settings from `CONFIGURATOR_*` environment variables.
    pub fn from_env(mut self) -> Self {
        self.settings = Some(config::settings_from_env());
        self
    }

    /// Replace the JSON file store, e.g. with a `MemoryStore`.
    pub fn store(mut self, store: impl ConfigStore) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = title.into();
        self
    }

    pub fn window_resolution(mut self, width: f32, height: f32) -> Self {
        self.window_resolution = (width, height);
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn disable_orbit_camera(mut self) -> Self {
        self.enable_orbit_camera = false;
        self
    }

    pub fn disable_panels(mut self) -> Self {
        self.enable_panels = false;
        self
    }

    /// Build the Bevy app with the selected settings and plugins.
    pub fn build(self) -> App {
        let settings = self.settings.unwrap_or_else(config::settings_from_env);
        let store: Box<dyn ConfigStore> = match self.store {
            Some(store) => store,
            None => Box::new(JsonFileStore::new(&settings.store_path)),
        };
        let channel = init_fabric_channel(&settings.asset_root);

        let mut app = App::new();
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: self.window_title,
                        resolution: self.window_resolution.into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: settings.asset_root.to_string_lossy().into_owned(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(self.clear_color))
        .insert_resource(channel)
        .insert_resource(StoreResource(store))
        .insert_resource(OrderOutbox::new(&settings.outbox_path))
        .insert_resource(settings)
        .init_resource::<ConfiguratorState>()
        .init_resource::<HoverController>()
        .init_resource::<StatusMessage>()
        .add_plugins((register_events, customizer_plugin, checkout_plugin, focus_camera_plugin));

        if self.enable_orbit_camera {
            app.add_plugins(orbit_camera_plugin);
        }
        if self.enable_panels {
            app.add_plugins(ui_plugin);
        }

        app
    }
}
