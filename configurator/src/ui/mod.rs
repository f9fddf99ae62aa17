mod checkout_window;
mod panel;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};

use crate::scene::{ConfiguratorSet, PointerCapture};

use checkout_window::{checkout_window_system, CheckoutDrafts};
use panel::{customizer_panel_system, PanelDrafts};

pub(crate) const ACCENT: egui::Color32 = egui::Color32::from_rgb(100, 220, 180);
pub(crate) const TEXT: egui::Color32 = egui::Color32::from_rgb(200, 220, 240);

pub(crate) fn panel_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
        .inner_margin(egui::Margin::same(12))
        .corner_radius(egui::CornerRadius::same(6))
}

pub fn ui_plugin(app: &mut App) {
    app.add_plugins(EguiPlugin)
        .init_resource::<PanelDrafts>()
        .init_resource::<CheckoutDrafts>()
        .add_systems(
            Update,
            capture_pointer_system.in_set(ConfiguratorSet::Pointer),
        )
        .add_systems(
            Update,
            (customizer_panel_system, checkout_window_system)
                .chain()
                .in_set(ConfiguratorSet::Input),
        );
}

/// Pointer over an egui area never picks, highlights or orbits the shoe.
fn capture_pointer_system(mut contexts: EguiContexts, mut capture: ResMut<PointerCapture>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let over_ui = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    if capture.over_ui != over_ui {
        capture.over_ui = over_ui;
    }
}
