//! Checkout window shown after a confirmed configuration, and the thank-you
//! view once the order is queued.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::catalog::color_name;
use crate::checkout::{CheckoutPhase, CheckoutState, CustomerForm, PriceSummary};
use crate::data::SavedConfiguration;
use crate::events::PlaceOrderRequested;
use crate::ui::{panel_frame, PanelDrafts, ACCENT, TEXT};

#[derive(Resource, Debug, Default)]
pub struct CheckoutDrafts {
    pub form: CustomerForm,
}

/// Human readable lines for the order summary.
pub fn summary_lines(config: &SavedConfiguration) -> Vec<String> {
    let mut lines = Vec::new();
    for (part, color) in &config.colors {
        lines.push(format!("{}: {}", part.display_name(), color_name(*color)));
    }
    for (part, fabric) in &config.fabrics {
        lines.push(format!("{}: {}", part.display_name(), fabric.label()));
    }
    lines.push(format!("Size: {}", config.size));
    lines.push(format!(
        "Initials: {}",
        config.initials.as_deref().unwrap_or("None")
    ));
    lines.push(format!("Quantity: {}", config.quantity));
    lines.push(format!("Total: {}", PriceSummary::for_quantity(config.quantity)));
    lines
}

pub fn checkout_window_system(
    mut contexts: EguiContexts,
    mut checkout: ResMut<CheckoutState>,
    mut drafts: ResMut<CheckoutDrafts>,
    mut panel_drafts: ResMut<PanelDrafts>,
    mut orders: EventWriter<PlaceOrderRequested>,
) {
    let mut back = false;
    match &checkout.phase {
        CheckoutPhase::Customizing => return,
        CheckoutPhase::Checkout(config) => {
            egui::Window::new("Checkout")
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .resizable(false)
                .collapsible(false)
                .frame(panel_frame())
                .show(contexts.ctx_mut(), |ui| {
                    ui.visuals_mut().override_text_color = Some(TEXT);
                    ui.label(egui::RichText::new("Your sneaker").size(16.0).color(ACCENT));
                    for line in summary_lines(config) {
                        ui.label(line);
                    }
                    ui.separator();

                    let form = &mut drafts.form;
                    egui::Grid::new("customer").num_columns(2).show(ui, |ui| {
                        for (label, value) in [
                            ("First name", &mut form.first_name),
                            ("Last name", &mut form.last_name),
                            ("Email", &mut form.email),
                            ("Address", &mut form.address),
                            ("Postal code", &mut form.postal_code),
                            ("City", &mut form.city),
                        ] {
                            ui.label(label);
                            ui.text_edit_singleline(value);
                            ui.end_row();
                        }
                    });

                    ui.horizontal(|ui| {
                        if ui.button("Back").clicked() {
                            back = true;
                        }
                        if ui.button("Place order").clicked() {
                            orders.send(PlaceOrderRequested(drafts.form.clone()));
                        }
                    });
                });
        }
        CheckoutPhase::ThankYou(order) => {
            egui::Window::new("Thank you")
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .resizable(false)
                .collapsible(false)
                .frame(panel_frame())
                .show(contexts.ctx_mut(), |ui| {
                    ui.visuals_mut().override_text_color = Some(TEXT);
                    ui.label(
                        egui::RichText::new(format!("Thanks, {}!", order.customer.first_name))
                            .size(16.0)
                            .color(ACCENT),
                    );
                    ui.label(format!(
                        "Your order of ${} is {}.",
                        order.total_price,
                        order.status.to_lowercase()
                    ));
                    if ui.button("Design another pair").clicked() {
                        back = true;
                        drafts.form = CustomerForm::default();
                        panel_drafts.initials.clear();
                    }
                });
        }
    }
    if back {
        checkout.back_to_customizing();
    }
}
