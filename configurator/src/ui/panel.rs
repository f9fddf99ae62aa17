//! Customizer side panel: part navigation, swatches, fabrics, size,
//! initials, quantity, price and confirm.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::catalog::{ColorValue, Fabric, ShoeSize, SWATCHES};
use crate::checkout::{CheckoutPhase, CheckoutState, PriceSummary};
use crate::events::{
    ColorChosen, ConfirmRequested, FabricChosen, InitialsEntered, PartNavClicked,
    QuantityChanged, SizeChosen,
};
use crate::part::Part;
use crate::state::{ConfiguratorState, CustomizationState, StatusMessage, MAX_QUANTITY};
use crate::ui::{panel_frame, ACCENT, TEXT};

const SWATCH_RADIUS: f32 = 12.0;
const INITIALS_LIMIT: usize = 3;

/// Something the user did in the panel this frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Part(Part),
    Color(ColorValue),
    Fabric(Fabric),
    Size(u8),
    Initials(String),
    Quantity(u32),
    Confirm,
}

#[derive(SystemParam)]
pub struct PanelEvents<'w> {
    parts: EventWriter<'w, PartNavClicked>,
    colors: EventWriter<'w, ColorChosen>,
    fabrics: EventWriter<'w, FabricChosen>,
    sizes: EventWriter<'w, SizeChosen>,
    initials: EventWriter<'w, InitialsEntered>,
    quantities: EventWriter<'w, QuantityChanged>,
    confirms: EventWriter<'w, ConfirmRequested>,
}

impl PanelEvents<'_> {
    pub fn send(&mut self, action: PanelAction) {
        match action {
            PanelAction::Part(part) => {
                self.parts.send(PartNavClicked(part));
            }
            PanelAction::Color(color) => {
                self.colors.send(ColorChosen(color));
            }
            PanelAction::Fabric(fabric) => {
                self.fabrics.send(FabricChosen(fabric.id().to_string()));
            }
            PanelAction::Size(eu) => {
                self.sizes.send(SizeChosen(eu));
            }
            PanelAction::Initials(text) => {
                self.initials.send(InitialsEntered(text));
            }
            PanelAction::Quantity(quantity) => {
                self.quantities.send(QuantityChanged(quantity));
            }
            PanelAction::Confirm => {
                self.confirms.send(ConfirmRequested);
            }
        }
    }
}

/// Text the user is still typing.
#[derive(Resource, Debug, Default)]
pub struct PanelDrafts {
    pub initials: String,
}

/// Navigation label with a marker once a part has both color and fabric.
pub fn part_label(part: Part, custom: &CustomizationState) -> String {
    if custom.is_complete(part) {
        format!("{} ✔", part.display_name())
    } else {
        part.display_name().to_string()
    }
}

pub fn swatch_fill(color: ColorValue) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

pub fn customizer_panel_system(
    mut contexts: EguiContexts,
    state: Res<ConfiguratorState>,
    checkout: Res<CheckoutState>,
    status: Res<StatusMessage>,
    mut drafts: ResMut<PanelDrafts>,
    mut events: PanelEvents,
) {
    if checkout.phase != CheckoutPhase::Customizing {
        return;
    }
    let mut actions = Vec::new();
    let selected = state.selected();
    let custom = state.customization();

    egui::SidePanel::right("customizer")
        .resizable(false)
        .default_width(260.0)
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            ui.visuals_mut().override_text_color = Some(TEXT);
            ui.heading("Customize your sneaker");
            ui.add_space(6.0);

            for part in Part::ALL {
                let label = part_label(part, custom);
                if ui.selectable_label(selected == Some(part), label).clicked() {
                    actions.push(PanelAction::Part(part));
                }
            }
            ui.separator();

            let Some(part) = selected else {
                ui.label("Click a part of the shoe to customize it.");
                return;
            };
            ui.label(egui::RichText::new(part.display_name()).size(16.0).color(ACCENT));

            ui.label("Color");
            ui.horizontal(|ui| {
                for swatch in &SWATCHES {
                    let size = egui::vec2(SWATCH_RADIUS * 2.0 + 4.0, SWATCH_RADIUS * 2.0 + 4.0);
                    let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
                    let center = response.rect.center();
                    painter.circle_filled(center, SWATCH_RADIUS, swatch_fill(swatch.value));
                    if custom.color(part) == Some(swatch.value) {
                        painter.circle_stroke(center, SWATCH_RADIUS + 1.5, egui::Stroke::new(2.0, ACCENT));
                    }
                    if response.clicked() {
                        actions.push(PanelAction::Color(swatch.value));
                    }
                    response.on_hover_text(swatch.name);
                }
            });

            ui.label("Fabric");
            ui.horizontal_wrapped(|ui| {
                for fabric in Fabric::ALL {
                    let current = custom.fabric(part) == Some(fabric);
                    if ui.selectable_label(current, fabric.label()).clicked() {
                        actions.push(PanelAction::Fabric(fabric));
                    }
                }
            });
        });

    egui::TopBottomPanel::bottom("order_summary")
        .frame(panel_frame())
        .show(contexts.ctx_mut(), |ui| {
            ui.visuals_mut().override_text_color = Some(TEXT);
            ui.horizontal(|ui| {
                let size_text = state
                    .size()
                    .map_or_else(|| "Choose size".to_string(), |s| s.to_string());
                egui::ComboBox::from_id_salt("size")
                    .selected_text(size_text)
                    .show_ui(ui, |ui| {
                        for size in ShoeSize::all() {
                            let picked = state.size() == Some(size);
                            if ui.selectable_label(picked, size.to_string()).clicked() {
                                actions.push(PanelAction::Size(size.eu()));
                            }
                        }
                    });

                ui.label("Initials");
                let edit = egui::TextEdit::singleline(&mut drafts.initials)
                    .char_limit(INITIALS_LIMIT)
                    .desired_width(40.0);
                if ui.add(edit).changed() {
                    actions.push(PanelAction::Initials(drafts.initials.clone()));
                }

                ui.label("Quantity");
                let mut quantity = state.quantity();
                if ui
                    .add(egui::DragValue::new(&mut quantity).range(1..=MAX_QUANTITY))
                    .changed()
                {
                    actions.push(PanelAction::Quantity(quantity));
                }

                ui.separator();
                ui.label(PriceSummary::for_quantity(state.quantity()).to_string());

                if ui.button("Confirm").clicked() {
                    actions.push(PanelAction::Confirm);
                }
            });

            if let Some(text) = status.text() {
                let color = if status.is_error() {
                    egui::Color32::from_rgb(240, 110, 110)
                } else {
                    ACCENT
                };
                ui.label(egui::RichText::new(text).color(color));
            }
        });

    for action in actions {
        events.send(action);
    }
}
