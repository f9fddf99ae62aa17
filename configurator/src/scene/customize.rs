//! Systems applying panel and picking events to the configurator state.

use bevy::prelude::*;

use crate::camera::CameraFocus;
use crate::catalog::Fabric;
use crate::checkout::CheckoutState;
use crate::config::ConfiguratorSettings;
use crate::data::{FabricChannel, StoreResource};
use crate::error::ConfiguratorError;
use crate::events::{
    ColorChosen, ConfirmRequested, FabricChosen, InitialsEntered, PartNavClicked,
    QuantityChanged, SizeChosen,
};
use crate::scene::parts::{apply_user_color, PartAppearance, PartMesh};
use crate::state::{ConfiguratorState, StatusMessage};

/// Selects the part and moves the camera to it. Repeated clicks restart the
/// transition toward the newest part.
pub fn handle_part_selection(
    mut clicks: EventReader<PartNavClicked>,
    mut state: ResMut<ConfiguratorState>,
    mut focus: ResMut<CameraFocus>,
    settings: Res<ConfiguratorSettings>,
) {
    for PartNavClicked(part) in clicks.read() {
        state.select_part(*part);
        focus.focus(part.focus_target(), part.focus_point(), settings.focus_duration);
        info!("configurator: selected {part}");
    }
}

pub fn handle_color_chosen(
    mut choices: EventReader<ColorChosen>,
    mut state: ResMut<ConfiguratorState>,
    mut parts: Query<(&PartMesh, &mut PartAppearance, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut status: ResMut<StatusMessage>,
) {
    for ColorChosen(color) in choices.read() {
        let Some(part) = state.selected() else {
            status.error(ConfiguratorError::NoPartSelected);
            continue;
        };
        if let Err(err) = state.set_color(part, *color) {
            status.error(err);
            continue;
        }
        for (mesh, mut appearance, handle) in &mut parts {
            if mesh.0 != part {
                continue;
            }
            if let Some(material) = materials.get_mut(&handle.0) {
                apply_user_color(material, &mut appearance, *color);
            }
        }
        status.clear();
        debug!("configurator: {part} colored {color}");
    }
}

/// Queues the fabric's texture maps, then records the choice. A request the
/// loader cannot take leaves the state untouched. The material changes once
/// the maps have loaded.
pub fn handle_fabric_chosen(
    mut choices: EventReader<FabricChosen>,
    mut state: ResMut<ConfiguratorState>,
    channel: Res<FabricChannel>,
    mut status: ResMut<StatusMessage>,
) {
    for FabricChosen(id) in choices.read() {
        let Some(part) = state.selected() else {
            status.error(ConfiguratorError::NoPartSelected);
            continue;
        };
        let fabric = match id.parse::<Fabric>() {
            Ok(fabric) => fabric,
            Err(err) => {
                warn!("configurator: ignoring fabric choice for {part}: {err}");
                status.error(err);
                continue;
            }
        };
        if let Err(err) = channel.request(part, fabric) {
            error!("configurator: cannot load {fabric}: {err}");
            status.error(err);
            continue;
        }
        match state.set_fabric(part, fabric.id()) {
            Ok(_) => status.clear(),
            Err(err) => status.error(err),
        }
    }
}

pub fn handle_size_chosen(
    mut choices: EventReader<SizeChosen>,
    mut state: ResMut<ConfiguratorState>,
    mut status: ResMut<StatusMessage>,
) {
    for SizeChosen(eu) in choices.read() {
        match state.set_size(*eu) {
            Ok(size) => {
                debug!("configurator: size {size}");
                status.clear();
            }
            Err(err) => status.error(err),
        }
    }
}

pub fn handle_initials(mut entries: EventReader<InitialsEntered>, mut state: ResMut<ConfiguratorState>) {
    for InitialsEntered(text) in entries.read() {
        state.set_initials(text);
    }
}

pub fn handle_quantity(mut changes: EventReader<QuantityChanged>, mut state: ResMut<ConfiguratorState>) {
    for QuantityChanged(quantity) in changes.read() {
        state.set_quantity(*quantity);
    }
}

/// Saves a complete configuration and opens checkout. Incomplete
/// configurations are reported and nothing is written.
pub fn handle_confirm(
    mut requests: EventReader<ConfirmRequested>,
    state: Res<ConfiguratorState>,
    settings: Res<ConfiguratorSettings>,
    mut store: ResMut<StoreResource>,
    mut checkout: ResMut<CheckoutState>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in requests.read() {
        match state.confirm_order(settings.completeness, store.0.as_mut()) {
            Ok(saved) => {
                info!("configurator: configuration confirmed, size {}", saved.size);
                status.info("Your shoe configuration has been saved!");
                checkout.open(saved);
            }
            Err(err) => {
                debug!("configurator: confirm rejected: {err}");
                status.error(err);
            }
        }
    }
}

pub fn dismiss_selection_system(keys: Res<ButtonInput<KeyCode>>, mut state: ResMut<ConfiguratorState>) {
    if keys.just_pressed(KeyCode::Escape) && state.selected().is_some() {
        state.clear_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColorValue;
    use crate::checkout::CheckoutPhase;
    use crate::data::{init_fabric_channel, MemoryStore};
    use crate::events::register_events;
    use crate::part::Part;

    fn app() -> (App, MemoryStore) {
        let store = MemoryStore::new();
        let mut app = App::new();
        app.add_plugins(register_events)
            .init_resource::<ConfiguratorState>()
            .init_resource::<CameraFocus>()
            .init_resource::<CheckoutState>()
            .init_resource::<StatusMessage>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(ConfiguratorSettings::default())
            .insert_resource(StoreResource::new(store.clone()))
            .insert_resource(init_fabric_channel("missing-assets"))
            .add_systems(
                Update,
                (
                    handle_part_selection,
                    handle_color_chosen,
                    handle_fabric_chosen,
                    handle_size_chosen,
                    handle_initials,
                    handle_quantity,
                    handle_confirm,
                )
                    .chain(),
            );
        (app, store)
    }

    fn spawn_part(app: &mut App, part: Part) -> Handle<StandardMaterial> {
        let material = StandardMaterial::default();
        let appearance = PartAppearance::capture(&material);
        let handle = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(material);
        app.world_mut()
            .spawn((PartMesh(part), appearance, MeshMaterial3d(handle.clone())));
        handle
    }

    #[test]
    fn color_goes_to_selected_part_only() {
        let (mut app, _) = app();
        let laces = spawn_part(&mut app, Part::Laces);
        let inside = spawn_part(&mut app, Part::Inside);
        let pink = ColorValue::rgb(0xed, 0x18, 0xb5);

        app.world_mut().send_event(PartNavClicked(Part::Laces));
        app.world_mut().send_event(ColorChosen(pink));
        app.update();

        let state = app.world().resource::<ConfiguratorState>();
        assert_eq!(state.selected(), Some(Part::Laces));
        assert_eq!(state.customization().color(Part::Laces), Some(pink));
        assert_eq!(state.customization().color(Part::Inside), None);

        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(materials.get(&laces).unwrap().base_color, pink.to_color());
        assert_eq!(
            materials.get(&inside).unwrap().base_color,
            StandardMaterial::default().base_color
        );
        assert!(app.world().resource::<CameraFocus>().is_active());
    }

    #[test]
    fn color_without_selection_is_rejected() {
        let (mut app, _) = app();
        app.world_mut().send_event(ColorChosen(ColorValue::rgb(0, 0, 0)));
        app.update();

        assert!(app.world().resource::<ConfiguratorState>().customization().is_empty());
        assert!(app.world().resource::<StatusMessage>().is_error());
    }

    #[test]
    fn unknown_fabric_leaves_state_unchanged() {
        let (mut app, _) = app();
        app.world_mut().send_event(PartNavClicked(Part::Outside2));
        app.world_mut().send_event(FabricChosen("velvet".into()));
        app.update();
        app.world_mut().send_event(FabricChosen("plastic".into()));
        app.update();

        let state = app.world().resource::<ConfiguratorState>();
        assert_eq!(state.customization().fabric(Part::Outside2), Some(Fabric::Velvet));
        let status = app.world().resource::<StatusMessage>();
        assert!(status.is_error());
    }

    #[test]
    fn confirm_saves_only_complete_configurations() {
        let (mut app, store) = app();
        app.insert_resource(ConfiguratorSettings {
            completeness: crate::state::CompletenessPolicy::AnyPart,
            ..default()
        });

        app.world_mut().send_event(PartNavClicked(Part::SoleTop));
        app.world_mut().send_event(ColorChosen(ColorValue::rgb(3, 241, 0)));
        app.world_mut().send_event(FabricChosen("suede".into()));
        app.world_mut().send_event(ConfirmRequested);
        app.update();

        assert!(store.get().is_none(), "no size chosen yet");
        assert_eq!(
            app.world().resource::<CheckoutState>().phase,
            CheckoutPhase::Customizing
        );

        app.world_mut().send_event(SizeChosen(41));
        app.world_mut().send_event(InitialsEntered("  JD ".into()));
        app.world_mut().send_event(QuantityChanged(2));
        app.world_mut().send_event(ConfirmRequested);
        app.update();

        let saved = store.get().expect("configuration saved");
        assert_eq!(saved.size.eu(), 41);
        assert_eq!(saved.initials.as_deref(), Some("JD"));
        assert_eq!(saved.quantity, 2);
        assert!(matches!(
            app.world().resource::<CheckoutState>().phase,
            CheckoutPhase::Checkout(_)
        ));
    }

    #[test]
    fn fabric_is_not_recorded_when_the_loader_is_gone() {
        let (mut app, _) = app();
        let (requests, gone) = crossbeam_channel::bounded(1);
        let (_results_tx, results) = crossbeam_channel::bounded(1);
        drop(gone);
        app.insert_resource(FabricChannel::new(requests, results));

        app.world_mut().send_event(PartNavClicked(Part::Outside1));
        app.world_mut().send_event(FabricChosen("leather".into()));
        app.update();

        let state = app.world().resource::<ConfiguratorState>();
        assert_eq!(state.customization().fabric(Part::Outside1), None);
        assert!(app.world().resource::<StatusMessage>().is_error());
    }

    #[test]
    fn escape_clears_selection_but_keeps_customization() {
        let (mut app, _) = app();
        app.init_resource::<ButtonInput<KeyCode>>()
            .add_systems(PostUpdate, dismiss_selection_system);
        let red = ColorValue::rgb(0xff, 0, 0);

        app.world_mut().send_event(PartNavClicked(Part::Inside));
        app.world_mut().send_event(ColorChosen(red));
        app.update();
        assert_eq!(
            app.world().resource::<ConfiguratorState>().selected(),
            Some(Part::Inside)
        );

        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::Escape);
        app.update();

        let state = app.world().resource::<ConfiguratorState>();
        assert_eq!(state.selected(), None);
        assert_eq!(state.customization().color(Part::Inside), Some(red));
    }
}
