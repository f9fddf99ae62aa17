pub(crate) mod customize;
pub(crate) mod fabrics;
pub(crate) mod parts;
pub(crate) mod picking;
mod setup;

use bevy::prelude::*;

pub use customize::{
    dismiss_selection_system, handle_color_chosen, handle_confirm, handle_fabric_chosen,
    handle_initials, handle_part_selection, handle_quantity, handle_size_chosen,
};
pub use fabrics::{
    apply_fabric, apply_loaded_fabrics, finish_pending_fabrics, AppliedFabric, PendingFabrics,
};
pub use parts::{
    apply_user_color, highlight, register_part_meshes, reset_appearance, restore,
    PartAppearance, PartMesh, HIGHLIGHT_EMISSIVE,
};
pub use picking::{
    click_select_system, cursor_ray_system, hover_system, nearest_part, pointer_ndc,
    ray_hits_part, resolve, CursorRay, PointerCapture, PointerRay,
};
pub use setup::{setup_scene, spawn_stage, ShoeModel};

/// Frame phases: pointer capture, then input (picking and panels), then
/// the systems that apply the resulting events.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfiguratorSet {
    Pointer,
    Input,
    Apply,
}

/// Picking, highlighting and customization systems for the part meshes.
pub fn customizer_plugin(app: &mut App) {
    app.init_resource::<PointerCapture>()
        .init_resource::<CursorRay>()
        .init_resource::<PendingFabrics>()
        .configure_sets(
            Update,
            (
                ConfiguratorSet::Pointer,
                ConfiguratorSet::Input,
                ConfiguratorSet::Apply,
            )
                .chain(),
        )
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                register_part_meshes,
                cursor_ray_system,
                hover_system,
                click_select_system,
            )
                .chain()
                .in_set(ConfiguratorSet::Input),
        )
        .add_systems(
            Update,
            (
                handle_part_selection,
                (
                    handle_color_chosen,
                    handle_fabric_chosen,
                    handle_size_chosen,
                    handle_initials,
                    handle_quantity,
                    handle_confirm,
                )
                    .chain(),
                apply_loaded_fabrics,
                finish_pending_fabrics,
                dismiss_selection_system,
            )
                .chain()
                .in_set(ConfiguratorSet::Apply),
        );
}
