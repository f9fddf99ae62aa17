//! Applies loaded fabric texture maps to part materials.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::catalog::{Fabric, FabricMaps};
use crate::data::{FabricChannel, FabricLoadResult};
use crate::part::Part;
use crate::scene::parts::PartMesh;
use crate::state::{ConfiguratorState, StatusMessage};

const MAX_FABRICS_PER_FRAME: usize = 4;

/// Fabric currently shown on a part mesh, with handles for all four maps.
/// Bevy has no per-material environment map, so `maps.env` is kept here.
#[derive(Component, Clone, Debug)]
pub struct AppliedFabric {
    pub fabric: Fabric,
    pub maps: FabricMaps<Handle<Image>>,
}

/// Puts a fabric's maps and surface response on a material.
pub fn apply_fabric(material: &mut StandardMaterial, fabric: Fabric, maps: &FabricMaps<Handle<Image>>) {
    let (roughness, reflectance) = fabric.surface();
    material.base_color_texture = Some(maps.color.clone());
    material.normal_map_texture = Some(maps.normal.clone());
    material.metallic_roughness_texture = Some(maps.roughness.clone());
    material.perceptual_roughness = roughness;
    material.reflectance = reflectance;
}

/// A finished load still matches what the user picked for that part.
pub fn is_current(result: &FabricLoadResult, state: &ConfiguratorState) -> bool {
    state.customization().fabric(result.part) == Some(result.fabric)
}

/// Fabric maps handed to the asset server and not yet on a material.
#[derive(Clone, Debug)]
struct PendingFabric {
    part: Part,
    fabric: Fabric,
    maps: FabricMaps<Handle<Image>>,
}

/// At most one pending fabric per part; a newer one replaces it.
#[derive(Resource, Debug, Default)]
pub struct PendingFabrics(Vec<PendingFabric>);

impl PendingFabrics {
    fn push(&mut self, pending: PendingFabric) {
        self.0.retain(|p| p.part != pending.part);
        self.0.push(pending);
    }

    pub fn is_pending(&self, part: Part) -> bool {
        self.0.iter().any(|p| p.part == part)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MapsProgress {
    Loading,
    Loaded,
    Failed,
}

fn maps_progress(asset_server: &AssetServer, maps: &FabricMaps<Handle<Image>>) -> MapsProgress {
    let mut progress = MapsProgress::Loaded;
    for handle in maps.iter() {
        match asset_server.load_state(handle.id()) {
            LoadState::Failed(_) => return MapsProgress::Failed,
            LoadState::Loaded => {}
            _ => progress = MapsProgress::Loading,
        }
    }
    progress
}

/// Drains finished fabric checks and starts loading their maps. Failed or
/// superseded checks leave the material as it was.
pub fn apply_loaded_fabrics(
    channel: Res<FabricChannel>,
    state: Res<ConfiguratorState>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingFabrics>,
    mut status: ResMut<StatusMessage>,
) {
    for _ in 0..MAX_FABRICS_PER_FRAME {
        let Some(result) = channel.try_next() else {
            break;
        };
        if !is_current(&result, &state) {
            debug!(
                "configurator: dropping stale {} load for {}",
                result.fabric, result.part
            );
            continue;
        }
        let paths = match result.outcome {
            Ok(paths) => paths,
            Err(err) => {
                warn!("configurator: keeping previous material on {}: {err}", result.part);
                status.error(format!("{} could not be loaded", result.fabric.label()));
                continue;
            }
        };
        pending.push(PendingFabric {
            part: result.part,
            fabric: result.fabric,
            maps: paths.map(|path| asset_server.load::<Image>(path)),
        });
    }
}

/// Puts a pending fabric on its part once all four images have loaded. If
/// any image fails to decode the material is left as it was.
pub fn finish_pending_fabrics(
    mut commands: Commands,
    state: Res<ConfiguratorState>,
    asset_server: Res<AssetServer>,
    mut pending: ResMut<PendingFabrics>,
    parts: Query<(Entity, &PartMesh, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut status: ResMut<StatusMessage>,
) {
    pending.0.retain(|fabric| {
        if state.customization().fabric(fabric.part) != Some(fabric.fabric) {
            debug!(
                "configurator: dropping stale {} maps for {}",
                fabric.fabric, fabric.part
            );
            return false;
        }
        match maps_progress(&asset_server, &fabric.maps) {
            MapsProgress::Loading => true,
            MapsProgress::Failed => {
                warn!(
                    "configurator: {} maps failed to load, keeping previous material on {}",
                    fabric.fabric, fabric.part
                );
                status.error(format!("{} could not be loaded", fabric.fabric.label()));
                false
            }
            MapsProgress::Loaded => {
                for (entity, mesh, material) in &parts {
                    if mesh.0 != fabric.part {
                        continue;
                    }
                    if let Some(material) = materials.get_mut(&material.0) {
                        apply_fabric(material, fabric.fabric, &fabric.maps);
                    }
                    commands.entity(entity).insert(AppliedFabric {
                        fabric: fabric.fabric,
                        maps: fabric.maps.clone(),
                    });
                }
                info!("configurator: applied {} to {}", fabric.fabric, fabric.part);
                false
            }
        }
    });
}
