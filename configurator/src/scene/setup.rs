use bevy::prelude::*;

use crate::camera::{ConfiguratorCamera, OrbitCamera};
use crate::config::ConfiguratorSettings;

/// Root of the loaded shoe model.
#[derive(Component, Debug)]
pub struct ShoeModel;

pub fn setup_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<ConfiguratorSettings>,
    meshes: ResMut<Assets<Mesh>>,
    materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_stage(&mut commands, meshes, materials);
    commands.spawn((
        ShoeModel,
        Name::new("shoe"),
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(settings.model.clone()))),
    ));
    info!("configurator: loading model {}", settings.model.display());
}

/// Camera, lights and floor. Part meshes come in with the model.
pub fn spawn_stage(
    commands: &mut Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0., 3., 10.).looking_at(Vec3::ZERO, Vec3::Y),
        ConfiguratorCamera,
        OrbitCamera::default(),
    ));
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 4_000.,
            ..default()
        },
        Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.,
    });
    commands.spawn((
        Name::new("floor"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20., 20.))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.85, 0.88),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0., -0.01, 0.),
    ));
}
