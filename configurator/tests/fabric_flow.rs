use std::io;
use std::path::Path;
use std::time::Duration;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, AssetPlugin, LoadContext};
use bevy::prelude::*;

use configurator::data::{init_fabric_channel, map_paths};
use configurator::scene::{
    apply_loaded_fabrics, finish_pending_fabrics, AppliedFabric, PartAppearance, PartMesh,
    PendingFabrics,
};
use configurator::state::{ConfiguratorState, StatusMessage};
use configurator::{Fabric, Part};

const WAIT: Duration = Duration::from_secs(5);
const TEXTURE: &[u8] = b"texture";

/// Stands in for the image decoders: files starting with `TEXTURE` decode to
/// a blank image, anything else is a decode error.
#[derive(Default)]
struct TextureLoader;

impl AssetLoader for TextureLoader {
    type Asset = Image;
    type Settings = ();
    type Error = io::Error;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Image, io::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        if bytes.starts_with(TEXTURE) {
            Ok(Image::default())
        } else {
            Err(io::Error::new(io::ErrorKind::InvalidData, "not a texture"))
        }
    }

    fn extensions(&self) -> &[&str] {
        &["jpg"]
    }
}

fn write_maps(root: &Path, fabric: Fabric, contents: &[u8]) {
    for rel in map_paths(&fabric.maps()) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }
}

/// The asset server and the fabric loader share `asset_root`.
fn app(asset_root: &Path) -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        AssetPlugin {
            file_path: asset_root.to_string_lossy().into_owned(),
            ..default()
        },
    ))
    .init_asset::<Image>()
    .init_asset::<StandardMaterial>()
    .register_asset_loader(TextureLoader)
    .init_resource::<ConfiguratorState>()
    .init_resource::<StatusMessage>()
    .init_resource::<PendingFabrics>()
    .insert_resource(init_fabric_channel(asset_root))
    .add_systems(Update, (apply_loaded_fabrics, finish_pending_fabrics).chain());
    app
}

fn choose(app: &mut App, part: Part, fabric: Fabric) {
    {
        let mut state = app.world_mut().resource_mut::<ConfiguratorState>();
        state.select_part(part);
        state.set_fabric(part, fabric.id()).unwrap();
    }
    app.world()
        .resource::<configurator::data::FabricChannel>()
        .request(part, fabric)
        .unwrap();
}

fn spawn_part(app: &mut App, part: Part) -> (Entity, Handle<StandardMaterial>) {
    let material = StandardMaterial::default();
    let appearance = PartAppearance::capture(&material);
    let handle = app
        .world_mut()
        .resource_mut::<Assets<StandardMaterial>>()
        .add(material);
    let entity = app
        .world_mut()
        .spawn((PartMesh(part), appearance, MeshMaterial3d(handle.clone())))
        .id();
    (entity, handle)
}

/// Runs frames until the loader has answered and the answer was applied.
fn pump_until(app: &mut App, mut done: impl FnMut(&World) -> bool) -> bool {
    let deadline = std::time::Instant::now() + WAIT;
    while std::time::Instant::now() < deadline {
        app.update();
        if done(app.world()) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn velvet_lands_on_outside_2_only() {
    let dir = tempfile::tempdir().unwrap();
    write_maps(dir.path(), Fabric::Velvet, TEXTURE);
    let mut app = app(dir.path());
    let (outside_2, outside_2_mat) = spawn_part(&mut app, Part::Outside2);
    let (outside_1, outside_1_mat) = spawn_part(&mut app, Part::Outside1);

    choose(&mut app, Part::Outside2, Fabric::Velvet);

    assert!(pump_until(&mut app, |world| world
        .get::<AppliedFabric>(outside_2)
        .is_some()));

    let world = app.world();
    let applied = world.get::<AppliedFabric>(outside_2).unwrap();
    assert_eq!(applied.fabric, Fabric::Velvet);
    let images = world.resource::<Assets<Image>>();
    assert!(applied.maps.iter().all(|handle| images.contains(handle)));
    assert!(!world.resource::<PendingFabrics>().is_pending(Part::Outside2));
    assert!(world.get::<AppliedFabric>(outside_1).is_none());

    let materials = world.resource::<Assets<StandardMaterial>>();
    let velvet = materials.get(&outside_2_mat).unwrap();
    assert!(velvet.base_color_texture.is_some());
    assert!(velvet.normal_map_texture.is_some());
    assert!(velvet.metallic_roughness_texture.is_some());
    assert!(materials.get(&outside_1_mat).unwrap().base_color_texture.is_none());

    let state = world.resource::<ConfiguratorState>();
    assert_eq!(state.customization().fabric(Part::Outside2), Some(Fabric::Velvet));
    assert_eq!(state.customization().fabric(Part::Outside1), None);
}

#[test]
fn failed_load_keeps_material_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app(dir.path());
    let (laces, laces_mat) = spawn_part(&mut app, Part::Laces);

    choose(&mut app, Part::Laces, Fabric::Denim);

    assert!(pump_until(&mut app, |world| world
        .resource::<StatusMessage>()
        .is_error()));

    let world = app.world();
    assert!(world.get::<AppliedFabric>(laces).is_none());
    let material = world
        .resource::<Assets<StandardMaterial>>()
        .get(&laces_mat)
        .unwrap();
    assert!(material.base_color_texture.is_none());
}

#[test]
fn undecodable_maps_keep_material_and_report() {
    let dir = tempfile::tempdir().unwrap();
    write_maps(dir.path(), Fabric::Suede, b"jpeg");
    let mut app = app(dir.path());
    let (inside, inside_mat) = spawn_part(&mut app, Part::Inside);
    let before = app
        .world()
        .resource::<Assets<StandardMaterial>>()
        .get(&inside_mat)
        .unwrap()
        .clone();

    choose(&mut app, Part::Inside, Fabric::Suede);

    assert!(pump_until(&mut app, |world| world
        .resource::<StatusMessage>()
        .is_error()));

    let world = app.world();
    assert!(world.get::<AppliedFabric>(inside).is_none());
    assert!(!world.resource::<PendingFabrics>().is_pending(Part::Inside));
    let material = world
        .resource::<Assets<StandardMaterial>>()
        .get(&inside_mat)
        .unwrap();
    assert!(material.base_color_texture.is_none());
    assert!(material.normal_map_texture.is_none());
    assert_eq!(material.perceptual_roughness, before.perceptual_roughness);
}
