//! Part meshes: registration from the loaded model and appearance bookkeeping.

use bevy::prelude::*;

use crate::catalog::ColorValue;
use crate::part::Part;

/// Emissive cue applied while the pointer is over a part.
pub const HIGHLIGHT_EMISSIVE: LinearRgba = LinearRgba {
    red: 0.2,
    green: 0.8,
    blue: 0.6,
    alpha: 1.0,
};

/// Marks a mesh entity as one of the customizable parts. Only entities with
/// this component take part in picking, highlighting and customization.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartMesh(pub Part);

/// Colors needed to put a part back after a highlight, plus the loaded
/// surface so a reset can undo a fabric.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PartAppearance {
    original_color: Color,
    original_emissive: LinearRgba,
    original_surface: LoadedSurface,
    user_color: Option<ColorValue>,
}

#[derive(Clone, Debug, PartialEq)]
struct LoadedSurface {
    base_color_texture: Option<Handle<Image>>,
    normal_map_texture: Option<Handle<Image>>,
    metallic_roughness_texture: Option<Handle<Image>>,
    perceptual_roughness: f32,
    reflectance: f32,
}

impl PartAppearance {
    /// Snapshot of the material as loaded. Taken once per mesh.
    pub fn capture(material: &StandardMaterial) -> Self {
        Self {
            original_color: material.base_color,
            original_emissive: material.emissive,
            original_surface: LoadedSurface {
                base_color_texture: material.base_color_texture.clone(),
                normal_map_texture: material.normal_map_texture.clone(),
                metallic_roughness_texture: material.metallic_roughness_texture.clone(),
                perceptual_roughness: material.perceptual_roughness,
                reflectance: material.reflectance,
            },
            user_color: None,
        }
    }

    pub fn original_color(&self) -> Color {
        self.original_color
    }

    pub fn user_color(&self) -> Option<ColorValue> {
        self.user_color
    }

    /// The user's color if there is one, the loaded color otherwise.
    pub fn restore_color(&self) -> Color {
        self.user_color
            .map_or(self.original_color, ColorValue::to_color)
    }
}

/// Highlighting only touches emissive; `base_color` keeps whatever the user chose.
pub fn highlight(material: &mut StandardMaterial) {
    material.emissive = HIGHLIGHT_EMISSIVE;
}

pub fn restore(material: &mut StandardMaterial, appearance: &PartAppearance) {
    material.base_color = appearance.restore_color();
    material.emissive = appearance.original_emissive;
}

/// Records an explicit color choice and shows it right away.
pub fn apply_user_color(
    material: &mut StandardMaterial,
    appearance: &mut PartAppearance,
    color: ColorValue,
) {
    appearance.user_color = Some(color);
    material.base_color = color.to_color();
}

/// Drops user color and fabric maps, back to the loaded look.
pub fn reset_appearance(material: &mut StandardMaterial, appearance: &mut PartAppearance) {
    appearance.user_color = None;
    let surface = &appearance.original_surface;
    material.base_color_texture = surface.base_color_texture.clone();
    material.normal_map_texture = surface.normal_map_texture.clone();
    material.metallic_roughness_texture = surface.metallic_roughness_texture.clone();
    material.perceptual_roughness = surface.perceptual_roughness;
    material.reflectance = surface.reflectance;
    restore(material, appearance);
}

/// Tags freshly spawned model meshes whose own name or parent node name is a
/// part identifier. Each part gets its own material so edits never leak to
/// meshes that shared the source material.
#[allow(clippy::type_complexity)]
pub fn register_part_meshes(
    mut commands: Commands,
    new_meshes: Query<
        (
            Entity,
            &MeshMaterial3d<StandardMaterial>,
            Option<&Name>,
            Option<&Parent>,
        ),
        (Added<MeshMaterial3d<StandardMaterial>>, Without<PartMesh>),
    >,
    names: Query<&Name>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, material, name, parent) in &new_meshes {
        let own_name = name.and_then(|n| Part::from_mesh_name(n.as_str()));
        let parent_name = || {
            parent
                .and_then(|p| names.get(p.get()).ok())
                .and_then(|n| Part::from_mesh_name(n.as_str()))
        };
        let Some(part) = own_name.or_else(parent_name) else {
            continue;
        };

        let source = materials.get(&material.0).cloned().unwrap_or_else(|| {
            warn!("configurator: material for {part} not loaded, using default");
            StandardMaterial::default()
        });
        let appearance = PartAppearance::capture(&source);
        let handle = materials.add(source);

        commands
            .entity(entity)
            .insert((PartMesh(part), appearance, MeshMaterial3d(handle)));
        info!("configurator: registered part mesh {part}");
    }
}
