//! The fixed set of customizable shoe regions.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// A named, individually customizable region of the shoe model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Part {
    #[serde(rename = "laces")]
    Laces,
    #[serde(rename = "sole_top")]
    SoleTop,
    #[serde(rename = "sole_bottom")]
    SoleBottom,
    #[serde(rename = "inside")]
    Inside,
    #[serde(rename = "outside_1")]
    Outside1,
    #[serde(rename = "outside_2")]
    Outside2,
    #[serde(rename = "outside_3")]
    Outside3,
}

impl Part {
    /// Navigation order used by the part buttons.
    pub const ALL: [Part; 7] = [
        Part::Laces,
        Part::Outside1,
        Part::Outside2,
        Part::Outside3,
        Part::Inside,
        Part::SoleTop,
        Part::SoleBottom,
    ];

    /// Identifier shared by the model's mesh names and the persisted JSON.
    pub fn id(self) -> &'static str {
        match self {
            Part::Laces => "laces",
            Part::SoleTop => "sole_top",
            Part::SoleBottom => "sole_bottom",
            Part::Inside => "inside",
            Part::Outside1 => "outside_1",
            Part::Outside2 => "outside_2",
            Part::Outside3 => "outside_3",
        }
    }

    pub fn from_id(id: &str) -> Option<Part> {
        Part::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Maps a scene node or mesh name to a part. GLTF primitives carry a
    /// `.<index>` suffix (`laces.0`), which is ignored.
    pub fn from_mesh_name(name: &str) -> Option<Part> {
        let base = name.split('.').next().unwrap_or(name);
        Part::from_id(base)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Part::Outside1 => "Outer Left Side",
            Part::Outside2 => "Outer Right Side",
            Part::Outside3 => "Outer Front",
            Part::Inside => "Inside of the Shoe",
            Part::Laces => "Shoe Laces",
            Part::SoleBottom => "Bottom Sole",
            Part::SoleTop => "Top Sole",
        }
    }

    /// Camera position used when this part is selected.
    pub fn focus_target(self) -> Vec3 {
        match self {
            Part::Laces => Vec3::new(0.0, 5.0, 4.0),
            Part::SoleTop => Vec3::new(0.0, 6.0, -1.5),
            Part::SoleBottom => Vec3::new(0.0, -4.0, 4.0),
            Part::Inside => Vec3::new(0.0, 6.5, 1.0),
            Part::Outside1 => Vec3::new(-7.0, 2.0, 1.0),
            Part::Outside2 => Vec3::new(7.0, 2.0, 1.0),
            Part::Outside3 => Vec3::new(0.0, 2.0, 8.0),
        }
    }

    /// Point the camera keeps looking at while travelling to [`Part::focus_target`].
    pub fn focus_point(self) -> Vec3 {
        match self {
            Part::Laces => Vec3::new(0.0, 1.2, 0.8),
            Part::SoleTop | Part::Inside => Vec3::new(0.0, 0.8, -0.5),
            Part::SoleBottom => Vec3::new(0.0, -0.4, 0.0),
            Part::Outside1 | Part::Outside2 => Vec3::new(0.0, 0.7, 0.0),
            Part::Outside3 => Vec3::new(0.0, 0.7, 1.5),
        }
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_names_map_to_parts() {
        assert_eq!(Part::from_mesh_name("laces"), Some(Part::Laces));
        assert_eq!(Part::from_mesh_name("outside_2.1"), Some(Part::Outside2));
        assert_eq!(Part::from_mesh_name("floor"), None);
        assert_eq!(Part::from_mesh_name(""), None);
    }

    #[test]
    fn ids_round_trip_through_json_keys() {
        for part in Part::ALL {
            let json = serde_json::to_string(&part).unwrap();
            assert_eq!(json, format!("\"{}\"", part.id()));
            assert_eq!(Part::from_id(part.id()), Some(part));
        }
    }

    #[test]
    fn all_lists_each_part_once() {
        let mut ids: Vec<_> = Part::ALL.iter().map(|p| p.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }
}
