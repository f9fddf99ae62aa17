//! What the customer can choose from: color values, fabrics and sizes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfiguratorError;

/// An opaque sRGB color as chosen in the UI and stored in the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorValue {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorValue {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.r, self.g, self.b)
    }
}

impl FromStr for ColorValue {
    type Err = ConfiguratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfiguratorError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ConfiguratorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

/// A named color offered by the swatch panel.
pub struct Swatch {
    pub name: &'static str,
    pub value: ColorValue,
}

pub const SWATCHES: [Swatch; 5] = [
    Swatch {
        name: "Lime green",
        value: ColorValue::rgb(0x03, 0xf1, 0x00),
    },
    Swatch {
        name: "Neon pink",
        value: ColorValue::rgb(0xed, 0x18, 0xb5),
    },
    Swatch {
        name: "Electric blue",
        value: ColorValue::rgb(0x34, 0x98, 0xdb),
    },
    Swatch {
        name: "Jet black",
        value: ColorValue::rgb(0x00, 0x00, 0x00),
    },
    Swatch {
        name: "Creamy white",
        value: ColorValue::rgb(0xff, 0xff, 0xff),
    },
];

/// Swatch name for a color, or its hex string when it is not a swatch.
pub fn color_name(value: ColorValue) -> String {
    SWATCHES
        .iter()
        .find(|s| s.value == value)
        .map_or_else(|| value.to_string(), |s| s.name.to_string())
}

/// The enumerated fabric set. Anything else is rejected at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fabric {
    Leather,
    Velvet,
    Denim,
    Suede,
    Canvas,
}

impl Fabric {
    pub const ALL: [Fabric; 5] = [
        Fabric::Leather,
        Fabric::Velvet,
        Fabric::Denim,
        Fabric::Suede,
        Fabric::Canvas,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Fabric::Leather => "leather",
            Fabric::Velvet => "velvet",
            Fabric::Denim => "denim",
            Fabric::Suede => "suede",
            Fabric::Canvas => "canvas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Fabric::Leather => "Leather",
            Fabric::Velvet => "Velvet",
            Fabric::Denim => "Denim",
            Fabric::Suede => "Suede",
            Fabric::Canvas => "Canvas",
        }
    }

    /// Asset-relative paths of the four texture maps.
    pub fn maps(self) -> FabricMaps<PathBuf> {
        let dir = PathBuf::from("fabrics").join(self.id());
        FabricMaps {
            color: dir.join("color.jpg"),
            normal: dir.join("normal.jpg"),
            roughness: dir.join("roughness.jpg"),
            env: dir.join("env.jpg"),
        }
    }

    /// `(perceptual_roughness, reflectance)` for the fabric's material.
    pub fn surface(self) -> (f32, f32) {
        match self {
            Fabric::Leather => (0.45, 0.5),
            Fabric::Velvet => (0.9, 0.2),
            Fabric::Denim => (0.8, 0.3),
            Fabric::Suede => (0.85, 0.25),
            Fabric::Canvas => (0.75, 0.3),
        }
    }
}

impl FromStr for Fabric {
    type Err = ConfiguratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        Fabric::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| ConfiguratorError::UnknownFabric(s.to_string()))
    }
}

impl fmt::Display for Fabric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One value per texture map of a fabric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FabricMaps<T> {
    pub color: T,
    pub normal: T,
    pub roughness: T,
    pub env: T,
}

impl<T> FabricMaps<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> FabricMaps<U> {
        FabricMaps {
            color: f(self.color),
            normal: f(self.normal),
            roughness: f(self.roughness),
            env: f(self.env),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        [&self.color, &self.normal, &self.roughness, &self.env].into_iter()
    }
}

/// EU shoe size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShoeSize(u8);

impl ShoeSize {
    pub const MIN: u8 = 36;
    pub const MAX: u8 = 47;

    pub fn new(eu: u8) -> Result<Self, ConfiguratorError> {
        if (Self::MIN..=Self::MAX).contains(&eu) {
            Ok(Self(eu))
        } else {
            Err(ConfiguratorError::InvalidSize(eu))
        }
    }

    pub fn eu(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = ShoeSize> {
        (Self::MIN..=Self::MAX).map(ShoeSize)
    }
}

impl TryFrom<u8> for ShoeSize {
    type Error = ConfiguratorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShoeSize> for u8 {
    fn from(value: ShoeSize) -> Self {
        value.0
    }
}

impl fmt::Display for ShoeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EU {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_with_or_without_hash() {
        let c: ColorValue = "#3498DB".parse().unwrap();
        assert_eq!(c, ColorValue::rgb(0x34, 0x98, 0xdb));
        assert_eq!("ed18b5".parse::<ColorValue>().unwrap().to_string(), "#ed18b5");
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for bad in ["", "#fff", "#12345g", "red", "#1234567", "#ééé", "+1+2+3", "#-1-2-3"] {
            assert!(
                matches!(bad.parse::<ColorValue>(), Err(ConfiguratorError::InvalidColor(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn color_name_falls_back_to_hex() {
        assert_eq!(color_name(ColorValue::rgb(0, 0, 0)), "Jet black");
        assert_eq!(color_name(ColorValue::rgb(1, 2, 3)), "#010203");
    }

    #[test]
    fn fabric_ids_are_case_insensitive_and_closed() {
        assert_eq!("Velvet".parse::<Fabric>().unwrap(), Fabric::Velvet);
        assert!(matches!(
            "silk".parse::<Fabric>(),
            Err(ConfiguratorError::UnknownFabric(id)) if id == "silk"
        ));
    }

    #[test]
    fn fabric_maps_live_under_fabric_dir() {
        let maps = Fabric::Velvet.maps();
        assert_eq!(maps.normal, PathBuf::from("fabrics/velvet/normal.jpg"));
        assert_eq!(maps.env, PathBuf::from("fabrics/velvet/env.jpg"));
    }

    #[test]
    fn shoe_size_bounds() {
        assert!(ShoeSize::new(35).is_err());
        assert_eq!(ShoeSize::new(42).unwrap().eu(), 42);
        assert!(ShoeSize::new(48).is_err());
        assert_eq!(ShoeSize::all().count(), 12);
    }
}
