//! Terrain categories and tile classification
//!
//! # Tile id ranges
//!
//! | Tile id   | Category                                   |
//! |-----------|--------------------------------------------|
//! | 0-15      | grass                                      |
//! | 16-47     | water                                      |
//! | 48-79     | coast                                      |
//! | 80-95     | minor variant: grass, snow (1), dirt (2)   |
//! | 96-111    | rock                                       |
//! | 112-127   | forest                                     |
//! | 128+      | per tileset: grass, snow, sand, swamp      |
//!
//! Anything not matched falls back to grass.

use serde::{Deserialize, Serialize};

/// Terrain category of a tile or run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum TerrainCategory {
    Water = 0,
    WaterDeep = 1,
    Coast = 2,
    Grass = 3,
    GrassLight = 4,
    Rock = 5,
    RockDark = 6,
    Dirt = 7,
    Sand = 8,
    Snow = 9,
    Forest = 10,
    Swamp = 11,
    Unknown = 12,
}

impl TerrainCategory {
    /// Ordinal table of the compact wire format, indexed by `terrain_type_id`
    pub const ORDINALS: [TerrainCategory; 13] = [
        Self::Water,
        Self::WaterDeep,
        Self::Coast,
        Self::Grass,
        Self::GrassLight,
        Self::Rock,
        Self::RockDark,
        Self::Dirt,
        Self::Sand,
        Self::Snow,
        Self::Forest,
        Self::Swamp,
        Self::Unknown,
    ];

    /// Resolve a wire ordinal, `None` when outside the table
    pub fn from_ordinal(v: u8) -> Option<Self> {
        Self::ORDINALS.get(v as usize).copied()
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::WaterDeep => "water-deep",
            Self::Coast => "coast",
            Self::Grass => "grass",
            Self::GrassLight => "grass-light",
            Self::Rock => "rock",
            Self::RockDark => "rock-dark",
            Self::Dirt => "dirt",
            Self::Sand => "sand",
            Self::Snow => "snow",
            Self::Forest => "forest",
            Self::Swamp => "swamp",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Known tilesets of the legacy format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tileset {
    Forest,
    Winter,
    Wasteland,
    Swamp,
    Unknown(u8),
}

impl Tileset {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => Self::Forest,
            1 => Self::Winter,
            2 => Self::Wasteland,
            3 => Self::Swamp,
            other => Self::Unknown(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Forest => "forest",
            Self::Winter => "winter",
            Self::Wasteland => "wasteland",
            Self::Swamp => "swamp",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// Map a tile id to its terrain category under the given tileset
pub fn classify(tile_id: u16, tileset: u8) -> TerrainCategory {
    match tile_id {
        0..=15 => TerrainCategory::Grass,
        16..=47 => TerrainCategory::Water,
        48..=79 => TerrainCategory::Coast,
        80..=95 => match tileset {
            1 => TerrainCategory::Snow,
            2 => TerrainCategory::Dirt,
            _ => TerrainCategory::Grass,
        },
        96..=111 => TerrainCategory::Rock,
        112..=127 => TerrainCategory::Forest,
        _ => match tileset {
            1 => TerrainCategory::Snow,
            2 => TerrainCategory::Sand,
            3 => TerrainCategory::Swamp,
            _ => TerrainCategory::Grass,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_low_tiles_are_grass_for_every_tileset(tile_id in 0u16..=15, tileset in any::<u8>()) {
            prop_assert_eq!(classify(tile_id, tileset), TerrainCategory::Grass);
        }

        #[test]
        fn test_classify_is_deterministic(tile_id in any::<u16>(), tileset in any::<u8>()) {
            prop_assert_eq!(classify(tile_id, tileset), classify(tile_id, tileset));
        }
    }

    #[test]
    fn test_fixed_ranges() {
        for tileset in [0, 1, 2, 3, 200] {
            assert_eq!(classify(16, tileset), TerrainCategory::Water);
            assert_eq!(classify(47, tileset), TerrainCategory::Water);
            assert_eq!(classify(48, tileset), TerrainCategory::Coast);
            assert_eq!(classify(79, tileset), TerrainCategory::Coast);
            assert_eq!(classify(96, tileset), TerrainCategory::Rock);
            assert_eq!(classify(111, tileset), TerrainCategory::Rock);
            assert_eq!(classify(112, tileset), TerrainCategory::Forest);
            assert_eq!(classify(127, tileset), TerrainCategory::Forest);
        }
    }

    #[test]
    fn test_minor_variant_range() {
        assert_eq!(classify(80, 0), TerrainCategory::Grass);
        assert_eq!(classify(85, 1), TerrainCategory::Snow);
        assert_eq!(classify(95, 2), TerrainCategory::Dirt);
        assert_eq!(classify(90, 3), TerrainCategory::Grass);
        assert_eq!(classify(90, 9), TerrainCategory::Grass);
    }

    #[test]
    fn test_high_tiles_follow_tileset() {
        assert_eq!(classify(128, 0), TerrainCategory::Grass);
        assert_eq!(classify(1968, 1), TerrainCategory::Snow);
        assert_eq!(classify(300, 2), TerrainCategory::Sand);
        assert_eq!(classify(u16::MAX, 3), TerrainCategory::Swamp);
        assert_eq!(classify(500, 4), TerrainCategory::Grass);
    }

    #[test]
    fn test_ordinal_table() {
        assert_eq!(TerrainCategory::from_ordinal(3), Some(TerrainCategory::Grass));
        assert_eq!(TerrainCategory::from_ordinal(12), Some(TerrainCategory::Unknown));
        assert_eq!(TerrainCategory::from_ordinal(13), None);
        assert_eq!(TerrainCategory::WaterDeep.to_string(), "water-deep");
        for (i, category) in TerrainCategory::ORDINALS.iter().enumerate() {
            assert_eq!(category.ordinal() as usize, i);
        }
    }

    #[test]
    fn test_tileset_names() {
        assert_eq!(Tileset::from_id(0).name(), "forest");
        assert_eq!(Tileset::from_id(1).name(), "winter");
        assert_eq!(Tileset::from_id(2).name(), "wasteland");
        assert_eq!(Tileset::from_id(3).name(), "swamp");
        assert_eq!(Tileset::from_id(7), Tileset::Unknown(7));
    }
}
