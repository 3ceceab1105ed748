use serde::{Deserialize, Serialize};

use super::markers::Marker;
use super::runs::{expand_runs, TerrainRun};
use super::stats::{terrain_breakdown, TerrainStats, TileBreakdown};
use super::terrain::Tileset;

/// Header fields of a legacy container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerHeader {
    pub type_tag: String,
    pub declared_size: u32,
    pub type_section_len: usize,
    pub type_text: String,
}

/// Normalized description of a decoded map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapModel {
    pub width: u16,
    pub height: u16,
    pub tileset: u8,
    pub terrain_runs: Vec<TerrainRun>,
    pub markers: Vec<Marker>,
    pub terrain_stats: TerrainStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<ContainerHeader>,

    /// Trailing data was dropped because a chunk did not fit the buffer
    #[serde(default)]
    pub truncated: bool,
}

impl MapModel {
    pub fn new(width: u16, height: u16, tileset: u8) -> Self {
        Self {
            width,
            height,
            tileset,
            ..Self::default()
        }
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Total tiles covered by the decoded runs
    pub fn total_tiles(&self) -> u32 {
        self.terrain_runs.iter().map(|r| r.count).sum()
    }

    pub fn tileset_name(&self) -> &'static str {
        Tileset::from_id(self.tileset).name()
    }

    pub fn terrain_breakdown(&self) -> Vec<TileBreakdown> {
        terrain_breakdown(&self.terrain_runs, self.width, self.height)
    }

    /// Flat row-major tile ids reconstructed from the runs
    pub fn expand_tiles(&self) -> Vec<u16> {
        expand_runs(&self.terrain_runs)
    }

    pub(crate) fn refresh_stats(&mut self) {
        self.terrain_stats = TerrainStats::from_runs(&self.terrain_runs, self.width, self.height);
    }
}
