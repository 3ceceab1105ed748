use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::runs::TerrainRun;
use super::terrain::TerrainCategory;

/// Terrain composition as percentages of the full map area
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainStats {
    pub water_percentage: f64,
    pub forest_percentage: f64,
    pub grass_percentage: f64,
    pub rock_percentage: f64,
    pub shore_percentage: f64,
    pub dirt_percentage: f64,
}

impl TerrainStats {
    /// Aggregate runs into bucket percentages of `width * height`.
    ///
    /// Sand, snow, swamp and unknown runs belong to no bucket.
    pub fn from_runs(runs: &[TerrainRun], width: u16, height: u16) -> Self {
        let mut stats = Self::default();
        let area = width as f64 * height as f64;
        if area == 0.0 {
            return stats;
        }

        for run in runs {
            let share = run.count as f64 / area * 100.0;
            let bucket = match run.terrain_type {
                TerrainCategory::Water | TerrainCategory::WaterDeep => &mut stats.water_percentage,
                TerrainCategory::Grass | TerrainCategory::GrassLight => &mut stats.grass_percentage,
                TerrainCategory::Rock | TerrainCategory::RockDark => &mut stats.rock_percentage,
                TerrainCategory::Coast => &mut stats.shore_percentage,
                TerrainCategory::Dirt => &mut stats.dirt_percentage,
                TerrainCategory::Forest => &mut stats.forest_percentage,
                TerrainCategory::Sand
                | TerrainCategory::Snow
                | TerrainCategory::Swamp
                | TerrainCategory::Unknown => continue,
            };
            *bucket += share;
        }

        stats
    }

    /// Sum of all buckets; below 100 when unbucketed terrain is present
    pub fn covered_percentage(&self) -> f64 {
        self.water_percentage
            + self.forest_percentage
            + self.grass_percentage
            + self.rock_percentage
            + self.shore_percentage
            + self.dirt_percentage
    }
}

/// Share of the map covered by one tile id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileBreakdown {
    pub tile_id: u16,
    pub terrain_type: TerrainCategory,
    pub count: u32,
    pub percentage: f64,
}

/// Per-tile-id counts, largest first
pub fn terrain_breakdown(runs: &[TerrainRun], width: u16, height: u16) -> Vec<TileBreakdown> {
    let mut counts: BTreeMap<u16, (TerrainCategory, u32)> = BTreeMap::new();
    for run in runs {
        let entry = counts.entry(run.tile_id).or_insert((run.terrain_type, 0));
        entry.1 += run.count;
    }

    let area = width as f64 * height as f64;
    let mut breakdown: Vec<TileBreakdown> = counts
        .into_iter()
        .map(|(tile_id, (terrain_type, count))| TileBreakdown {
            tile_id,
            terrain_type,
            count,
            percentage: if area == 0.0 { 0.0 } else { count as f64 / area * 100.0 },
        })
        .collect();
    breakdown.sort_by(|a, b| b.count.cmp(&a.count).then(a.tile_id.cmp(&b.tile_id)));
    breakdown
}
