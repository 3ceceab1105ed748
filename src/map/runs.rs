use serde::{Deserialize, Serialize};

use super::terrain::{classify, TerrainCategory};

/// A horizontal stretch of identical tiles in raster order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainRun {
    pub terrain_type: TerrainCategory,
    pub tile_id: u16,
    pub count: u32,
    pub start_x: u16,
    pub start_y: u16,
}

/// Raster position of a flat tile index. A zero width has no raster, so
/// everything lands on the origin.
fn raster_position(index: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let width = width as usize;
    ((index % width) as u16, (index / width) as u16)
}

/// Compress a row-major tile array into runs of identical tile ids.
///
/// The category of each run comes from its first tile; run lengths always
/// sum to `tiles.len()`.
pub fn compress_runs(tiles: &[u16], width: u16, tileset: u8) -> Vec<TerrainRun> {
    let mut runs = Vec::new();
    let mut iter = tiles.iter().copied().enumerate();

    let Some((_, first)) = iter.next() else {
        return runs;
    };

    let mut run_start = 0usize;
    let mut run_tile = first;

    let close = |start: usize, tile_id: u16, end: usize, runs: &mut Vec<TerrainRun>| {
        let (start_x, start_y) = raster_position(start, width);
        runs.push(TerrainRun {
            terrain_type: classify(tile_id, tileset),
            tile_id,
            count: (end - start) as u32,
            start_x,
            start_y,
        });
    };

    for (index, tile_id) in iter {
        if tile_id != run_tile {
            close(run_start, run_tile, index, &mut runs);
            run_start = index;
            run_tile = tile_id;
        }
    }
    close(run_start, run_tile, tiles.len(), &mut runs);

    runs
}

/// Re-expand runs into the flat tile array they were built from
pub fn expand_runs(runs: &[TerrainRun]) -> Vec<u16> {
    let total: usize = runs.iter().map(|r| r.count as usize).sum();
    let mut tiles = Vec::with_capacity(total);
    for run in runs {
        tiles.extend(std::iter::repeat(run.tile_id).take(run.count as usize));
    }
    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Map shape with a row-major tile array covering it. Tile ids come
    /// from a narrow range so neighbouring tiles repeat.
    fn layout() -> impl Strategy<Value = (u16, u16, Vec<u16>)> {
        (1u16..64, 1u16..64).prop_flat_map(|(width, height)| {
            let area = width as usize * height as usize;
            (Just(width), Just(height), prop::collection::vec(0u16..8, area))
        })
    }

    #[test]
    fn test_empty_input() {
        assert!(compress_runs(&[], 4, 0).is_empty());
        assert!(expand_runs(&[]).is_empty());
    }

    #[test]
    fn test_runs_break_only_on_change() {
        let tiles = [5, 5, 5, 20, 20, 100, 5, 5];
        let runs = compress_runs(&tiles, 4, 0);

        assert_eq!(runs.len(), 4);
        assert_eq!((runs[0].tile_id, runs[0].count), (5, 3));
        assert_eq!(runs[0].terrain_type, TerrainCategory::Grass);
        assert_eq!((runs[1].tile_id, runs[1].count), (20, 2));
        assert_eq!(runs[1].terrain_type, TerrainCategory::Water);
        assert_eq!((runs[1].start_x, runs[1].start_y), (3, 0));
        assert_eq!((runs[2].tile_id, runs[2].count), (100, 1));
        assert_eq!(runs[2].terrain_type, TerrainCategory::Rock);
        assert_eq!((runs[2].start_x, runs[2].start_y), (1, 1));
        assert_eq!((runs[3].start_x, runs[3].start_y), (2, 1));

        for pair in runs.windows(2) {
            assert_ne!(pair[0].tile_id, pair[1].tile_id);
        }
    }

    #[test]
    fn test_runs_span_rows() {
        let tiles = [0u16; 12];
        let runs = compress_runs(&tiles, 3, 0);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].count, 12);
    }

    proptest! {
        #[test]
        fn test_counts_sum_to_area((width, height, tiles) in layout(), tileset in any::<u8>()) {
            let runs = compress_runs(&tiles, width, tileset);
            let total: u64 = runs.iter().map(|r| r.count as u64).sum();
            prop_assert_eq!(total, width as u64 * height as u64);
        }

        #[test]
        fn test_expand_reproduces_input((width, _height, tiles) in layout(), tileset in any::<u8>()) {
            let runs = compress_runs(&tiles, width, tileset);
            prop_assert_eq!(expand_runs(&runs), tiles);
            for pair in runs.windows(2) {
                prop_assert_ne!(pair[0].tile_id, pair[1].tile_id);
            }
        }

        #[test]
        fn test_start_matches_cumulative_index((width, _height, tiles) in layout()) {
            let runs = compress_runs(&tiles, width, 0);
            let mut index = 0usize;
            for run in &runs {
                prop_assert_eq!(run.start_x as usize, index % width as usize);
                prop_assert_eq!(run.start_y as usize, index / width as usize);
                index += run.count as usize;
            }
        }
    }

    #[test]
    fn test_category_uses_tileset() {
        let runs = compress_runs(&[200, 200], 2, 2);
        assert_eq!(runs[0].terrain_type, TerrainCategory::Sand);
    }
}
