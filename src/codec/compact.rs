//! Compact map format decoding
//!
//! # Layout (all integers little-endian)
//!
//! ## Header (7 bytes):
//!   Bytes 0-1: Width (u16)
//!   Bytes 2-3: Height (u16)
//!   Byte 4:    Tileset (u8)
//!   Bytes 5-6: Run count (u16)
//!
//! ## Run (9 bytes each):
//!   Byte 0:    Terrain type ordinal (u8)
//!   Bytes 1-2: Tile id (u16)
//!   Bytes 3-4: Count (u16)
//!   Bytes 5-6: Start X (u16)
//!   Bytes 7-8: Start Y (u16)
//!
//! ## Marker section:
//!   Bytes 0-1: Marker count (u16), then per marker (9 bytes):
//!   Byte 0:    Marker type ordinal (u8)
//!   Bytes 1-2: X (u16)
//!   Bytes 3-4: Y (u16)
//!   Bytes 5-8: Amount (u32, 0 = none)
//!
//! ## Ordinal tables
//!   Terrain: 0 water, 1 water-deep, 2 coast, 3 grass, 4 grass-light,
//!            5 rock, 6 rock-dark, 7 dirt, 8 sand, 9 snow, 10 forest,
//!            11 swamp, 12 unknown; anything else resolves to unknown.
//!   Marker:  0 player, 1 goldmine, 2 oil, 3 resource; anything else
//!            resolves to resource.
//!
//! Every field is mandatory: a short buffer is an error.

use tracing::{debug, trace, warn};

use super::reader::ByteCursor;
use crate::error::Result;
use crate::events::{DecodeEvent, DecodeObserver, OrdinalKind};
use crate::map::{MapModel, Marker, MarkerCategory, TerrainCategory, TerrainRun};

pub fn decode(data: &[u8], observer: &mut dyn DecodeObserver) -> Result<MapModel> {
    let mut cursor = ByteCursor::new(data);

    let width = cursor.read_u16_le()?;
    let height = cursor.read_u16_le()?;
    let tileset = cursor.read_u8()?;
    let mut model = MapModel::new(width, height, tileset);

    let run_count = cursor.read_u16_le()?;
    debug!(width, height, tileset, run_count, "compact map header");

    model.terrain_runs.reserve(run_count as usize);
    for _ in 0..run_count {
        let run = read_run(&mut cursor, observer)?;
        trace!(terrain = %run.terrain_type, tile_id = run.tile_id, count = run.count, "terrain run");
        model.terrain_runs.push(run);
    }

    let marker_count = cursor.read_u16_le()?;
    for _ in 0..marker_count {
        let marker = read_marker(&mut cursor, observer)?;
        if marker.in_bounds(width, height) {
            model.markers.push(marker);
        } else {
            warn!(x = marker.x, y = marker.y, width, height, "marker outside map, dropped");
            observer.on_event(DecodeEvent::MarkerRejected {
                x: marker.x,
                y: marker.y,
                width,
                height,
            });
        }
    }

    if !cursor.is_empty() {
        debug!(trailing = cursor.remaining(), "ignoring trailing bytes after marker section");
    }

    model.refresh_stats();
    debug!(
        runs = model.terrain_runs.len(),
        markers = model.markers.len(),
        "compact map decoded"
    );
    Ok(model)
}

fn read_run(cursor: &mut ByteCursor, observer: &mut dyn DecodeObserver) -> Result<TerrainRun> {
    let ordinal = cursor.read_u8()?;
    let terrain_type = TerrainCategory::from_ordinal(ordinal).unwrap_or_else(|| {
        debug!(ordinal, "unknown terrain ordinal");
        observer.on_event(DecodeEvent::UnknownOrdinal {
            kind: OrdinalKind::Terrain,
            value: ordinal,
        });
        TerrainCategory::Unknown
    });

    Ok(TerrainRun {
        terrain_type,
        tile_id: cursor.read_u16_le()?,
        count: cursor.read_u16_le()? as u32,
        start_x: cursor.read_u16_le()?,
        start_y: cursor.read_u16_le()?,
    })
}

fn read_marker(cursor: &mut ByteCursor, observer: &mut dyn DecodeObserver) -> Result<Marker> {
    let ordinal = cursor.read_u8()?;
    let marker_type = MarkerCategory::from_ordinal(ordinal).unwrap_or_else(|| {
        debug!(ordinal, "unknown marker ordinal");
        observer.on_event(DecodeEvent::UnknownOrdinal {
            kind: OrdinalKind::Marker,
            value: ordinal,
        });
        MarkerCategory::Resource
    });

    let x = cursor.read_u16_le()?;
    let y = cursor.read_u16_le()?;
    let amount = cursor.read_u32_le()?;
    Ok(Marker::with_amount(marker_type, x, y, amount))
}
