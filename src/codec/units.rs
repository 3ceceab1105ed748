//! Legacy unit records and their conversion to markers
//!
//! # Unit record (8 bytes, little-endian)
//!   Bytes 0-1: Unit type code
//!   Bytes 2-3: X (pixel units)
//!   Bytes 4-5: Y (pixel units)
//!   Byte 6:    Owner slot
//!   Byte 7:    Data (resource amount for mines and platforms)
//!
//! Coordinates are divided by the tile scale (32) to get tile positions.

use super::reader::ByteCursor;
use crate::error::Result;
use crate::map::{Faction, Marker, MarkerCategory};

pub const GOLDMINE: u16 = 0x01;
pub const OIL_PLATFORM: u16 = 0x02;
pub const HUMAN_START: u16 = 0x03;
pub const ORC_START: u16 = 0x04;

/// Names of the unit codes the extractor understands
const UNIT_NAMES: &[(u16, &str)] = &[
    (GOLDMINE, "Gold Mine"),
    (OIL_PLATFORM, "Oil Platform"),
    (HUMAN_START, "Human Start Location"),
    (ORC_START, "Orc Start Location"),
];

pub fn unit_name(unit_type: u16) -> Option<&'static str> {
    UNIT_NAMES
        .iter()
        .find(|(code, _)| *code == unit_type)
        .map(|(_, name)| *name)
}

/// Gold amount from a goldmine's data value
pub fn gold_amount(data: u32) -> u32 {
    match data {
        0..=100 => data * 2500,
        101..=1000 => data * 1000,
        _ => 1_000_000,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitRecord {
    pub unit_type: u16,
    pub x: u16,
    pub y: u16,
    pub owner: u8,
    pub data: u8,
}

impl UnitRecord {
    pub const SIZE: usize = 8;

    pub fn read(cursor: &mut ByteCursor) -> Result<Self> {
        Ok(Self {
            unit_type: cursor.read_u16_le()?,
            x: cursor.read_u16_le()?,
            y: cursor.read_u16_le()?,
            owner: cursor.read_u8()?,
            data: cursor.read_u8()?,
        })
    }
}

/// Result of converting one unit record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    Marker(Marker),
    /// Scaled position falls outside the map grid
    OutOfBounds { x: u16, y: u16 },
    /// Unit type carries no marker
    Ignored,
}

/// Converts unit records into markers for a map of known size
#[derive(Debug, Clone, Copy)]
pub struct MarkerExtractor {
    width: u16,
    height: u16,
    tile_scale: u16,
}

impl MarkerExtractor {
    pub fn new(width: u16, height: u16, tile_scale: u16) -> Self {
        Self {
            width,
            height,
            tile_scale: tile_scale.max(1),
        }
    }

    pub fn extract(&self, record: &UnitRecord) -> UnitOutcome {
        let x = record.x / self.tile_scale;
        let y = record.y / self.tile_scale;

        let marker = match record.unit_type {
            GOLDMINE => Marker::with_amount(
                MarkerCategory::Goldmine,
                x,
                y,
                gold_amount(record.data as u32),
            ),
            OIL_PLATFORM => Marker::with_amount(MarkerCategory::Oil, x, y, record.data as u32),
            HUMAN_START | ORC_START if record.owner < 8 => {
                let faction = if record.unit_type == HUMAN_START {
                    Faction::Human
                } else {
                    Faction::Orc
                };
                Marker::player(x, y, record.owner, faction)
            }
            _ => return UnitOutcome::Ignored,
        };

        if marker.in_bounds(self.width, self.height) {
            UnitOutcome::Marker(marker)
        } else {
            UnitOutcome::OutOfBounds { x, y }
        }
    }
}
