//! Legacy chunked container decoding
//!
//! # Header
//!   Bytes 0-3:   Magic "TYPE"
//!   Bytes 4-7:   Declared total size (u32 LE)
//!   Bytes 8-11:  Type tag (e.g. "WAR2")
//!   Bytes 12-15: Type section length (u32, LE or BE, see below)
//!   Bytes 16+:   Type section body
//!
//! Producers disagree on the byte order of the type section length. It is
//! read little-endian first and accepted if within the sanity bound, then
//! big-endian, and otherwise a fixed fallback length is assumed.
//!
//! # Chunks
//!   Bytes 0-3: Tag (FourCC)
//!   Bytes 4-7: Body length (u32 LE)
//!   Bytes 8+:  Body
//!
//! Iteration stops when fewer than 8 bytes remain or a body would run past
//! the end of the buffer; everything decoded up to that point is kept and
//! the model is flagged as truncated.

use tracing::{debug, trace, warn};

use super::reader::ByteCursor;
use super::units::{unit_name, MarkerExtractor, UnitOutcome, UnitRecord};
use crate::decoder::DecodeOptions;
use crate::error::{Error, Result};
use crate::events::{DecodeEvent, DecodeObserver, LengthByteOrder};
use crate::map::{compress_runs, ContainerHeader, MapModel, Marker, MarkerCategory};

pub const MAGIC: &[u8; 4] = b"TYPE";

const CHUNK_HEADER_SIZE: usize = 8;

/// Chunk tags with a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkTag {
    Version,
    Era,
    Dimensions,
    TileMatrix,
    Units,
    Owners,
    Description,
    Name,
    Author,
    GoldAmounts,
    OilAmounts,
    OilMap,
}

const CHUNK_TAGS: &[(&[u8; 4], ChunkTag)] = &[
    (b"VER ", ChunkTag::Version),
    (b"ERA ", ChunkTag::Era),
    (b"DIM ", ChunkTag::Dimensions),
    (b"MTXM", ChunkTag::TileMatrix),
    (b"UNIT", ChunkTag::Units),
    (b"OWNR", ChunkTag::Owners),
    (b"DESC", ChunkTag::Description),
    (b"NAME", ChunkTag::Name),
    (b"AUTH", ChunkTag::Author),
    (b"SGLD", ChunkTag::GoldAmounts),
    (b"SOIL", ChunkTag::OilAmounts),
    (b"OILM", ChunkTag::OilMap),
];

impl ChunkTag {
    fn from_bytes(tag: &[u8; 4]) -> Option<Self> {
        CHUNK_TAGS
            .iter()
            .find(|(bytes, _)| *bytes == tag)
            .map(|(_, chunk)| *chunk)
    }
}

fn tag_name(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

/// Resolve the type section length from its raw bytes
pub fn resolve_type_section_len(
    raw: [u8; 4],
    max_len: u32,
    fallback_len: usize,
) -> (usize, LengthByteOrder) {
    let le = u32::from_le_bytes(raw);
    if le <= max_len {
        return (le as usize, LengthByteOrder::LittleEndian);
    }
    let be = u32::from_be_bytes(raw);
    if be <= max_len {
        return (be as usize, LengthByteOrder::BigEndian);
    }
    (fallback_len, LengthByteOrder::Fallback)
}

pub fn decode(
    data: &[u8],
    options: &DecodeOptions,
    observer: &mut dyn DecodeObserver,
) -> Result<MapModel> {
    let mut cursor = ByteCursor::new(data);

    let magic = cursor.read_tag().map_err(|_| {
        Error::MalformedHeader(format!("need 4 magic bytes, have {}", data.len()))
    })?;
    if &magic != MAGIC {
        return Err(Error::MalformedHeader(format!(
            "expected magic {:?}, got {:?}",
            tag_name(MAGIC),
            tag_name(&magic)
        )));
    }

    let mut decoder = LegacyDecoder {
        options,
        observer,
        model: MapModel::default(),
        tiles: None,
    };
    decoder.read_header(&mut cursor)?;
    decoder.read_chunks(&mut cursor)?;
    Ok(decoder.finish())
}

struct LegacyDecoder<'a> {
    options: &'a DecodeOptions,
    observer: &'a mut dyn DecodeObserver,
    model: MapModel,
    /// Flat tile ids from the last terrain chunk
    tiles: Option<Vec<u16>>,
}

impl LegacyDecoder<'_> {
    fn read_header(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let truncated = |e: Error| Error::MalformedHeader(format!("header truncated: {e}"));

        let declared_size = cursor.read_u32_le().map_err(truncated)?;
        let type_tag = tag_name(&cursor.read_tag().map_err(truncated)?);
        debug!(%type_tag, declared_size, "legacy container header");
        self.observer.on_event(DecodeEvent::HeaderParsed {
            type_tag: type_tag.clone(),
            declared_size,
        });

        let raw_len = cursor.read_tag().map_err(truncated)?;
        let (length, byte_order) = resolve_type_section_len(
            raw_len,
            self.options.type_section_max_len,
            self.options.type_section_fallback_len,
        );
        match byte_order {
            LengthByteOrder::LittleEndian => trace!(length, "type section length"),
            LengthByteOrder::BigEndian => debug!(length, "type section length read big-endian"),
            LengthByteOrder::Fallback => {
                warn!(raw = ?raw_len, length, "implausible type section length, using fallback")
            }
        }
        self.observer.on_event(DecodeEvent::TypeSectionLength { length, byte_order });

        let available = length.min(cursor.remaining());
        if available < length {
            self.mark_truncated(cursor.position(), cursor.remaining());
        }
        let type_text = cursor.read_padded_string(available)?;
        if !type_text.starts_with("WAR2 MAP") {
            debug!(%type_text, "unexpected type section text");
        }

        self.model.header = Some(ContainerHeader {
            type_tag,
            declared_size,
            type_section_len: length,
            type_text,
        });
        Ok(())
    }

    fn read_chunks(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        while cursor.remaining() >= CHUNK_HEADER_SIZE {
            let offset = cursor.position();
            let tag = cursor.read_tag()?;
            let size = cursor.read_u32_le()?;

            if size as usize > cursor.remaining() {
                warn!(
                    tag = %tag_name(&tag),
                    size,
                    remaining = cursor.remaining(),
                    "chunk extends beyond end of buffer"
                );
                self.mark_truncated(offset, cursor.remaining() + CHUNK_HEADER_SIZE);
                return Ok(());
            }

            trace!(tag = %tag_name(&tag), size, offset, "chunk");
            self.observer.on_event(DecodeEvent::ChunkRead {
                tag: tag_name(&tag),
                size,
                offset,
            });

            let body = cursor.read_fixed_bytes(size as usize)?;
            self.apply_chunk(&tag, body);
        }

        if !cursor.is_empty() {
            debug!(remaining = cursor.remaining(), "partial chunk header at end of buffer");
            self.mark_truncated(cursor.position(), cursor.remaining());
        }
        Ok(())
    }

    fn mark_truncated(&mut self, offset: usize, remaining: usize) {
        self.model.truncated = true;
        self.observer.on_event(DecodeEvent::Truncated { offset, remaining });
    }

    fn apply_chunk(&mut self, tag: &[u8; 4], body: &[u8]) {
        let Some(chunk) = ChunkTag::from_bytes(tag) else {
            debug!(tag = %tag_name(tag), size = body.len(), "skipping unknown chunk");
            self.observer.on_event(DecodeEvent::UnknownChunk {
                tag: tag_name(tag),
                size: body.len() as u32,
            });
            return;
        };

        let mut cursor = ByteCursor::new(body);
        let result = match chunk {
            ChunkTag::Version => self.read_version(&mut cursor),
            ChunkTag::Era => self.read_era(&mut cursor),
            ChunkTag::Dimensions => self.read_dimensions(&mut cursor),
            ChunkTag::TileMatrix => self.read_tiles(&mut cursor),
            ChunkTag::Units => self.read_units(&mut cursor),
            ChunkTag::Owners => self.read_owners(&mut cursor),
            ChunkTag::Description => self.read_description(&mut cursor),
            ChunkTag::Name => self.read_name(&mut cursor),
            ChunkTag::Author => self.read_author(&mut cursor),
            ChunkTag::GoldAmounts | ChunkTag::OilAmounts => {
                trace!(tag = %tag_name(tag), size = body.len(), "resource amount chunk");
                Ok(())
            }
            ChunkTag::OilMap => self.read_oil_map(&mut cursor),
        };

        if let Err(e) = result {
            warn!(tag = %tag_name(tag), size = body.len(), error = %e, "malformed chunk ignored");
            self.observer.on_event(DecodeEvent::ChunkMalformed {
                tag: tag_name(tag),
                size: body.len() as u32,
            });
        }
    }

    fn read_version(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let version = cursor.read_u16_le()?;
        debug!(version, "map version");
        self.model.version = Some(version);
        Ok(())
    }

    fn read_era(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let era = cursor.read_u16_le()?;
        self.model.tileset = u8::try_from(era).unwrap_or(u8::MAX);
        debug!(era, tileset = self.model.tileset_name(), "tileset");
        Ok(())
    }

    fn read_dimensions(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let width = cursor.read_u16_le()?;
        let height = cursor.read_u16_le()?;
        debug!(width, height, "dimensions");
        self.model.width = width;
        self.model.height = height;
        Ok(())
    }

    fn read_tiles(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let count = (self.model.area() as usize).min(cursor.remaining() / 2);
        let mut tiles = Vec::with_capacity(count);
        for _ in 0..count {
            tiles.push(cursor.read_u16_le()?);
        }
        debug!(tiles = count, "terrain matrix");
        self.tiles = Some(tiles);
        Ok(())
    }

    fn read_units(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let extractor = MarkerExtractor::new(
            self.model.width,
            self.model.height,
            self.options.unit_tile_scale,
        );

        let count = cursor.remaining() / UnitRecord::SIZE;
        for _ in 0..count {
            let record = UnitRecord::read(cursor)?;
            match extractor.extract(&record) {
                UnitOutcome::Marker(marker) => {
                    trace!(
                        unit = unit_name(record.unit_type).unwrap_or("unknown"),
                        x = marker.x,
                        y = marker.y,
                        "unit marker"
                    );
                    self.model.markers.push(marker);
                }
                UnitOutcome::OutOfBounds { x, y } => {
                    warn!(unit_type = record.unit_type, x, y, "unit outside map, dropped");
                    self.observer.on_event(DecodeEvent::MarkerRejected {
                        x,
                        y,
                        width: self.model.width,
                        height: self.model.height,
                    });
                }
                UnitOutcome::Ignored => {}
            }
        }
        debug!(units = count, markers = self.model.markers.len(), "unit chunk");
        Ok(())
    }

    fn read_owners(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        if cursor.remaining() >= 8 {
            let max_players = cursor.read_u16_le()?;
            debug!(max_players, "player slots");
            self.model.max_players = Some(max_players);
        }
        Ok(())
    }

    fn read_description(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        self.model.description = Some(cursor.read_padded_string(cursor.remaining())?);
        Ok(())
    }

    fn read_name(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let name = cursor.read_padded_string(cursor.remaining())?;
        if !name.is_empty() {
            debug!(%name, "map name");
            self.model.name = Some(name);
        }
        Ok(())
    }

    fn read_author(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let author = cursor.read_padded_string(cursor.remaining())?;
        if !author.is_empty() {
            self.model.author = Some(author);
        }
        Ok(())
    }

    /// One bit per tile, LSB first; only a body of exactly `ceil(area / 8)`
    /// bytes is read as a bitmap.
    fn read_oil_map(&mut self, cursor: &mut ByteCursor) -> Result<()> {
        let area = self.model.area() as usize;
        let expected = area.div_ceil(8);
        if cursor.remaining() != expected {
            trace!(size = cursor.remaining(), expected, "oil chunk is not a tile bitmap");
            return Ok(());
        }

        let width = self.model.width as usize;
        let bitmap = cursor.read_remaining();
        for index in 0..area {
            if bitmap[index / 8] & (1 << (index % 8)) == 0 {
                continue;
            }
            let x = (index % width) as u16;
            let y = (index / width) as u16;
            self.model.markers.push(Marker::with_amount(
                MarkerCategory::Oil,
                x,
                y,
                self.options.oil_bitmap_amount,
            ));
        }
        Ok(())
    }

    fn finish(mut self) -> MapModel {
        if let Some(tiles) = self.tiles.take() {
            self.model.terrain_runs = compress_runs(&tiles, self.model.width, self.model.tileset);
            self.observer.on_event(DecodeEvent::TerrainDecoded {
                tiles: tiles.len(),
                runs: self.model.terrain_runs.len(),
            });
        }
        self.model.refresh_stats();

        debug!(
            width = self.model.width,
            height = self.model.height,
            runs = self.model.terrain_runs.len(),
            markers = self.model.markers.len(),
            truncated = self.model.truncated,
            "legacy container decoded"
        );
        self.model
    }
}
