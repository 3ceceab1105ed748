//! RTS map decoder
//!
//! Decodes real-time-strategy map files into a renderer-agnostic
//! [`MapModel`]: dimensions, run-length encoded terrain, strategic markers
//! and terrain composition statistics.
//!
//! Two encodings are supported:
//! - the compact wire format ([`decode_compact`])
//! - the legacy chunked container with FourCC-tagged sections
//!   ([`decode_legacy_container`])
//!
//! Decoding is a pure in-memory transform. Progress and non-fatal
//! anomalies are logged with `tracing` and can also be observed through a
//! [`DecodeObserver`].

pub mod codec;
pub mod decoder;
pub mod error;
pub mod events;
pub mod map;

pub use error::{Error, Result};
pub use decoder::{DecodeOptions, Decoder, DecoderBuilder, MapFormat};
pub use events::{DecodeEvent, DecodeObserver, EventCollector, LengthByteOrder, OrdinalKind};
pub use map::{
    classify, compress_runs, expand_runs,
    ContainerHeader, Faction, MapModel, Marker, MarkerCategory,
    TerrainCategory, TerrainRun, TerrainStats, TileBreakdown, Tileset,
};

/// Error returned by the decode entry points
pub type DecodeError = Error;

/// Decode a compact-format map with default options
pub fn decode_compact(bytes: &[u8]) -> Result<MapModel> {
    Decoder::new().decode_compact(bytes)
}

/// Decode a legacy chunked container with default options
pub fn decode_legacy_container(bytes: &[u8]) -> Result<MapModel> {
    Decoder::new().decode_legacy_container(bytes)
}

/// Decode either format, detected from the leading magic
pub fn decode(bytes: &[u8]) -> Result<MapModel> {
    Decoder::new().decode(bytes)
}
