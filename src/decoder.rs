use crate::codec::{compact, legacy};
use crate::error::Result;
use crate::events::DecodeObserver;
use crate::map::MapModel;

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Pixel units per tile for legacy unit coordinates
    pub unit_tile_scale: u16,
    /// Largest plausible legacy type-section length
    pub type_section_max_len: u32,
    /// Length assumed when neither byte order yields a plausible value
    pub type_section_fallback_len: usize,
    /// Amount attached to oil markers from the oil bitmap chunk
    pub oil_bitmap_amount: u32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unit_tile_scale: 32,
            type_section_max_len: 1000,
            type_section_fallback_len: 8,
            oil_bitmap_amount: 2500,
        }
    }
}

/// Builder for creating decoders
#[derive(Debug, Default)]
pub struct DecoderBuilder {
    options: DecodeOptions,
}

impl DecoderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn unit_tile_scale(mut self, scale: u16) -> Self {
        self.options.unit_tile_scale = scale.max(1);
        self
    }

    pub fn type_section_max_len(mut self, max_len: u32) -> Self {
        self.options.type_section_max_len = max_len;
        self
    }

    pub fn type_section_fallback_len(mut self, len: usize) -> Self {
        self.options.type_section_fallback_len = len;
        self
    }

    pub fn oil_bitmap_amount(mut self, amount: u32) -> Self {
        self.options.oil_bitmap_amount = amount;
        self
    }

    pub fn build(self) -> Decoder {
        Decoder { options: self.options }
    }
}

/// Map encodings the decoder understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFormat {
    Compact,
    LegacyContainer,
}

impl MapFormat {
    /// Legacy containers start with a fixed magic; anything else is
    /// treated as the compact format.
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(legacy::MAGIC) {
            Self::LegacyContainer
        } else {
            Self::Compact
        }
    }
}

/// Stateless map decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn decode_compact(&self, data: &[u8]) -> Result<MapModel> {
        self.decode_compact_with_observer(data, &mut ())
    }

    pub fn decode_compact_with_observer(
        &self,
        data: &[u8],
        observer: &mut dyn DecodeObserver,
    ) -> Result<MapModel> {
        compact::decode(data, observer)
    }

    pub fn decode_legacy_container(&self, data: &[u8]) -> Result<MapModel> {
        self.decode_legacy_container_with_observer(data, &mut ())
    }

    pub fn decode_legacy_container_with_observer(
        &self,
        data: &[u8],
        observer: &mut dyn DecodeObserver,
    ) -> Result<MapModel> {
        legacy::decode(data, &self.options, observer)
    }

    /// Decode either format, chosen by [`MapFormat::detect`]
    pub fn decode(&self, data: &[u8]) -> Result<MapModel> {
        self.decode_with_observer(data, &mut ())
    }

    pub fn decode_with_observer(
        &self,
        data: &[u8],
        observer: &mut dyn DecodeObserver,
    ) -> Result<MapModel> {
        match MapFormat::detect(data) {
            MapFormat::Compact => self.decode_compact_with_observer(data, observer),
            MapFormat::LegacyContainer => self.decode_legacy_container_with_observer(data, observer),
        }
    }
}
