/// Byte order the legacy type-section length was resolved with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthByteOrder {
    LittleEndian,
    BigEndian,
    /// Neither interpretation passed the sanity bound
    Fallback,
}

/// Which wire table an unknown ordinal came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdinalKind {
    Terrain,
    Marker,
}

/// Decode progress and non-fatal anomalies
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEvent {
    /// Legacy header accepted
    HeaderParsed {
        type_tag: String,
        declared_size: u32,
    },

    /// Type section length after byte-order resolution
    TypeSectionLength {
        length: usize,
        byte_order: LengthByteOrder,
    },

    /// Chunk header read and body available
    ChunkRead {
        tag: String,
        size: u32,
        offset: usize,
    },

    /// Chunk tag with no handler; body skipped
    UnknownChunk {
        tag: String,
        size: u32,
    },

    /// Chunk body too short for its handler; chunk ignored
    ChunkMalformed {
        tag: String,
        size: u32,
    },

    /// Chunk iteration stopped before the end of the buffer
    Truncated {
        offset: usize,
        remaining: usize,
    },

    /// Compact ordinal outside the known table; best-effort category used
    UnknownOrdinal {
        kind: OrdinalKind,
        value: u8,
    },

    /// Marker outside the map grid, not stored
    MarkerRejected {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },

    /// Flat terrain array decoded from the terrain chunk
    TerrainDecoded {
        tiles: usize,
        runs: usize,
    },
}

/// Receives decode events
pub trait DecodeObserver {
    fn on_event(&mut self, event: DecodeEvent);
}

/// Discards every event
impl DecodeObserver for () {
    fn on_event(&mut self, _event: DecodeEvent) {}
}

/// Simple event collector
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<DecodeEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[DecodeEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DecodeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl DecodeObserver for EventCollector {
    fn on_event(&mut self, event: DecodeEvent) {
        self.events.push(event);
    }
}
