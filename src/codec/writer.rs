/// Byte writer used to build map fixtures in tests
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn write_u8(&mut self, v: u8) -> &mut Self {
        self.data.push(v);
        self
    }

    pub fn write_u16_le(&mut self, v: u16) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u32_le(&mut self, v: u32) -> &mut Self {
        self.write_bytes(&v.to_le_bytes())
    }

    pub fn write_u32_be(&mut self, v: u32) -> &mut Self {
        self.write_bytes(&v.to_be_bytes())
    }

    /// Write a legacy container header: magic, total size, type tag,
    /// little-endian type-section length and the section body
    pub fn legacy_header(&mut self, type_section: &[u8]) -> &mut Self {
        self.write_bytes(b"TYPE")
            .write_u32_le(0)
            .write_bytes(b"WAR2")
            .write_u32_le(type_section.len() as u32)
            .write_bytes(type_section)
    }

    /// Write a tagged chunk with a little-endian length prefix
    pub fn chunk(&mut self, tag: &[u8; 4], body: &[u8]) -> &mut Self {
        self.write_bytes(tag)
            .write_u32_le(body.len() as u32)
            .write_bytes(body)
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode one 8-byte legacy unit record
pub fn unit_record(unit_type: u16, x: u16, y: u16, owner: u8, data: u8) -> [u8; 8] {
    let mut record = [0u8; 8];
    record[0..2].copy_from_slice(&unit_type.to_le_bytes());
    record[2..4].copy_from_slice(&x.to_le_bytes());
    record[4..6].copy_from_slice(&y.to_le_bytes());
    record[6] = owner;
    record[7] = data;
    record
}

/// Encode `width`/`height` as a `DIM ` chunk body
pub fn dim_body(width: u16, height: u16) -> Vec<u8> {
    let mut body = width.to_le_bytes().to_vec();
    body.extend_from_slice(&height.to_le_bytes());
    body
}

/// Encode tile ids as an `MTXM` chunk body
pub fn tiles_body(tiles: &[u16]) -> Vec<u8> {
    tiles.iter().flat_map(|t| t.to_le_bytes()).collect()
}
