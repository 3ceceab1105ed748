#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("out of bounds at offset {offset}: need {need} bytes, have {have}")]
    OutOfBounds { need: usize, have: usize, offset: usize },
}

impl Error {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
