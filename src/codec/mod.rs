pub mod compact;
pub mod legacy;
pub mod reader;
pub mod units;
#[cfg(test)]
pub(crate) mod writer;

pub use reader::ByteCursor;
pub use legacy::{resolve_type_section_len, MAGIC};
pub use units::{gold_amount, unit_name, MarkerExtractor, UnitOutcome, UnitRecord};
