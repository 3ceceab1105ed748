pub mod markers;
pub mod model;
pub mod runs;
pub mod stats;
pub mod terrain;

pub use markers::{label_for, Faction, Marker, MarkerCategory};
pub use model::{ContainerHeader, MapModel};
pub use runs::{compress_runs, expand_runs, TerrainRun};
pub use stats::{terrain_breakdown, TerrainStats, TileBreakdown};
pub use terrain::{classify, TerrainCategory, Tileset};
