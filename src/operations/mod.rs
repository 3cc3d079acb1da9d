pub mod boolean_2d;
pub mod carve;
pub mod loop_clean;
pub mod offset_2d;

pub use boolean_2d::{combine, union_all, BooleanOp, Contour, FillRule};
pub use carve::{CarveRegions, RegionCut};
pub use loop_clean::{BoundaryLoop, LoopClean};
pub use offset_2d::PolygonOffset2D;
