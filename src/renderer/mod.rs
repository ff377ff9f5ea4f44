//! Draw-side helpers
//!
//! Nothing here touches the simulation: everything consumes a read-only
//! `Snapshot`. `shapes` builds colored triangles for a GPU pipeline and
//! `ascii` rasterizes the same frame for a terminal.

pub mod ascii;
pub mod shapes;
pub mod vertex;

pub use shapes::frame;
pub use vertex::Vertex;
