//! Core of the ink mesh builder
//!
//! Triangle meshes are authored one point at a time: each point is snapped
//! onto the axes of the previous point and onto existing vertices, every third
//! point closes a triangle, and undo walks the history back one step at a
//! time. Finished meshes can be scaled and exported as STL.

pub mod anchor;
pub mod builder;
pub mod collab;
pub mod config;
pub mod constants;
pub mod export;
pub mod frame;
pub mod input;
pub mod mesh;
pub mod scale;
pub mod session;
pub mod snap;

pub use anchor::{AnchorError, AnchorHandle, AnchorId, AnchorStatus, AnchorTask};
pub use builder::{
    CommitOutcome, MeshBuilder, PendingPoint, PendingTriangle, PlacementState, UndoOutcome,
};
pub use collab::{
    AnchorService, Collaborators, HapticSink, MarkerId, NullHaptics, NullRenderer,
    PreviewRenderer,
};
pub use config::{AnchorConfig, BuilderConfig, ConfigError, HapticConfig};
pub use export::{
    ExportError, ExportOptions, StlFormat, encode_stl, export_stl_file, save_stl, write_stl,
};
pub use frame::SnapReferenceFrame;
pub use input::{ButtonEdge, Edge, InputEvent, InputSampler};
pub use mesh::{BoundingBox, IndexedMesh, MeshBuffer, MeshSource, VertexPolicy};
pub use session::{EventOutcome, Session};
pub use snap::{AxisSnap, find_nearest};
