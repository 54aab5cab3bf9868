pub mod projection;
pub mod raycast;
pub mod sweep;

pub use projection::{ColorTag, FrameProjector, ProjectionConfig, WallSlice, correct_fisheye};
pub use raycast::{DEPTH_OF_FIELD, NO_HIT, Orientation, PhaseHit, RayHit, Raycaster};
pub use sweep::{ViewMode, cast_view, project_view};
