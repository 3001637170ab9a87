//! Post-service earnings projection

mod engine;
mod params;
mod result;

pub use engine::{apply_projection, apply_projection_raw, EarningsProjector};
pub use params::{ProjectionParams, ProjectionWindow, RawProjectionParams};
pub use result::{CategoryTotal, Projection, ProjectionSummary};
