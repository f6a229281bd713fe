//! Camera: orbit orientation state and transform composition.
//!
//! # Invariants
//! - Elevation is clamped to [-90, 90] degrees; it never wraps.
//! - Azimuth is wrapped into (-180, 180].
//! - Radius is clamped to the configured bounds.
//! - Orientation changes only through the documented operations, which
//!   report whether a redraw is needed.

pub mod orbit;
pub mod projection;

pub use orbit::OrbitCamera;
pub use projection::Projection;
