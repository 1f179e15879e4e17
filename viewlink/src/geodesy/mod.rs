//! Projection géodésique <-> plan tangent local (ENU) sur l'ellipsoïde WGS84
//!
//! Approximation valable pour une zone de travail de quelques dizaines de
//! kilomètres autour de l'origine.

pub mod ecef;
mod ellipsoid;
pub mod frame;
mod projector;

pub use ellipsoid::WGS84;
pub use frame::{relocate, TangentFrame};
pub use projector::GeoProjector;
