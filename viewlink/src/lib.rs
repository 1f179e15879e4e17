//! # viewlink
//!
//! Décodage des messages "view" envoyés par le véhicule et projection entre
//! coordonnées géodésiques WGS84 et plan tangent local.
//!
//! ## Features
//!
//! - Découpage `clé=valeur` tolérant aux listes de valeurs (`pts=(1,2:3,4),active=true`)
//! - Listes de points strictes (tout ou rien) avec `fast-float`
//! - Projection ENU ellipsoïdale à origine mobile, sans dépendance externe
//!
//! ## Usage
//!
//! ```rust
//! use viewlink::{GeoProjector, GeodeticPoint};
//!
//! let view = viewlink::parse_view("pts=(0,0:100,0:100,100),active=true")?;
//! let device = GeoProjector::with_origin(GeodeticPoint::new(43.0718, -70.7626, 0.0));
//!
//! for point in view.points() {
//!     let geo = device.to_geodetic(point)?;
//!     println!("{:.6}, {:.6}", geo.latitude, geo.longitude);
//! }
//! # Ok::<(), viewlink::ViewError>(())
//! ```

pub mod error;
pub mod geodesy;
pub mod parser;
pub mod types;

pub use error::ViewError;
pub use geodesy::{GeoProjector, TangentFrame};
pub use parser::view::PointSource;
pub use types::{Enu, Fields, GeodeticPoint, LocalPoint, ParsedView};

/// Décode les champs d'un message view (jamais d'erreur)
pub fn parse_fields(text: &str) -> Fields {
    parser::fields::parse(text)
}

/// Décode une liste de points `(x,y:x,y:...)` (tout ou rien)
pub fn parse_point_list(text: &str) -> Result<Vec<LocalPoint>, ViewError> {
    parser::points::parse(text)
}

/// Décode un message view complet: champs, drapeau `active` et points
pub fn parse_view(text: &str) -> Result<ParsedView, ViewError> {
    parser::view::parse(text)
}
