//! Décodage complet d'un message view (point, polygone, liste de segments)

use tracing::trace;

use crate::parser::{fields, points};
use crate::types::{Fields, LocalPoint, ParsedView};
use crate::ViewError;

/// Drapeau d'activation (`"true"` active, toute autre valeur désactive)
pub const KEY_ACTIVE: &str = "active";
/// Abscisse d'un point isolé
pub const KEY_X: &str = "x";
/// Ordonnée d'un point isolé
pub const KEY_Y: &str = "y";
/// Liste de points `(x,y:x,y:...)`
pub const KEY_POINTS: &str = "pts";

/// Clés lues pour les points d'un message view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSource {
    /// `pts` si présent, sinon `x`/`y`
    Any,
    /// `x` et `y`: un point isolé (absents: aucun point)
    Coordinates,
    /// `pts`: liste obligatoire
    List,
}

/// Décode un message view
///
/// - `active` absent vaut `true`
/// - `pts` présent: liste de points (stricte)
/// - sinon `x` et `y`: un seul point
/// - sinon aucun point
///
/// Toute erreur de format rejette le message entier.
pub fn parse(text: &str) -> Result<ParsedView, ViewError> {
    parse_with(text, PointSource::Any)
}

/// Décode un message view en ne lisant que les clés de `source`
pub fn parse_with(text: &str, source: PointSource) -> Result<ParsedView, ViewError> {
    let fields = fields::parse(text);
    let active = active_flag(&fields);
    let points = match source {
        PointSource::Any if fields.contains_key(KEY_POINTS) => point_list(text, &fields)?,
        PointSource::Any | PointSource::Coordinates => coordinates(text, &fields)?,
        PointSource::List => point_list(text, &fields)?,
    };

    trace!(active, points = points.len(), "view message decoded");

    Ok(ParsedView::new(fields, active, points))
}

/// Décode un message view reçu sous forme d'octets
pub fn parse_bytes(data: &[u8]) -> Result<ParsedView, ViewError> {
    let text = simdutf8::basic::from_utf8(data).map_err(|_| ViewError::InvalidUtf8)?;
    parse(text)
}

fn active_flag(fields: &Fields) -> bool {
    fields
        .get(KEY_ACTIVE)
        .map_or(true, |value| value == "true")
}

fn point_list(text: &str, fields: &Fields) -> Result<Vec<LocalPoint>, ViewError> {
    match fields.get(KEY_POINTS) {
        Some(list) => points::parse(list),
        None => Err(ViewError::format(text, "missing point list")),
    }
}

fn coordinates(text: &str, fields: &Fields) -> Result<Vec<LocalPoint>, ViewError> {
    match (fields.get(KEY_X), fields.get(KEY_Y)) {
        (Some(x), Some(y)) => Ok(vec![LocalPoint::new(
            points::parse_number(text, x)?,
            points::parse_number(text, y)?,
        )]),
        (None, None) => Ok(Vec::new()),
        _ => Err(ViewError::format(text, "point needs both x and y")),
    }
}
