//! Listes de points `(x1,y1:x2,y2:...)`

use crate::types::LocalPoint;
use crate::ViewError;

/// Décode une liste de points délimitée
///
/// Le premier et le dernier caractère sont retirés sans vérifier qu'il s'agit
/// bien de parenthèses. Le résultat est complet ou absent : la première paire
/// invalide fait échouer toute la liste. Un intérieur vide (`()`) est une
/// paire sans composante, donc une erreur.
pub fn parse(text: &str) -> Result<Vec<LocalPoint>, ViewError> {
    let interior = strip_delimiters(text)
        .ok_or_else(|| ViewError::format(text, "point list is missing its delimiters"))?;

    interior
        .split(':')
        .map(|pair| parse_pair(text, pair))
        .collect()
}

/// Encode des points au format accepté par [`parse`] (au moins un point)
pub fn encode(points: &[LocalPoint]) -> String {
    let pairs: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
    format!("({})", pairs.join(":"))
}

fn strip_delimiters(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

fn parse_pair(list: &str, pair: &str) -> Result<LocalPoint, ViewError> {
    let mut tokens = pair.split(',');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(x), Some(y), None) => Ok(LocalPoint::new(
            parse_number(list, x)?,
            parse_number(list, y)?,
        )),
        _ => Err(ViewError::format(
            list,
            format!(
                "pair {:?} has {} components, expected 2",
                pair,
                pair.split(',').count()
            ),
        )),
    }
}

/// Parse un nombre de la liste (espaces tolérés autour)
#[inline]
pub(crate) fn parse_number(context: &str, token: &str) -> Result<f64, ViewError> {
    let trimmed = token.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    match fast_float::parse::<f64, _>(digits) {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ViewError::format(
            context,
            format!("{:?} is not a finite number", trimmed),
        )),
    }
}
