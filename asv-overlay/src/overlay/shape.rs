//! Formes de l'overlay dans le repère d'affichage (mètres, y vers le nord)

use geo::{Coord, LineString, Polygon};
use viewlink::LocalPoint;

/// Triangle de cap centré sur `location`
///
/// La pointe est à `scale` devant la position, la base à `scale / 2` derrière,
/// large de `scale`. Le cap est en degrés, sens horaire depuis le nord.
pub fn heading_marker(location: &LocalPoint, heading_degrees: f64, scale: f64) -> Polygon<f64> {
    let (sin_h, cos_h) = heading_degrees.to_radians().sin_cos();
    // Avant et tribord
    let forward = (sin_h, cos_h);
    let right = (cos_h, -sin_h);

    let at = |f: f64, r: f64| Coord {
        x: location.x + scale * (f * forward.0 + r * right.0),
        y: location.y + scale * (f * forward.1 + r * right.1),
    };

    let rear_left = at(-0.5, -0.5);
    Polygon::new(
        LineString::new(vec![rear_left, at(1.0, 0.0), at(-0.5, 0.5), rear_left]),
        vec![],
    )
}

/// Ligne passant par les points, `None` s'il y en a moins de deux
pub fn polyline(coords: Vec<Coord>) -> Option<LineString<f64>> {
    (coords.len() > 1).then(|| LineString::new(coords))
}

/// Polygone fermé, `None` s'il y a moins de trois sommets
pub fn closed_polygon(coords: Vec<Coord>) -> Option<Polygon<f64>> {
    if coords.len() < 3 {
        return None;
    }
    // geo referme l'anneau si nécessaire
    Some(Polygon::new(LineString::new(coords), vec![]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_marker_north() {
        let marker = heading_marker(&LocalPoint::new(0.0, 0.0), 0.0, 10.0);
        let coords: Vec<Coord> = marker.exterior().coords().copied().collect();
        assert_eq!(coords.len(), 4);
        // pointe vers le nord
        assert!((coords[1].x).abs() < 1e-9);
        assert!((coords[1].y - 10.0).abs() < 1e-9);
        // base derrière, de -5 à +5 en x
        assert!((coords[0].x + 5.0).abs() < 1e-9 && (coords[0].y + 5.0).abs() < 1e-9);
        assert!((coords[2].x - 5.0).abs() < 1e-9 && (coords[2].y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_marker_east() {
        let marker = heading_marker(&LocalPoint::new(100.0, 50.0), 90.0, 10.0);
        let tip = marker.exterior().coords().nth(1).copied().unwrap();
        assert!((tip.x - 110.0).abs() < 1e-9);
        assert!((tip.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert!(polyline(vec![Coord { x: 0.0, y: 0.0 }]).is_none());
        let two = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
        assert_eq!(polyline(two).unwrap().0.len(), 2);
    }

    #[test]
    fn test_closed_polygon() {
        let square = vec![
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 1.0 },
        ];
        assert!(closed_polygon(square[..2].to_vec()).is_none());
        let polygon = closed_polygon(square).unwrap();
        let ring = polygon.exterior();
        assert_eq!(ring.0.len(), 5);
        assert_eq!(ring.0.first(), ring.0.last());
    }
}
