//! Plan tangent local East-North-Up ancré sur une origine géodésique

use super::ecef::{self, Ecef};
use crate::types::{Enu, GeodeticPoint, LocalPoint};

/// Nombre maximal d'itérations pour retrouver le point à la hauteur de l'origine
const SURFACE_ITERATIONS: usize = 8;

/// Tolérance sur la hauteur (m) pour arrêter les itérations
const SURFACE_TOLERANCE: f64 = 1e-7;

/// Repère ENU figé pour une origine donnée
///
/// Valeur immuable et `Copy`: on peut la partager entre threads pour projeter
/// en parallèle tant que l'origine ne change pas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    origin: GeodeticPoint,
    origin_ecef: Ecef,
    sin_lat: f64,
    cos_lat: f64,
    sin_lon: f64,
    cos_lon: f64,
}

impl TangentFrame {
    /// Crée le repère tangent en `origin`
    pub fn new(origin: GeodeticPoint) -> Self {
        let (sin_lat, cos_lat) = origin.latitude.to_radians().sin_cos();
        let (sin_lon, cos_lon) = origin.longitude.to_radians().sin_cos();

        Self {
            origin,
            origin_ecef: ecef::from_geodetic(&origin),
            sin_lat,
            cos_lat,
            sin_lon,
            cos_lon,
        }
    }

    pub fn origin(&self) -> GeodeticPoint {
        self.origin
    }

    /// Géodésique -> ENU complet
    pub fn to_enu(&self, point: &GeodeticPoint) -> Enu {
        let p = ecef::from_geodetic(point);
        let dx = p.x - self.origin_ecef.x;
        let dy = p.y - self.origin_ecef.y;
        let dz = p.z - self.origin_ecef.z;

        Enu {
            east: -self.sin_lon * dx + self.cos_lon * dy,
            north: -self.sin_lat * self.cos_lon * dx - self.sin_lat * self.sin_lon * dy
                + self.cos_lat * dz,
            up: self.cos_lat * self.cos_lon * dx
                + self.cos_lat * self.sin_lon * dy
                + self.sin_lat * dz,
        }
    }

    /// ENU complet -> géodésique
    pub fn from_enu(&self, enu: &Enu) -> GeodeticPoint {
        let (e, n, u) = (enu.east, enu.north, enu.up);
        let dx = -self.sin_lon * e - self.sin_lat * self.cos_lon * n + self.cos_lat * self.cos_lon * u;
        let dy = self.cos_lon * e - self.sin_lat * self.sin_lon * n + self.cos_lat * self.sin_lon * u;
        let dz = self.cos_lat * n + self.sin_lat * u;

        ecef::to_geodetic(&Ecef::new(
            self.origin_ecef.x + dx,
            self.origin_ecef.y + dy,
            self.origin_ecef.z + dz,
        ))
    }

    /// Géodésique -> plan local (la composante verticale est ignorée)
    pub fn to_local(&self, point: &GeodeticPoint) -> LocalPoint {
        self.to_enu(point).horizontal()
    }

    /// Plan local -> géodésique
    ///
    /// Le point retourné est celui qui se projette en `point` et dont la hauteur
    /// ellipsoïdale est celle de l'origine. Pour un point à la hauteur de
    /// l'origine, `to_geodetic(to_local(p)) == p` à la précision flottante près.
    pub fn to_geodetic(&self, point: &LocalPoint) -> GeodeticPoint {
        // Le sol s'écarte du plan tangent d'environ d² / 2R
        let d2 = point.x * point.x + point.y * point.y;
        let mut enu = Enu::new(point.x, point.y, -d2 / (2.0 * self.origin_ecef_radius()));
        let mut geodetic = self.from_enu(&enu);

        for _ in 0..SURFACE_ITERATIONS {
            let dh = geodetic.altitude - self.origin.altitude;
            if dh.abs() < SURFACE_TOLERANCE {
                break;
            }
            enu.up -= dh;
            geodetic = self.from_enu(&enu);
        }

        geodetic
    }

    fn origin_ecef_radius(&self) -> f64 {
        let o = &self.origin_ecef;
        (o.x * o.x + o.y * o.y + o.z * o.z).sqrt()
    }
}

/// Change de repère un point local: `from` -> géodésique -> `to`
///
/// Les points locaux ne sont jamais mélangés entre origines sans repasser par
/// le géodésique.
pub fn relocate(point: &LocalPoint, from: &TangentFrame, to: &TangentFrame) -> LocalPoint {
    to.to_local(&from.to_geodetic(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> GeodeticPoint {
        GeodeticPoint::new(43.0718, -70.7626, 0.0)
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let frame = TangentFrame::new(origin());
        let local = frame.to_local(&origin());
        assert!(local.x.abs() < 1e-9 && local.y.abs() < 1e-9, "{:?}", local);
    }

    #[test]
    fn test_axes_orientation() {
        let frame = TangentFrame::new(origin());

        let north = frame.to_local(&GeodeticPoint::new(43.0818, -70.7626, 0.0));
        assert!(north.y > 1000.0 && north.x.abs() < 1e-6, "{:?}", north);

        let east = frame.to_local(&GeodeticPoint::new(43.0718, -70.7526, 0.0));
        assert!(east.x > 700.0 && east.y.abs() < 1.0, "{:?}", east);
    }

    #[test]
    fn test_one_minute_of_latitude_is_about_one_nautical_mile() {
        let frame = TangentFrame::new(GeodeticPoint::new(45.0, 0.0, 0.0));
        let local = frame.to_local(&GeodeticPoint::new(45.0 + 1.0 / 60.0, 0.0, 0.0));
        assert!((local.y - 1852.0).abs() < 5.0, "y={}", local.y);
    }

    #[test]
    fn test_local_roundtrip_is_exact() {
        let frame = TangentFrame::new(origin());
        for local in [
            LocalPoint::new(0.0, 0.0),
            LocalPoint::new(120.5, -33.25),
            LocalPoint::new(-25_000.0, 40_000.0),
        ] {
            let back = frame.to_local(&frame.to_geodetic(&local));
            assert!((back.x - local.x).abs() < 1e-6, "{:?}", back);
            assert!((back.y - local.y).abs() < 1e-6, "{:?}", back);
        }
    }

    #[test]
    fn test_geodetic_result_keeps_origin_height() {
        let frame = TangentFrame::new(GeodeticPoint::new(43.0718, -70.7626, 25.0));
        let geodetic = frame.to_geodetic(&LocalPoint::new(30_000.0, 30_000.0));
        assert!((geodetic.altitude - 25.0).abs() < 1e-6, "{:?}", geodetic);
    }

    #[test]
    fn test_enu_roundtrip_any_height() {
        let frame = TangentFrame::new(origin());
        let point = GeodeticPoint::new(43.3, -70.5, 350.0);
        let back = frame.from_enu(&frame.to_enu(&point));
        assert!((back.latitude - point.latitude).abs() < 1e-10);
        assert!((back.longitude - point.longitude).abs() < 1e-10);
        assert!((back.altitude - point.altitude).abs() < 1e-6);
    }

    #[test]
    fn test_relocate_between_frames() {
        let a = TangentFrame::new(origin());
        let b = TangentFrame::new(GeodeticPoint::new(43.08, -70.75, 0.0));

        let target = GeodeticPoint::new(43.075, -70.755, 0.0);
        let in_a = a.to_local(&target);
        let in_b = relocate(&in_a, &a, &b);
        let expected = b.to_local(&target);

        assert!((in_b.x - expected.x).abs() < 1e-6);
        assert!((in_b.y - expected.y).abs() < 1e-6);
    }
}
