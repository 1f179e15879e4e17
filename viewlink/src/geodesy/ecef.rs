//! Conversions géodésique <-> ECEF (Earth-Centered, Earth-Fixed)

use super::ellipsoid::WGS84;
use crate::types::GeodeticPoint;

/// Position cartésienne géocentrique en mètres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ecef {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Ecef {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Convertit un point géodésique WGS84 en ECEF
pub fn from_geodetic(point: &GeodeticPoint) -> Ecef {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let n = WGS84::prime_vertical_radius(sin_lat);
    let h = point.altitude;

    Ecef {
        x: (n + h) * cos_lat * cos_lon,
        y: (n + h) * cos_lat * sin_lon,
        z: (n * (1.0 - WGS84::E2) + h) * sin_lat,
    }
}

/// Convertit une position ECEF en point géodésique WGS84 (itératif)
pub fn to_geodetic(ecef: &Ecef) -> GeodeticPoint {
    let e2 = WGS84::E2;
    let p = ecef.x.hypot(ecef.y);
    let lon = ecef.y.atan2(ecef.x);

    // Latitude initiale: approximation sphère aplatie
    let mut lat = ecef.z.atan2(p * (1.0 - e2));

    for _ in 0..10 {
        let sin_lat = lat.sin();
        let n = WGS84::prime_vertical_radius(sin_lat);
        let new_lat = (ecef.z + e2 * n * sin_lat).atan2(p);

        if (new_lat - lat).abs() < 1e-14 {
            lat = new_lat;
            break;
        }
        lat = new_lat;
    }

    // Forme valable aussi près des pôles (pas de division par cos(lat))
    let (sin_lat, cos_lat) = lat.sin_cos();
    let h = p * cos_lat + ecef.z * sin_lat - WGS84::A * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    GeodeticPoint::new(lat.to_degrees(), lon.to_degrees(), h)
}
