//! Définition de l'ellipsoïde de référence

/// Ellipsoïde WGS84
pub struct WGS84;

impl WGS84 {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub const A: f64 = 6378137.0;

    /// Aplatissement
    pub const F: f64 = 1.0 / 298.257223563;

    /// Demi-petit axe (rayon polaire) en mètres
    pub const B: f64 = Self::A * (1.0 - Self::F);

    /// Première excentricité au carré
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;

    /// Grande normale (rayon de courbure dans le premier vertical)
    #[inline]
    pub fn prime_vertical_radius(sin_lat: f64) -> f64 {
        Self::A / (1.0 - Self::E2 * sin_lat * sin_lat).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semi_minor_axis() {
        assert!((WGS84::B - 6356752.314245).abs() < 1e-3);
    }

    #[test]
    fn test_prime_vertical_radius() {
        // Équateur: N = a ; pôle: N = a² / b
        assert!((WGS84::prime_vertical_radius(0.0) - WGS84::A).abs() < 1e-9);
        let polar = WGS84::A * WGS84::A / WGS84::B;
        assert!((WGS84::prime_vertical_radius(1.0) - polar).abs() < 1e-3);
    }
}
