//! Configuration de l'overlay

use serde::{Deserialize, Serialize};
use std::path::Path;

use anyhow::{Context, Result};
use viewlink::GeodeticPoint;

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Nombre maximal de positions conservées pour la trace du véhicule
    pub location_history: usize,

    /// Nombre maximal de positions conservées par contact AIS
    pub contact_history: usize,

    /// Taille des triangles de cap, en mètres dans le repère d'affichage
    pub marker_size: f64,

    /// Origine du repère d'affichage. Absente: elle suit l'origine du véhicule
    pub display_origin: Option<OriginConfig>,

    /// Mode de barre annoncé au démarrage
    pub helm_mode: String,
}

/// Origine géodésique telle qu'écrite dans le fichier de configuration
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct OriginConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl From<OriginConfig> for GeodeticPoint {
    fn from(origin: OriginConfig) -> Self {
        GeodeticPoint::new(origin.latitude, origin.longitude, origin.altitude)
    }
}

impl From<GeodeticPoint> for OriginConfig {
    fn from(point: GeodeticPoint) -> Self {
        Self {
            latitude: point.latitude,
            longitude: point.longitude,
            altitude: point.altitude,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            location_history: 100,
            contact_history: 50,
            marker_size: 10.0,
            display_origin: None,
            helm_mode: "standby".to_string(),
        }
    }
}

impl OverlayConfig {
    /// Charge une configuration depuis un fichier JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Applique les variables d'environnement (après chargement du `.env`)
    ///
    /// - `OVERLAY_LOCATION_HISTORY`
    /// - `OVERLAY_CONTACT_HISTORY`
    /// - `OVERLAY_DISPLAY_ORIGIN` (`lat,lon[,alt]`)
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(limit) = env_parse("OVERLAY_LOCATION_HISTORY") {
            self.location_history = limit;
        }
        if let Some(limit) = env_parse("OVERLAY_CONTACT_HISTORY") {
            self.contact_history = limit;
        }
        if let Ok(origin) = std::env::var("OVERLAY_DISPLAY_ORIGIN") {
            let point = parse_geodetic(&origin).context("Invalid OVERLAY_DISPLAY_ORIGIN")?;
            self.display_origin = Some(point.into());
        }
        self.validate()?;
        Ok(self)
    }

    /// Origine d'affichage fixée par la configuration
    pub fn display_origin(&self) -> Option<GeodeticPoint> {
        self.display_origin.map(GeodeticPoint::from)
    }

    fn validate(&self) -> Result<()> {
        if self.location_history == 0 || self.contact_history == 0 {
            anyhow::bail!("History limits must be at least 1");
        }
        if !(self.marker_size.is_finite() && self.marker_size > 0.0) {
            anyhow::bail!("marker_size must be a positive number");
        }
        Ok(())
    }
}

fn env_parse(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse un point géodésique `lat,lon[,alt]` (degrés, mètres)
pub fn parse_geodetic(text: &str) -> Result<GeodeticPoint> {
    let values = parse_numbers(text)?;
    let point = match values.as_slice() {
        [lat, lon] => GeodeticPoint::new(*lat, *lon, 0.0),
        [lat, lon, alt] => GeodeticPoint::new(*lat, *lon, *alt),
        _ => anyhow::bail!("Expected lat,lon[,alt], got {:?}", text),
    };

    if !(-90.0..=90.0).contains(&point.latitude) || !(-180.0..=180.0).contains(&point.longitude) {
        anyhow::bail!("Coordinates out of range: {:?}", text);
    }
    Ok(point)
}

/// Parse un point local `x,y` (mètres)
pub fn parse_local(text: &str) -> Result<viewlink::LocalPoint> {
    match parse_numbers(text)?.as_slice() {
        [x, y] => Ok(viewlink::LocalPoint::new(*x, *y)),
        _ => anyhow::bail!("Expected x,y, got {:?}", text),
    }
}

fn parse_numbers(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid number {:?} in {:?}", v.trim(), text))
        })
        .collect()
}
