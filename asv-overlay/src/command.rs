//! Commandes sortantes vers le véhicule
//!
//! Les coordonnées sont toujours exprimées dans le repère local du véhicule
//! (celui de l'origine reçue sur `/udp/origin`).

use serde::Serialize;
use viewlink::{GeoProjector, GeodeticPoint, ViewError};

/// Commande prête à publier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutboundCommand {
    Active(bool),
    HelmMode(String),
    WaypointUpdates(String),
    LoiterUpdates(String),
}

impl OutboundCommand {
    /// Topic middleware de destination
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Active(_) => "/udp/active",
            Self::HelmMode(_) => "/udp/helm_mode",
            Self::WaypointUpdates(_) => "/udp/wpt_updates",
            Self::LoiterUpdates(_) => "/udp/loiter_updates",
        }
    }

    /// Contenu texte du message
    pub fn payload(&self) -> String {
        match self {
            Self::Active(active) => active.to_string(),
            Self::HelmMode(mode) | Self::WaypointUpdates(mode) | Self::LoiterUpdates(mode) => {
                mode.clone()
            }
        }
    }
}

/// Mise à jour de la liste de waypoints: `points = x, y:x, y:`
pub fn waypoint_updates(
    device: &GeoProjector,
    waypoints: &[GeodeticPoint],
) -> Result<OutboundCommand, ViewError> {
    let frame = device.frame()?;
    let mut updates = String::from("points = ");
    for waypoint in waypoints {
        let local = frame.to_local(waypoint);
        updates.push_str(&format!(
            "{:.6}, {:.6}:",
            unsigned_zero(local.x),
            unsigned_zero(local.y)
        ));
    }
    Ok(OutboundCommand::WaypointUpdates(updates))
}

/// Centre de loiter: `center_assign = x, y:`
pub fn loiter_update(
    device: &GeoProjector,
    location: &GeodeticPoint,
) -> Result<OutboundCommand, ViewError> {
    let local = device.to_local(location)?;
    Ok(OutboundCommand::LoiterUpdates(format!(
        "center_assign = {:.6}, {:.6}:",
        unsigned_zero(local.x),
        unsigned_zero(local.y)
    )))
}

/// Aller à un point: liste de waypoints réduite à un seul point
pub fn goto(device: &GeoProjector, location: &GeodeticPoint) -> Result<OutboundCommand, ViewError> {
    waypoint_updates(device, std::slice::from_ref(location))
}

/// `-0.0` s'afficherait `-0.000000`
#[inline]
fn unsigned_zero(value: f64) -> f64 {
    value + 0.0
}
