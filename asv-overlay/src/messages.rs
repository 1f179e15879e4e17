//! Messages entrants, déjà typés par la couche middleware
//!
//! Format de rejeu: une ligne JSON par message, étiquetée par `topic`.
//!
//! ```json
//! {"topic":"origin","latitude":43.0718,"longitude":-70.7626,"altitude":0.0}
//! {"topic":"view_polygon","data":"pts=(0,0:100,0:100,100),active=true"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use viewlink::GeodeticPoint;

/// Erreur de décodage d'une ligne du journal
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("line {line}: invalid message JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Position géodésique reçue (origine, position du véhicule)
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude: f64,
}

impl From<GeoFix> for GeodeticPoint {
    fn from(fix: GeoFix) -> Self {
        GeodeticPoint::new(fix.latitude, fix.longitude, fix.altitude)
    }
}

/// Contact AIS (cap et route fond en radians)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AisReport {
    pub mmsi: u32,
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Cap vrai, négatif si inconnu
    pub heading: f64,
    /// Route fond
    #[serde(default)]
    pub cog: f64,
}

impl AisReport {
    /// Cap affiché en degrés: le cap vrai, ou la route fond s'il est inconnu
    pub fn heading_degrees(&self) -> f64 {
        if self.heading < 0.0 {
            self.cog.to_degrees()
        } else {
            self.heading.to_degrees()
        }
    }
}

/// État du véhicule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleState {
    Reset,
    Initial,
    Config,
    Armed,
    Pause,
    Active,
    Recover,
    Manned,
    Emergency,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reset => "reset",
            Self::Initial => "initial",
            Self::Config => "config",
            Self::Armed => "armed",
            Self::Pause => "pause",
            Self::Active => "active",
            Self::Recover => "recover",
            Self::Manned => "manned",
            Self::Emergency => "emergency",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Mode du pilote ROS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotMode {
    NotInCommand,
    Inactive,
    Inhibited,
    DirectDrive,
    HeadingHold,
    SeekPosition,
    TrackFollow,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PilotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotInCommand => "not in command",
            Self::Inactive => "inactive",
            Self::Inhibited => "inhibited",
            Self::DirectDrive => "direct drive",
            Self::HeadingHold => "heading hold",
            Self::SeekPosition => "seek position",
            Self::TrackFollow => "track follow",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Statut du véhicule
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VehicleStatus {
    pub vehicle_state: VehicleState,
    #[serde(default)]
    pub vehicle_state_reason: String,
    #[serde(default)]
    pub pilot_control: String,
    pub ros_pilot_mode: PilotMode,
}

impl VehicleStatus {
    /// Lignes affichées dans le panneau de détails
    pub fn describe(&self) -> [String; 4] {
        [
            format!("vehicle state: {}", self.vehicle_state),
            format!("reason: {}", self.vehicle_state_reason),
            format!("pilot control: {}", self.pilot_control),
            format!("ros pilot mode: {}", self.ros_pilot_mode),
        ]
    }
}

/// Message entrant
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "topic", rename_all = "snake_case")]
pub enum InboundMessage {
    Origin(GeoFix),
    Position(GeoFix),
    Heading { heading: f64 },
    Ais(AisReport),
    VehicleStatus(VehicleStatus),
    ViewPoint { data: String },
    ViewPolygon { data: String },
    ViewSeglist { data: String },
}

impl InboundMessage {
    /// Topic middleware d'origine
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Origin(_) => "/udp/origin",
            Self::Position(_) => "/udp/position",
            Self::Heading { .. } => "/udp/heading",
            Self::Ais(_) => "/udp/ais",
            Self::VehicleStatus(_) => "/udp/vehicle_status",
            Self::ViewPoint { .. } => "/udp/view_point",
            Self::ViewPolygon { .. } => "/udp/view_polygon",
            Self::ViewSeglist { .. } => "/udp/view_seglist",
        }
    }
}

/// Décode une ligne du journal de rejeu
///
/// Les lignes vides et les commentaires (`#`) sont ignorés.
pub fn decode_line(line: usize, text: &str) -> Result<Option<InboundMessage>, MessageError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|source| MessageError::Json { line, source })
}
