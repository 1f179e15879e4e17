//! # asv-overlay
//!
//! Overlay cartographique d'un véhicule de surface autonome à partir des
//! messages du middleware: trace du véhicule, contacts AIS, couches view
//! (point, polygone, segments), et commandes de navigation en retour.
//!
//! ## Features
//!
//! - Rejeu d'un journal JSONL de messages (une tâche de lecture, un seul propriétaire de l'état)
//! - Double repère: véhicule et affichage, reprojection de l'historique
//! - Export GeoJSON en WGS84 ou en mètres
//! - Rapport de rejeu (messages appliqués, en attente, rejetés)
//!
//! ## Usage CLI
//!
//! ```bash
//! asv-overlay replay --input mission.jsonl --output overlay.geojson
//! asv-overlay parse "pts=(0,0:10,0:10,10),active=true"
//! asv-overlay waypoints --origin 43.0718,-70.7626 43.072,-70.762 43.073,-70.761
//! ```

pub mod command;
pub mod config;
pub mod export;
pub mod messages;
pub mod overlay;
pub mod replay;
pub mod report;

pub use config::OverlayConfig;
pub use overlay::OverlayState;
pub use report::{ReplayReport, ReplayStatus};
