//! État de l'overlay: véhicule, contacts AIS, couches view, commandes
//!
//! Un seul propriétaire modifie cet état. Les messages arrivent de façon
//! asynchrone mais sont appliqués un par un (voir [`crate::replay`]).

pub mod history;
pub mod layer;
pub mod shape;

use std::collections::BTreeMap;

use tracing::{debug, info};
use viewlink::{GeoProjector, GeodeticPoint, LocalPoint, PointSource, ViewError};

use crate::command::{self, OutboundCommand};
use crate::config::OverlayConfig;
use crate::messages::{AisReport, InboundMessage, VehicleStatus};

pub use history::{ContactFix, ContactTrack, Track};
pub use layer::ViewLayer;

/// Quelle couche view un message met à jour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ViewKind {
    Point,
    Polygon,
    Seglist,
}

impl ViewKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "view_point",
            Self::Polygon => "view_polygon",
            Self::Seglist => "view_seglist",
        }
    }

    /// Un point se lit sur `x`/`y`, polygone et segments sur `pts`
    pub fn source(self) -> PointSource {
        match self {
            Self::Point => PointSource::Coordinates,
            Self::Polygon | Self::Seglist => PointSource::List,
        }
    }
}

/// État complet de l'overlay
#[derive(Debug)]
pub struct OverlayState {
    config: OverlayConfig,
    /// Repère du véhicule (origine reçue du middleware)
    device: GeoProjector,
    /// Repère d'affichage
    display: GeoProjector,
    /// Origine d'affichage imposée par la configuration
    display_pinned: bool,
    track: Track,
    heading: f64,
    contacts: BTreeMap<u32, ContactTrack>,
    views: BTreeMap<ViewKind, ViewLayer>,
    vehicle_status: Option<VehicleStatus>,
    active: bool,
    helm_mode: String,
}

impl OverlayState {
    pub fn new(config: OverlayConfig) -> Self {
        let mut display = GeoProjector::new();
        let display_pinned = match config.display_origin() {
            Some(origin) => {
                display.set_origin(origin);
                true
            }
            None => false,
        };

        Self {
            track: Track::new(config.location_history),
            helm_mode: config.helm_mode.clone(),
            config,
            device: GeoProjector::new(),
            display,
            display_pinned,
            heading: 0.0,
            contacts: BTreeMap::new(),
            views: BTreeMap::new(),
            vehicle_status: None,
            active: false,
        }
    }

    /// Applique un message entrant
    ///
    /// - `ViewError::Format`: message rejeté, l'état est inchangé
    /// - `ViewError::NoOrigin`: rien à dessiner pour l'instant, état inchangé
    pub fn handle(&mut self, message: InboundMessage) -> Result<(), ViewError> {
        match message {
            InboundMessage::Origin(fix) => {
                self.update_origin(fix.into());
                Ok(())
            }
            InboundMessage::Position(fix) => self.update_location(fix.into()),
            InboundMessage::Heading { heading } => {
                self.heading = heading;
                Ok(())
            }
            InboundMessage::Ais(report) => {
                self.add_contact(&report);
                Ok(())
            }
            InboundMessage::VehicleStatus(status) => {
                debug!(state = %status.vehicle_state, mode = %status.ros_pilot_mode, "vehicle status");
                self.vehicle_status = Some(status);
                Ok(())
            }
            InboundMessage::ViewPoint { data } => self.update_view(ViewKind::Point, &data),
            InboundMessage::ViewPolygon { data } => self.update_view(ViewKind::Polygon, &data),
            InboundMessage::ViewSeglist { data } => self.update_view(ViewKind::Seglist, &data),
        }
    }

    /// Nouvelle origine du véhicule
    pub fn update_origin(&mut self, origin: GeodeticPoint) {
        self.device.set_origin(origin);
        if !self.display_pinned {
            self.move_display(origin);
        }
    }

    /// Fixe l'origine d'affichage et reprojette tout l'historique
    pub fn set_display_origin(&mut self, origin: GeodeticPoint) {
        self.display_pinned = true;
        self.move_display(origin);
    }

    fn move_display(&mut self, origin: GeodeticPoint) {
        if self.display.origin() == Some(origin) {
            return;
        }
        self.display.set_origin(origin);
        let frame = match self.display.frame() {
            Ok(frame) => frame,
            Err(_) => return,
        };

        self.track.reproject(&frame);
        for contact in self.contacts.values_mut() {
            contact.reproject(&frame);
        }
        for layer in self.views.values_mut() {
            layer.reproject(&frame);
        }
        info!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            track = self.track.len(),
            contacts = self.contacts.len(),
            "display origin moved, overlay reprojected"
        );
    }

    /// Position du véhicule, ignorée tant qu'il n'y a pas d'origine
    pub fn update_location(&mut self, location: GeodeticPoint) -> Result<(), ViewError> {
        self.device.frame()?;
        let display = self.display.frame()?;
        self.track.push(location, &display);
        Ok(())
    }

    pub fn add_contact(&mut self, report: &AisReport) {
        let location = GeodeticPoint::new(report.latitude, report.longitude, 0.0);
        let local = self.display.to_local(&location).ok();
        let limit = self.config.contact_history;

        let contact = self
            .contacts
            .entry(report.mmsi)
            .or_insert_with(|| ContactTrack::new(report.mmsi, limit));
        contact.name = report.name.clone();
        contact.push(ContactFix {
            location,
            heading: report.heading_degrees(),
            local,
        });
    }

    /// Remplace une couche view depuis le texte du message
    ///
    /// Le message est décodé entièrement avant de toucher à la couche.
    pub fn update_view(&mut self, kind: ViewKind, data: &str) -> Result<(), ViewError> {
        let view = viewlink::parser::view::parse_with(data, kind.source())?;
        let device = self.device.frame()?;
        let display = self.display.frame()?;

        self.views.entry(kind).or_default().replace(&view, &device, &display);
        debug!(view = kind.name(), active = view.active(), points = view.points().len(), "view updated");
        Ok(())
    }

    /// Active ou désactive le véhicule
    pub fn set_active(&mut self, active: bool) -> OutboundCommand {
        self.active = active;
        OutboundCommand::Active(active)
    }

    pub fn set_helm_mode(&mut self, mode: &str) -> OutboundCommand {
        self.helm_mode = mode.to_string();
        OutboundCommand::HelmMode(self.helm_mode.clone())
    }

    pub fn send_waypoints(&self, waypoints: &[GeodeticPoint]) -> Result<OutboundCommand, ViewError> {
        command::waypoint_updates(&self.device, waypoints)
    }

    /// Waypoints choisis sur la carte (repère d'affichage)
    pub fn send_display_waypoints(
        &self,
        picked: &[LocalPoint],
    ) -> Result<OutboundCommand, ViewError> {
        let display = self.display.frame()?;
        let waypoints: Vec<GeodeticPoint> = picked.iter().map(|p| display.to_geodetic(p)).collect();
        self.send_waypoints(&waypoints)
    }

    pub fn send_loiter(&self, location: &GeodeticPoint) -> Result<OutboundCommand, ViewError> {
        command::loiter_update(&self.device, location)
    }

    pub fn send_goto(&self, location: &GeodeticPoint) -> Result<OutboundCommand, ViewError> {
        command::goto(&self.device, location)
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn device(&self) -> &GeoProjector {
        &self.device
    }

    pub fn display(&self) -> &GeoProjector {
        &self.display
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Cap du véhicule en degrés
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn contacts(&self) -> impl Iterator<Item = &ContactTrack> {
        self.contacts.values()
    }

    pub fn contact(&self, mmsi: u32) -> Option<&ContactTrack> {
        self.contacts.get(&mmsi)
    }

    pub fn view(&self, kind: ViewKind) -> Option<&ViewLayer> {
        self.views.get(&kind)
    }

    pub fn vehicle_status(&self) -> Option<&VehicleStatus> {
        self.vehicle_status.as_ref()
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn helm_mode(&self) -> &str {
        &self.helm_mode
    }
}
