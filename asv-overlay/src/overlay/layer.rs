//! Couche "view" (point, polygone ou liste de segments envoyés par le véhicule)

use viewlink::{GeodeticPoint, LocalPoint, ParsedView, TangentFrame};

/// Couche view: remplacée en bloc à chaque message valide
#[derive(Debug, Clone, Default)]
pub struct ViewLayer {
    active: bool,
    geodetic: Vec<GeodeticPoint>,
    local: Vec<LocalPoint>,
}

impl ViewLayer {
    /// Remplace le contenu depuis un message décodé
    ///
    /// `device` est le repère des points du message, `display` celui de
    /// l'affichage. Les points passent toujours par le géodésique.
    pub fn replace(&mut self, view: &ParsedView, device: &TangentFrame, display: &TangentFrame) {
        let geodetic: Vec<GeodeticPoint> =
            view.points().iter().map(|p| device.to_geodetic(p)).collect();
        let local = geodetic.iter().map(|g| display.to_local(g)).collect();

        self.active = view.active();
        self.geodetic = geodetic;
        self.local = local;
    }

    pub fn reproject(&mut self, display: &TangentFrame) {
        self.local = self.geodetic.iter().map(|g| display.to_local(g)).collect();
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Vrai si la couche doit être dessinée
    pub fn visible(&self) -> bool {
        self.active && !self.geodetic.is_empty()
    }

    pub fn geodetic(&self) -> &[GeodeticPoint] {
        &self.geodetic
    }

    pub fn local(&self) -> &[LocalPoint] {
        &self.local
    }
}
