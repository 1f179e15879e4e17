//! Projecteur géodésique <-> plan local avec origine mobile

use tracing::debug;

use super::frame::TangentFrame;
use crate::types::{Enu, GeodeticPoint, LocalPoint};
use crate::ViewError;

/// Projecteur à origine mobile
///
/// L'origine est indéfinie à la création. Tant qu'elle n'est pas fixée, toute
/// projection échoue avec [`ViewError::NoOrigin`] au lieu de calculer par
/// rapport à (0, 0).
///
/// Changer l'origine ne reprojette rien: les points locaux calculés avant le
/// changement doivent être recalculés depuis leur géodésique.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeoProjector {
    frame: Option<TangentFrame>,
}

impl GeoProjector {
    /// Projecteur sans origine
    pub fn new() -> Self {
        Self::default()
    }

    /// Projecteur avec une origine déjà connue
    pub fn with_origin(origin: GeodeticPoint) -> Self {
        Self {
            frame: Some(TangentFrame::new(origin)),
        }
    }

    /// Remplace l'origine
    pub fn set_origin(&mut self, origin: GeodeticPoint) {
        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            altitude = origin.altitude,
            "projection origin updated"
        );
        self.frame = Some(TangentFrame::new(origin));
    }

    /// Oublie l'origine (retour à l'état initial)
    pub fn clear_origin(&mut self) {
        self.frame = None;
    }

    pub fn origin(&self) -> Option<GeodeticPoint> {
        self.frame.map(|frame| frame.origin())
    }

    pub fn has_origin(&self) -> bool {
        self.frame.is_some()
    }

    /// Repère courant, à copier pour projeter en parallèle
    pub fn frame(&self) -> Result<TangentFrame, ViewError> {
        self.frame.ok_or(ViewError::NoOrigin)
    }

    /// Géodésique -> plan local
    pub fn to_local(&self, point: &GeodeticPoint) -> Result<LocalPoint, ViewError> {
        Ok(self.frame()?.to_local(point))
    }

    /// Plan local -> géodésique (à la hauteur de l'origine)
    pub fn to_geodetic(&self, point: &LocalPoint) -> Result<GeodeticPoint, ViewError> {
        Ok(self.frame()?.to_geodetic(point))
    }

    /// Géodésique -> ENU complet
    pub fn to_enu(&self, point: &GeodeticPoint) -> Result<Enu, ViewError> {
        Ok(self.frame()?.to_enu(point))
    }

    /// ENU complet -> géodésique
    pub fn from_enu(&self, enu: &Enu) -> Result<GeodeticPoint, ViewError> {
        Ok(self.frame()?.from_enu(enu))
    }
}
