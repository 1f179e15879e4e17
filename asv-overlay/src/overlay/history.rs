//! Historiques bornés (trace du véhicule, contacts AIS)
//!
//! Le géodésique est la source de vérité. Les points locaux sont un cache
//! recalculé à chaque changement d'origine d'affichage.

use std::collections::VecDeque;

use rayon::prelude::*;
use viewlink::{GeodeticPoint, LocalPoint, TangentFrame};

/// Trace bornée: les positions les plus anciennes sont retirées en premier
#[derive(Debug, Clone)]
pub struct Track {
    limit: usize,
    geodetic: VecDeque<GeodeticPoint>,
    local: VecDeque<LocalPoint>,
}

impl Track {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            geodetic: VecDeque::with_capacity(limit),
            local: VecDeque::with_capacity(limit),
        }
    }

    /// Ajoute une position déjà projetée dans le repère d'affichage
    pub fn push(&mut self, point: GeodeticPoint, frame: &TangentFrame) {
        self.geodetic.push_back(point);
        self.local.push_back(frame.to_local(&point));
        while self.geodetic.len() > self.limit {
            self.geodetic.pop_front();
            self.local.pop_front();
        }
    }

    /// Recalcule tout le cache local pour un nouveau repère
    pub fn reproject(&mut self, frame: &TangentFrame) {
        self.local = self
            .geodetic
            .par_iter()
            .map(|p| frame.to_local(p))
            .collect::<Vec<_>>()
            .into();
    }

    pub fn len(&self) -> usize {
        self.geodetic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geodetic.is_empty()
    }

    pub fn geodetic(&self) -> impl Iterator<Item = &GeodeticPoint> {
        self.geodetic.iter()
    }

    pub fn local(&self) -> impl Iterator<Item = &LocalPoint> {
        self.local.iter()
    }

    pub fn last(&self) -> Option<(GeodeticPoint, LocalPoint)> {
        Some((*self.geodetic.back()?, *self.local.back()?))
    }
}

/// Position d'un contact AIS
#[derive(Debug, Clone, PartialEq)]
pub struct ContactFix {
    pub location: GeodeticPoint,
    /// Cap en degrés
    pub heading: f64,
    /// Position dans le repère d'affichage, absente tant qu'il n'y a pas d'origine
    pub local: Option<LocalPoint>,
}

/// Historique borné d'un contact AIS
#[derive(Debug, Clone)]
pub struct ContactTrack {
    pub mmsi: u32,
    pub name: String,
    limit: usize,
    fixes: VecDeque<ContactFix>,
}

impl ContactTrack {
    pub fn new(mmsi: u32, limit: usize) -> Self {
        Self {
            mmsi,
            name: String::new(),
            limit: limit.max(1),
            fixes: VecDeque::new(),
        }
    }

    pub fn push(&mut self, fix: ContactFix) {
        self.fixes.push_back(fix);
        while self.fixes.len() > self.limit {
            self.fixes.pop_front();
        }
    }

    pub fn reproject(&mut self, frame: &TangentFrame) {
        for fix in &mut self.fixes {
            fix.local = Some(frame.to_local(&fix.location));
        }
    }

    pub fn fixes(&self) -> impl Iterator<Item = &ContactFix> {
        self.fixes.iter()
    }

    pub fn last(&self) -> Option<&ContactFix> {
        self.fixes.back()
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }
}
