//! Types de données pour le crate viewlink

use std::collections::BTreeMap;

/// Champs décodés d'un message view, triés par clé
pub type Fields = BTreeMap<String, String>;

/// Point géodésique WGS84
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeodeticPoint {
    /// Latitude en degrés
    pub latitude: f64,

    /// Longitude en degrés
    pub longitude: f64,

    /// Hauteur ellipsoïdale en mètres
    pub altitude: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// Point dans un plan tangent local, en mètres (x vers l'est, y vers le nord)
///
/// Un `LocalPoint` n'a de sens qu'avec l'origine qui l'a produit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position East-North-Up complète, en mètres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    /// Projection horizontale (on oublie `up`)
    pub fn horizontal(self) -> LocalPoint {
        LocalPoint::new(self.east, self.north)
    }
}

/// Résultat du décodage d'un message view
///
/// Valeur immuable reconstruite entièrement à chaque message : il n'existe pas
/// de mise à jour partielle à partir d'un `ParsedView` précédent.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedView {
    fields: Fields,
    active: bool,
    points: Vec<LocalPoint>,
}

impl ParsedView {
    pub(crate) fn new(fields: Fields, active: bool, points: Vec<LocalPoint>) -> Self {
        Self {
            fields,
            active,
            points,
        }
    }

    /// Tous les champs du message, y compris ceux qu'on ne connaît pas
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Valeur brute d'un champ
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn active(&self) -> bool {
        self.active
    }

    /// Points dans le repère local du véhicule
    pub fn points(&self) -> &[LocalPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<LocalPoint> {
        self.points
    }
}
