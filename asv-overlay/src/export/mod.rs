//! Export de l'overlay (GeoJSON)
//!
//! L'état est converti en features `geo` dans le repère choisi, puis écrit
//! par [`geojson`].

pub mod geojson;

use std::collections::BTreeMap;

use geo::{Coord, Geometry, MapCoords, MultiPoint, Point};
use viewlink::{GeodeticPoint, LocalPoint, TangentFrame, ViewError};

use crate::overlay::{shape, OverlayState, ViewKind};

/// Repère des coordonnées exportées
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFrame {
    /// Longitude/latitude WGS84 (EPSG:4326)
    #[default]
    Geodetic,
    /// Mètres dans le repère d'affichage
    Display,
}

/// Feature prête à écrire
#[derive(Debug, Clone)]
pub struct OverlayFeature {
    pub id: String,
    pub geometry: Geometry<f64>,
    pub properties: BTreeMap<String, String>,
}

impl OverlayFeature {
    fn new(id: impl Into<String>, layer: &str, geometry: impl Into<Geometry<f64>>) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("layer".to_string(), layer.to_string());
        Self {
            id: id.into(),
            geometry: geometry.into(),
            properties,
        }
    }

    fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }
}

/// Conversion vers le repère de sortie
struct Output {
    frame: ExportFrame,
    display: Option<TangentFrame>,
    marker_size: f64,
}

impl Output {
    fn geodetic(&self, point: &GeodeticPoint) -> Option<Coord> {
        match self.frame {
            ExportFrame::Geodetic => Some(Coord {
                x: point.longitude,
                y: point.latitude,
            }),
            ExportFrame::Display => self.display.map(|frame| {
                let local = frame.to_local(point);
                Coord {
                    x: local.x,
                    y: local.y,
                }
            }),
        }
    }

    /// Triangle de cap, construit dans le repère d'affichage
    fn marker(&self, at: &LocalPoint, heading: f64) -> Option<Geometry<f64>> {
        let display = self.display?;
        let polygon = shape::heading_marker(at, heading, self.marker_size);
        Some(match self.frame {
            ExportFrame::Display => Geometry::Polygon(polygon),
            ExportFrame::Geodetic => Geometry::Polygon(polygon.map_coords(|c| {
                let g = display.to_geodetic(&LocalPoint::new(c.x, c.y));
                Coord {
                    x: g.longitude,
                    y: g.latitude,
                }
            })),
        })
    }

    fn coords<'a>(&self, points: impl IntoIterator<Item = &'a GeodeticPoint>) -> Vec<Coord> {
        points.into_iter().filter_map(|p| self.geodetic(p)).collect()
    }
}

/// Convertit l'état en features
///
/// L'export dans le repère d'affichage exige une origine d'affichage.
pub fn collect_features(
    state: &OverlayState,
    frame: ExportFrame,
) -> Result<Vec<OverlayFeature>, ViewError> {
    let display = match frame {
        ExportFrame::Display => Some(state.display().frame()?),
        ExportFrame::Geodetic => state.display().frame().ok(),
    };
    let output = Output {
        frame,
        display,
        marker_size: state.config().marker_size,
    };

    let mut features = Vec::new();
    collect_vehicle(state, &output, &mut features);
    collect_contacts(state, &output, &mut features);
    collect_views(state, &output, &mut features);
    Ok(features)
}

fn collect_vehicle(state: &OverlayState, output: &Output, features: &mut Vec<OverlayFeature>) {
    let track = state.track();
    if let Some(line) = shape::polyline(output.coords(track.geodetic())) {
        features.push(
            OverlayFeature::new("vehicle_track", "vehicle_track", line).with("points", track.len()),
        );
    }

    let Some((location, local)) = track.last() else {
        return;
    };
    if let Some(coord) = output.geodetic(&location) {
        let mut vehicle = OverlayFeature::new("vehicle", "vehicle", Point::from(coord))
            .with("heading", format!("{:.1}", state.heading()))
            .with("active", state.active())
            .with("helm_mode", state.helm_mode());
        if let Some(status) = state.vehicle_status() {
            vehicle = vehicle
                .with("vehicle_state", status.vehicle_state)
                .with("reason", &status.vehicle_state_reason)
                .with("pilot_control", &status.pilot_control)
                .with("pilot_mode", status.ros_pilot_mode);
        }
        features.push(vehicle);
    }
    if let Some(marker) = output.marker(&local, state.heading()) {
        features.push(OverlayFeature::new("vehicle_heading", "vehicle_heading", marker));
    }
}

fn collect_contacts(state: &OverlayState, output: &Output, features: &mut Vec<OverlayFeature>) {
    for contact in state.contacts() {
        let id = format!("ais_{}", contact.mmsi);

        let coords = output.coords(contact.fixes().map(|fix| &fix.location));
        if let Some(line) = shape::polyline(coords) {
            features.push(
                OverlayFeature::new(format!("{}_track", id), "ais_track", line)
                    .with("mmsi", contact.mmsi),
            );
        }

        let Some(last) = contact.last() else {
            continue;
        };
        if let Some(coord) = output.geodetic(&last.location) {
            features.push(
                OverlayFeature::new(id.clone(), "ais", Point::from(coord))
                    .with("mmsi", contact.mmsi)
                    .with("name", &contact.name)
                    .with("heading", format!("{:.1}", last.heading)),
            );
        }
        if let Some(marker) = last.local.and_then(|l| output.marker(&l, last.heading)) {
            features.push(OverlayFeature::new(format!("{}_heading", id), "ais_heading", marker));
        }
    }
}

fn collect_views(state: &OverlayState, output: &Output, features: &mut Vec<OverlayFeature>) {
    for kind in [ViewKind::Point, ViewKind::Polygon, ViewKind::Seglist] {
        let Some(layer) = state.view(kind).filter(|layer| layer.visible()) else {
            continue;
        };
        let coords = output.coords(layer.geodetic());

        let geometry: Option<Geometry<f64>> = match kind {
            ViewKind::Point if coords.len() == 1 => Some(Point::from(coords[0]).into()),
            ViewKind::Point => Some(MultiPoint::from(coords).into()),
            ViewKind::Polygon => shape::closed_polygon(coords).map(Geometry::from),
            ViewKind::Seglist => shape::polyline(coords).map(Geometry::from),
        };
        if let Some(geometry) = geometry {
            features.push(
                OverlayFeature::new(kind.name(), kind.name(), geometry)
                    .with("points", layer.geodetic().len()),
            );
        }
    }
}
