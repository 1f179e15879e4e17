//! Export vers GeoJSON avec geozero (streaming)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use geozero::geojson::GeoJsonWriter;
use geozero::GeozeroGeometry;
use tracing::info;

use super::{collect_features, ExportFrame, OverlayFeature};
use crate::overlay::OverlayState;

/// Exporte l'état de l'overlay dans un fichier GeoJSON
///
/// Retourne le nombre de features écrites.
pub fn export_to_geojson(
    state: &OverlayState,
    frame: ExportFrame,
    output_path: &Path,
) -> Result<usize> {
    let file = File::create(output_path)
        .context(format!("Failed to create file: {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    let count = write_geojson(&mut writer, state, frame)?;
    writer.flush()?;

    info!(path = %output_path.display(), features = count, "GeoJSON written");
    Ok(count)
}

/// Écrit l'état de l'overlay en FeatureCollection
pub fn write_geojson<W: Write>(
    writer: &mut W,
    state: &OverlayState,
    frame: ExportFrame,
) -> Result<usize> {
    let features = collect_features(state, frame)?;

    // Header FeatureCollection
    write!(writer, r#"{{"type":"FeatureCollection","#)?;
    match (frame, state.display().origin()) {
        (ExportFrame::Display, Some(origin)) => write!(
            writer,
            r#""origin":{{"latitude":{},"longitude":{},"altitude":{}}},"#,
            origin.latitude, origin.longitude, origin.altitude
        )?,
        _ => write!(
            writer,
            r#""crs":{{"type":"name","properties":{{"name":"urn:ogc:def:crs:EPSG::4326"}}}},"#
        )?,
    }
    write!(writer, r#""features":["#)?;

    for (i, feature) in features.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write_feature(writer, feature)?;
    }

    // Footer
    write!(writer, "]}}")?;
    Ok(features.len())
}

/// Écrit une feature en GeoJSON
fn write_feature<W: Write>(writer: &mut W, feature: &OverlayFeature) -> Result<()> {
    write!(
        writer,
        r#"{{"type":"Feature","id":{},"#,
        serde_json::to_string(&feature.id)?
    )?;

    write!(writer, r#""geometry":"#)?;
    let mut geom_buf = Vec::new();
    let mut geom_writer = GeoJsonWriter::new(&mut geom_buf);
    feature.geometry.process_geom(&mut geom_writer)?;
    writer.write_all(&geom_buf)?;

    write!(writer, r#","properties":{{"#)?;
    for (i, (key, value)) in feature.properties.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        serde_json::to_writer(&mut *writer, key)?;
        write!(writer, ":")?;
        serde_json::to_writer(&mut *writer, value)?;
    }
    write!(writer, "}}}}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::messages::{AisReport, GeoFix, InboundMessage};
    use ::geojson::{FeatureCollection, GeoJson};
    use geo::{Geometry, Point};
    use std::collections::BTreeMap;

    fn state() -> OverlayState {
        let mut state = OverlayState::new(OverlayConfig::default());
        state
            .handle(InboundMessage::Origin(GeoFix {
                latitude: 43.0718,
                longitude: -70.7626,
                altitude: 0.0,
            }))
            .unwrap();
        state
            .handle(InboundMessage::Position(GeoFix {
                latitude: 43.0718,
                longitude: -70.7626,
                altitude: 0.0,
            }))
            .unwrap();
        state
            .handle(InboundMessage::Ais(AisReport {
                mmsi: 367000001,
                name: "SAY \"HI\"".to_string(),
                latitude: 43.07,
                longitude: -70.76,
                heading: 0.5,
                cog: 0.0,
            }))
            .unwrap();
        state
            .handle(InboundMessage::ViewPolygon {
                data: "pts=(0,0:100,0:100,100:0,100),active=true".to_string(),
            })
            .unwrap();
        state
    }

    fn read_back(state: &OverlayState, frame: ExportFrame) -> FeatureCollection {
        let mut buffer = Vec::new();
        write_geojson(&mut buffer, state, frame).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        match text.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(collection) => collection,
            other => panic!("Expected FeatureCollection, got {:?}", other),
        }
    }

    #[test]
    fn test_write_feature() {
        let mut properties = BTreeMap::new();
        properties.insert("layer".to_string(), "test".to_string());
        let feature = OverlayFeature {
            id: "test_123".to_string(),
            geometry: Geometry::Point(Point::new(1.0, 2.0)),
            properties,
        };

        let mut buffer = Vec::new();
        write_feature(&mut buffer, &feature).unwrap();

        let json = String::from_utf8(buffer).unwrap();
        assert!(json.contains(r#""id":"test_123""#));
        assert!(json.contains(r#""type":"Feature""#));
        assert!(json.contains(r#""layer":"test""#));
    }

    #[test]
    fn test_properties_are_escaped() {
        let mut properties = BTreeMap::new();
        properties.insert("name".to_string(), "say \"hi\"\nback\\slash\u{1}".to_string());
        let feature = OverlayFeature {
            id: "quote\"id".to_string(),
            geometry: Geometry::Point(Point::new(1.0, 2.0)),
            properties,
        };

        let mut buffer = Vec::new();
        write_feature(&mut buffer, &feature).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed["id"], "quote\"id");
        assert_eq!(parsed["properties"]["name"], "say \"hi\"\nback\\slash\u{1}");
    }

    #[test]
    fn test_geodetic_collection_reads_back() {
        let collection = read_back(&state(), ExportFrame::Geodetic);

        let crs = collection.foreign_members.as_ref().and_then(|m| m.get("crs"));
        assert!(crs.unwrap().to_string().contains("EPSG::4326"));

        let ids: Vec<String> = collection
            .features
            .iter()
            .filter_map(|f| match &f.id {
                Some(::geojson::feature::Id::String(id)) => Some(id.clone()),
                _ => None,
            })
            .collect();
        assert!(ids.contains(&"vehicle".to_string()));
        assert!(ids.contains(&"vehicle_heading".to_string()));
        assert!(ids.contains(&"ais_367000001".to_string()));
        assert!(ids.contains(&"view_polygon".to_string()));

        let ais = collection
            .features
            .iter()
            .find(|f| f.property("layer").and_then(|v| v.as_str()) == Some("ais"))
            .unwrap();
        assert_eq!(
            ais.property("name").and_then(|v| v.as_str()),
            Some("SAY \"HI\"")
        );
    }

    #[test]
    fn test_display_collection_has_origin() {
        let collection = read_back(&state(), ExportFrame::Display);
        let origin = collection
            .foreign_members
            .as_ref()
            .and_then(|m| m.get("origin"))
            .unwrap();
        assert_eq!(origin["latitude"].as_f64(), Some(43.0718));

        let polygon = collection
            .features
            .iter()
            .find(|f| f.property("layer").and_then(|v| v.as_str()) == Some("view_polygon"))
            .unwrap();
        let ::geojson::Value::Polygon(rings) = &polygon.geometry.as_ref().unwrap().value else {
            panic!("Expected polygon");
        };
        assert_eq!(rings[0].len(), 5);
        assert!((rings[0][1][0] - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_export_to_geojson() {
        let output_path = std::env::temp_dir().join("test_asv_overlay.geojson");

        let count = export_to_geojson(&state(), ExportFrame::Geodetic, &output_path).unwrap();
        assert!(count >= 4);

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains(r#""type":"FeatureCollection""#));

        std::fs::remove_file(output_path).ok();
    }
}
