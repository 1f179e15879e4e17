//! Rejeu complet d'une courte mission jusqu'à l'export GeoJSON

use std::io::Cursor;

use asv_overlay::command::OutboundCommand;
use asv_overlay::export::geojson::write_geojson;
use asv_overlay::export::ExportFrame;
use asv_overlay::overlay::ViewKind;
use asv_overlay::replay::replay;
use asv_overlay::{OverlayConfig, OverlayState, ReplayReport, ReplayStatus};
use geojson::GeoJson;
use tokio::io::BufReader;
use viewlink::{GeodeticPoint, LocalPoint};

const MISSION: &str = r#"
# mission de test
{"topic":"view_point","data":"x=5,y=5"}
{"topic":"origin","latitude":43.0718,"longitude":-70.7626,"altitude":0.0}
{"topic":"position","latitude":43.0718,"longitude":-70.7626}
{"topic":"heading","heading":45.0}
{"topic":"position","latitude":43.0722,"longitude":-70.7621}
{"topic":"vehicle_status","vehicle_state":"active","vehicle_state_reason":"","pilot_control":"autonomous","ros_pilot_mode":"track_follow"}
{"topic":"ais","mmsi":367000001,"name":"GUNDALOW","latitude":43.075,"longitude":-70.755,"heading":-1.0,"cog":3.14159}
{"topic":"view_polygon","data":"pts=(0,0:200,0:200,200:0,200),active=true"}
{"topic":"view_seglist","data":"pts=(0,0:50,50:100,0),active=false"}
{"topic":"view_polygon","data":"pts=(0,0:200,0:200,200),active=true"}
{"topic":"view_polygon","data":"pts=(1,2:3),active=true"}
{"topic":"unknown_topic","data":"?"}
"#;

async fn replay_mission(config: OverlayConfig) -> (OverlayState, ReplayReport) {
    let mut state = OverlayState::new(config);
    let mut report = ReplayReport::new("mission");
    replay(BufReader::new(Cursor::new(MISSION)), &mut state, &mut report)
        .await
        .unwrap();
    report.finalize();
    (state, report)
}

#[tokio::test]
async fn test_mission_counts() {
    let (_, report) = replay_mission(OverlayConfig::default()).await;

    assert_eq!(report.status, ReplayStatus::PartialSuccess);
    assert_eq!(report.messages_deferred, 1);
    assert_eq!(report.by_topic["/udp/view_point"].deferred, 1);
    // Polygone à paire incomplète et topic inconnu
    assert_eq!(report.messages_rejected, 2);
    assert_eq!(report.messages_applied, 9);
}

#[tokio::test]
async fn test_mission_state() {
    let (state, _) = replay_mission(OverlayConfig::default()).await;

    assert_eq!(state.track().len(), 2);
    assert_eq!(state.heading(), 45.0);
    assert!(state.vehicle_status().is_some());

    let contact = state.contact(367000001).unwrap();
    assert_eq!(contact.name, "GUNDALOW");
    assert!((contact.last().unwrap().heading - 180.0).abs() < 1e-3);

    // Le second polygone (3 sommets) remplace le premier, le polygone rejeté ne touche à rien
    let polygon = state.view(ViewKind::Polygon).unwrap();
    assert_eq!(polygon.local().len(), 3);
    assert!(polygon.visible());

    let seglist = state.view(ViewKind::Seglist).unwrap();
    assert!(!seglist.visible());

    // view_point reçu avant l'origine: jamais dessiné
    assert!(state.view(ViewKind::Point).is_none());
}

#[tokio::test]
async fn test_pinned_display_moves_geometry() {
    let display_origin = GeodeticPoint::new(43.0718, -70.7640, 0.0);
    let config = OverlayConfig {
        display_origin: Some(display_origin.into()),
        ..OverlayConfig::default()
    };
    let (state, _) = replay_mission(config).await;

    // Origine véhicule ~114 m à l'est de l'affichage
    let polygon = state.view(ViewKind::Polygon).unwrap();
    let corner = polygon.local()[0];
    assert!((corner.x - 114.0).abs() < 1.0, "{:?}", corner);
    assert!(corner.y.abs() < 0.5, "{:?}", corner);

    // Waypoint choisi sur la carte: renvoyé dans le repère véhicule
    let command = state
        .send_display_waypoints(&[LocalPoint::new(corner.x + 10.0, corner.y)])
        .unwrap();
    let OutboundCommand::WaypointUpdates(text) = command else {
        panic!("Expected waypoint updates");
    };
    let x: f64 = text
        .trim_start_matches("points = ")
        .split(',')
        .next()
        .unwrap()
        .parse()
        .unwrap();
    assert!((x - 10.0).abs() < 1e-3, "{}", text);
}

#[tokio::test]
async fn test_mission_geojson() {
    let (state, _) = replay_mission(OverlayConfig::default()).await;

    let mut buffer = Vec::new();
    let count = write_geojson(&mut buffer, &state, ExportFrame::Geodetic).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let GeoJson::FeatureCollection(collection) = text.parse::<GeoJson>().unwrap() else {
        panic!("Expected FeatureCollection");
    };
    assert_eq!(collection.features.len(), count);

    let layers: Vec<&str> = collection
        .features
        .iter()
        .filter_map(|f| f.property("layer").and_then(|v| v.as_str()))
        .collect();
    assert!(layers.contains(&"vehicle_track"));
    assert!(layers.contains(&"vehicle"));
    assert!(layers.contains(&"ais"));
    assert!(layers.contains(&"view_polygon"));
    assert!(!layers.contains(&"view_seglist"));

    let vehicle = collection
        .features
        .iter()
        .find(|f| f.property("layer").and_then(|v| v.as_str()) == Some("vehicle"))
        .unwrap();
    assert_eq!(
        vehicle.property("pilot_mode").and_then(|v| v.as_str()),
        Some("track follow")
    );
}
