//! Définition et implémentation des commandes CLI
//!
//! - `replay`: journal JSONL → état de l'overlay → GeoJSON + rapport
//! - `parse`: décode une chaîne view
//! - `project`: conversion géodésique ↔ repère local
//! - `waypoints` / `loiter`: construit les commandes sortantes

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Subcommand;
use tokio::io::BufReader;
use tracing::info;

use asv_overlay::command;
use asv_overlay::config::{parse_geodetic, parse_local, OverlayConfig};
use asv_overlay::export::geojson::export_to_geojson;
use asv_overlay::export::ExportFrame;
use asv_overlay::overlay::OverlayState;
use asv_overlay::replay::replay;
use asv_overlay::report::{ReplayReport, ReplayStatus};
use viewlink::{GeoProjector, GeodeticPoint};

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a JSONL message log and export the resulting overlay
    Replay {
        /// Message log (one JSON message per line), `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output GeoJSON file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Coordinates of the exported features
        #[arg(long, value_enum, default_value_t = ExportFrame::Geodetic)]
        frame: ExportFrame,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pin the display origin (lat,lon[,alt])
        #[arg(long, allow_hyphen_values = true)]
        display_origin: Option<String>,

        /// Write the replay report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Parse a view string and print its fields and points as JSON
    Parse {
        /// View string, e.g. "pts=(0,0:10,0),active=true"
        message: String,
    },

    /// Project a point between geodetic and local coordinates
    Project {
        /// Frame origin (lat,lon[,alt])
        #[arg(long, allow_hyphen_values = true)]
        origin: String,

        /// Point: lat,lon[,alt] or x,y with --inverse
        #[arg(long, allow_hyphen_values = true)]
        point: String,

        /// Local x,y to geodetic
        #[arg(long)]
        inverse: bool,
    },

    /// Build a waypoint update for the vehicle
    Waypoints {
        /// Vehicle origin (lat,lon[,alt])
        #[arg(long, allow_hyphen_values = true)]
        origin: String,

        /// Waypoints (lat,lon), in order
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,
    },

    /// Build a loiter center update for the vehicle
    Loiter {
        /// Vehicle origin (lat,lon[,alt])
        #[arg(long, allow_hyphen_values = true)]
        origin: String,

        /// Loiter center (lat,lon)
        #[arg(long, allow_hyphen_values = true)]
        point: String,
    },
}

/// Exécute la commande replay
pub async fn cmd_replay(
    input: &Path,
    output: Option<&Path>,
    frame: ExportFrame,
    config_path: Option<&Path>,
    display_origin: Option<&str>,
    report_path: Option<&Path>,
) -> Result<()> {
    let started_at = Instant::now();

    let config = match config_path {
        Some(path) => OverlayConfig::load(path)?,
        None => OverlayConfig::default(),
    };
    let mut config = config.with_env_overrides()?;
    if let Some(text) = display_origin {
        config.display_origin = Some(parse_geodetic(text)?.into());
    }

    let source = input.display().to_string();
    let mut state = OverlayState::new(config);
    let mut report = ReplayReport::new(&source);

    if input == Path::new("-") {
        replay(BufReader::new(tokio::io::stdin()), &mut state, &mut report).await?;
    } else {
        let file = tokio::fs::File::open(input)
            .await
            .context(format!("Failed to open log: {}", input.display()))?;
        replay(BufReader::new(file), &mut state, &mut report).await?;
    }

    report.set_duration(started_at.elapsed());
    report.finalize();

    if let Some(output) = output {
        let count = export_to_geojson(&state, frame, output)?;
        println!("Exported {} features to {}", count, output.display());
    }

    if let Some(status) = state.vehicle_status() {
        for line in status.describe() {
            println!("{}", line);
        }
    }
    report.display();

    if let Some(path) = report_path {
        report
            .save_to_file(path)
            .context(format!("Failed to write report: {}", path.display()))?;
    }
    info!(summary = %report.summary(), "Replay finished");

    if report.status == ReplayStatus::Failed {
        anyhow::bail!("Replay failed: {}", report.summary());
    }
    Ok(())
}

/// Exécute la commande parse
pub fn cmd_parse(message: &str) -> Result<()> {
    let view = viewlink::parse_view(message)?;
    let points: Vec<[f64; 2]> = view.points().iter().map(|p| [p.x, p.y]).collect();
    let json = serde_json::json!({
        "fields": view.fields(),
        "active": view.active(),
        "points": points,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Exécute la commande project
pub fn cmd_project(origin: &str, point: &str, inverse: bool) -> Result<()> {
    let projector = GeoProjector::with_origin(parse_geodetic(origin)?);

    if inverse {
        let local = parse_local(point)?;
        let geodetic = projector.to_geodetic(&local)?;
        println!(
            "{:.9},{:.9},{:.3}",
            geodetic.latitude, geodetic.longitude, geodetic.altitude
        );
    } else {
        let geodetic = parse_geodetic(point)?;
        let enu = projector.to_enu(&geodetic)?;
        println!("{:.6},{:.6},{:.6}", enu.east, enu.north, enu.up);
    }
    Ok(())
}

/// Exécute la commande waypoints
pub fn cmd_waypoints(origin: &str, points: &[String]) -> Result<()> {
    let device = GeoProjector::with_origin(parse_geodetic(origin)?);
    let waypoints = points
        .iter()
        .map(|p| parse_geodetic(p))
        .collect::<Result<Vec<GeodeticPoint>>>()?;

    let update = command::waypoint_updates(&device, &waypoints)?;
    println!("{} {}", update.topic(), update.payload());
    Ok(())
}

/// Exécute la commande loiter
pub fn cmd_loiter(origin: &str, point: &str) -> Result<()> {
    let device = GeoProjector::with_origin(parse_geodetic(origin)?);
    let update = command::loiter_update(&device, &parse_geodetic(point)?)?;
    println!("{} {}", update.topic(), update.payload());
    Ok(())
}
