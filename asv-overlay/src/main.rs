//! Point d'entrée CLI pour asv-overlay

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Overlay véhicule / AIS / view et commandes de navigation
#[derive(Parser)]
#[command(name = "asv-overlay")]
#[command(author, version)]
#[command(about = "Rejoue les messages d'un véhicule de surface et exporte l'overlay en GeoJSON")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Replay {
            input,
            output,
            frame,
            config,
            display_origin,
            report,
        } => {
            info!(input = %input.display(), frame = ?frame, "Replay");
            cli::cmd_replay(
                &input,
                output.as_deref(),
                frame,
                config.as_deref(),
                display_origin.as_deref(),
                report.as_deref(),
            )
            .await?;
        }
        Commands::Parse { message } => cli::cmd_parse(&message)?,
        Commands::Project {
            origin,
            point,
            inverse,
        } => cli::cmd_project(&origin, &point, inverse)?,
        Commands::Waypoints { origin, points } => cli::cmd_waypoints(&origin, &points)?,
        Commands::Loiter { origin, point } => cli::cmd_loiter(&origin, &point)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Les commandes écrivent leur résultat sur stdout
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
