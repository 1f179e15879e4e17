//! Rejeu d'un journal de messages
//!
//! Une tâche lit et décode les lignes, la boucle principale est le seul
//! propriétaire de l'état et applique les messages dans l'ordre de lecture.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::messages::{decode_line, InboundMessage, MessageError};
use crate::overlay::OverlayState;
use crate::report::ReplayReport;

/// Messages décodés en avance sur l'application
const CHANNEL_CAPACITY: usize = 64;

enum Event {
    Message { line: usize, message: InboundMessage },
    Invalid { line: usize, error: MessageError },
    Failed { line: usize, error: String },
}

/// Rejoue toutes les lignes de `reader` sur `state`
///
/// Les messages invalides sont comptés dans `report` sans interrompre le
/// rejeu. Une erreur de lecture arrête le rejeu et est enregistrée comme fatale.
pub async fn replay<R>(reader: R, state: &mut OverlayState, report: &mut ReplayReport) -> Result<()>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Event>(CHANNEL_CAPACITY);
    let reader_task = tokio::spawn(read_lines(reader, tx));

    while let Some(event) = rx.recv().await {
        match event {
            Event::Message { line, message } => apply(state, report, line, message),
            Event::Invalid { line, error } => {
                warn!(line, error = %error, "undecodable message skipped");
                report.record_rejected(line, None, &error.to_string());
            }
            Event::Failed { line, error } => {
                warn!(line, error = %error, "replay input failed");
                report.record_fatal(line, &error);
            }
        }
    }

    reader_task.await.context("Replay reader task failed")?;
    Ok(())
}

/// Applique un message et enregistre le résultat
pub fn apply(state: &mut OverlayState, report: &mut ReplayReport, line: usize, message: InboundMessage) {
    let topic = message.topic();
    match state.handle(message) {
        Ok(()) => report.record_applied(topic),
        Err(err) if err.is_precondition() => {
            debug!(line, topic, "message ignored: {}", err);
            report.record_deferred(line, topic, &err.to_string());
        }
        Err(err) => {
            warn!(line, topic, error = %err, "message rejected");
            report.record_rejected(line, Some(topic), &err.to_string());
        }
    }
}

async fn read_lines<R>(reader: R, tx: mpsc::Sender<Event>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut line = 0;

    loop {
        line += 1;
        let (event, last) = match lines.next_line().await {
            Ok(Some(text)) => match decode_line(line, &text) {
                Ok(Some(message)) => (Event::Message { line, message }, false),
                Ok(None) => continue,
                Err(error) => (Event::Invalid { line, error }, false),
            },
            Ok(None) => break,
            Err(err) => (
                Event::Failed {
                    line,
                    error: err.to_string(),
                },
                true,
            ),
        };

        // Récepteur fermé: plus personne pour appliquer
        if tx.send(event).await.is_err() || last {
            break;
        }
    }
}
