//! Rapport de rejeu avec graceful degradation
//!
//! Un message invalide ne stoppe pas le rejeu: il est compté, journalisé,
//! et l'état de l'overlay reste celui d'avant le message.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

/// Statut global du rejeu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReplayStatus {
    /// Tous les messages appliqués
    Success,
    /// Des messages rejetés ou en attente d'origine
    PartialSuccess,
    /// Aucun message appliqué, ou erreur fatale
    Failed,
}

/// Niveau de sévérité des erreurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorLevel {
    /// Lecture de l'entrée interrompue
    Fatal,
    /// Message rejeté
    Error,
    /// Message reçu trop tôt (pas encore d'origine)
    Warning,
}

/// Erreur de rejeu avec contexte
#[derive(Debug, Clone, Serialize)]
pub struct ReplayError {
    pub level: ErrorLevel,
    /// Numéro de ligne dans l'entrée (1-based)
    pub line: usize,
    /// Topic du message, absent si la ligne n'a pas pu être décodée
    pub topic: Option<String>,
    pub message: String,
}

/// Statistiques par topic
#[derive(Debug, Clone, Default, Serialize)]
pub struct TopicStats {
    pub applied: usize,
    pub deferred: usize,
    pub rejected: usize,
}

impl TopicStats {
    pub fn total(&self) -> usize {
        self.applied + self.deferred + self.rejected
    }
}

/// Rapport complet de rejeu
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Nom de la source (fichier ou `-`)
    pub source: String,
    pub duration_secs: f64,
    pub status: ReplayStatus,

    /// Lignes lues, hors lignes vides et commentaires
    pub lines_processed: usize,
    pub messages_applied: usize,
    pub messages_deferred: usize,
    pub messages_rejected: usize,

    pub by_topic: BTreeMap<String, TopicStats>,
    pub errors: Vec<ReplayError>,
}

impl Default for ReplayReport {
    fn default() -> Self {
        Self {
            source: String::new(),
            duration_secs: 0.0,
            status: ReplayStatus::Success,
            lines_processed: 0,
            messages_applied: 0,
            messages_deferred: 0,
            messages_rejected: 0,
            by_topic: BTreeMap::new(),
            errors: Vec::new(),
        }
    }
}

impl ReplayReport {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    /// Enregistre un message appliqué
    pub fn record_applied(&mut self, topic: &str) {
        self.lines_processed += 1;
        self.messages_applied += 1;
        self.by_topic.entry(topic.to_string()).or_default().applied += 1;
    }

    /// Enregistre un message ignoré faute d'origine
    pub fn record_deferred(&mut self, line: usize, topic: &str, message: &str) {
        self.lines_processed += 1;
        self.messages_deferred += 1;
        self.by_topic.entry(topic.to_string()).or_default().deferred += 1;
        self.errors.push(ReplayError {
            level: ErrorLevel::Warning,
            line,
            topic: Some(topic.to_string()),
            message: message.to_string(),
        });
    }

    /// Enregistre un message rejeté
    pub fn record_rejected(&mut self, line: usize, topic: Option<&str>, message: &str) {
        self.lines_processed += 1;
        self.messages_rejected += 1;
        if let Some(topic) = topic {
            self.by_topic.entry(topic.to_string()).or_default().rejected += 1;
        }
        self.errors.push(ReplayError {
            level: ErrorLevel::Error,
            line,
            topic: topic.map(str::to_string),
            message: message.to_string(),
        });
    }

    /// Enregistre une erreur qui interrompt la lecture
    pub fn record_fatal(&mut self, line: usize, message: &str) {
        self.errors.push(ReplayError {
            level: ErrorLevel::Fatal,
            line,
            topic: None,
            message: message.to_string(),
        });
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_secs = duration.as_secs_f64();
    }

    /// Détermine le statut final
    pub fn finalize(&mut self) {
        let has_fatal = self.errors.iter().any(|e| e.level == ErrorLevel::Fatal);
        let has_errors = !self.errors.is_empty();

        self.status = if has_fatal {
            ReplayStatus::Failed
        } else if !has_errors {
            ReplayStatus::Success
        } else if self.messages_applied > 0 {
            ReplayStatus::PartialSuccess
        } else {
            ReplayStatus::Failed
        };
    }

    /// Affiche le rapport sur la console
    pub fn display(&self) {
        println!("\n{}", "=".repeat(60));
        println!("REPLAY REPORT - {}", self.source);
        println!("{}", "=".repeat(60));

        println!("\nStatus: {:?}", self.status);
        println!("Duration: {:.2}s", self.duration_secs);

        println!("\n--- SUMMARY ---");
        println!(
            "Messages: {} read, {} applied, {} deferred, {} rejected",
            self.lines_processed,
            self.messages_applied,
            self.messages_deferred,
            self.messages_rejected
        );

        if !self.by_topic.is_empty() {
            println!("\n--- BY TOPIC ---");
            for (topic, stats) in &self.by_topic {
                println!(
                    "  {}: {} applied, {} deferred, {} rejected",
                    topic, stats.applied, stats.deferred, stats.rejected
                );
            }
        }

        if !self.errors.is_empty() {
            println!("\n--- ERRORS ({}) ---", self.errors.len());
            for e in self.errors.iter().take(20) {
                let topic = e.topic.as_deref().unwrap_or("?");
                println!("  {:?} [line {} {}] {}", e.level, e.line, topic, e.message);
            }
            if self.errors.len() > 20 {
                println!("  ... and {} more", self.errors.len() - 20);
            }
        }

        println!("\n{}", "=".repeat(60));
    }

    /// Sauvegarde le rapport en JSON
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Affichage compact pour le résumé
    pub fn summary(&self) -> String {
        format!(
            "{}: {} applied, {} deferred, {} rejected",
            self.source, self.messages_applied, self.messages_deferred, self.messages_rejected
        )
    }
}
