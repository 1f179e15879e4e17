//! Types d'erreurs pour le crate viewlink

use thiserror::Error;

/// Erreurs pouvant survenir lors du décodage d'un message view ou d'une projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// Texte mal formé (champ, liste de points, nombre)
    #[error("Format error in {input:?}: {reason}")]
    Format { input: String, reason: String },

    /// Projection demandée avant qu'une origine ne soit connue
    #[error("No geodetic origin defined for projection")]
    NoOrigin,

    /// Message brut qui n'est pas de l'UTF-8 valide
    #[error("Invalid UTF-8 in view message")]
    InvalidUtf8,
}

impl ViewError {
    /// Crée une erreur de format avec contexte
    pub fn format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Vrai si l'erreur vient d'un appel hors séquence (pas d'origine),
    /// faux si le message lui-même est invalide
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoOrigin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = ViewError::format("(1,2,3)", "pair has 3 components");
        let msg = err.to_string();
        assert!(msg.contains("(1,2,3)"));
        assert!(msg.contains("3 components"));
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_no_origin_is_precondition() {
        assert!(ViewError::NoOrigin.is_precondition());
    }
}
