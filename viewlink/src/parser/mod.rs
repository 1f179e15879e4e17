//! Parsers pour les messages view

pub mod fields;
pub mod points;
pub mod view;
