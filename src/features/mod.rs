//! Features - Vertical Feature Slices

pub mod agenda;
