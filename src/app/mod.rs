//! Application Layer

pub mod application;
