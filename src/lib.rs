//! Forklore – an interactive explorer for restaurant listings datasets.
//!
//! The crate splits into a pure data core ([`data`]) and an egui
//! presentation layer ([`ui`], [`state`], [`app`]). The core loads a
//! tabular file, repairs the dirty `rate` and cost columns, applies
//! filter criteria and derives display statistics; everything it returns
//! is a fresh value, so front ends may cache results freely.

pub mod app;
pub mod color;
pub mod data;
pub mod state;
pub mod ui;
