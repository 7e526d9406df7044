//! Terminal presentation: gallery table, pair calculator and history chart

pub mod chart;
pub mod gallery;
pub mod pair;
pub mod setup;
pub mod ui;
