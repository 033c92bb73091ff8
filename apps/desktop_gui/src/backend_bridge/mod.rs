//! Worker thread that runs data source calls off the UI thread.

pub mod commands;
pub mod runtime;
