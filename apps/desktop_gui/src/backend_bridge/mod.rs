//! Worker thread that talks to the analysis service on behalf of the UI.

pub mod commands;
pub mod runtime;
