//! Wire model shared between the dashboard core and its hosting shells.

pub mod domain;
pub mod error;
pub mod protocol;
