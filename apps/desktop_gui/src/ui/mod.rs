//! UI layer for the desktop dashboard: app shell and panels.

pub mod app;
pub mod panels;

pub use app::DashboardApp;
