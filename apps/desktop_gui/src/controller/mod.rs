//! Controller layer: UI events, session updates, and command orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
