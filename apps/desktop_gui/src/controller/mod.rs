//! Controller layer between egui widgets and the backend worker.

pub mod events;
pub mod orchestration;
pub mod reducer;
