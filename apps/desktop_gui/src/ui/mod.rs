//! UI layer for the desktop GUI: app shell, screens, forms and toasts.

pub mod app;
pub mod forms;
pub mod panels;
pub mod toast;

pub use app::{CountriesApp, StartupConfig};
