//! UI layer: the egui application and its widgets.

pub mod app;

pub use app::PredictorApp;
