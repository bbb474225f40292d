// UFO Shapes Dashboard - Core Library
// Exposes dataset loading, selection sync and chart rendering for the server and tests

pub mod category;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod render;
pub mod selector;

// HTTP surface only exists when the server feature is enabled
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use category::{capitalize, normalize_shape, CategorySet, SelectedCategory, ShapeOption, ALL};
pub use config::Config;
pub use dashboard::Dashboard;
pub use dataset::{load_csv, Dataset, SightingRecord};
pub use render::{aggregate, render, AggregateView, ChartSpec, ShapeCount, YearCount};
pub use selector::{
    resolve_from_choice, resolve_from_click, ClickEvent, ClickLabel, ClickOutcome, ClickPoint,
    SelectionError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
