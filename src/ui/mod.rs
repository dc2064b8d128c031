// Module declarations
mod app;
pub mod bindings;
pub mod dashboard;
pub mod form;
// Re-exports for external use
pub use app::{App, UIConfig, run};
