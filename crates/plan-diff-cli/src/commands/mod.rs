//! Command implementations for plan-diff-cli

pub mod render;
pub mod report;
pub mod show;

pub use render::run_render;
pub use report::run_report;
pub use show::run_show;
