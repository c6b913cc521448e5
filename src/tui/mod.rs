//! Terminal UI.

mod app;
mod screens;

pub use app::run;
