//! Desktop shell: owns the state machine, executes effects, renders the view.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
