mod app;
mod effects;
mod logging;

pub use app::run_app;
