mod app;
mod cli;
pub mod config;
pub mod installer;
pub mod logging;
pub mod presenter;

pub use app::run_app;
pub use cli::{parse_channel_arg, Answer, Cli, Command};
