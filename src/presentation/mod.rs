pub mod cli;
pub mod config;

pub use cli::{Cli, Command, ErrorBody, TranslateResponse};
pub use config::{Environment, Settings};
