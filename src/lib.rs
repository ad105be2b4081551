pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{AppState, McpServer, ToolService};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;
pub use utils::error::{Result, TravelError};
