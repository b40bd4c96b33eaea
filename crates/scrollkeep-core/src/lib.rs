pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod scroll;

pub use commands::ScrollCommand;
pub use config::{AppConfig, KeymapConfig, ScrollConfig};
pub use error::{Error, Result};
pub use host::{EditorHost, TextView};
pub use memory::{MemoryDocument, MemoryHost, MemoryView};
