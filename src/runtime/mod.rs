//! Process runtime: configuration and the two transport loops.

mod config;
mod event;
mod server;

pub use config::{AdapterConfig, ConfigError, RunMode, DEFAULT_MAX_BODY_BYTES};
pub use event::{handle_event, EventRunner};
pub use server::HttpServer;
