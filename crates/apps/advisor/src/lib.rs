//! Client side of the farm advisory app: map shell, chat widget, and the
//! HTTP backend they talk to.

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod loader;
pub mod session;
pub mod shell;

#[cfg(test)]
mod testing;

pub use backend::{BoxFuture, ChatApi, HttpBackend, MapApi};
pub use chat::{ChatContext, ChatMessage, ChatReply, ChatWidget};
pub use config::ClientConfig;
pub use error::ClientError;
pub use loader::{LoadOutcome, LoadTarget, PendingLoad};
pub use shell::{MapShell, ShellEffect, UiEvent};
