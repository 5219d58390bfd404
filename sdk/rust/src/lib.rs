//! # opensandbox-sdk
//!
//! Rust SDK for OpenSandbox's per-sandbox agent (execd): stream shell
//! commands over SSE and drive a code-interpreter context, against the
//! endpoint returned by the control plane's `GET /sandboxes/{id}/endpoint`.
//!
//! ## Quick start
//!
//! ```no_run
//! # async fn example() -> opensandbox_sdk::Result<()> {
//! use opensandbox_sdk::{CommandsAdapter, ConnectionConfig, SandboxEndpoint};
//!
//! let config = ConnectionConfig::from_env();
//! let endpoint = SandboxEndpoint::new("localhost", 44772);
//! let commands = CommandsAdapter::new(config, endpoint);
//!
//! let execution = commands.run("echo hello").await?;
//! println!("{:?}", execution.logs.stdout);
//! # Ok(())
//! # }
//! ```

mod code_interpreter;
mod command;
mod config;
mod converter;
mod error;
mod types;

pub use code_interpreter::CodesAdapter;
pub use command::CommandsAdapter;
pub use config::{ConfigError, ConnectionConfig, SandboxEndpoint};
pub use converter::to_command_status;
pub use error::{Error, Result};
pub use types::{
    CommandStatus, CommandStatusResponse, Context, Execution, ExecutionError, ExecutionLogs, LogEntry, Unset,
};
