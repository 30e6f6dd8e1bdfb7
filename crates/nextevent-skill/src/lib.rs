//! Voice skill request handling, SSML rendering and the CLI
//!
//! This crate provides the `nextevent` command-line interface and the
//! request handler a voice assistant backend calls.

pub mod cli;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod resolve;
pub mod ssml;

pub use cli::Cli;
pub use config::SkillConfig;
pub use envelope::{OutputSpeech, Request, SkillRequest, SkillResponse};
pub use error::{SkillError, SkillResult};
pub use handler::SkillHandler;
