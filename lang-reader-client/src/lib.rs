//! Typed HTTP client for the Lang Reader project API.
//!
//! The base URL is resolved once, when a [`ClientConfig`] is built, and
//! handed to [`ProjectClient`] explicitly.

mod client;
mod config;
mod error;
mod types;

pub use client::ProjectClient;
pub use config::{ClientConfig, Environment};
pub use error::ClientError;
pub use types::{Breakpoint, Project, ProjectInput};
