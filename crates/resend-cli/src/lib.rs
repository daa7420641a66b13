#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for the Resend email API.
//!
//! Layout:
//! - `cli.rs`: argument parsing, dispatch, and the top-level runner
//! - `commands/`: one handler module per resource group
//! - `auth.rs`: API key resolution (flag, environment, home dotfile)
//! - `client.rs`: CLI error type and API client construction
//! - `output.rs`: the JSON result envelope
//! - `logging.rs`: stderr tracing subscriber
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod auth;
pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod logging;
pub(crate) mod output;

pub use cli::run;
