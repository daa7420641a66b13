#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Thin HTTP client for the Resend email API.
//!
//! Layout:
//! - `client.rs`: the [`ResendClient`] and one namespace per resource group
//! - `models.rs`: request DTOs, one per operation that carries a body
//! - `error.rs`: structured API errors and transport failures
//!
//! Response bodies are passed through untouched as [`serde_json::Value`]; the
//! client only decides whether a call succeeded or reported an API error.

pub mod client;
pub mod error;
pub mod models;

pub use client::{
    ApiKey, ApiKeys, Audiences, Broadcasts, ClientConfig, Contacts, DEFAULT_BASE_URL, Domains,
    Emails, ResendClient,
};
pub use error::{ApiError, ApiResult, ClientError};
