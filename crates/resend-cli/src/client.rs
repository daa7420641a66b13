//! CLI error type and API client construction.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use resend_api::{ApiError, ApiKey, ClientConfig, ClientError, ResendClient};
use serde_json::{Map, Value};
use url::Url;

use crate::auth::{KeySources, MissingCredentialError};
use crate::output::Envelope;

/// CLI-level error type separating service-reported errors from local faults.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
    Api(ApiError),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
            Self::Api(error) => error.message.clone(),
        }
    }

    /// Service errors carry their `name`; local faults carry only a message.
    pub(crate) fn into_envelope(self) -> Envelope {
        match self {
            Self::Api(error) => {
                let mut details = Map::new();
                details.insert("name".to_string(), Value::String(error.name));
                Envelope::failure_with(error.message, details)
            }
            other => Envelope::failure(other.display_message()),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.display_message())
    }
}

impl std::error::Error for CliError {}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Api(api) => Self::Api(api),
            other => Self::failure(other),
        }
    }
}

impl From<MissingCredentialError> for CliError {
    fn from(error: MissingCredentialError) -> Self {
        Self::validation(error.to_string())
    }
}

/// Connection settings taken from global flags, plus the credential sources
/// consulted when a command runs.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) base_url: Url,
    pub(crate) timeout: Duration,
    pub(crate) api_key: Option<String>,
    pub(crate) key_sources: KeySources,
}

impl AppContext {
    /// Resolve the credential once and bind a client to it.
    pub(crate) fn client(&self) -> CliResult<ResendClient> {
        let api_key: ApiKey = self.key_sources.resolve(self.api_key.as_deref())?;
        let config = ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout);
        Ok(ResendClient::new(&api_key, &config)?)
    }
}

/// Parse the API base URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_errors_keep_their_name() {
        let error = CliError::from(ClientError::Api(ApiError::new(
            "Invalid API key",
            "validation_error",
        )));
        assert_eq!(
            error.into_envelope().to_json(),
            json!({
                "success": false,
                "error": {"message": "Invalid API key", "name": "validation_error"}
            })
        );
    }

    #[test]
    fn local_faults_carry_only_a_message() {
        let error = CliError::from(MissingCredentialError);
        let rendered = error.into_envelope().to_json();
        assert_eq!(rendered["success"], json!(false));
        let fields = rendered["error"].as_object().expect("error object");
        assert_eq!(fields.len(), 1);
        assert!(
            fields["message"]
                .as_str()
                .is_some_and(|message| message.starts_with("No API key found"))
        );
    }

    #[test]
    fn failures_render_the_cause_chain() {
        let error = CliError::failure(
            anyhow::anyhow!("permission denied").context("failed to read batch.json"),
        );
        assert_eq!(
            error.display_message(),
            "failed to read batch.json: permission denied"
        );
    }

    #[test]
    fn parse_url_reports_input() {
        let err = parse_url("not a url").expect_err("should reject");
        assert!(err.starts_with("invalid URL 'not a url'"));
    }

    #[test]
    fn missing_credential_stops_before_client_construction() {
        let ctx = AppContext {
            base_url: parse_url("http://127.0.0.1:9").expect("valid URL"),
            timeout: Duration::from_secs(1),
            api_key: None,
            key_sources: KeySources::default(),
        };
        let err = ctx.client().expect_err("no credential available");
        assert!(matches!(err, CliError::Validation(_)));
    }
}
