//! Command handlers, one module per resource group.
//!
//! Every handler resolves the credential before doing anything else and
//! resolves to the decoded response body.

pub(crate) mod api_keys;
pub(crate) mod audiences;
pub(crate) mod broadcasts;
pub(crate) mod contacts;
pub(crate) mod domains;
pub(crate) mod emails;

/// Keep `Some` only for non-empty strings; `--html ""` means "not given".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Keep `Some` only for non-empty lists.
pub(crate) fn non_empty_list(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use anyhow::{Result, anyhow};
    use httpmock::MockServer;

    use crate::auth::KeySources;
    use crate::client::AppContext;

    pub(crate) const TEST_KEY: &str = "re_test";

    pub(crate) fn context_with(server: &MockServer, api_key: Option<&str>) -> Result<AppContext> {
        Ok(AppContext {
            base_url: server
                .base_url()
                .parse()
                .map_err(|_| anyhow!("valid URL"))?,
            timeout: Duration::from_secs(5),
            api_key: api_key.map(str::to_string),
            key_sources: KeySources::default(),
        })
    }

    pub(crate) fn context_with_key(server: &MockServer) -> Result<AppContext> {
        context_with(server, Some(TEST_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_are_dropped() {
        assert_eq!(non_empty_list(Vec::new()), None);
        assert_eq!(
            non_empty_list(vec!["a@example.com".into()]),
            Some(vec!["a@example.com".to_string()])
        );
    }

    #[test]
    fn empty_strings_are_dropped() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("eu-west-1".into())), Some("eu-west-1".into()));
    }
}
