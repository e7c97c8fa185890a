//! Browser authorization URL for the OAuth implicit flow.
//!
//! The URL is computed locally and handed to the user; this library never
//! performs the OAuth exchange itself.

use url::Url;

use crate::client::API_VERSION;
use crate::scope::Scope;

/// OAuth host, distinct from the API host.
pub const OAUTH_BASE: &str = "https://oauth.vk.com";

const AUTHORIZE_PATH: &str = "/authorize/";
const DEFAULT_REDIRECT_URI: &str = "https://oauth.vk.com/blank.html";
const DEFAULT_RESPONSE_TYPE: &str = "token";
const DEFAULT_DISPLAY: &str = "page";

/// Application authorization descriptor. Empty string fields fall back to
/// the documented defaults when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Auth {
    pub client_id: i64,
    pub scope: Scope,
    pub redirect_uri: String,
    pub response_type: String,
    pub display: String,
}

impl Auth {
    /// Deterministic authorization URL for this descriptor. Query keys are
    /// appended in sorted order so equal descriptors give byte-equal URLs.
    pub fn url(&self) -> Url {
        let mut url = Url::parse(OAUTH_BASE).expect("OAuth base URL is valid");
        url.set_path(AUTHORIZE_PATH);

        let redirect_uri = non_empty(&self.redirect_uri, DEFAULT_REDIRECT_URI);
        let response_type = non_empty(&self.response_type, DEFAULT_RESPONSE_TYPE);
        let display = non_empty(&self.display, DEFAULT_DISPLAY);

        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", &self.client_id.to_string());
        query.append_pair("display", display);
        query.append_pair("redirect_uri", redirect_uri);
        query.append_pair("response_type", response_type);
        query.append_pair("scope", &self.scope.to_query());
        query.append_pair("v", API_VERSION);
        drop(query);

        url
    }
}

fn non_empty<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Permission;

    #[test]
    fn url_is_deterministic_with_defaults() {
        let auth = Auth {
            scope: [Permission::Offline, Permission::Groups].into_iter().collect(),
            ..Auth::default()
        };
        assert_eq!(
            auth.url().as_str(),
            "https://oauth.vk.com/authorize/?client_id=0&display=page\
             &redirect_uri=https%3A%2F%2Foauth.vk.com%2Fblank.html\
             &response_type=token&scope=groups%2Coffline&v=5.35"
        );
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let auth = Auth {
            client_id: 42,
            redirect_uri: "https://example.com/callback".to_string(),
            response_type: "code".to_string(),
            display: "mobile".to_string(),
            ..Auth::default()
        };
        let url = auth.url();
        assert_eq!(url.host_str(), Some("oauth.vk.com"));
        let query = url.query().unwrap();
        assert!(query.contains("client_id=42"));
        assert!(query.contains("display=mobile"));
        assert!(query.contains("response_type=code"));
        assert!(query.contains("redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"));
    }
}
