use std::fmt;
use url::Url;

/// Everything needed to authenticate against the Graylog REST API.
///
/// Built once by [`crate::Config::credentials`] and never changed during a run.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
    base_url: Url,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>, base_url: Url) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// REST endpoint of the node the collection is started from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
