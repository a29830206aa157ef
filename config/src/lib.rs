#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod credentials;

pub use app_config::get_config_dir;
pub use args::Args;
pub use credentials::Credentials;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    path::PathBuf,
    time::Duration,
};

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");

/// Settings for one collection run, merged from the built-in defaults, the
/// optional `config.yaml` and the command line.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_token: Option<String>,
    pub timeout_secs: u64,
    pub concurrency: u64,
    pub output_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("submit_token", &self.submit_token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("concurrency", &self.concurrency)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Limits applied to the collection itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectOptions {
    pub timeout: Duration,
    pub concurrency: usize,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            concurrency: 4,
        }
    }
}

/// Required inputs that were not provided by any configuration source.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unable to start the collector because:{}", list_problems(.problems))]
pub struct MissingInput {
    pub problems: Vec<String>,
}

fn list_problems(problems: &[String]) -> String {
    problems.iter().map(|p| format!("\n\tError: {p}")).collect()
}

impl Config {
    pub fn new(args: Args) -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        let mut builder =
            config::Config::builder().add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Yaml));

        let config_files = [("config.yaml", config::FileFormat::Yaml)];

        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
        }

        builder = builder.add_source(args);

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(?cfg, config_dir = %config_dir.display(), "loaded configuration");

        Ok(cfg)
    }

    /// Validates the required inputs, reporting every missing one at once.
    pub fn credentials(&self) -> Result<Credentials, MissingInput> {
        let mut problems = Vec::new();

        let username = self.username.as_deref().filter(|u| !u.is_empty());
        if username.is_none() {
            problems.push(
                "Username isn't set, please use `--user $USERNAME` or set the environment variable `GRAYLOG_USER`"
                    .to_string(),
            );
        }

        let password = self.password.as_deref().filter(|p| !p.is_empty());
        if password.is_none() {
            problems.push(
                "Password isn't set, please use `--password` to prompt for the password or set the environment \
                 variable `GRAYLOG_PASSWORD`"
                    .to_string(),
            );
        }

        let base_url = match self.url.as_deref().filter(|u| !u.is_empty()) {
            None => {
                problems.push(
                    "URL isn't set, please use `--url $URL` or set the environment variable `GRAYLOG_URL`"
                        .to_string(),
                );
                None
            }
            Some(raw) => match url::Url::parse(raw) {
                Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
                Ok(url) => {
                    problems.push(format!("URL `{raw}` uses unsupported scheme `{}`", url.scheme()));
                    None
                }
                Err(e) => {
                    problems.push(format!("URL `{raw}` is not valid: {e}"));
                    None
                }
            },
        };

        match (username, password, base_url) {
            (Some(username), Some(password), Some(base_url)) if problems.is_empty() => {
                Ok(Credentials::new(username, password, base_url))
            }
            _ => Err(MissingInput { problems }),
        }
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
            concurrency: self.concurrency.max(1) as usize,
        }
    }

    /// Token for submitting bundles to Graylog support. Submission is not implemented, the value is only carried.
    pub fn submit_token(&self) -> Option<&str> {
        self.submit_token.as_deref().filter(|t| !t.is_empty())
    }
}
