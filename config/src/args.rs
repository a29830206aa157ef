use clap::Parser;

/// Collects a support bundle from a Graylog cluster.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version = version(), about, long_about = None)]
pub struct Args {
    /// Graylog username (must have administrator permissions).
    #[clap(long, env = "GRAYLOG_USER", value_name = "USERNAME")]
    pub user: Option<String>,

    /// Prompt for the Graylog password instead of reading `GRAYLOG_PASSWORD`.
    #[clap(long, action)]
    pub password: bool,

    /// URL of a graylog-server REST API (e.g. http://graylog.example.org:12900).
    #[clap(long, env = "GRAYLOG_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Token for submitting the bundle to Graylog support. Accepted, not used yet.
    #[clap(long = "submit-token", env = "GRAYLOG_SUBMIT_TOKEN", value_name = "TOKEN", hide_env_values = true)]
    pub submit_token: Option<String>,

    /// Timeout for every single request, in seconds.
    #[clap(long = "timeout", value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// How many nodes or index ranges are queried at the same time.
    #[clap(long, value_name = "N")]
    pub concurrency: Option<u64>,

    /// Directory the bundle is written to.
    #[clap(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Enables debug logging.
    #[clap(long, short, action)]
    pub verbose: bool,

    /// Read from `GRAYLOG_PASSWORD`. Not a command line flag so it stays out of process listings.
    #[clap(skip = std::env::var("GRAYLOG_PASSWORD").ok())]
    pub env_password: Option<String>,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(user) = &self.user {
                cache.insert("username".to_string(), user.clone().into());
            }
            if let Some(password) = &self.env_password {
                cache.insert("password".to_string(), password.clone().into());
            }
            if let Some(url) = &self.url {
                cache.insert("url".to_string(), url.clone().into());
            }
            if let Some(token) = &self.submit_token {
                cache.insert("submit_token".to_string(), token.clone().into());
            }
            if let Some(timeout) = self.timeout_secs {
                cache.insert("timeout_secs".to_string(), timeout.into());
            }
            if let Some(concurrency) = self.concurrency {
                cache.insert("concurrency".to_string(), concurrency.into());
            }
            if let Some(output_dir) = &self.output_dir {
                cache.insert("output_dir".to_string(), output_dir.clone().into());
            }
            Ok(cache)
        }
    }
}

pub fn version() -> String {
    let author = clap::crate_authors!();
    let config_dir_path = crate::get_config_dir().display().to_string();

    format!(
        "\
{version}

Authors: {author}

Config directory: {config_dir_path}",
        version = clap::crate_version!(),
    )
}
