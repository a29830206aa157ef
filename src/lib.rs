#[macro_use]
extern crate scopeguard;

#[macro_use]
extern crate tracing;

mod errors;
mod logging;
mod prompt;
mod submit;

use apollo_collector::{
    CollectError,
    Orchestrator,
};
pub use apollo_config::Args;
use apollo_config::Config;
use color_eyre::{
    Result,
    Section as _,
};
pub use errors::init_errors;
use eyre::bail;
pub use logging::init_logging;

const PASSWORD_PROMPT: &str = "Graylog Password: ";

/// Loads the configuration, collects one bundle and reports where it was written.
pub async fn run(args: Args) -> Result<()> {
    let prompt_for_password = args.password;
    let mut config = Config::new(args)?;
    if prompt_for_password {
        config.password = Some(prompt::read_password(PASSWORD_PROMPT)?);
    }

    let credentials = config.credentials()?;
    info!("Starting up.");

    let orchestrator = Orchestrator::new(credentials, config.collect_options())?;
    let path = tokio::select! {
        result = orchestrator.run(&config.output_dir) => result.map_err(into_report)?,
        _ = tokio::signal::ctrl_c() => bail!("Interrupted, no bundle was written."),
    };

    if let Some(token) = config.submit_token() {
        submit::submit_bundle(token, &path);
    }

    println!("{}", path.display());
    info!("Finished.");
    Ok(())
}

fn into_report(err: CollectError) -> eyre::Report {
    let unauthorized = err.is_unauthorized();
    let report = eyre::Report::new(err);
    if unauthorized {
        report.suggestion("Make sure that you are running this with a Graylog user that has admin permissions.")
    } else {
        report
    }
}
