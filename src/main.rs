use clap::Parser;
use color_eyre::Result;
use graylog_apollo::{
    init_errors,
    init_logging,
    run,
    Args,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_errors()?;
    let args = Args::parse();
    init_logging(args.verbose)?;
    run(args).await
}
