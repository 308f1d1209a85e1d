use std::io;
use std::process::ExitCode;

use sparkpost_sample::config::Config;
use sparkpost_sample::logging;
use sparkpost_sample::sample::{self, SampleError};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    println!("{}", sample::BANNER);

    match execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "sample run failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn execute() -> Result<(), SampleError> {
    let config = Config::from_env()?;
    let client = sample::client_for(&config)?;
    sample::run(&client, &config, &mut io::stdout(), &mut io::stderr()).await?;
    Ok(())
}
