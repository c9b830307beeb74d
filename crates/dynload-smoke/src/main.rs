// Binary entry point: spawn chromedriver, open a headless session, run the
// dynamic-loading scenario, and reflect the outcome in the exit status.

use dynload_smoke::{Chromedriver, Result, Scenario, WebDriverSession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(error) = execute().await {
        tracing::error!("{error}");
        std::process::exit(1);
    }
    tracing::info!("scenario passed");
}

async fn execute() -> Result<()> {
    let scenario = Scenario::default();

    let chromedriver = Chromedriver::launch().await?;

    // The session borrows nothing from chromedriver, but the child process
    // must outlive it, so teardown runs in reverse order of acquisition.
    let outcome = match WebDriverSession::start(chromedriver.url()).await {
        Ok(session) => dynload_smoke::run(Box::new(session), &scenario).await,
        Err(error) => Err(error),
    };
    let shutdown = chromedriver.shutdown().await;

    outcome?;
    shutdown
}
