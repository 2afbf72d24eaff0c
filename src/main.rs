use market_ledger::{config::Config, startup};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        identities = config.identities.len(),
        "Starting market ledger"
    );

    let scheduler = match startup::build_scheduler(config) {
        Ok(scheduler) => scheduler,
        Err(e) => {
            eprintln!("Startup error: {}", e);
            std::process::exit(1);
        }
    };

    scheduler.run().await;
}
