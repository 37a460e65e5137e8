use lib::config::Config;
use lib::gateway;

#[tokio::main]
async fn main() {
    // .env is optional; real deployments set the variables directly.
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("configuration error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = gateway::run_gateway(config).await {
        log::error!("gateway failed: {:#}", e);
        std::process::exit(1);
    }
}
