#[macro_use]
extern crate log;

mod cli;
mod config;
mod gateways;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = cli::run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}
