// src/main.rs
use env_logger::Builder;
use log::{info, warn, LevelFilter};
use news_tracker::api;
use news_tracker::news::NewsConfig;
use reqwest::Client;
use std::env;

#[tokio::main]
async fn main() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    info!("Starting the news tracker application...");

    let config = NewsConfig::from_env();
    if config.api_key.is_none() {
        warn!("NEWS_API_KEY is not set; provider calls will fail and the feed will be empty");
    }

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3030);

    let client = Client::new();
    let routes = api::routes(client, config);

    info!("Server running on http://127.0.0.1:{}", port);
    warp::serve(routes).run(([127, 0, 0, 1], port)).await;
}
