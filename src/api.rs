// src/api.rs
use crate::error::CustomError;
use crate::news::{self, NewsConfig};
use handlebars::Handlebars;
use log::{error, info};
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.hbs");

pub fn routes(
    client: Client,
    config: NewsConfig,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let registry = Arc::new(build_registry());

    let index = warp::path::end()
        .and(warp::get())
        .and(with_client(client))
        .and(with_config(config))
        .and(with_registry(registry))
        .and_then(index_handler);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_handler);

    index.or(health)
}

fn build_registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry
        .register_template_string("index", INDEX_TEMPLATE)
        .expect("embedded index template is valid");
    registry
}

fn with_client(
    client: Client,
) -> impl Filter<Extract = (Client,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || client.clone())
}

fn with_config(
    config: NewsConfig,
) -> impl Filter<Extract = (NewsConfig,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || config.clone())
}

fn with_registry(
    registry: Arc<Handlebars<'static>>,
) -> impl Filter<Extract = (Arc<Handlebars<'static>>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || registry.clone())
}

async fn index_handler(
    client: Client,
    config: NewsConfig,
    registry: Arc<Handlebars<'static>>,
) -> Result<impl Reply, Rejection> {
    let news_items = news::fetch_aggregated_news(&client, &config).await;
    info!("Rendering feed with {} articles.", news_items.len());

    match registry.render("index", &json!({ "news_items": news_items })) {
        Ok(body) => Ok(warp::reply::html(body)),
        Err(e) => {
            error!("Failed to render index template: {}", e);
            Err(warp::reject::custom(CustomError {
                message: e.to_string(),
            }))
        }
    }
}

async fn health_handler() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&json!({ "status": "healthy" })))
}
