use clubhouse_client::{ApiClient, Club, CollectionFetcher, Config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("clubhouse-client starting");

    let config = Config::from_env()?;
    config.log_startup();

    let client = ApiClient::from_config(&config)?;
    let clubs: CollectionFetcher<Club> = CollectionFetcher::new(client, routes::api::CLUBS);

    match clubs.fetch().await {
        Ok(summary) => tracing::info!(
            "loaded {} clubs (max id {}, max schedules id {})",
            summary.count,
            summary.max_id,
            summary.max_secondary_id
        ),
        Err(err) => tracing::error!("initial fetch failed: {}", err),
    }

    Ok(())
}
