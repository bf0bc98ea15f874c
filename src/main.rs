use capitol_watch::{
    bus::next_event,
    constants::poller::EVENT_BUS_CAPACITY,
    discovery::{EndpointDiscovery, StaticEndpoint},
    services::poller::TradePoller,
    AppConfig, EventBus, FetcherState, ListingClient, TradeEvent, TradeFetcher,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();

    // Setup Logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Capitol Watch...");

    // Load Configuration
    let config = AppConfig::load()?;
    info!("Loaded Configuration: {:?}", config);

    let endpoint = StaticEndpoint::new(config.listing.base_url.clone())
        .discover()
        .await?;
    info!("Using trade listing endpoint: {}", endpoint);

    let client = ListingClient::for_endpoint(endpoint, &config.listing)?;
    let fetcher = TradeFetcher::with_state(
        client,
        FetcherState::new(config.poller.initial_watermark),
    );

    let bus = EventBus::new(EVENT_BUS_CAPACITY);
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        while let Some(event) = next_event(&mut rx).await {
            match event {
                TradeEvent::NewTrades { trades, .. } | TradeEvent::Backfill { trades } => {
                    for t in trades {
                        info!(
                            "[TRADES] {} {} {} ({}) {} {} x {} = {} on {}",
                            t.pol_first_name,
                            t.pol_last_name,
                            t.trade_type,
                            t.pol_chamber,
                            t.issuer_name,
                            t.size,
                            t.price,
                            t.value,
                            t.trade_date
                        );
                    }
                }
                TradeEvent::PollFailed { error } => warn!("[TRADES] Poll failed: {}", error),
            }
        }
    });

    let poller = TradePoller::new(fetcher, bus);

    if config.poller.backfill > 0 {
        if let Err(e) = poller.backfill(config.poller.backfill).await {
            warn!("⚠️ Backfill failed: {}", e);
        }
    }

    // Establish the baseline now rather than at the first tick
    if let Err(e) = poller.poll_once().await {
        warn!("⚠️ Initial poll failed: {}", e);
    }

    let mut scheduler = poller.start(&config.poller.cron).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down...");
    scheduler.shutdown().await?;

    let state = poller.state().await;
    info!("Final watermark: {:?}", state.last_trade_count);

    Ok(())
}
