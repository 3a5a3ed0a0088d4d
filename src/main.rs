use std::{net::SocketAddr, process, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bidwatch::{
    config,
    models::Instrument,
    routes,
    services::{
        alert_monitor::InstrumentMonitor,
        alert_store::{AlertStore, MongoAlertStore},
        notifier::{LogNotifier, Notifier},
        price_feed::{GdaxClient, PriceFeed},
        registry::AlertRegistry,
    },
    AppState,
};

fn fatal(msg: &str, err: impl std::fmt::Display) -> ! {
    tracing::error!("{}: {}", msg, err);
    process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bidwatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::load();

    // no alerting is better than alerting without data
    let store = match MongoAlertStore::connect(&settings).await {
        Ok(s) => s,
        Err(e) => fatal("Failed to connect to MongoDB", e),
    };
    let alerts = match store.get_alerts().await {
        Ok(a) => a,
        Err(e) => fatal("Failed to fetch alerts", e),
    };

    let mut registry = AlertRegistry::from_alerts(alerts);
    tracing::info!("loaded {} alerts", registry.len());

    let feed: Arc<dyn PriceFeed> =
        match GdaxClient::new(&settings.feed_base_url, settings.fetch_timeout) {
            Ok(c) => Arc::new(c),
            Err(e) => fatal("Failed to build price feed client", e),
        };
    let notifier: Arc<dyn Notifier> = Arc::new(LogNotifier);

    // each monitor owns its bucket, nothing is shared between tasks
    let monitors: Vec<_> = Instrument::ALL
        .into_iter()
        .map(|instrument| {
            let bucket = registry.take(instrument.symbol());
            InstrumentMonitor::new(
                instrument,
                bucket,
                feed.clone(),
                notifier.clone(),
                settings.poll_interval,
            )
            .spawn()
        })
        .collect();
    tracing::info!("{} monitors running", monitors.len());

    for symbol in registry.symbols() {
        tracing::warn!(
            "{} alert(s) for {} have no monitor",
            registry.get(symbol).len(),
            symbol
        );
    }

    let state = AppState {
        settings: settings.clone(),
    };
    let app = routes::app(state);

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => fatal("Invalid HOST", e),
    };
    let addr = SocketAddr::from((ip, settings.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => fatal("ListenAndServe", e),
    };
    tracing::info!("serving on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        fatal("ListenAndServe", e);
    }
}
