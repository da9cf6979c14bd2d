use std::sync::Arc;

use tracing::{info, warn};

use ridelink::client::{EventCallbacks, RealtimeClient};
use ridelink::config::load_config;
use ridelink::transport::message::{DRIVER_LOCATION, RIDE_UPDATE};
use ridelink::utils::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("info");

    let settings = load_config().expect("Failed to load configuration");

    let callbacks = EventCallbacks {
        on_open: Some(Arc::new(|| info!("connection established"))),
        on_close: Some(Arc::new(|| info!("connection lost, reconnect pending"))),
        on_error: Some(Arc::new(|e: &str| warn!(error = %e, "connection error"))),
    };

    let client = RealtimeClient::with_callbacks(settings, callbacks);
    let _rides = client.subscribe(RIDE_UPDATE, |payload| {
        info!(%payload, "ride update");
    });
    let _locations = client.subscribe(DRIVER_LOCATION, |payload| {
        info!(%payload, "driver location");
    });

    client.connect();

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    client.disconnect();
}
