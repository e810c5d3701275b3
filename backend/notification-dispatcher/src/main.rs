use actix_web::{web, App, HttpServer};
use fcm_shared::FCMClient;
use notification_dispatcher::{
    handlers::{cors_headers, register_routes},
    logging, Config, NotificationDispatcher, SupabaseTokenStore,
};
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> io::Result<()> {
    logging::init_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    if config.firebase.service_account.is_none() {
        tracing::warn!("FIREBASE_SERVICE_ACCOUNT is not set; send requests will fail");
    }

    let config = Arc::new(config);
    let token_store = Arc::new(SupabaseTokenStore::new(&config.store));
    let fcm_client = FCMClient::new(config.firebase.api_base_url.clone());
    let dispatcher = Arc::new(NotificationDispatcher::new(
        config.clone(),
        token_store,
        fcm_client,
    ));

    let addr = format!("0.0.0.0:{}", config.app.port);
    tracing::info!(env = %config.app.env, "Starting notification dispatcher on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(dispatcher.clone()))
            .wrap(cors_headers())
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .configure(register_routes)
    })
    .bind(&addr)?
    .run()
    .await
}
