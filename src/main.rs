use anyhow::{Context, Result, anyhow};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wallet_bot::api::{AppState, create_app};
use wallet_bot::balance::HttpBalanceClient;
use wallet_bot::config::{Config, StoreBackend};
use wallet_bot::db::postgres::PostgresDb;
use wallet_bot::discord::parse_public_key;
use wallet_bot::store::{MemoryStore, RecordStore};
use wallet_bot::validator::WalletValidator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Initialize rustls
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow!("Failed to install rustls crypto provider: {:?}", e))?;

    let config = Config::from_env()?;

    let store: Arc<dyn RecordStore> = match &config.store {
        StoreBackend::Memory => {
            info!("Using in-memory wallet store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Postgres(url) => {
            let db = PostgresDb::new(url, config.db_max_connections).await?;
            db.init_wallets_table().await?;
            Arc::new(db)
        }
    };

    let lookup = HttpBalanceClient::new(&config.balance_api_url, config.balance_api_timeout)
        .context("Failed to build balance API client")?;
    let validator = WalletValidator::new(store, Arc::new(lookup), config.balance_api_timeout);

    let discord_key = config
        .discord_public_key
        .as_deref()
        .map(parse_public_key)
        .transpose()?;
    if discord_key.is_none() {
        info!("DISCORD_PUBLIC_KEY not set, /interactions disabled");
    }

    let app = create_app(AppState::new(
        Arc::new(validator),
        config.command_prefix.clone(),
        discord_key,
    ));

    if let Some((cert_path, key_path)) = config.tls_paths() {
        // Load TLS certificates
        let tls_config = RustlsConfig::from_pem_file(cert_path, key_path)
            .await
            .map_err(|e| {
                error!(
                    "Failed to load TLS certificates: cert={}, key={}, error={}",
                    cert_path, key_path, e
                );
                anyhow!("Failed to load TLS certificates: {}", e)
            })?;

        info!("🚀 wallet-bot listening on https://{}", config.bind_addr);
        axum_server::bind_rustls(config.bind_addr, tls_config)
            .serve(app.into_make_service_with_connect_info::<SocketAddr>())
            .await?;
    } else {
        let listener = tokio::net::TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
        info!("🚀 wallet-bot listening on http://{}", config.bind_addr);
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
    }

    Ok(())
}
