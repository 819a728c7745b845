use anyhow::Context;
use shopping_api::config::AppConfig;
use shopping_api::router::create_app_router;
use shopping_api::state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line: `--config <file>` loads a JSON config, `--default <file>`
/// writes the built-in config there and exits.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    default: Option<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Self> {
        let mut args = Args::default();
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let slot = match flag.as_str() {
                "--config" => &mut args.config,
                "--default" => &mut args.default,
                other => anyhow::bail!("unknown argument: {other}"),
            };
            let value = iter.next().with_context(|| format!("{flag} needs a path"))?;
            *slot = Some(PathBuf::from(value));
        }
        Ok(args)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopping_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse()?;

    if let Some(path) = args.default {
        AppConfig::write_default(&path)?;
        tracing::info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = AppConfig::load(args.config.as_deref()).context("failed to load config")?;

    // Initialize application state
    let state = Arc::new(AppState::from_config(&config).context("failed to seed store")?);
    tracing::info!(
        environment = %config.environment,
        products = config.products.len(),
        promotions = config.promotions.len(),
        users = config.users.len(),
        "store seeded"
    );

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http.listen_port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
