//! Minimal headless host: sign in, open the dashboard, print what a
//! frontend would render. Useful for smoke-testing a deployment from a
//! shell:
//!
//! ```text
//! DEMODAY_EMAIL=admin@example.edu DEMODAY_PASSWORD=… demoday-host
//! ```

use demoday_app::{
    bridge::SharedBridge,
    core::{shared, AppConfig, AppCore, Screen},
    views::unread_count,
    workflows,
};
use demoday_client::{ClientConfig, PlatformBridge};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::var("DEMODAY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("demoday.toml"));
    let config = match ClientConfig::load(&config_path) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config error: {error}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let bridge: SharedBridge = match PlatformBridge::new(&config) {
        Ok(bridge) => Arc::new(bridge),
        Err(error) => {
            tracing::error!(%error, "could not build platform bridge");
            return ExitCode::FAILURE;
        }
    };
    let app = shared(AppCore::new(AppConfig::default()));
    tokio::spawn(workflows::session::watch_auth(app.clone(), bridge.clone()));

    let (email, password) = match (
        std::env::var("DEMODAY_EMAIL"),
        std::env::var("DEMODAY_PASSWORD"),
    ) {
        (Ok(email), Ok(password)) => (email, password),
        _ => {
            eprintln!("set DEMODAY_EMAIL and DEMODAY_PASSWORD to sign in");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = workflows::session::sign_in(&app, &bridge, &email, &password).await {
        tracing::error!(%error, "sign-in failed");
        return ExitCode::FAILURE;
    }
    if let Err(error) = workflows::open_screen(&app, &bridge, Screen::Dashboard).await {
        tracing::warn!(%error, "dashboard loaded with errors");
    }

    // Give the subscriptions a beat, then show what arrived.
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    {
        let mut core = app.write().await;
        core.pump_all_deltas();
        let user = core
            .session
            .user()
            .map(|u| u.display_name.clone())
            .unwrap_or_default();
        println!("signed in as {user}");
        println!("activities : {}", core.activities.state().items().len());
        println!("pledges    : {}", core.pledges.state().items().len());
        println!(
            "notices    : {} ({} unread)",
            core.notices.state().items().len(),
            unread_count(core.notices.state().items()),
        );
    }

    if let Err(error) = workflows::session::sign_out(&app, &bridge).await {
        tracing::warn!(%error, "sign-out failed");
    }
    ExitCode::SUCCESS
}
