mod app;
mod auth;
mod categories;
mod config;
mod db;
mod error;
mod extract;
mod goals;
mod reports;
mod state;
mod store;
mod timefmt;
mod transactions;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "finguard=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;
    let result = app::serve(app::build_app(app_state.clone()), &app_state.config).await;

    app_state.shutdown().await;
    result
}
