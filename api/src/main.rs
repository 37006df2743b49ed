use api::auth::middleware::log_request;
use api::routes::app;
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use chrono::{Duration, Local};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use services::attendance_service::AttendanceService;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tracing_appender::rolling;
use util::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() {
    let (log_file, log_level) = {
        let cfg = AppConfig::global();
        (cfg.log_file.clone(), cfg.log_level.clone())
    };
    let _log_guard = init_logging(&log_file, &log_level);

    let db = db::connect().await;
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_state = AppState::new(db);
    spawn_attendance_cleanup(app_state.clone());

    let cors = CorsLayer::very_permissive().expose_headers([CONTENT_DISPOSITION, CONTENT_TYPE]);

    let app = app(app_state).layer(from_fn(log_request)).layer(cors);

    let (host, port, project_name) = {
        let cfg = AppConfig::global();
        (cfg.host.clone(), cfg.port, cfg.project_name.clone())
    };
    let addr: SocketAddr = format!("{host}:{port}").parse().expect("Invalid address");

    println!("Starting {project_name} on http://{host}:{port}");

    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server crashed");
}

fn init_logging(log_file: &str, _log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let env_filter =
        EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new("api=info"));

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    if AppConfig::global().log_to_stdout {
        registry.with(stdout_layer).init();
    } else {
        registry.init();
    }

    guard
}

/// Daily retention sweep over the attendance ledger. Disabled while the
/// configured retention is 0 (keep forever).
fn spawn_attendance_cleanup(app_state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(24 * 60 * 60));
        loop {
            interval.tick().await;

            let days = AppConfig::global().attendance_retention_days;
            if days <= 0 {
                continue;
            }

            let cutoff = (Local::now() - Duration::days(days))
                .format("%Y-%m-%d %H:%M")
                .to_string();
            match AttendanceService::delete_older_than(app_state.db(), &cutoff).await {
                Ok(0) => {}
                Ok(deleted) => {
                    tracing::info!(deleted, %cutoff, "attendance retention sweep");
                }
                Err(e) => {
                    tracing::error!(error = %e, "attendance retention sweep failed");
                }
            }
        }
    });
}
