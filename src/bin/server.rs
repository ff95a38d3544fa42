use std::{fs::OpenOptions, net::SocketAddr, process::ExitCode, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{
    AppState, DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMEZONE, DisplayConfig, build_router,
    get_local_offset, graceful_shutdown,
};

/// The web server for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, default_value = "expenses.db")]
    db_path: String,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The symbol printed in front of amounts, e.g. "$" or "₹".
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    if get_local_offset(&args.timezone).is_none() {
        tracing::error!(
            "Invalid timezone \"{}\", use a canonical timezone name such as \"Pacific/Auckland\"",
            args.timezone
        );
        return ExitCode::FAILURE;
    }

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open database file {}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let display = DisplayConfig::new(&args.currency_symbol, &args.timezone);
    let state = match AppState::new(connection, display) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize database {}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on http://{}", addr);

    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are already logged where they are handled.
        .on_failure(());

    router.layer(tracing_layer)
}
