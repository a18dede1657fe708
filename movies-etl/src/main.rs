//! Movies ETL Main Entry Point
//!
//! Reloads the movies search index from the relational movie database.

use dotenv::dotenv;
use movies_etl::{Dependencies, IndexingError};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("movies_etl=info,movies_etl_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "movies-etl",
        service_version = env!("CARGO_PKG_VERSION"),
        json_logs = json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let deps = match Dependencies::new().await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.pipeline.run(&deps.index_name).await {
        Ok(report) => {
            for skipped in &report.skipped {
                warn!(movie_id = %skipped.id, reason = %skipped.reason, "Row skipped");
            }
            for failure in &report.load.failures {
                warn!(movie_id = %failure.id, reason = %failure.reason, "Document not indexed");
            }
            info!(
                rows_read = report.rows_read,
                skipped = report.skipped.len(),
                attempted = report.load.attempted,
                succeeded = report.load.succeeded,
                failed = report.load.failed(),
                "Movies ETL completed"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Movies ETL failed");
            Err(e.into())
        }
    }
}
