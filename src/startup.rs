//! Application startup and initialization logic.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::config::{Config, StorageBackend};
use crate::database::{self, CustomerRepository, InMemoryCustomerRepository, PgCustomerRepository};
use crate::models::NewCustomer;
use crate::services::DefaultCustomerService;

/// Demo customers inserted by `SEED_CUSTOMERS=true`
const DEMO_CUSTOMERS: &[(&str, &str)] = &[
    ("Michale", "Weston"),
    ("Sam", "Axe"),
    ("Fiona", "Glenanne"),
];

/// Initialize application services and create the AppState.
pub async fn initialize_app(config: &Config) -> Result<AppState> {
    info!("🚀 Starting customer API ({} storage)", config.storage);

    let repository = setup_repository(config).await?;

    if config.seed_customers {
        seed_customers(repository.as_ref()).await?;
    }

    let customer_service = DefaultCustomerService::new(repository);
    info!("✅ Customer service initialized");

    Ok(AppState::new(config.clone(), Arc::new(customer_service)))
}

/// Build the repository for the configured backend.
async fn setup_repository(config: &Config) -> Result<Arc<dyn CustomerRepository>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("✅ In-memory customer store initialized");
            Ok(Arc::new(InMemoryCustomerRepository::new()))
        }
        StorageBackend::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required for the postgres backend")
            })?;

            let db_pool = database::setup_database(database_url, config.max_connections).await?;
            info!("✅ PostgreSQL connection established");

            database::run_migrations(&db_pool).await?;
            info!("✅ Database migrations completed");

            Ok(Arc::new(PgCustomerRepository::new(db_pool)))
        }
    }
}

/// Insert the demo customers when the store is empty.
pub async fn seed_customers(repository: &dyn CustomerRepository) -> Result<usize> {
    if repository.count().await? > 0 {
        info!("Customer store already populated, skipping seed");
        return Ok(0);
    }

    for (firstname, lastname) in DEMO_CUSTOMERS {
        repository
            .insert(NewCustomer {
                firstname: firstname.to_string(),
                lastname: lastname.to_string(),
            })
            .await?;
    }
    info!("🌱 Seeded {} demo customers", DEMO_CUSTOMERS.len());

    Ok(DEMO_CUSTOMERS.len())
}

/// Wait for shutdown signal.
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully");
        },
    }
}
