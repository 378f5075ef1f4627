use city_guide_seeder::{
    application::seed_catalog::{dto::LoadOptions, use_case::SeedCatalogUseCase},
    config::{Config, StoreBackend},
    domain::store::repository::DocumentStore,
    infrastructure::{
        database::pool::{create_pool, run_migrations},
        source::json_source::read_seed_file,
        store::{
            memory_store::InMemoryStore, postgres_store::PostgresDocumentStore,
            redis_store::RedisDocumentStore,
        },
    },
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,city_guide_seeder=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let seed_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.seed_file));

    tracing::info!(
        seed_file = %seed_file.display(),
        store = config.store.name(),
        dry_run = config.dry_run,
        "Starting seed load"
    );

    let entries = read_seed_file(&seed_file).await?;
    let store = connect_store(&config.store).await?;

    let use_case = SeedCatalogUseCase::new(
        store,
        LoadOptions {
            write_concurrency: config.write_concurrency,
            dry_run: config.dry_run,
        },
    );
    let report = use_case.execute(entries).await;

    for rejected in &report.rejected {
        for violation in &rejected.violations {
            tracing::warn!(
                collection = %rejected.collection,
                id = rejected.id.as_deref().unwrap_or("<none>"),
                "{}",
                violation
            );
        }
    }
    for failed in &report.failed_writes {
        tracing::warn!(
            collection = %failed.collection,
            id = %failed.id,
            "Write failed: {}",
            failed.error
        );
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(reason) = &report.aborted {
        tracing::error!("Seed load aborted: {}", reason);
        return Ok(ExitCode::from(1));
    }
    if config.strict && !(report.rejected.is_empty() && report.failed_writes.is_empty()) {
        tracing::error!(
            rejected = report.rejected.len(),
            failed_writes = report.failed_writes.len(),
            "Strict mode: seed load was not clean"
        );
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

async fn connect_store(backend: &StoreBackend) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match backend {
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
        StoreBackend::Postgres {
            database_url,
            max_connections,
            ignore_missing_migrations,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            run_migrations(&pool, *ignore_missing_migrations).await?;
            Arc::new(PostgresDocumentStore::new(pool))
        }
        StoreBackend::Redis {
            redis_url,
            key_prefix,
        } => {
            let client = redis::Client::open(redis_url.clone())?;
            Arc::new(RedisDocumentStore::new(client, key_prefix.clone()))
        }
    };
    Ok(store)
}
