//! Test harness with testcontainers for integration testing.
//!
//! The Postgres container and migrations are initialized once on first use
//! and shared by every test in the binary; each test gets its own pool and
//! a fresh set of stub dependencies.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::domains::auth::JwtService;
use server_core::kernel::{ServiceDeps, StubSmsSender};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init() because another test may have won.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: database pool plus service deps wired to stubs.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: ServiceDeps,
    /// The stub behind `deps.sms`; read delivered codes from here.
    pub sms: Arc<StubSmsSender>,
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;
        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect test pool")?;

        let sms = Arc::new(StubSmsSender::new());
        let jwt_service = Arc::new(JwtService::new(
            "test_secret_key",
            "test_issuer".to_string(),
            7200,
        ));
        let deps = ServiceDeps::new(db_pool.clone(), sms.clone(), jwt_service);

        Ok(Self { db_pool, deps, sms })
    }
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}
