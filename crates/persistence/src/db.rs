//! Database connection management and spatial capability detection.

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// How geometry is stored: `auto`, `postgis` or `metadata`.
    #[serde(default)]
    pub spatial: SpatialMode,
}

fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    2
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}

/// Configured spatial storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialMode {
    /// Use PostGIS columns when the schema has them.
    #[default]
    Auto,
    /// Require PostGIS columns; startup fails without them.
    Postgis,
    /// Keep coordinates in record metadata even if PostGIS is present.
    Metadata,
}

/// Spatial capability of the connected store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialSupport {
    /// `warehouses.location` and `safe_zones.geometry` are PostGIS columns.
    Native,
    /// Geometry only lives in the `data` metadata column.
    MetadataOnly,
}

impl SpatialSupport {
    pub fn is_native(self) -> bool {
        matches!(self, SpatialSupport::Native)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpatialSupport::Native => "postgis",
            SpatialSupport::MetadataOnly => "metadata",
        }
    }
}

/// Errors raised while bringing up the storage component.
#[derive(Debug, Error)]
pub enum StorageSetupError {
    #[error("Database connection failed: {0}")]
    Connect(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Spatial mode 'postgis' requested but the schema has no geometry columns")]
    SpatialUnavailable,
}

/// Creates a PostgreSQL connection pool with the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
}

/// Applies the bundled SQL migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("src/migrations").run(pool).await
}

/// Checks whether both geometry columns exist.
pub async fn detect_spatial_support(pool: &PgPool) -> Result<SpatialSupport, sqlx::Error> {
    let (columns,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*) FROM information_schema.columns
        WHERE table_schema = current_schema()
          AND ((table_name = 'warehouses' AND column_name = 'location')
            OR (table_name = 'safe_zones' AND column_name = 'geometry'))
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(if columns == 2 {
        SpatialSupport::Native
    } else {
        SpatialSupport::MetadataOnly
    })
}

/// Picks the spatial support to use from the configured mode and what the
/// schema offers.
pub fn choose_spatial_support(
    mode: SpatialMode,
    detected: SpatialSupport,
) -> Result<SpatialSupport, StorageSetupError> {
    match (mode, detected) {
        (SpatialMode::Metadata, _) => Ok(SpatialSupport::MetadataOnly),
        (SpatialMode::Postgis, SpatialSupport::MetadataOnly) => {
            Err(StorageSetupError::SpatialUnavailable)
        }
        (_, detected) => Ok(detected),
    }
}

/// The storage component: a connection pool plus the spatial capability it
/// was opened with.
///
/// Constructed once at startup and shared by cloning; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
    spatial: SpatialSupport,
}

impl Database {
    /// Connects, migrates and resolves the spatial capability.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageSetupError> {
        let pool = create_pool(config).await?;

        info!("Running database migrations...");
        run_migrations(&pool).await?;
        info!("Migrations completed");

        Self::open(pool, config.spatial).await
    }

    /// Wraps an existing pool, resolving the spatial capability.
    pub async fn open(pool: PgPool, mode: SpatialMode) -> Result<Self, StorageSetupError> {
        let detected = detect_spatial_support(&pool).await?;
        let spatial = choose_spatial_support(mode, detected)?;

        if spatial.is_native() {
            info!("Spatial storage: PostGIS geometry columns");
        } else {
            warn!(
                ?mode,
                "Spatial storage: metadata only; geometries are kept in record data"
            );
        }

        Ok(Self { pool, spatial })
    }

    /// Wraps a pool with an already known spatial capability.
    pub fn from_parts(pool: PgPool, spatial: SpatialSupport) -> Self {
        Self { pool, spatial }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn spatial(&self) -> SpatialSupport {
        self.spatial
    }

    /// Round-trips a trivial query.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes the pool, waiting for checked-out connections to be returned.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connections closed");
    }
}
