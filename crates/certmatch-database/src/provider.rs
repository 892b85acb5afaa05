//! Store bundle that dispatches to the configured provider.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use certmatch_core::config::{DatabaseConfig, DatabaseProvider};
use certmatch_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration;
use crate::repositories::{
    ApplicationRepository, CompanyRepository, ContractRepository, ScheduleRepository,
    UserRepository,
};
use crate::store::{ApplicationStore, CompanyStore, ContractStore, ScheduleStore, UserStore};

/// One handle per store trait, all backed by the same provider.
///
/// The provider is selected at construction time from configuration.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Company profiles.
    pub companies: Arc<dyn CompanyStore>,
    /// Certification applications.
    pub applications: Arc<dyn ApplicationStore>,
    /// Schedule entries.
    pub schedules: Arc<dyn ScheduleStore>,
    /// Contracts.
    pub contracts: Arc<dyn ContractStore>,
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory(MemoryStore),
}

impl Stores {
    /// Build stores for the configured provider. For PostgreSQL this opens
    /// the pool and, when enabled, applies pending migrations.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                info!("Initializing PostgreSQL store provider");
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    migration::run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory store provider");
                Ok(Self::memory(MemoryStore::new()))
            }
        }
    }

    /// Stores backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(UserRepository::new(pg.clone())),
            companies: Arc::new(CompanyRepository::new(pg.clone())),
            applications: Arc::new(ApplicationRepository::new(pg.clone())),
            schedules: Arc::new(ScheduleRepository::new(pg.clone())),
            contracts: Arc::new(ContractRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores backed by a shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        Self {
            users: Arc::new(store.clone()),
            companies: Arc::new(store.clone()),
            applications: Arc::new(store.clone()),
            schedules: Arc::new(store.clone()),
            contracts: Arc::new(store.clone()),
            backend: Backend::Memory(store),
        }
    }

    /// Which provider backs these stores.
    pub fn provider(&self) -> DatabaseProvider {
        match self.backend {
            Backend::Postgres(_) => DatabaseProvider::Postgres,
            Backend::Memory(_) => DatabaseProvider::Memory,
        }
    }

    /// The PostgreSQL pool, when that provider is active.
    pub fn pool(&self) -> Option<&DatabasePool> {
        match &self.backend {
            Backend::Postgres(pool) => Some(pool),
            Backend::Memory(_) => None,
        }
    }

    /// Check the backend is reachable and report the round-trip time.
    pub async fn ping(&self) -> AppResult<Duration> {
        match &self.backend {
            Backend::Postgres(pool) => pool.ping().await,
            Backend::Memory(_) => Ok(Duration::ZERO),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}
