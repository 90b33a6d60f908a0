use std::sync::Arc;

use sqlx::PgPool;
use tracing::warn;

use crate::config::AppConfig;
use crate::db;
use crate::users::{
    password::{Argon2Hasher, PasswordHasher},
    repo::{MemoryUserStore, PgUserStore, UserStore},
    services::UserService,
};

/// Migrates the schema, then wraps the pool. A migration error stops startup.
async fn postgres_store(pool: PgPool) -> anyhow::Result<Arc<dyn UserStore>> {
    db::migrate(&pool).await?;
    Ok(Arc::new(PgUserStore::new(pool)))
}

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn UserStore> = match &config.db {
            Some(db_cfg) => postgres_store(db::connect(db_cfg).await?).await?,
            None => {
                warn!("DATABASE_URL not set; users are kept in memory only");
                Arc::new(MemoryUserStore::new())
            }
        };

        Ok(Self::from_parts(store, Arc::new(Argon2Hasher), Arc::new(config)))
    }

    pub fn from_parts(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            users: UserService::new(store, hasher),
            config,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::users::testing::FakeHasher;

        let config = Arc::new(AppConfig {
            db: None,
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(
            Arc::new(MemoryUserStore::new()),
            Arc::new(FakeHasher::default()),
            config,
        )
    }
}
