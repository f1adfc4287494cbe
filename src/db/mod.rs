use crate::config::SecurityConfig;
use crate::models::anime::Anime;
use crate::models::user::{NewUser, User, UserDetails};
use anyhow::Result;
use futures::stream::BoxStream;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // Anime

    pub async fn list_all_anime(&self) -> Result<Vec<Anime>> {
        self.anime_repo().list_all().await
    }

    pub async fn get_anime(&self, id: i64) -> Result<Option<Anime>> {
        self.anime_repo().get(id).await
    }

    pub async fn save_anime(&self, anime: &Anime) -> Result<Anime> {
        self.anime_repo().save(anime).await
    }

    pub fn save_all_anime(&self, items: Vec<Anime>) -> BoxStream<'static, Result<Anime>> {
        self.anime_repo().save_all(items)
    }

    pub async fn delete_anime(&self, id: i64) -> Result<bool> {
        self.anime_repo().delete(id).await
    }

    // Users

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserDetails>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn verify_user_password(&self, details: &UserDetails, password: &str) -> Result<bool> {
        self.user_repo().verify_password(details, password).await
    }

    pub async fn create_user(&self, new_user: NewUser, config: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new_user, config).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    /// Seeds the configured users when the `usr` table is empty.
    ///
    /// Returns the number of users inserted.
    pub async fn bootstrap_users(&self, config: &SecurityConfig) -> Result<usize> {
        let repo = self.user_repo();
        if repo.count().await? > 0 {
            return Ok(0);
        }

        for user in &config.bootstrap_users {
            if user.username == "admin" && user.password == "password" {
                warn!("Bootstrapping user 'admin' with the default password, change it in config.toml");
            }
            repo.create(
                NewUser {
                    name: user.name.clone(),
                    username: user.username.clone(),
                    password: user.password.clone(),
                    role: user.role,
                },
                config,
            )
            .await?;
        }

        info!("Bootstrapped {} user(s)", config.bootstrap_users.len());
        Ok(config.bootstrap_users.len())
    }
}
