pub mod api;
pub mod auth;
pub mod consts;
pub mod middleware;

use application::auth::{AuthService, PasswordHasher, TokenService};
use application::command::catalog::CatalogAppService;
use application::command::comment::CommentAppService;
use application::command::notification::NotificationAppService;
use application::command::rating::RatingAppService;
use application::command::shared::IdGenerator;
use application::command::user::UserAppService;
use application::error::AppError;
use auth::RateLimiter;
use infra::auth::{AuthConfig, BcryptPasswordHasher, JwtTokenService};
use infra::config::AppConfigImpl;
use infra::id_generator::SnowflakeIdGenerator;
use infra::repository::postgres::command::{
    catalog::CatalogRepositoryImpl, comment::CommentRepositoryImpl,
    notification::NotificationRepositoryImpl, rating::RatingRepositoryImpl,
    user::UserRepositoryImpl,
};
use infra::repository::postgres::query::{
    catalog::CatalogDaoImpl, comment::CommentDaoImpl, notification::NotificationDaoImpl,
    rating::RatingDaoImpl,
};
use log::info;
use parking_lot::Mutex;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub app_cfg: AppConfigImpl,
    pub db: Arc<DatabaseConnection>,
    pub id_generator: Arc<dyn IdGenerator>,
    pub login_limiter: Mutex<RateLimiter>,
}

impl AppState {
    pub async fn init_db(app_cfg: &AppConfigImpl) -> Result<DatabaseConnection, DbErr> {
        let pool = app_cfg.database();
        let mut opt = ConnectOptions::new(app_cfg.database_url());
        opt.max_connections(pool.max_connections)
            .min_connections(pool.min_connections)
            .connect_timeout(Duration::from_secs(3))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(300))
            .sqlx_logging(false)
            .sqlx_logging_level(log::LevelFilter::Info);

        let db = Database::connect(opt).await?;
        db.execute(Statement::from_string(DbBackend::Postgres, "SELECT 1".to_owned()))
            .await?;

        info!("Database connection pool initialized successfully");
        Ok(db)
    }

    pub fn new(db: DatabaseConnection, app_cfg: AppConfigImpl) -> Result<Self, AppError> {
        let id_generator: Arc<dyn IdGenerator> = Arc::new(SnowflakeIdGenerator::new(1)?);
        let login_limiter = Mutex::new(RateLimiter::new(
            app_cfg.login_max_attempts() as usize,
            app_cfg.login_window_secs(),
        ));
        Ok(Self {
            app_cfg,
            db: Arc::new(db),
            id_generator,
            login_limiter,
        })
    }

    pub fn token_service(&self) -> JwtTokenService {
        JwtTokenService::from_config(&self.app_cfg)
    }

    pub fn auth_service(&self) -> AuthService {
        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptPasswordHasher::new(self.app_cfg.salt_cost()));
        let token_svc: Arc<dyn TokenService> = Arc::new(self.token_service());
        AuthService::new(
            Arc::new(UserRepositoryImpl::new(self.db.clone())),
            hasher,
            token_svc,
            self.id_generator.clone(),
        )
    }

    pub fn user_service(&self) -> UserAppService {
        UserAppService::new(Arc::new(UserRepositoryImpl::new(self.db.clone())))
    }

    pub fn rating_service(&self) -> RatingAppService {
        RatingAppService::new(
            Arc::new(RatingRepositoryImpl::new(self.db.clone())),
            Arc::new(CatalogRepositoryImpl::new(self.db.clone())),
            self.id_generator.clone(),
        )
    }

    pub fn comment_service(&self) -> CommentAppService {
        CommentAppService::new(
            Arc::new(CommentRepositoryImpl::new(self.db.clone())),
            Arc::new(NotificationRepositoryImpl::new(self.db.clone())),
            Arc::new(CatalogRepositoryImpl::new(self.db.clone())),
            self.id_generator.clone(),
        )
    }

    pub fn notification_service(&self) -> NotificationAppService {
        NotificationAppService::new(Arc::new(NotificationRepositoryImpl::new(self.db.clone())))
    }

    pub fn catalog_service(&self) -> CatalogAppService {
        CatalogAppService::new(Arc::new(CatalogRepositoryImpl::new(self.db.clone())))
    }

    pub fn catalog_dao(&self) -> Arc<CatalogDaoImpl> {
        Arc::new(CatalogDaoImpl::new(self.db.clone()))
    }

    pub fn rating_dao(&self) -> Arc<RatingDaoImpl> {
        Arc::new(RatingDaoImpl::new(self.db.clone()))
    }

    pub fn comment_dao(&self) -> Arc<CommentDaoImpl> {
        Arc::new(CommentDaoImpl::new(self.db.clone()))
    }

    pub fn notification_dao(&self) -> Arc<NotificationDaoImpl> {
        Arc::new(NotificationDaoImpl::new(self.db.clone()))
    }
}

/// 启动时按配置重建曲库
pub async fn seed_catalog(state: &AppState) -> Result<(), AppError> {
    let catalog_cfg = state.app_cfg.catalog();
    if !catalog_cfg.seed_on_start {
        return Ok(());
    }
    info!("seeding catalog from {}", catalog_cfg.seed_path);
    let seed = infra::seed::load_seed(&catalog_cfg.seed_path)?;
    state.catalog_service().seed(&seed).await?;
    Ok(())
}
