use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::app_conf::AppConfig;
use crate::config::database_conf::DatabaseConfig;
use crate::config::jwt_conf::JwtConfig;
use crate::config::AdminUserConfig;
use crate::handler::auth_handler::AuthState;
use crate::middlewares::auth_middleware::SessionAuthState;
use crate::model::user::UserRole;
use crate::repository::user_repo::{SqliteUserRepository, UserRepository};
use crate::router::auth_router::auth_router;
use crate::router::user_router::user_router;
use crate::service::auth_service::{AuthService, AuthServiceImpl, CreateUser};
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::ServiceError;
use crate::util::jwt::SessionTokenUtilsImpl;

pub struct App {
    config: AppConfig,
    router: Router,
    pub auth_service: Arc<dyn AuthService>,
}

impl App {
    pub async fn new() -> Self {
        let config = AppConfig::from_env();
        let jwt_config = JwtConfig::from_env().expect("JWT config error");
        let database_config = DatabaseConfig::from_env();

        let user_repo: Arc<dyn UserRepository> = Arc::new(
            SqliteUserRepository::connect(&database_config)
                .await
                .expect("User repository error"),
        );
        let token_utils = Arc::new(SessionTokenUtilsImpl::new(jwt_config));
        let auth_service: Arc<dyn AuthService> = Arc::new(AuthServiceImpl::new(user_repo.clone()));
        let user_service: Arc<dyn UserService> = Arc::new(UserServiceImpl::new(user_repo));

        let auth_state = Arc::new(AuthState {
            auth_service: auth_service.clone(),
            token_utils: token_utils.clone(),
            config: config.clone(),
        });
        let session_auth_state = Arc::new(SessionAuthState { token_utils });

        let router = Router::new()
            .nest(
                "/api",
                auth_router(auth_state).merge(user_router(user_service, session_auth_state)),
            )
            .route("/health", get(|| async { "OK" }));

        let app = App {
            config,
            router,
            auth_service,
        };
        app.create_first_admin_user().await;
        app
    }

    pub async fn start(self) {
        let addr = SocketAddr::new(self.config.host.parse().expect("Invalid host"), self.config.port);
        info!("🚀 Server running at http://{}", addr);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("Failed to bind address");
        axum::serve(listener, self.router)
            .await
            .expect("Failed to start server");
    }

    async fn create_first_admin_user(&self) {
        // Load admin config
        let admin_conf = match AdminUserConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                warn!("Admin user config not loaded: {e}");
                return;
            }
        };

        let result = self
            .auth_service
            .create_user(CreateUser {
                name: admin_conf.name,
                email: admin_conf.email,
                password: admin_conf.password,
                role: UserRole::Admin,
            })
            .await;
        match result {
            Ok(_) => info!("First admin user created."),
            Err(ServiceError::AlreadyExists(_)) => {
                info!("Admin user already exists, skipping creation.")
            }
            Err(e) => error!("Failed to create admin user: {e}"),
        }
    }
}
