use std::sync::Arc;

use flashdeck_auth::{BcryptHasher, PasswordHasher, PasswordPolicy, TokenCodec};
use flashdeck_config::database::init_db_pool;
use flashdeck_config::{CleanupConfig, JwtConfig, LockoutConfig};
use flashdeck_core::Clock;

use crate::maintenance::cleanup;
use crate::modules::auth::{LoginAttemptService, LoginService, PasswordResetService};
use crate::modules::users::UserService;
use crate::store::{LoginAttemptStore, PgStore, ResetTokenStore, UserStore};

/// Wired-up services plus the shared stores and clock they run on.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub attempts: Arc<dyn LoginAttemptStore>,
    pub tokens: Arc<dyn ResetTokenStore>,
    pub clock: Arc<Clock>,
    pub codec: Arc<TokenCodec>,
    pub login_attempts: Arc<LoginAttemptService>,
    pub login: LoginService,
    pub password_reset: PasswordResetService,
    pub user_service: UserService,
    pub cleanup_config: CleanupConfig,
}

impl AppState {
    /// Wire services over the given stores and clock.
    ///
    /// Tests inject an in-memory store and a fixed clock; production goes
    /// through [`init_app_state`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn UserStore>,
        attempts: Arc<dyn LoginAttemptStore>,
        tokens: Arc<dyn ResetTokenStore>,
        clock: Arc<Clock>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_config: &JwtConfig,
        lockout_config: LockoutConfig,
        cleanup_config: CleanupConfig,
    ) -> Self {
        let codec = Arc::new(TokenCodec::new(jwt_config, clock.clone()));
        let policy = PasswordPolicy::default();

        let login_attempts = Arc::new(LoginAttemptService::new(
            attempts.clone(),
            clock.clone(),
            lockout_config,
        ));
        let login = LoginService::new(
            users.clone(),
            login_attempts.clone(),
            hasher.clone(),
            codec.clone(),
        );
        let password_reset = PasswordResetService::new(
            users.clone(),
            tokens.clone(),
            codec.clone(),
            hasher.clone(),
            policy.clone(),
            clock.clone(),
        );
        let user_service = UserService::new(users.clone(), hasher, policy);

        Self {
            users,
            attempts,
            tokens,
            clock,
            codec,
            login_attempts,
            login,
            password_reset,
            user_service,
            cleanup_config,
        }
    }

    /// Start the periodic reset-token cleanup task.
    pub fn spawn_cleanup(&self) -> tokio::task::JoinHandle<()> {
        cleanup::spawn(self.tokens.clone(), self.clock.clone(), self.cleanup_config)
    }
}

/// Production wiring: Postgres stores, the system clock and bcrypt at its
/// default cost, configured from the environment.
pub async fn init_app_state() -> AppState {
    dotenvy::dotenv().ok();

    let store = PgStore::new(init_db_pool().await);
    store
        .migrate()
        .await
        .expect("Failed to run database migrations");

    let store = Arc::new(store);
    AppState::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(Clock::system()),
        Arc::new(BcryptHasher::new()),
        &JwtConfig::from_env(),
        LockoutConfig::from_env(),
        CleanupConfig::from_env(),
    )
}
