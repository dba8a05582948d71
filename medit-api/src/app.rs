use crate::auth::AuthService;
use crate::database::Database;
use crate::repositories::{
    ContactRepository, ConversationRepository, DiseaseRepository, FamilyRepository,
    ReportRepository, UserRepository,
};
use crate::router::create_app_router;
use medit_assistant::Assistant;
use medit_core::config::loader::{get_config_path, load_config};
use medit_core::config::model::AppConfig;
use medit_core::llm::build_llm_service;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub users: UserRepository,
    pub families: FamilyRepository,
    pub contacts: ContactRepository,
    pub conversations: ConversationRepository,
    pub reports: ReportRepository,
    pub diseases: DiseaseRepository,
    pub assistant: Assistant,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Connect storage, run migrations and wire up the assistant.
    pub async fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let db = Database::new(&config.database).await?;
        db.run_migrations().await?;
        info!("Database connected and migrations applied");

        let llm = build_llm_service(&config.llm).await?;
        info!("LLM service initialized (provider: {})", llm.provider_name());
        let assistant = Assistant::new(llm);

        let auth = Arc::new(AuthService::new(&config.auth));

        Ok(Self {
            users: UserRepository::new(db.clone()),
            families: FamilyRepository::new(db.clone()),
            contacts: ContactRepository::new(db.clone()),
            conversations: ConversationRepository::new(db.clone()),
            reports: ReportRepository::new(db.clone()),
            diseases: DiseaseRepository::new(db.clone()),
            db,
            assistant,
            auth,
            config: Arc::new(config),
        })
    }
}

/// Create the application
pub fn create_app(state: AppState) -> Router {
    create_app_router(state)
}

/// Start the application server
pub async fn start_server() -> Result<()> {
    // Logging is driven entirely by RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting Medit API server...");
    let config_path = get_config_path();
    info!("Configuration file: {}", config_path);

    let config = load_config()?;

    let app_state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            return Err(e);
        }
    };

    let bind_address = app_state.config.server.bind_address.clone();
    let app = create_app(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                              - API information");
    info!("  GET  /health                        - Health check");
    info!("  POST /api/v1/auth/register          - Register a user");
    info!("  POST /api/v1/auth/login             - Log in");
    info!("  GET  /api/v1/users                  - List users");
    info!("  POST /api/v1/conversations          - Open a conversation");
    info!("  POST /api/v1/conversations/{{id}}/messages - Talk to the assistant");
    info!("  POST /api/v1/conversations/{{id}}/report   - Generate a health report");

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {}", e);
        }
        info!("Shutdown signal received");
    };

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal);

    if let Err(e) = server.await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Application shutdown complete");
    Ok(())
}
