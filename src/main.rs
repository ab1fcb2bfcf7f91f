// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::credential_verifier::CredentialVerifier;
use crate::application::document_store::{DocumentStore, StoreHandle};
use crate::application::session_store::{LocalStorage, SessionStore};
use crate::application::view_router::ViewRouter;
use crate::infrastructure::config::{StoreBackend, load_admin_config, load_credentials};
use crate::infrastructure::file_storage::{JsonFileStorage, MemoryStorage};
use crate::infrastructure::firestore_repository::FirestoreRepository;
use crate::infrastructure::memory_store::MemoryStore;
use crate::presentation::app_state::AppState;
use crate::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_admin_config()?;
    let credentials = load_credentials()?;

    // Create document store (infrastructure layer)
    let store: Arc<dyn DocumentStore> = match config.store.backend {
        StoreBackend::Firestore => Arc::new(FirestoreRepository::new(&config.store)?),
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store; data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store = StoreHandle::initialize(store).await;
    if !store.is_ready() {
        tracing::warn!("Starting without a database; panels will stay empty");
    }

    // An empty storage path keeps the session in memory
    let storage: Arc<dyn LocalStorage> = if config.session.storage_path.is_empty() {
        Arc::new(MemoryStorage::default())
    } else {
        Arc::new(JsonFileStorage::open(&config.session.storage_path)?)
    };

    // Create services (application layer)
    let verifier = CredentialVerifier::new(credentials.username, credentials.password);
    let router = Arc::new(ViewRouter::new(
        store,
        SessionStore::new(storage),
        verifier.clone(),
        config.transitions.clone(),
    ));
    router.start().await;

    // Create application state
    let state = Arc::new(AppState { router, verifier });

    // Build router (presentation layer)
    let app = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind))?;
    tracing::info!(%addr, "Starting grosity-admin service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
