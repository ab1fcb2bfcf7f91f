// Application state for HTTP handlers
use crate::application::credential_verifier::CredentialVerifier;
use crate::application::view_router::ViewRouter;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ViewRouter>,
    pub verifier: CredentialVerifier,
}
