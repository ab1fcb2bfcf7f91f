// View router - owns the page state and drives every panel load and user action
use crate::application::chart_manager::ChartManager;
use crate::application::contact_service::ContactService;
use crate::application::credential_verifier::{CredentialVerifier, Credentials};
use crate::application::document_store::{DocumentStore, StoreError, StoreHandle};
use crate::application::load_tickets::{LoadTickets, Panel};
use crate::application::session_store::{SessionStore, StorageError};
use crate::application::summary_loader::SummaryLoader;
use crate::domain::contact::ContactDetails;
use crate::domain::session::Theme;
use crate::domain::view::{ContactsTable, LoginForm, Page, Reveal, Section, TransitionPlan, Visibility};
use crate::infrastructure::config::TransitionSettings;
use crate::infrastructure::csv_export::CsvExport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Database not initialized. Please refresh the page.")]
    NotInitialized,

    #[error("Please log in first")]
    Unauthenticated,

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("No contacts to export")]
    NothingToExport,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Completion report the client reveals the analytics section on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartsReady {
    pub data: &'static str,
    pub slots: usize,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOutcome {
    pub transition: TransitionPlan,
    pub charts_ready: Option<ChartsReady>,
    pub page: Page,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum LoginOutcome {
    Accepted { page: Page },
    Rejected { message: String, page: Page },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

enum AnalyticsLoad {
    Applied(ChartsReady),
    Superseded,
    Skipped,
}

pub struct ViewRouter {
    store: StoreHandle,
    sessions: SessionStore,
    verifier: CredentialVerifier,
    summary: SummaryLoader,
    contacts: ContactService,
    charts: ChartManager,
    transitions: TransitionSettings,
    tickets: LoadTickets,
    page: RwLock<Page>,
}

impl ViewRouter {
    pub fn new(
        store: StoreHandle,
        sessions: SessionStore,
        verifier: CredentialVerifier,
        transitions: TransitionSettings,
    ) -> Self {
        let page = Page::new(sessions.session(), sessions.theme());
        Self {
            store,
            sessions,
            verifier,
            summary: SummaryLoader::new(),
            contacts: ContactService::new(),
            charts: ChartManager::new(),
            transitions,
            tickets: LoadTickets::default(),
            page: RwLock::new(page),
        }
    }

    /// Picks the initial section from the stored session
    pub async fn start(&self) {
        let session = self.sessions.session();
        let logged_in = session.logged_in;
        {
            let mut page = self.page.write().await;
            page.session = session;
            page.theme = self.sessions.theme();
            if logged_in {
                page.show_only(Section::Dashboard, Visibility::Visible);
            } else {
                page.show_only(Section::Login, Visibility::Visible);
            }
        }

        if logged_in {
            tracing::info!("Existing session found, opening dashboard");
            self.load_summary().await;
        }
    }

    pub async fn page(&self) -> Page {
        self.page.read().await.clone()
    }

    fn plan(&self, target: Section, reveal: Reveal) -> TransitionPlan {
        TransitionPlan {
            target,
            fade_out_ms: self.transitions.fade_out_ms,
            settle_ms: self.transitions.settle_ms,
            offset_px: self.transitions.offset_px,
            reveal,
        }
    }

    /// Shows one section and runs the loader bound to it.
    /// Without a session every target resolves to the login section.
    pub async fn navigate(&self, requested: Section) -> NavigationOutcome {
        let target = if requested != Section::Login && !self.sessions.session().logged_in {
            tracing::warn!(section = ?requested, "Navigation without a session, staying on login");
            Section::Login
        } else {
            requested
        };
        tracing::debug!(section = target.element_id(), "Navigating");

        if target == Section::Analytics {
            self.page
                .write()
                .await
                .show_only(Section::Analytics, Visibility::Pending);

            // the newest load reveals the section; a skipped load reveals it here
            let charts_ready = match self.load_analytics().await {
                AnalyticsLoad::Applied(ready) => Some(ready),
                AnalyticsLoad::Superseded => None,
                AnalyticsLoad::Skipped => {
                    let mut page = self.page.write().await;
                    if page.visibility(Section::Analytics) == Visibility::Pending {
                        page.show_only(Section::Analytics, Visibility::Visible);
                    }
                    None
                }
            };

            return NavigationOutcome {
                transition: self.plan(target, Reveal::OnChartsReady),
                charts_ready,
                page: self.page().await,
            };
        }

        self.page.write().await.show_only(target, Visibility::Visible);
        match target {
            Section::Dashboard => self.load_summary().await,
            Section::Contacts => self.load_contacts().await,
            Section::Login | Section::Settings | Section::Analytics => {}
        }

        NavigationOutcome {
            transition: self.plan(target, Reveal::Immediate),
            charts_ready: None,
            page: self.page().await,
        }
    }

    pub async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, ActionError> {
        {
            let mut page = self.page.write().await;
            page.login = LoginForm {
                submitting: true,
                alert: None,
            };
        }

        let verdict = self.verifier.verify(&credentials);
        if !verdict.success {
            tracing::warn!(username = ?credentials.username, "Login rejected");
            let mut page = self.page.write().await;
            page.login = LoginForm {
                submitting: false,
                alert: Some(format!("Login failed: {}", verdict.message)),
            };
            return Ok(LoginOutcome::Rejected {
                message: verdict.message,
                page: page.clone(),
            });
        }

        let username = credentials.username.unwrap_or_default();
        let session = match self.sessions.login(&username) {
            Ok(session) => session,
            Err(e) => {
                let mut page = self.page.write().await;
                page.login = LoginForm {
                    submitting: false,
                    alert: Some("Login failed. Please try again.".to_string()),
                };
                return Err(e.into());
            }
        };
        tracing::info!(%username, "Admin logged in");

        {
            let mut page = self.page.write().await;
            page.session = session;
            page.login = LoginForm::default();
            page.show_only(Section::Dashboard, Visibility::Visible);
        }
        self.load_summary().await;

        Ok(LoginOutcome::Accepted {
            page: self.page().await,
        })
    }

    pub async fn logout(&self) -> Result<Page, ActionError> {
        self.sessions.logout()?;
        tracing::info!("Admin logged out");

        let mut page = self.page.write().await;
        page.session = self.sessions.session();
        page.login = LoginForm::default();
        page.show_only(Section::Login, Visibility::Visible);
        Ok(page.clone())
    }

    /// Persists the theme; charts are rebuilt when the analytics section is showing
    pub async fn set_theme(&self, theme: Theme) -> Result<Page, ActionError> {
        self.sessions.set_theme(theme)?;

        let on_analytics = {
            let mut page = self.page.write().await;
            page.theme = theme;
            page.current_section() == Some(Section::Analytics)
        };
        if on_analytics {
            self.load_analytics().await;
        }

        Ok(self.page().await)
    }

    /// Full details of a contact. Marking it read follows; a failed update is
    /// logged and the details are still returned.
    pub async fn view_contact(&self, id: &str) -> Result<ContactDetails, ActionError> {
        let store = self.action_store()?;

        let details = self
            .contacts
            .details(&store, id)
            .await?
            .ok_or_else(|| ActionError::NotFound(id.to_string()))?;

        match self.contacts.mark_read(&store, id).await {
            Ok(()) => {
                futures::join!(self.load_contacts(), self.load_summary());
            }
            Err(e) => tracing::error!(id, error = %e, "Error marking contact as read"),
        }
        Ok(details)
    }

    pub async fn delete_contact(&self, id: &str, confirmed: bool) -> Result<DeleteOutcome, ActionError> {
        let store = self.action_store()?;
        if !confirmed {
            tracing::debug!(id, "Delete not confirmed");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.contacts.delete(&store, id).await?;
        futures::join!(self.load_contacts(), self.load_summary());
        Ok(DeleteOutcome::Deleted)
    }

    pub async fn export_contacts(&self, now: DateTime<Utc>) -> Result<CsvExport, ActionError> {
        let store = self.action_store()?;
        self.contacts
            .export(&store, now)
            .await?
            .ok_or(ActionError::NothingToExport)
    }

    fn action_store(&self) -> Result<Arc<dyn DocumentStore>, ActionError> {
        if !self.sessions.session().logged_in {
            return Err(ActionError::Unauthenticated);
        }
        self.store.require().cloned().map_err(|e| {
            tracing::error!(error = %e, "Database not initialized");
            ActionError::NotInitialized
        })
    }

    /// Store for a panel load, or `None` after a failed initialization
    fn loader_store(&self, panel: Panel) -> Option<Arc<dyn DocumentStore>> {
        match self.store.require() {
            Ok(store) => Some(store.clone()),
            Err(e) => {
                tracing::error!(?panel, error = %e, "Database not initialized, skipping load");
                None
            }
        }
    }

    pub async fn load_summary(&self) {
        let Some(store) = self.loader_store(Panel::Summary) else {
            return;
        };
        let ticket = self.tickets.issue(Panel::Summary);
        let summary = self.summary.load(&store).await;

        let mut page = self.page.write().await;
        if self.tickets.is_current(ticket) {
            page.summary = summary;
        } else {
            tracing::debug!("Discarding superseded summary load");
        }
    }

    pub async fn load_contacts(&self) {
        let Some(store) = self.loader_store(Panel::Contacts) else {
            return;
        };
        let ticket = self.tickets.issue(Panel::Contacts);
        self.page.write().await.contacts = ContactsTable::loading();

        let table = self.contacts.list(&store).await;

        let mut page = self.page.write().await;
        if self.tickets.is_current(ticket) {
            page.contacts = table;
        } else {
            tracing::debug!("Discarding superseded contacts load");
        }
    }

    async fn load_analytics(&self) -> AnalyticsLoad {
        let Some(store) = self.loader_store(Panel::Analytics) else {
            return AnalyticsLoad::Skipped;
        };
        let ticket = self.tickets.issue(Panel::Analytics);
        let build = self.charts.load(&store, self.sessions.theme()).await;

        let mut page = self.page.write().await;
        if !self.tickets.is_current(ticket) {
            tracing::debug!("Discarding superseded analytics load");
            return AnalyticsLoad::Superseded;
        }

        let ready = ChartsReady {
            data: build.data,
            slots: build.views.len(),
            elapsed_ms: build.elapsed_ms,
        };
        page.charts = build.views;
        if page.visibility(Section::Analytics) == Visibility::Pending {
            page.show_only(Section::Analytics, Visibility::Visible);
        }
        AnalyticsLoad::Applied(ready)
    }
}
