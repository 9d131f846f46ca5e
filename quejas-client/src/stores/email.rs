//! Email dispatch
//!
//! Not a collection: sends notification emails through the backend and
//! tracks the outcome of the last send under the same loading/error
//! contract as the resource stores.

use quejas_core::{EmailRequest, EmailResponse, FormSubmission};
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tracing::{info, warn};

use crate::config::{ClientConfig, EmailConfig};
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::store::display_message;

const SEND_PATH: &str = "/email/send";
const SUBMIT_FORM_PATH: &str = "/email/submit-form";

const SEND_ERROR: &str = "Error al enviar el correo";
const SUBMIT_FORM_ERROR: &str = "Error al enviar el formulario";

/// Snapshot of the email store
#[derive(Debug, Clone, Default)]
pub struct EmailState {
    pub loading: bool,
    pub error: Option<String>,
    pub last_response: Option<EmailResponse>,
}

/// Sends email through the backend
pub struct EmailStore {
    client: Arc<ApiClient>,
    sender: EmailConfig,
    dashboard_url: String,
    state: RwLock<EmailState>,
}

impl EmailStore {
    pub fn new(client: Arc<ApiClient>, config: &ClientConfig) -> Self {
        Self {
            client,
            sender: config.email.clone(),
            dashboard_url: config.frontend_url.clone(),
            state: RwLock::new(EmailState::default()),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, EmailState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> EmailState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn error(&self) -> Option<String> {
        self.state().error
    }

    pub fn reset(&self) {
        *self.write() = EmailState::default();
    }

    /// Send an arbitrary email; a missing sender falls back to configuration
    pub async fn send(&self, mut request: EmailRequest) -> ClientResult<EmailResponse> {
        if request.from.is_none() {
            request.from = Some(self.sender.from_address.clone());
        }
        if request.from_name.is_none() {
            request.from_name = Some(self.sender.from_name.clone());
        }

        info!(recipients = request.to.len(), subject = %request.subject, "Sending email");
        self.dispatch(SEND_PATH, &request, SEND_ERROR).await
    }

    /// Forward a complaint form to the backend's notification flow
    pub async fn submit_form(&self, mut form: FormSubmission) -> ClientResult<EmailResponse> {
        if form.from.is_none() {
            form.from = Some(self.sender.from_address.clone());
        }
        if form.from_name.is_none() {
            form.from_name = Some(self.sender.from_name.clone());
        }
        if form.dashboard_url.is_none() {
            form.dashboard_url = Some(self.dashboard_url.clone());
        }

        info!(branch = %form.branch_id, kind = %form.observation_type, "Submitting complaint form");
        self.dispatch(SUBMIT_FORM_PATH, &form, SUBMIT_FORM_ERROR).await
    }

    async fn dispatch<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<EmailResponse> {
        {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
        }

        let result: ClientResult<EmailResponse> = self.client.post(path, body).await;

        let mut state = self.write();
        state.loading = false;
        match &result {
            Ok(response) => state.last_response = Some(response.clone()),
            Err(e) => {
                warn!(path = path, error = %e, "Email dispatch failed");
                state.error = Some(display_message(e, fallback));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::{client, config};
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_fills_sender_from_config() {
        let (client, mock) = client();
        mock.on(Method::POST, "/email/send", 200, json!({"success": true, "messageId": "m-1"}));

        let store = EmailStore::new(Arc::new(client), &config());
        let response = store
            .send(EmailRequest {
                to: vec!["ops@siclo.com".into()],
                subject: "Nueva queja".into(),
                text: Some("Revisar".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(store.state().last_response.unwrap().message_id.as_deref(), Some("m-1"));

        let body = mock.last_request().unwrap().json_body().cloned().unwrap();
        assert_eq!(body["from"], "no-reply@siclo.com");
        assert_eq!(body["fromName"], "Siclo");
        assert!(body.get("html").is_none());
    }

    #[tokio::test]
    async fn test_explicit_sender_is_kept() {
        let (client, mock) = client();
        mock.on(Method::POST, "/email/send", 200, json!({"success": true}));

        let store = EmailStore::new(Arc::new(client), &config());
        store
            .send(EmailRequest {
                to: vec!["a@b.c".into()],
                subject: "x".into(),
                from: Some("quality@siclo.com".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let body = mock.last_request().unwrap().json_body().cloned().unwrap();
        assert_eq!(body["from"], "quality@siclo.com");
    }

    #[tokio::test]
    async fn test_submit_form_adds_dashboard_url() {
        let (client, mock) = client();
        mock.on(Method::POST, "/email/submit-form", 200, json!({"success": true}));

        let store = EmailStore::new(Arc::new(client), &config());
        store
            .submit_form(FormSubmission {
                full_name: "Ana".into(),
                email: "ana@example.com".into(),
                branch_id: "1".into(),
                observation_type: "Instalaciones".into(),
                detail: "Regaderas sin agua caliente".into(),
                attachments: vec![],
                from: None,
                from_name: None,
                dashboard_url: None,
            })
            .await
            .unwrap();

        let body = mock.last_request().unwrap().json_body().cloned().unwrap();
        assert_eq!(body["dashboardUrl"], "http://localhost:3000");
        assert_eq!(body["fullName"], "Ana");
    }

    #[tokio::test]
    async fn test_failure_sets_error() {
        let (client, mock) = client();
        mock.fail_once(Method::POST, "/email/send", "connection refused");

        let store = EmailStore::new(Arc::new(client), &config());
        let result = store
            .send(EmailRequest {
                to: vec!["a@b.c".into()],
                subject: "x".into(),
                ..Default::default()
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.error().as_deref(), Some(SEND_ERROR));
        assert!(!store.is_loading());
    }
}
