use crate::domain::contact_form::Phase;
use crate::domain::contact_message::{ContactMessage, ContactRequest, FormErrors};
use crate::domain::message_delivery::{DeliveryError, MessageDelivery, ProviderCredentials};
use crate::domain::template_params::TemplateParams;
use crate::utils::error_chain_fmt;
use std::sync::Arc;
use std::time::Duration;

pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send email. Please try again later.";

pub type SubmissionResult = Result<(), SubmissionError>;

#[derive(thiserror::Error)]
pub enum SubmissionError {
    #[error("The contact form has invalid fields")]
    ValidationError(FormErrors),
    #[error("Failed to deliver the contact message")]
    DeliveryError(#[source] DeliveryError),
}

impl std::fmt::Debug for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl SubmissionError {
    /// What the visitor gets to see. Delivery causes are never exposed.
    pub fn visitor_errors(&self) -> FormErrors {
        match self {
            SubmissionError::ValidationError(errors) => errors.clone(),
            SubmissionError::DeliveryError(_) => {
                FormErrors::submission_failed(DELIVERY_FAILED_MESSAGE)
            }
        }
    }
}

/// Validates, sanitizes and forwards contact messages.
///
/// Holds no per-submission state; concurrent calls are not serialized.
#[derive(Clone)]
pub struct ContactSubmission {
    delivery: Arc<dyn MessageDelivery>,
    provider: Arc<ProviderCredentials>,
    timeout: Option<Duration>,
}

impl ContactSubmission {
    pub fn new(delivery: Arc<dyn MessageDelivery>, provider: ProviderCredentials) -> Self {
        Self {
            delivery,
            provider: Arc::new(provider),
            timeout: None,
        }
    }

    /// Resolve pending deliveries as failed once `timeout` has elapsed.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn validate(request: ContactRequest) -> Result<ContactMessage, FormErrors> {
        request.try_into()
    }

    pub async fn deliver(&self, params: &TemplateParams) -> Result<(), DeliveryError> {
        let send = self.delivery.send(&self.provider, params);

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| DeliveryError::Timeout(limit))?,
            None => send.await,
        }
    }

    pub async fn submit(&self, request: ContactRequest) -> SubmissionResult {
        self.submit_tracking(request, |_| {}).await
    }

    /// Same as `submit`, reporting each working phase to `on_phase` before
    /// it starts.
    #[tracing::instrument(
        name = "Submitting a contact message",
        skip(self, request, on_phase),
        fields(sender_email = %request.email)
    )]
    pub async fn submit_tracking<F>(
        &self,
        request: ContactRequest,
        mut on_phase: F,
    ) -> SubmissionResult
    where
        F: FnMut(Phase) + Send,
    {
        on_phase(Phase::Validating);
        let contact = Self::validate(request).map_err(SubmissionError::ValidationError)?;

        on_phase(Phase::Sanitizing);
        let params = TemplateParams::sanitized(&contact);

        on_phase(Phase::Sending);
        self.deliver(&params)
            .await
            .map_err(SubmissionError::DeliveryError)
    }
}
