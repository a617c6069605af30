use crate::domain::template_params::TemplateParams;
use crate::utils::error_chain_fmt;
use async_trait::async_trait;
use secrecy::Secret;
use std::time::Duration;

/// Static identifiers issued by the delivery provider. They are passed
/// through untouched.
#[derive(Clone)]
pub struct ProviderCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: Secret<String>,
    pub private_key: Option<Secret<String>>,
}

#[derive(thiserror::Error)]
pub enum DeliveryError {
    #[error("The delivery provider did not answer within {0:?}")]
    Timeout(Duration),
    #[error("The delivery provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to reach the delivery provider")]
    Transport(#[source] reqwest::Error),
}

impl std::fmt::Debug for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Outbound seam towards the service that actually transmits the message.
///
/// Any `Ok` is a successful delivery, any `Err` a failed one.
#[async_trait]
pub trait MessageDelivery: Send + Sync {
    async fn send(
        &self,
        provider: &ProviderCredentials,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError>;
}
