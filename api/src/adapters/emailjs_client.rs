use crate::domain::{DeliveryError, MessageDelivery, ProviderCredentials, TemplateParams};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;

/// Delivers contact messages through the EmailJS REST API.
#[derive(Clone)]
pub struct EmailJsClient {
    http_client: Client,
    base_url: String,
}

impl EmailJsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url,
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a TemplateParams,
}

#[async_trait]
impl MessageDelivery for EmailJsClient {
    #[tracing::instrument(
        name = "Sending a contact message through EmailJS",
        skip(self, provider, params),
        fields(service_id = %provider.service_id, template_id = %provider.template_id)
    )]
    async fn send(
        &self,
        provider: &ProviderCredentials,
        params: &TemplateParams,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}/api/v1.0/email/send", self.base_url);
        let request_body = SendEmailRequest {
            service_id: &provider.service_id,
            template_id: &provider.template_id,
            user_id: provider.public_key.expose_secret(),
            access_token: provider
                .private_key
                .as_ref()
                .map(|key| key.expose_secret().as_str()),
            template_params: params,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(rejection(status, response.text().await))
    }
}

/// A failed body read is kept in the cause instead of an empty string.
fn rejection(status: StatusCode, body: Result<String, reqwest::Error>) -> DeliveryError {
    let body = body.unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    DeliveryError::Rejected {
        status: status.as_u16(),
        body,
    }
}
