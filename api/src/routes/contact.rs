use crate::domain::{ContactRequest, ContactSubmission, SubmissionError};
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, Either, HttpResponse, ResponseError};

#[derive(thiserror::Error)]
#[error(transparent)]
pub struct ContactError(#[from] SubmissionError);

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            SubmissionError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubmissionError::DeliveryError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.0.visitor_errors())
    }
}

#[tracing::instrument(
    name = "Relaying a contact message",
    skip(form, submission),
    fields(sender_email = tracing::field::Empty, sender_name = tracing::field::Empty)
)]
pub async fn contact(
    form: Either<web::Form<ContactRequest>, web::Json<ContactRequest>>,
    submission: web::Data<ContactSubmission>,
) -> Result<HttpResponse, ContactError> {
    let request = match form {
        Either::Left(form) => form.into_inner(),
        Either::Right(json) => json.into_inner(),
    };

    let span = tracing::Span::current();
    span.record("sender_email", tracing::field::display(&request.email));
    span.record("sender_name", tracing::field::display(&request.name));

    if let Err(e) = submission.submit(request).await {
        if let SubmissionError::DeliveryError(cause) = &e {
            tracing::error!(error.cause_chain = ?cause, "Failed to relay the contact message");
        }
        return Err(e.into());
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "submitted" })))
}
