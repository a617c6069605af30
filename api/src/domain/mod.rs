pub mod contact_email;
pub mod contact_form;
pub mod contact_message;
pub mod contact_submission;
pub mod message_body;
pub mod message_delivery;
pub mod message_subject;
pub mod sender_name;
pub mod template_params;

pub use crate::domain::contact_form::{ContactForm, Phase};
pub use crate::domain::contact_message::{ContactMessage, ContactRequest, Field, FormErrors};
pub use crate::domain::contact_submission::{
    ContactSubmission, SubmissionError, SubmissionResult, DELIVERY_FAILED_MESSAGE,
};
pub use crate::domain::message_delivery::{DeliveryError, MessageDelivery, ProviderCredentials};
pub use crate::domain::template_params::{sanitize, TemplateParams};
