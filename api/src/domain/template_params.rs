use crate::domain::contact_message::ContactMessage;
use serde::Serialize;
use std::collections::HashSet;

/// Strip markup from visitor input before it leaves the service.
///
/// Tags are removed, `<script>` and `<style>` are dropped together with
/// their content, and the remaining text is HTML-escaped. Applying it to
/// its own output is a no-op.
pub fn sanitize(input: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string()
}

/// Named template variables handed to the delivery provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub email: String,
    pub name: String,
    pub subject: String,
    pub message: String,
}

impl TemplateParams {
    pub fn sanitized(contact: &ContactMessage) -> Self {
        Self {
            email: sanitize(contact.email.as_ref()),
            name: sanitize(contact.name.as_ref()),
            subject: sanitize(contact.subject.as_ref()),
            message: sanitize(contact.message.as_ref()),
        }
    }
}
