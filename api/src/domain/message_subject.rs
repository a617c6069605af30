use once_cell::sync::Lazy;
use regex::Regex;

pub const INVALID_SUBJECT_MESSAGE: &str = "Subject should be 5-200 characters";

static SUBJECT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9 .,!?-]{5,200}$").expect("subject pattern is a valid regex")
});

#[derive(Debug, Clone)]
pub struct MessageSubject(String);

impl MessageSubject {
    /// Accepts 5 to 200 ASCII letters, digits, spaces and `. , ! ? -`.
    pub fn parse(s: String) -> Result<MessageSubject, String> {
        if SUBJECT_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(INVALID_SUBJECT_MESSAGE.to_string())
        }
    }
}

impl AsRef<str> for MessageSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
