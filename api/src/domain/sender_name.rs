use once_cell::sync::Lazy;
use regex::Regex;

pub const INVALID_NAME_MESSAGE: &str =
    "Name should be 5-50 characters (letters, numbers, spaces)";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]{5,50}$").expect("name pattern is a valid regex"));

#[derive(Debug, Clone)]
pub struct SenderName(String);

impl SenderName {
    /// Accepts 5 to 50 ASCII letters, digits and spaces.
    pub fn parse(s: String) -> Result<SenderName, String> {
        if NAME_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(INVALID_NAME_MESSAGE.to_string())
        }
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
