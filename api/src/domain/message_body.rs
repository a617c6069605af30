pub const INVALID_MESSAGE_MESSAGE: &str = "Message should be 5-1000 characters";

const MIN_LENGTH: usize = 5;
const MAX_LENGTH: usize = 1000;

/// Free text written by the visitor. Any character is allowed, only the
/// length is checked, in UTF-16 code units as a browser form counts it.
#[derive(Debug, Clone)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn parse(s: String) -> Result<MessageBody, String> {
        let length = s.encode_utf16().count();

        if (MIN_LENGTH..=MAX_LENGTH).contains(&length) {
            Ok(Self(s))
        } else {
            Err(INVALID_MESSAGE_MESSAGE.to_string())
        }
    }
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
