//! Wire contract between the chat widget and the room server.
//!
//! Frames are plain text. The server tags each frame with a short prefix,
//! the client sends the user's trimmed text without any envelope.

pub const WS_PATH: &str = "/ws";
pub const STATUS_PREFIX: &str = "status:";
pub const CHAT_PREFIX: &str = "chat:";

/// Close code for an intentional, non-error shutdown.
pub const NORMAL_CLOSURE: u16 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Room occupancy or state text.
    Status(String),
    /// A chat line to render.
    Chat(String),
    Unknown(String),
}

impl Frame {
    pub fn decode(payload: &str) -> Frame {
        if let Some(rest) = payload.strip_prefix(STATUS_PREFIX) {
            Frame::Status(rest.to_string())
        } else if let Some(rest) = payload.strip_prefix(CHAT_PREFIX) {
            Frame::Chat(rest.to_string())
        } else {
            Frame::Unknown(payload.to_string())
        }
    }
}

/// Text typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage(String);

impl OutgoingMessage {
    pub fn from_input(input: &str) -> Option<OutgoingMessage> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(OutgoingMessage(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Scheme and host of the page hosting the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOrigin {
    /// Location protocol including the trailing colon, e.g. `https:`.
    pub protocol: String,
    pub host: String,
}

impl PageOrigin {
    pub fn new(protocol: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
        }
    }

    pub fn is_secure(&self) -> bool {
        self.protocol == "https:"
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        let scheme = if self.is_secure() { "wss" } else { "ws" };
        format!("{}://{}{}", scheme, self.host, path)
    }
}
