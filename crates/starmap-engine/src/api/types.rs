use serde::Serialize;

use crate::history::observation::Observation;

/// Something the host should act on, produced while handling input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkyEvent {
    /// A signed-in user picked a star; the host should persist it and call
    /// back with the outcome.
    Selected { observation: Observation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Advisory,
    Success,
    Error,
}

/// A non-blocking toast for the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// CSS cursor the canvas should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

impl CursorHint {
    pub fn as_css(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Pointer => "pointer",
        }
    }
}
