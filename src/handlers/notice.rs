//! One-shot notices carried across a post/redirect/get cycle in the query string.

use axum::response::Redirect;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn to_query(&self) -> String {
        format!(
            "notice={}&level={}",
            urlencoding::encode(&self.message),
            self.level.as_str()
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
    pub level: Option<String>,
}

impl NoticeQuery {
    pub fn into_notice(self) -> Option<Notice> {
        let message = self.notice.filter(|m| !m.is_empty())?;
        let level = self
            .level
            .as_deref()
            .and_then(NoticeLevel::from_str)
            .unwrap_or(NoticeLevel::Success);

        Some(Notice { level, message })
    }
}

pub fn redirect_with(path: &str, notice: Notice) -> Redirect {
    Redirect::to(&format!("{}?{}", path, notice.to_query()))
}
