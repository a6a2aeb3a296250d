//! UI/backend events and error modeling for the form controller.

use client_core::ClientError;
use shared::protocol::OptionsCatalog;

pub enum UiEvent {
    Info(String),
    OptionsLoaded(OptionsCatalog),
    PredictionReady(f64),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Api,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadOptions,
    Predict,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            ClientError::Http(_) => UiErrorCategory::Transport,
            ClientError::Api { .. } | ClientError::UnexpectedStatus(_) => UiErrorCategory::Api,
            ClientError::InvalidBaseUrl(_) => UiErrorCategory::Validation,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Classification fallback for failures that never reach the typed
    /// client error path (worker startup, channel plumbing).
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("network")
            || message_lower.contains("request failed")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("invalid") || message_lower.contains("missing") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
