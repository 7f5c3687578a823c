use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    application::store::LoadError, config::LoadError as ConfigLoadError,
    domain::error::DomainError, infra::error::InfraError,
    presentation::views::TemplateRenderError,
};

/// Flattened error chain, outermost message first.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { messages }
    }

    pub fn chain(&self) -> String {
        self.messages.join(": caused by: ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Template(#[from] TemplateRenderError),
    #[error(transparent)]
    Config(#[from] ConfigLoadError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error(self)
    }
}
