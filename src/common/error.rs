use std::path::PathBuf;
use thiserror::Error;

use crate::application::use_cases::status_check::StatusCheckError;
use crate::domain::value_objects::tag_selector::TagSelectorError;
use crate::infrastructure::filesystem::repo_store::RepoStoreError;

#[derive(Error, Debug)]
pub enum GitfanError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {field} - {message}")]
    ValidationError {
        field: String,
        message: String,
        value: Option<String>,
    },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Status collection failed: {message}")]
    StatusError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl GitfanError {
    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: Some(Box::new(source)),
        }
    }

    pub fn validation_error(
        field: impl Into<String>,
        message: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
            value,
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_yaml::Error> for GitfanError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for GitfanError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}

impl From<RepoStoreError> for GitfanError {
    fn from(error: RepoStoreError) -> Self {
        if let RepoStoreError::InvalidPath(_) | RepoStoreError::AlreadyRegistered(_) = &error {
            return Self::validation_error("path", error.to_string(), None);
        }
        let path = error.path().map(PathBuf::from);
        Self::config_error_with_source("Repository registry unavailable", path, error)
    }
}

impl From<TagSelectorError> for GitfanError {
    fn from(error: TagSelectorError) -> Self {
        match error {
            TagSelectorError::InvalidTag(value) => Self::validation_error(
                "tag",
                "tag names may only contain letters, digits, '.', '_' and '-'",
                Some(value),
            ),
        }
    }
}

impl From<StatusCheckError> for GitfanError {
    fn from(error: StatusCheckError) -> Self {
        Self::StatusError {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }
}
