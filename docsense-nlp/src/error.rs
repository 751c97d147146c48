//! Error types for docsense-nlp.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::document::AnnotationError;
use crate::preprocess::TextQualityReport;

/// Orchestration-level failures. Component failures never surface here;
/// they degrade to defaults and a status flag instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Text too short: {words} words, at least {minimum} required")]
    TooShort { words: usize, minimum: usize },

    #[error("Text is empty after preprocessing")]
    Empty,

    #[error("Document annotation failed: {0}")]
    Annotation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TooShort { .. } => "TEXT_TOO_SHORT",
            Self::Empty => "EMPTY_TEXT",
            Self::Annotation(_) => "ANNOTATION_FAILED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::TooShort { .. } | Self::Empty | Self::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Annotation(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<docsense_common::Error> for AnalysisError {
    fn from(err: docsense_common::Error) -> Self {
        if err.is_client_error() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<AnnotationError> for AnalysisError {
    fn from(err: AnnotationError) -> Self {
        match err {
            AnnotationError::Empty => Self::Empty,
            AnnotationError::Failed(message) => Self::Annotation(message),
        }
    }
}

/// A failed analysis with whatever was computed before the failure.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct AnalysisFailure {
    pub error: AnalysisError,
    pub trace_id: String,
    pub preprocessing: Option<TextQualityReport>,
}

impl AnalysisFailure {
    pub fn new(error: AnalysisError, trace_id: impl Into<String>) -> Self {
        Self {
            error,
            trace_id: trace_id.into(),
            preprocessing: None,
        }
    }

    pub fn with_preprocessing(mut self, report: TextQualityReport) -> Self {
        self.preprocessing = Some(report);
        self
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preprocessing: Option<TextQualityReport>,
}

impl IntoResponse for AnalysisFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        if status.is_server_error() {
            tracing::error!(trace_id = %self.trace_id, error = %self.error, "Analysis failed");
        } else {
            tracing::info!(trace_id = %self.trace_id, error = %self.error, "Analysis rejected");
        }

        let body = ErrorBody {
            error: self.error.code().to_string(),
            message: self.error.to_string(),
            trace_id: self.trace_id,
            preprocessing: self.preprocessing,
        };
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalysisError::TooShort {
            words: 12,
            minimum: 50,
        };
        assert_eq!(err.to_string(), "Text too short: 12 words, at least 50 required");
        assert_eq!(err.code(), "TEXT_TOO_SHORT");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AnalysisError::Empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AnalysisError::Annotation("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_annotation_error() {
        assert!(matches!(AnalysisError::from(AnnotationError::Empty), AnalysisError::Empty));
        assert!(matches!(
            AnalysisError::from(AnnotationError::Failed("x".into())),
            AnalysisError::Annotation(m) if m == "x"
        ));
    }

    #[test]
    fn test_from_common_error() {
        let err = AnalysisError::from(docsense_common::Error::InvalidInput("no text".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = AnalysisError::from(docsense_common::Error::Timeout);
        assert_eq!(err.code(), "INVALID_REQUEST");
        let err = AnalysisError::from(docsense_common::Error::Internal("join".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_failure_into_response() {
        let response = AnalysisFailure::new(AnalysisError::Empty, "trace-1").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
