use crate::config::ConfigError;
use crate::estimator::flow::FlowError;
use crate::estimator::session::{QuestionnaireServiceError, RepositoryError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Questionnaire(QuestionnaireServiceError),
    Input(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::Questionnaire(QuestionnaireServiceError::Flow(FlowError::UnknownOption {
                ..
            })) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Questionnaire(QuestionnaireServiceError::Flow(_)) => StatusCode::CONFLICT,
            AppError::Questionnaire(QuestionnaireServiceError::Repository(err)) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict => StatusCode::CONFLICT,
                RepositoryError::CapacityReached(_) | RepositoryError::Unavailable(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Questionnaire(err) => write!(f, "questionnaire error: {}", err),
            AppError::Input(message) => write!(f, "invalid input: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Questionnaire(err) => Some(err),
            AppError::Input(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<QuestionnaireServiceError> for AppError {
    fn from(value: QuestionnaireServiceError) -> Self {
        Self::Questionnaire(value)
    }
}

impl From<FlowError> for AppError {
    fn from(value: FlowError) -> Self {
        Self::Questionnaire(QuestionnaireServiceError::Flow(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::FactorKey;

    #[test]
    fn maps_questionnaire_errors_to_http_statuses() {
        let unknown = AppError::from(FlowError::UnknownOption {
            factor: FactorKey::Age,
            value: "101".to_string(),
        });
        assert_eq!(unknown.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let gated = AppError::from(FlowError::AnswerRequired(FactorKey::Dti));
        assert_eq!(gated.status(), StatusCode::CONFLICT);

        let missing = AppError::from(QuestionnaireServiceError::Repository(
            RepositoryError::NotFound,
        ));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let full = AppError::from(QuestionnaireServiceError::Repository(
            RepositoryError::CapacityReached(3),
        ));
        assert_eq!(full.status(), StatusCode::SERVICE_UNAVAILABLE);

        assert_eq!(
            AppError::Input("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
