use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("please enter an answer")]
    EmptyAnswer,

    #[error("answer is {len} characters long, the limit is {max}")]
    AnswerTooLong { len: usize, max: usize },

    #[error("storage failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored survey data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl SurveyError {
    /// Input problems the user can fix by editing the answer.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyAnswer | Self::AnswerTooLong { .. })
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        error!("request failed: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "submission failed, please retry".to_string(),
        }
    }
}

impl From<SurveyError> for AppError {
    fn from(err: SurveyError) -> Self {
        if err.is_validation() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err)
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
