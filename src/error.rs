use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Error kinds surfaced by every core operation.
///
/// Each failure is scoped to the single call that produced it; the store is left
/// in the state it had before the call.
#[derive(Debug, thiserror::Error)]
pub enum HrmError {
    /// Malformed or missing input: empty fields, bad email, unknown status, bad date.
    #[error("{0}")]
    Validation(String),

    /// The referenced employee does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Duplicate employee id or email on create.
    #[error("{0}")]
    Conflict(String),

    /// Failure inside the storage backend.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored data that could not be mapped back into the domain.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type HrmResult<T> = Result<T, HrmError>;

impl HrmError {
    pub fn employee_not_found(employee_id: &str) -> Self {
        HrmError::NotFound(format!("Employee with ID '{}' not found", employee_id))
    }

    pub fn duplicate_employee_id(employee_id: &str) -> Self {
        HrmError::Conflict(format!("Employee with ID '{}' already exists", employee_id))
    }

    pub fn duplicate_email(email: &str) -> Self {
        HrmError::Conflict(format!("Employee with email '{}' already exists", email))
    }

    /// Kind tag returned to the caller so it can pick a UI treatment.
    pub fn kind(&self) -> &'static str {
        match self {
            HrmError::Validation(_) => "ValidationError",
            HrmError::NotFound(_) => "NotFound",
            HrmError::Conflict(_) => "Conflict",
            HrmError::Database(_) | HrmError::Internal(_) => "InternalError",
        }
    }
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "error": "NotFound",
    "message": "Employee with ID 'EMP404' not found"
}))]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ResponseError for HrmError {
    fn status_code(&self) -> StatusCode {
        match self {
            HrmError::Validation(_) => StatusCode::BAD_REQUEST,
            HrmError::NotFound(_) => StatusCode::NOT_FOUND,
            HrmError::Conflict(_) => StatusCode::CONFLICT,
            HrmError::Database(_) | HrmError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            HrmError::Database(e) => {
                tracing::error!(error = %e, "Storage failure");
                "Something went wrong, Contact with system admin".to_string()
            }
            HrmError::Internal(e) => {
                tracing::error!(error = %e, "Internal failure");
                "Something went wrong, Contact with system admin".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind().to_string(),
            message,
        })
    }
}
