// revpool/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Error taxonomy for the task engine and the authorization guard.
///
/// The variants map one-to-one onto the outcomes a calling surface has to
/// distinguish: missing credentials, insufficient rights, a resource that is
/// gone (notably the race-losing claim), semantically invalid input, and
/// malformed identifier syntax.
#[derive(Debug, Error)]
pub enum RevpoolError {
  #[error("Authentication required")]
  Unauthorized,

  #[error("Forbidden: {reason}")]
  Forbidden { reason: String },

  #[error("Not found: {resource}")]
  NotFound { resource: String },

  #[error("Unprocessable: {message}")]
  UnprocessableEntity { message: String },

  #[error("Bad request: {message}")]
  BadRequest { message: String },

  #[error("Method not allowed: {message}")]
  MethodNotAllowed { message: String },

  #[error("Workflow configuration error: {message}")]
  Config { message: String },

  #[error("Collaborator service failed. Source: {source}")]
  Service {
    #[source]
    source: AnyhowError,
  },
}

impl RevpoolError {
  /// Shorthand for the `Forbidden` variant.
  pub fn forbidden(reason: impl Into<String>) -> Self {
    RevpoolError::Forbidden { reason: reason.into() }
  }

  /// Shorthand for the `NotFound` variant.
  pub fn not_found(resource: impl Into<String>) -> Self {
    RevpoolError::NotFound { resource: resource.into() }
  }

  /// Shorthand for the `UnprocessableEntity` variant.
  pub fn unprocessable(message: impl Into<String>) -> Self {
    RevpoolError::UnprocessableEntity { message: message.into() }
  }

  /// Shorthand for the `BadRequest` variant.
  pub fn bad_request(message: impl Into<String>) -> Self {
    RevpoolError::BadRequest { message: message.into() }
  }
}

// This is the key conversion revpool provides for collaborator errors:
// anything a GroupDirectory or SubmissionStore implementation surfaces
// through anyhow lands in the Service variant unchanged.
impl From<AnyhowError> for RevpoolError {
  fn from(err: AnyhowError) -> Self {
    RevpoolError::Service { source: err }
  }
}

pub type RevpoolResult<T, E = RevpoolError> = std::result::Result<T, E>;
