// catalog_api/src/web/response.rs

use serde::Serialize;

/// Envelope shared by every JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
  pub success: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<Vec<String>>,
}

impl<T: Serialize> ApiResponse<T> {
  pub fn ok(data: T, message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: Some(data),
      errors: None,
    }
  }
}

impl ApiResponse<()> {
  pub fn done(message: impl Into<String>) -> Self {
    Self {
      success: true,
      message: message.into(),
      data: None,
      errors: None,
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      message: message.into(),
      data: None,
      errors: None,
    }
  }

  pub fn failure_with(message: impl Into<String>, errors: Vec<String>) -> Self {
    Self {
      errors: Some(errors),
      ..Self::failure(message)
    }
  }
}
