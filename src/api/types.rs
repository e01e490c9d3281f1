use serde::Serialize;

/// The JSON envelope every `/api` route answers with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
