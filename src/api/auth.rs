use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::extract::{ApiJson, AuthUser, CurrentUser};
use super::observability::AuthMethod;
use super::{ApiError, ApiResponse, AppState, MessageResponse, validation};
use crate::models::User;
use crate::services::{LoginResult, RegisterRequest};

const SESSION_USER_KEY: &str = "user_id";

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller from, in order:
/// 1. Session cookie (from login)
/// 2. `X-Api-Key` header
/// 3. `Authorization: Bearer <api_key>` header
///
/// Never rejects. Routes that need a user ask for [`AuthUser`] or
/// [`super::extract::AdminUser`].
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let method = match resolve_user(&state, &session, request.headers()).await {
        Some((user, method)) => {
            tracing::Span::current().record("user_id", user.id);
            request.extensions_mut().insert(CurrentUser(user));
            method
        }
        None => AuthMethod::Anonymous,
    };

    let mut response = next.run(request).await;
    response.extensions_mut().insert(method);
    response
}

async fn resolve_user(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
) -> Option<(User, AuthMethod)> {
    if let Ok(Some(user_id)) = session.get::<i32>(SESSION_USER_KEY).await {
        match state.auth_service.get_user(user_id).await {
            Ok(user) => return Some((user, AuthMethod::Session)),
            Err(e) => tracing::debug!("Session user {user_id} not usable: {e}"),
        }
    }

    let key = extract_api_key(headers)?;
    match state.auth_service.user_for_api_key(&key).await {
        Ok(user) => user.map(|user| (user, AuthMethod::ApiKey)),
        Err(e) => {
            tracing::warn!("API key lookup failed: {e}");
            None
        }
    }
}

fn extract_api_key(headers: &HeaderMap) -> Option<String> {
    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
    {
        return Some(key_str.trim().to_string());
    }

    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        return Some(token.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let min_password_length = state.config().read().await.security.min_password_length;
    validation::validate_registration(&payload, min_password_length)?;

    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// POST /auth/login
/// Authenticate with email and password. The returned token is the user's API key.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("password is required"));
    }

    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    session
        .insert(SESSION_USER_KEY, result.user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(user_id = result.user.id, "User logged in");

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to flush session: {e}");
    }

    Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    }))
}

/// GET /auth/me
pub async fn me(AuthUser(user): AuthUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::success(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_api_key_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Api-Key", "abc".parse().unwrap());
        headers.insert("Authorization", "Bearer def".parse().unwrap());
        assert_eq!(extract_api_key(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer  def ".parse().unwrap());
        assert_eq!(extract_api_key(&headers).as_deref(), Some("def"));

        headers.insert("Authorization", "Basic Zm9vOmJhcg==".parse().unwrap());
        assert_eq!(extract_api_key(&headers), None);
    }
}
