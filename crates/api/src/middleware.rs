use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use shopledger_auth::{Caller, UserDirectory};

use crate::context::CallerContext;
use crate::tokens::TokenRegistry;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenRegistry>,
    pub users: Arc<UserDirectory>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let user_id = state
        .tokens
        .resolve(token)
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let user = state.users.get(&user_id).ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut()
        .insert(CallerContext::new(Caller::new(user.id, user.role)));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
