use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::token;

/// Gate in front of every admin-scoped route: verifies the bearer token and
/// injects the verified claims for handlers that need the identity.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let claims = token::verify(&state.auth.secret, authorization)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
