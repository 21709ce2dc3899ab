//! Admin-only route guard.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::error::ApiError;
use crate::extractors::AuthUser;

/// Rejects non-admin callers before the handler runs.
///
/// The resolved [`AuthUser`] is left in the request extensions so the
/// handler does not decode the token again.
pub async fn require_admin(
    auth: AuthUser,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = auth.require_admin() {
        warn!(
            user_id = %auth.user_id,
            path = %request.uri().path(),
            "Non-admin caller rejected"
        );
        return Err(e.into());
    }
    request.extensions_mut().insert(auth);
    Ok(next.run(request).await)
}
