use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::error::AppError;
use crate::models::User;
use crate::store;

/// Resolves the authenticated user for a request.
///
/// This extractor is the identity-resolution step in front of every task
/// endpoint: it pulls the bearer token out of the `Authorization` header,
/// verifies it against the [`TokenService`], and looks the token's subject
/// up in the user store. The request only reaches the handler if all
/// three steps succeed.
///
/// Every failure — missing or malformed header, bad token, unknown
/// subject — produces the same `401` with `WWW-Authenticate: Bearer` and
/// an identical message, so a caller cannot distinguish which check
/// failed. Resolution is read-only and re-runs on every request; nothing
/// is cached.
pub struct CurrentUser(pub User);

fn credentials_error() -> AppError {
    AppError::Unauthorized("Could not validate credentials".into())
}

/// Extracts the token from a well-formed `Authorization: Bearer <token>`
/// header, or `None` for anything else.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError converts into ActixError via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Database pool not configured".into())
                })?;
            let tokens = req
                .app_data::<web::Data<TokenService>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("Token service not configured".into())
                })?;

            let token = bearer_token(&req).ok_or_else(credentials_error)?;
            let subject = tokens.verify(token).map_err(|e| {
                // The specific reason stays server-side.
                log::debug!("rejected bearer token: {}", e);
                credentials_error()
            })?;

            // A valid token for a user that no longer exists is reported
            // exactly like a bad token.
            let user = store::users::find_by_username(&pool, &subject)
                .await?
                .ok_or_else(credentials_error)?;

            Ok(CurrentUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_extraction() {
        let req = TestRequest::default()
            .append_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));

        // Wrong scheme
        let req = TestRequest::default()
            .append_header((header::AUTHORIZATION, "Basic abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        // Missing header
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);

        // Scheme is case-sensitive and must be followed by a space
        let req = TestRequest::default()
            .append_header((header::AUTHORIZATION, "bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);
    }

    #[actix_rt::test]
    async fn test_extractor_without_app_data_is_an_error() {
        // Without pool and token service configured the extractor must
        // fail rather than panic.
        let req = TestRequest::default()
            .append_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_http_request();

        let mut payload = Payload::None;
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());
    }
}
