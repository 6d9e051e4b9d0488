use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    auth::{hash_password, verify_password, TokenService},
    config::Config,
    error::AppError,
    models::user::{LoginForm, SignupRequest, TokenResponse, UserProfile},
    store,
};

/// Register a new user
///
/// Creates a new user account and returns its public profile. The
/// password is bcrypt-hashed before it touches the store; the plaintext
/// is never logged and never appears in any response. A taken username
/// is reported by the store's unique constraint, not by a racy
/// check-then-insert.
#[post("/signup")]
pub async fn signup(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    signup_data: web::Json<SignupRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    signup_data.validate()?;

    let password_hash = hash_password(&signup_data.password, config.bcrypt_cost)?;

    let user = store::users::insert(
        &pool,
        &signup_data.username,
        &password_hash,
        &signup_data.first_name,
        signup_data.last_name.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// Login
///
/// Verifies a username/password pair from a form body and returns a
/// signed bearer token. Unknown usernames and wrong passwords get the
/// same response, so the endpoint does not confirm which usernames
/// exist.
#[post("/token")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    let user = store::users::find_by_username(&pool, &form.username).await?;

    let user = match user {
        Some(user) if verify_password(&form.password, &user.password_hash) => user,
        _ => {
            return Err(AppError::BadRequest(
                "Incorrect username or password".into(),
            ))
        }
    };

    let access_token = tokens.issue(&user.username)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".into(),
    }))
}
