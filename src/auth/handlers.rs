use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, ForgotPasswordRequest, LoginRequest, PublicUser, SignupRequest},
        extractors::CurrentUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::{Role, User},
    },
    error::{is_unique_violation, required_field, ApiError},
    mailer::OutboundMail,
    state::AppState,
};

const RESET_LINK: &str = "http://localhost:3000/reset";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let name = required_field(payload.name, "All fields are required")?;
    let email = required_field(payload.email, "All fields are required")?;
    let password = required_field(payload.password, "All fields are required")?;

    let email = email.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "signup invalid email");
        return Err(ApiError::validation("Invalid email"));
    }
    if password.len() < 8 {
        warn!("signup password too short");
        return Err(ApiError::validation("Password too short"));
    }

    // Argon2 is deliberately slow; keep it off the async workers.
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(anyhow::Error::new)??;

    let role = if state.config.is_admin_email(&email) {
        Role::Admin
    } else {
        Role::User
    };

    let user = match User::create(&state.db, name.trim(), &email, &hash, role).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "signup email already registered");
            return Err(ApiError::conflict("Email already registered"));
        }
        Err(e) => return Err(e.into()),
    };

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, role = ?user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let email = required_field(payload.email, "Email and password are required")?;
    let password = required_field(payload.password, "Email and password are required")?;

    let email = email.trim().to_lowercase();

    // Unknown email and wrong password answer identically.
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::Unauthorized("invalid credentials")
        })?;

    let hash = user.password_hash.clone();
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(anyhow::Error::new)??;

    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::Unauthorized("invalid credentials"));
    }

    let token = JwtKeys::from_ref(&state).sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

#[instrument(skip(user))]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user.into())
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let email = required_field(payload.email, "Email is required")?;
    let email = email.trim().to_lowercase();

    state
        .mailer
        .send(OutboundMail {
            to: email.clone(),
            reply_to: None,
            subject: "Reset Your Password".into(),
            body: format!(
                "Hello,\n\nHere is your password reset link (dummy): {RESET_LINK}\n\nBest regards"
            ),
        })
        .await?;

    info!(email = %email, "reset notice sent");
    Ok(Json(serde_json::json!({ "message": "Reset link sent" })))
}
