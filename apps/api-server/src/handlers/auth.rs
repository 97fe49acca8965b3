//! Session login/logout handlers.
//!
//! The identity provider handshake happens elsewhere; clients arrive here
//! with the signed token it issued.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use folio_core::domain::SessionUser;
use folio_core::ports::SessionData;
use folio_core::session::SESSION_USER_KEY;
use folio_shared::dto::{LoginRequest, UserResponse};

use crate::config::SessionConfig;
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{LoginUser, SessionId};
use crate::state::AppState;

/// POST /api/auth/session
///
/// Verifies the identity token and opens a fresh session holding the user.
pub async fn login(
    state: web::Data<AppState>,
    previous: Option<SessionId>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let verifier = state
        .identity
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("Login is not configured".to_string()))?;

    let user = verifier.verify(&body.id_token)?;

    // Never reuse a session id across a login.
    if let Some(SessionId(old)) = previous {
        state.sessions.destroy(&old).await?;
    }

    let session_id = Uuid::new_v4().to_string();
    let mut data = SessionData::new();
    data.insert(SESSION_USER_KEY, &user)?;
    state
        .sessions
        .store(&session_id, &data, state.session.ttl)
        .await?;

    tracing::info!(user = %user.name, "Session opened");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.session, session_id))
        .json(user_response(user)))
}

/// DELETE /api/auth/session
pub async fn logout(
    state: web::Data<AppState>,
    session: Option<SessionId>,
) -> AppResult<HttpResponse> {
    if let Some(SessionId(id)) = session {
        state.sessions.destroy(&id).await?;
        tracing::info!("Session closed");
    }

    let mut cookie = Cookie::build(state.session.cookie_name.clone(), "")
        .path("/")
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::NoContent().cookie(cookie).finish())
}

/// GET /api/auth/me - Protected route
pub async fn me(user: LoginUser) -> HttpResponse {
    HttpResponse::Ok().json(user_response(user.0))
}

fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), session_id)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(CookieDuration::seconds(
            i64::try_from(config.ttl.as_secs()).unwrap_or(i64::MAX),
        ))
        .finish()
}

fn user_response(user: SessionUser) -> UserResponse {
    UserResponse {
        name: user.name,
        email: user.email,
        picture: user.picture,
    }
}
