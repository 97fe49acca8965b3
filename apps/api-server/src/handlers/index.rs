//! Landing page.

use actix_web::{HttpResponse, web};

use folio_shared::dto::IndexResponse;

use crate::middleware::error::AppResult;
use crate::middleware::session::CurrentUser;
use crate::state::AppState;

/// GET /
///
/// Newest posts first. `user_name` is present only for a logged-in user,
/// which is what clients use to choose between a greeting and a login link.
pub async fn index(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_desc().await?;

    Ok(HttpResponse::Ok().json(IndexResponse {
        posts,
        user_name: user.0.map(|u| u.name),
    }))
}
