//! Post API handlers.

use actix_web::{HttpResponse, web};

use folio_shared::dto::{SavePostRequest, UpdatePostRequest};

use crate::middleware::error::AppResult;
use crate::middleware::session::LoginUser;
use crate::state::AppState;

/// POST /api/v1/posts
pub async fn save(
    state: web::Data<AppState>,
    user: LoginUser,
    body: web::Json<SavePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = state.posts.save(req.title, req.content, req.author).await?;

    tracing::info!(post_id = id, user = %user.0.name, "Post created");
    Ok(HttpResponse::Created().json(id))
}

/// PUT /api/v1/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    user: LoginUser,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let id = state
        .posts
        .update(path.into_inner(), req.title, req.content)
        .await?;

    tracing::info!(post_id = id, user = %user.0.name, "Post updated");
    Ok(HttpResponse::Ok().json(id))
}

/// DELETE /api/v1/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    user: LoginUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;

    tracing::info!(post_id = id, user = %user.0.name, "Post deleted");
    Ok(HttpResponse::Ok().json(id))
}

/// GET /api/v1/posts/{id}
pub async fn find_by_id(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state.posts.find_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/v1/posts
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all_desc().await?;
    Ok(HttpResponse::Ok().json(posts))
}
