//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Read-only view of a stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// Request to change a post's title and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
}

/// Request to open a session with a token issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub id_token: String,
}

/// The logged-in user as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

/// Landing page model: newest posts first, plus the greeting name when a
/// user is logged in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub posts: Vec<PostResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}
