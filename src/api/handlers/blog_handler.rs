//! Blog handlers - public reads by id or slug, admin authoring.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::api::extractors::{CurrentUser, ValidatedJson};
use crate::api::AppState;
use crate::domain::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Created, ListParams, NoContent, Paginated};

/// Create blog routes
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/slug/:slug", get(get_post_by_slug))
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
}

/// List blog posts (public)
#[utoipa::path(
    get,
    path = "/blogs",
    tag = "Blog",
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("limit" = Option<u64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Title filter")
    ),
    responses((status = 200, description = "Paginated blog posts"))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<BlogPost>>> {
    let (posts, total) = state.services.blogs().list_posts(&params).await?;
    Ok(Json(Paginated::new(
        posts,
        params.page,
        params.limit(),
        total,
    )))
}

/// Fetch a post by id (public)
#[utoipa::path(
    get,
    path = "/blogs/{id}",
    tag = "Blog",
    params(("id" = Uuid, Path, description = "Post id")),
    responses(
        (status = 200, description = "Blog post", body = BlogPost),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let post = state.services.blogs().get_post(id).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// Fetch a post by its URL slug (public)
#[utoipa::path(
    get,
    path = "/blogs/slug/{slug}",
    tag = "Blog",
    params(("slug" = String, Path, description = "URL slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogPost),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    let post = state.services.blogs().get_post_by_slug(&slug).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// Create a blog post (admin; the caller becomes the author)
#[utoipa::path(
    post,
    path = "/blogs",
    tag = "Blog",
    request_body = CreateBlogPost,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Post created", body = BlogPost),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "A post with this title already exists")
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<CreateBlogPost>,
) -> AppResult<Created<BlogPost>> {
    user.require_admin()?;

    let post = state.services.blogs().create_post(user.id, payload).await?;
    Ok(Created(post))
}

/// Update a blog post (admin)
#[utoipa::path(
    put,
    path = "/blogs/{id}",
    tag = "Blog",
    params(("id" = Uuid, Path, description = "Post id")),
    request_body = UpdateBlogPost,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated post", body = BlogPost),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Post not found"),
        (status = 409, description = "A post with this title already exists")
    )
)]
pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBlogPost>,
) -> AppResult<Json<ApiResponse<BlogPost>>> {
    user.require_admin()?;

    let post = state.services.blogs().update_post(id, payload).await?;
    Ok(Json(ApiResponse::success(post)))
}

/// Delete a blog post (admin)
#[utoipa::path(
    delete,
    path = "/blogs/{id}",
    tag = "Blog",
    params(("id" = Uuid, Path, description = "Post id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    user.require_admin()?;

    state.services.blogs().delete_post(id).await?;
    Ok(NoContent)
}
