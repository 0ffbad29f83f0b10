//! Blog service - posts for the public site, authoring for the admin.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::errors::{AppResult, OptionExt};
use crate::infra::repositories::BlogRepository;
use crate::types::ListParams;

/// Blog service trait for dependency injection
#[async_trait]
pub trait BlogService: Send + Sync {
    /// List posts newest-first with the total match count
    async fn list_posts(&self, params: &ListParams) -> AppResult<(Vec<BlogPost>, u64)>;

    /// Fetch a single post by id
    async fn get_post(&self, id: Uuid) -> AppResult<BlogPost>;

    /// Fetch a single post by its URL slug
    async fn get_post_by_slug(&self, slug: &str) -> AppResult<BlogPost>;

    /// Validate and create a post authored by the given user
    async fn create_post(&self, author_id: Uuid, data: CreateBlogPost) -> AppResult<BlogPost>;

    /// Validate and apply a partial update
    async fn update_post(&self, id: Uuid, data: UpdateBlogPost) -> AppResult<BlogPost>;

    /// Delete a post
    async fn delete_post(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of BlogService
pub struct BlogManager {
    posts: Arc<dyn BlogRepository>,
}

impl BlogManager {
    /// Create new blog service instance
    pub fn new(posts: Arc<dyn BlogRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl BlogService for BlogManager {
    async fn list_posts(&self, params: &ListParams) -> AppResult<(Vec<BlogPost>, u64)> {
        self.posts.list(params).await
    }

    async fn get_post(&self, id: Uuid) -> AppResult<BlogPost> {
        self.posts.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_post_by_slug(&self, slug: &str) -> AppResult<BlogPost> {
        self.posts.find_by_slug(slug).await?.ok_or_not_found()
    }

    async fn create_post(&self, author_id: Uuid, data: CreateBlogPost) -> AppResult<BlogPost> {
        data.validate()?;
        let post = self.posts.create(author_id, data).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "Blog post created");
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, data: UpdateBlogPost) -> AppResult<BlogPost> {
        data.validate()?;
        self.posts.update(id, data).await
    }

    async fn delete_post(&self, id: Uuid) -> AppResult<()> {
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "Blog post deleted");
        Ok(())
    }
}
