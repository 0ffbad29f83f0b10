//! Blog post repository.
//!
//! Posts are addressed publicly by slug, so the slug column carries a unique
//! constraint; a duplicate title surfaces as a conflict rather than a silent
//! overwrite.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, RuntimeErr, Set,
};
use uuid::Uuid;

use super::entities::{blog_post, user};
use crate::domain::blog::slug_for_title;
use crate::domain::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// Blog repository trait for dependency injection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// List posts newest-first, filtered by title substring
    /// (case-insensitive), with the total match count
    async fn list(&self, params: &ListParams) -> AppResult<(Vec<BlogPost>, u64)>;

    /// Find a post by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>>;

    /// Find a post by its URL slug
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>>;

    /// Create a post authored by the given user; the slug is derived from
    /// the title and a duplicate yields a conflict
    async fn create(&self, author_id: Uuid, data: CreateBlogPost) -> AppResult<BlogPost>;

    /// Apply a partial update; a new title re-derives the slug
    async fn update(&self, id: Uuid, data: UpdateBlogPost) -> AppResult<BlogPost>;

    /// Delete a post
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of BlogRepository over SeaORM
pub struct BlogStore {
    db: DatabaseConnection,
}

impl BlogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Map unique-violation errors on insert/update to a conflict
    fn map_write_err(err: sea_orm::DbErr) -> AppError {
        if let sea_orm::DbErr::Query(RuntimeErr::SqlxError(ref source)) = err {
            if let Some(db_err) = source.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict("A post with this title");
                }
            }
        }
        AppError::from(err)
    }

    async fn author_name(&self, author_id: Uuid) -> AppResult<Option<String>> {
        let author = user::Entity::find_by_id(author_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        Ok(author.map(|a| a.name))
    }
}

#[async_trait]
impl BlogRepository for BlogStore {
    async fn list(&self, params: &ListParams) -> AppResult<(Vec<BlogPost>, u64)> {
        let mut query = blog_post::Entity::find().order_by_desc(blog_post::Column::CreatedAt);

        if let Some(term) = params.search_term() {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query
                .filter(Expr::expr(Func::lower(Expr::col(blog_post::Column::Title))).like(pattern));
        }

        let paginator = query
            .find_also_related(user::Entity)
            .paginate(&self.db, params.limit());
        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page.saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        let posts = rows
            .into_iter()
            .map(|(post, author)| blog_post::into_domain(post, author.map(|a| a.name)))
            .collect();
        Ok((posts, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlogPost>> {
        let row = blog_post::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|(post, author)| blog_post::into_domain(post, author.map(|a| a.name))))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<BlogPost>> {
        let row = blog_post::Entity::find()
            .filter(blog_post::Column::Slug.eq(slug))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|(post, author)| blog_post::into_domain(post, author.map(|a| a.name))))
    }

    async fn create(&self, author_id: Uuid, data: CreateBlogPost) -> AppResult<BlogPost> {
        let now = Utc::now();
        let model = blog_post::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title.clone()),
            slug: Set(slug_for_title(&data.title)),
            content: Set(data.content),
            excerpt: Set(data.excerpt),
            featured_media_url: Set(data.featured_media_url),
            media_type: Set(data.media_type.as_str().to_string()),
            author_id: Set(author_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let stored = model.insert(&self.db).await.map_err(Self::map_write_err)?;
        let author_name = self.author_name(stored.author_id).await?;
        Ok(blog_post::into_domain(stored, author_name))
    }

    async fn update(&self, id: Uuid, data: UpdateBlogPost) -> AppResult<BlogPost> {
        let row = blog_post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: blog_post::ActiveModel = row.into();
        if let Some(title) = data.title {
            active.slug = Set(slug_for_title(&title));
            active.title = Set(title);
        }
        if let Some(content) = data.content {
            active.content = Set(content);
        }
        if let Some(excerpt) = data.excerpt {
            active.excerpt = Set(excerpt);
        }
        if let Some(featured_media_url) = data.featured_media_url {
            active.featured_media_url = Set(featured_media_url);
        }
        if let Some(media_type) = data.media_type {
            active.media_type = Set(media_type.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(Self::map_write_err)?;
        let author_name = self.author_name(updated.author_id).await?;
        Ok(blog_post::into_domain(updated, author_name))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = blog_post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
