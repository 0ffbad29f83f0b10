//! Blog post database entity.

use sea_orm::entity::prelude::*;

use crate::domain::{BlogPost, MediaType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub featured_media_url: String,
    pub media_type: String,
    pub author_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Assemble the domain entity, with the author name when the join loaded one
pub fn into_domain(model: Model, author_name: Option<String>) -> BlogPost {
    BlogPost {
        id: model.id,
        title: model.title,
        slug: model.slug,
        content: model.content,
        excerpt: model.excerpt,
        featured_media_url: model.featured_media_url,
        media_type: MediaType::from(model.media_type.as_str()),
        author_id: model.author_id,
        author_name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
