//! Order line-item database entity.

use sea_orm::entity::prelude::*;

use crate::domain::LineItem;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    /// Name snapshot at order time
    pub name: String,
    /// Unit price snapshot in kobo
    pub price: i64,
    pub quantity: i32,
    /// Preserves the line ordering from the checkout payload
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LineItem {
    fn from(model: Model) -> Self {
        LineItem {
            product_id: model.product_id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            image_url: None,
        }
    }
}
