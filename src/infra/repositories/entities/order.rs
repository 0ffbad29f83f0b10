//! Order database entity.
//!
//! Customer and shipping address snapshots are flattened onto the row; line
//! items live in `order_items` and are joined back when loading the domain
//! entity.

use sea_orm::entity::prelude::*;

use crate::domain::{Customer, Order, OrderStatus, ShippingAddress};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    /// Total in kobo
    pub total_amount: i64,
    pub status: String,
    #[sea_orm(unique)]
    pub payment_reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItems,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Assemble the domain entity from an order row and its item rows
pub fn into_domain(model: Model, items: Vec<super::order_item::Model>) -> Order {
    Order {
        id: model.id,
        customer: Customer {
            name: model.customer_name,
            email: model.customer_email,
            phone: model.customer_phone,
        },
        shipping_address: ShippingAddress {
            street: model.street,
            city: model.city,
            state: model.state,
            postal_code: model.postal_code,
            country: model.country,
        },
        items: items.into_iter().map(Into::into).collect(),
        total_amount: model.total_amount,
        status: OrderStatus::from(model.status.as_str()),
        payment_reference: model.payment_reference,
        notes: model.notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
