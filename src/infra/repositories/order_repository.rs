//! Order repository - durable storage and lookup of orders.
//!
//! Creation writes the order row and its line items in one transaction so an
//! order with items but no total, or a total with no items, can never be
//! observed. Status mutations are single-row writes keyed by order id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbBackend, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::entities::{order, order_item};
use crate::domain::{NewOrder, Order, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::types::ListParams;

/// One day of sales for the dashboard chart
#[derive(Debug, Clone, Serialize, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    pub day: String,
    /// Sum of order totals for the day, in kobo
    pub total_sales: i64,
}

/// Order repository trait for dependency injection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a validated order with its line items, all-or-nothing
    async fn create(&self, data: NewOrder) -> AppResult<Order>;

    /// Find an order by id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>>;

    /// Overwrite the order status (permissive state machine)
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order>;

    /// Mark an order paid and record the verified gateway reference
    async fn mark_paid(&self, id: Uuid, reference: &str) -> AppResult<Order>;

    /// List orders newest-first, filtered by customer name/email substring
    /// (case-insensitive), with the total match count
    async fn list(&self, params: &ListParams) -> AppResult<(Vec<Order>, u64)>;

    /// Total number of orders
    async fn count(&self) -> AppResult<u64>;

    /// Sum of totals over revenue-counting statuses, in kobo
    async fn revenue_total(&self) -> AppResult<i64>;

    /// Most recent orders
    async fn recent(&self, limit: u64) -> AppResult<Vec<Order>>;

    /// Per-day sales since `start` over revenue-counting statuses
    async fn sales_by_day(&self, start: DateTime<Utc>) -> AppResult<Vec<DailySales>>;
}

/// Concrete implementation of OrderRepository over SeaORM
pub struct OrderStore {
    db: DatabaseConnection,
}

impl OrderStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load line items for one order, in payload order
    async fn items_for(&self, order_id: Uuid) -> AppResult<Vec<order_item::Model>> {
        order_item::Entity::find()
            .filter(order_item::Column::OrderId.eq(order_id))
            .order_by_asc(order_item::Column::Position)
            .all(&self.db)
            .await
            .map_err(AppError::from)
    }

    /// Load line items for a page of orders in one query
    async fn items_for_many(
        &self,
        order_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, Vec<order_item::Model>>> {
        let mut grouped: HashMap<Uuid, Vec<order_item::Model>> = HashMap::new();
        if order_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .order_by_asc(order_item::Column::Position)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        for row in rows {
            grouped.entry(row.order_id).or_default().push(row);
        }
        Ok(grouped)
    }

    /// Assemble domain orders for a list of rows, preserving row order
    async fn assemble_many(&self, rows: Vec<order::Model>) -> AppResult<Vec<Order>> {
        let ids = rows.iter().map(|m| m.id).collect();
        let mut items = self.items_for_many(ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = items.remove(&row.id).unwrap_or_default();
                order::into_domain(row, order_items)
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for OrderStore {
    async fn create(&self, data: NewOrder) -> AppResult<Order> {
        let now = Utc::now();
        let order_id = Uuid::new_v4();

        let order_model = order::ActiveModel {
            id: Set(order_id),
            customer_name: Set(data.customer.name.clone()),
            customer_email: Set(data.customer.email.clone()),
            customer_phone: Set(data.customer.phone.clone()),
            street: Set(data.shipping_address.street.clone()),
            city: Set(data.shipping_address.city.clone()),
            state: Set(data.shipping_address.state.clone()),
            postal_code: Set(data.shipping_address.postal_code.clone()),
            country: Set(data.shipping_address.country.clone()),
            total_amount: Set(data.total_amount),
            status: Set(data.status.as_str().to_string()),
            payment_reference: Set(None),
            notes: Set(data.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // All-or-nothing: the order row and its items commit together
        let txn = self.db.begin().await.map_err(AppError::from)?;
        let stored = order_model.insert(&txn).await.map_err(AppError::from)?;

        for (position, item) in data.items.iter().enumerate() {
            let item_model = order_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order_id),
                product_id: Set(item.product_id),
                name: Set(item.name.clone()),
                price: Set(item.price),
                quantity: Set(item.quantity),
                position: Set(position as i32),
            };
            item_model.insert(&txn).await.map_err(AppError::from)?;
        }

        txn.commit().await.map_err(AppError::from)?;

        let items = self.items_for(order_id).await?;
        Ok(order::into_domain(stored, items))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let row = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match row {
            Some(model) => {
                let items = self.items_for(id).await?;
                Ok(Some(order::into_domain(model, items)))
            }
            None => Ok(None),
        }
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let row = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: order::ActiveModel = row.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(AppError::from)?;
        let items = self.items_for(id).await?;
        Ok(order::into_domain(updated, items))
    }

    async fn mark_paid(&self, id: Uuid, reference: &str) -> AppResult<Order> {
        let row = order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?
            .ok_or(AppError::NotFound)?;

        let mut active: order::ActiveModel = row.into();
        active.status = Set(OrderStatus::Paid.as_str().to_string());
        active.payment_reference = Set(Some(reference.to_string()));
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(AppError::from)?;
        let items = self.items_for(id).await?;
        Ok(order::into_domain(updated, items))
    }

    async fn list(&self, params: &ListParams) -> AppResult<(Vec<Order>, u64)> {
        let mut query = order::Entity::find().order_by_desc(order::Column::CreatedAt);

        if let Some(term) = params.search_term() {
            let pattern = format!("%{}%", term.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(order::Column::CustomerName)))
                            .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(order::Column::CustomerEmail)))
                            .like(pattern),
                    ),
            );
        }

        let paginator = query.paginate(&self.db, params.limit());
        let total = paginator.num_items().await.map_err(AppError::from)?;
        let rows = paginator
            .fetch_page(params.page.saturating_sub(1))
            .await
            .map_err(AppError::from)?;

        let orders = self.assemble_many(rows).await?;
        Ok((orders, total))
    }

    async fn count(&self) -> AppResult<u64> {
        order::Entity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)
    }

    async fn revenue_total(&self) -> AppResult<i64> {
        #[derive(Debug, FromQueryResult)]
        struct RevenueRow {
            total: i64,
        }

        let row = RevenueRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            "SELECT COALESCE(SUM(total_amount), 0)::BIGINT AS total \
             FROM orders WHERE status IN ('paid', 'shipped', 'delivered')"
                .to_string(),
        ))
        .one(&self.db)
        .await
        .map_err(AppError::from)?;

        Ok(row.map(|r| r.total).unwrap_or(0))
    }

    async fn recent(&self, limit: u64) -> AppResult<Vec<Order>> {
        let rows = order::Entity::find()
            .order_by_desc(order::Column::CreatedAt)
            .paginate(&self.db, limit)
            .fetch_page(0)
            .await
            .map_err(AppError::from)?;

        self.assemble_many(rows).await
    }

    async fn sales_by_day(&self, start: DateTime<Utc>) -> AppResult<Vec<DailySales>> {
        DailySales::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT TO_CHAR(created_at, 'YYYY-MM-DD') AS day, \
                    COALESCE(SUM(total_amount), 0)::BIGINT AS total_sales \
             FROM orders \
             WHERE created_at >= $1 AND status IN ('paid', 'shipped', 'delivered') \
             GROUP BY day ORDER BY day ASC",
            [start.into()],
        ))
        .all(&self.db)
        .await
        .map_err(AppError::from)
    }
}
