//! Order domain entity and the status state machine.
//!
//! Orders carry denormalized snapshots of the customer, shipping address and
//! line-item name/price at creation time, so later edits to customer or
//! product records never rewrite purchase history. All monetary amounts are
//! in the smallest currency unit (kobo).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle states.
///
/// Transitions are centralized in [`OrderStatus::can_transition_to`]. The
/// machine is deliberately permissive: the admin back office exposes all five
/// values as a plain dropdown, so any state may move to any other, backwards
/// included. Tightening the rules later is a one-place change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status value, rejecting anything outside the five known states.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// Whether a manual transition to `next` is allowed.
    pub fn can_transition_to(&self, _next: OrderStatus) -> bool {
        true
    }

    /// Whether orders in this state count toward revenue totals.
    pub fn counts_toward_revenue(&self) -> bool {
        matches!(
            self,
            OrderStatus::Paid | OrderStatus::Shipped | OrderStatus::Delivered
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Database values are written by this application, so anything unknown is
/// treated as `pending` rather than failing the whole read.
impl From<&str> for OrderStatus {
    fn from(s: &str) -> Self {
        OrderStatus::parse(s).unwrap_or(OrderStatus::Pending)
    }
}

/// Customer snapshot stored on the order (not a foreign key)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[validate(length(min = 1, message = "Customer name is required"))]
    #[schema(example = "Ada Okafor")]
    pub name: String,
    #[validate(email(message = "Invalid customer email"))]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "+2348012345678")]
    pub phone: Option<String>,
}

/// Shipping address snapshot stored on the order
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[validate(length(min = 1, message = "Street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
}

/// One product/quantity/price entry within an order.
///
/// `price` is copied at order time, never re-derived from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Uuid,
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    /// Unit price in kobo
    #[validate(range(min = 0, message = "Item price cannot be negative"))]
    pub price: i64,
    #[validate(range(min = 1, message = "Item quantity must be at least 1"))]
    pub quantity: i32,
    /// Catalog image resolved on read for display; never persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl LineItem {
    /// Line subtotal in kobo
    pub fn subtotal(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// Order domain entity
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub items: Vec<LineItem>,
    /// Total in kobo; equals the sum of line subtotals at creation time
    pub total_amount: i64,
    pub status: OrderStatus,
    /// Gateway reference, set once a payment has been verified server-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sum of `price * quantity` across line items, in kobo
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Whether this order is already paid with the given gateway reference
    pub fn is_paid_with(&self, reference: &str) -> bool {
        self.status == OrderStatus::Paid && self.payment_reference.as_deref() == Some(reference)
    }
}

/// Order creation payload (checkout and admin manual entry).
///
/// `status` is honored only for authenticated admins; the public checkout
/// path always creates `pending` orders and relies on server-side payment
/// verification to move them to `paid`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[validate(nested)]
    pub customer: Customer,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    #[validate(length(min = 1, message = "Order must contain at least one item"), nested)]
    pub items: Vec<LineItem>,
    /// Expected total in kobo; must equal the sum of line subtotals
    pub total_amount: i64,
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

impl CreateOrder {
    /// Sum of `price * quantity` across the payload's items, in kobo
    pub fn items_total(&self) -> i64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

/// Validated order data handed to the repository for persistence
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
    pub items: Vec<LineItem>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub notes: Option<String>,
}
