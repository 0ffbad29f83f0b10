//! Shopping cart - pre-order item accumulation.
//!
//! The cart is ephemeral and single-threaded: it exists only until checkout
//! succeeds, at which point its items become order line-item snapshots and
//! the cart is cleared. A receipt of the last successful order is retained
//! across `clear`, so a post-purchase confirmation screen can still show it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::{LineItem, Order};

/// One candidate purchase in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product id
    pub id: Uuid,
    pub name: String,
    /// Unit price in kobo, snapshotted from the catalog
    pub price: i64,
    pub quantity: i32,
    pub image_url: String,
}

/// In-memory cart state
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    last_successful_order: Option<Order>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. If the product is already in the cart its quantity is
    /// incremented; non-positive quantities are rejected outright.
    pub fn add_item(&mut self, item: CartItem) {
        if item.quantity <= 0 {
            return;
        }
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Set an item's quantity. A quantity of zero or less removes the item;
    /// the cart never stores zero or negative quantities.
    pub fn update_quantity(&mut self, id: Uuid, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.quantity = quantity;
        }
    }

    /// Remove an item; no-op if absent
    pub fn remove_item(&mut self, id: Uuid) {
        self.items.retain(|item| item.id != id);
    }

    /// Empty the item collection. The last-order receipt is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Record the order produced by a successful checkout
    pub fn set_last_order(&mut self, order: Order) {
        self.last_successful_order = Some(order);
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_successful_order(&self) -> Option<&Order> {
        self.last_successful_order.as_ref()
    }

    /// Cart total in kobo
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * item.quantity as i64)
            .sum()
    }

    /// Transform cart items into order line-item snapshots for checkout
    pub fn checkout_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .map(|item| LineItem {
                product_id: item.id,
                name: item.name.clone(),
                price: item.price,
                quantity: item.quantity,
                image_url: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::order::{Customer, OrderStatus, ShippingAddress};

    fn item(id: Uuid, price: i64, quantity: i32) -> CartItem {
        CartItem {
            id,
            name: "Sourdough Loaf".to_string(),
            price,
            quantity,
            image_url: "https://cdn.example.com/sourdough.jpg".to_string(),
        }
    }

    fn receipt() -> Order {
        Order {
            id: Uuid::new_v4(),
            customer: Customer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            shipping_address: ShippingAddress {
                street: "1 Allen Ave".to_string(),
                city: "Ikeja".to_string(),
                state: "Lagos".to_string(),
                postal_code: "100001".to_string(),
                country: "Nigeria".to_string(),
            },
            items: vec![],
            total_amount: 0,
            status: OrderStatus::Paid,
            payment_reference: Some("ref-1".to_string()),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn add_item_merges_same_product() {
        let id = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(item(id, 1000, 2));
        cart.add_item(item(id, 1000, 3));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn add_item_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        cart.add_item(item(Uuid::new_v4(), 1000, 0));
        cart.add_item(item(Uuid::new_v4(), 1000, -3));
        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_to_zero_removes_item() {
        let id = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(item(id, 1000, 2));

        let mut removed = cart.clone();
        removed.remove_item(id);

        cart.update_quantity(id, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.items().len(), removed.items().len());
    }

    #[test]
    fn update_quantity_sets_new_value() {
        let id = Uuid::new_v4();
        let mut cart = Cart::new();
        cart.add_item(item(id, 1000, 2));
        cart.update_quantity(id, 7);
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(item(Uuid::new_v4(), 1000, 1));
        cart.remove_item(Uuid::new_v4());
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn clear_retains_last_order_receipt() {
        let mut cart = Cart::new();
        cart.add_item(item(Uuid::new_v4(), 1000, 1));
        cart.set_last_order(receipt());
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.last_successful_order().is_some());
    }

    #[test]
    fn checkout_items_snapshot_cart_contents() {
        let mut cart = Cart::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cart.add_item(item(a, 1000, 2));
        cart.add_item(item(b, 500, 1));

        assert_eq!(cart.total(), 2500);

        let items = cart.checkout_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items.iter().map(|i| i.subtotal()).sum::<i64>(), 2500);
        assert_eq!(items[0].product_id, a);
    }
}
