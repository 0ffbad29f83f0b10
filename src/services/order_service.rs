//! Order service - checkout, payment verification, and lifecycle management.
//!
//! The payment rule lives here: an order only ever becomes `paid` through
//! [`OrderService::verify_payment`], which re-checks the client-supplied
//! gateway reference against the gateway itself. The client-side success
//! callback is treated as a hint, never as proof of payment.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{CreateOrder, NewOrder, Order, OrderStatus};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{OrderRepository, ProductRepository};
use crate::infra::PaymentGateway;
use crate::types::ListParams;

/// Order service trait for dependency injection
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Validate and persist a new order
    async fn create_order(&self, data: CreateOrder) -> AppResult<Order>;

    /// Fetch a single order with line items resolved to catalog display data
    async fn get_order(&self, id: Uuid) -> AppResult<Order>;

    /// List orders newest-first with the total match count
    async fn list_orders(&self, params: &ListParams) -> AppResult<(Vec<Order>, u64)>;

    /// Move an order to a new lifecycle state
    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order>;

    /// Verify a gateway reference and mark the order paid on success.
    ///
    /// Idempotent: re-verifying an order already paid with the same reference
    /// returns it unchanged without another gateway call or write.
    async fn verify_payment(&self, id: Uuid, reference: &str) -> AppResult<Order>;
}

/// Concrete implementation of OrderService
pub struct OrderManager {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl OrderManager {
    /// Create new order service instance
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            orders,
            products,
            gateway,
        }
    }
}

#[async_trait]
impl OrderService for OrderManager {
    async fn create_order(&self, data: CreateOrder) -> AppResult<Order> {
        data.validate()?;

        // The payload total is an assertion, not an input: it must match the
        // sum of line subtotals or the order is rejected before any write.
        let computed = data.items_total();
        if computed != data.total_amount {
            return Err(AppError::validation(format!(
                "Order total {} does not match item subtotals {}",
                data.total_amount, computed
            )));
        }

        let status = data.status.unwrap_or(OrderStatus::Pending);
        let order = self
            .orders
            .create(NewOrder {
                customer: data.customer,
                shipping_address: data.shipping_address,
                items: data.items,
                total_amount: data.total_amount,
                status,
                notes: data.notes,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            total = order.total_amount,
            status = %order.status,
            "Order created"
        );
        Ok(order)
    }

    async fn get_order(&self, id: Uuid) -> AppResult<Order> {
        let mut order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        // Display data only; a product deleted since checkout leaves the
        // snapshot untouched.
        for item in &mut order.items {
            if let Some(product) = self.products.find_by_id(item.product_id).await? {
                item.image_url = product.image_urls.first().cloned();
            }
        }
        Ok(order)
    }

    async fn list_orders(&self, params: &ListParams) -> AppResult<(Vec<Order>, u64)> {
        self.orders.list(params).await
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        if !order.status.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move order from {} to {}",
                order.status, status
            )));
        }

        let updated = self.orders.update_status(id, status).await?;
        tracing::info!(
            order_id = %updated.id,
            from = %order.status,
            to = %updated.status,
            "Order status updated"
        );
        Ok(updated)
    }

    async fn verify_payment(&self, id: Uuid, reference: &str) -> AppResult<Order> {
        let order = self.orders.find_by_id(id).await?.ok_or_not_found()?;

        // Replayed callback for an already-verified payment
        if order.is_paid_with(reference) {
            return Ok(order);
        }
        if order.status == OrderStatus::Paid {
            return Err(AppError::BadRequest(
                "Order is already paid with a different reference".to_string(),
            ));
        }

        // Transport failures propagate as upstream errors; the order stays
        // pending and the client may retry with the same reference.
        let verification = self.gateway.verify(reference).await?;

        if !verification.verified {
            tracing::warn!(
                order_id = %order.id,
                reference = %reference,
                "Gateway did not confirm the transaction"
            );
            return Err(AppError::GatewayVerificationFailed);
        }
        if verification.reference != reference {
            tracing::warn!(
                order_id = %order.id,
                requested = %reference,
                settled = %verification.reference,
                "Gateway settled a different reference"
            );
            return Err(AppError::GatewayVerificationFailed);
        }
        if verification.amount != order.total_amount {
            tracing::warn!(
                order_id = %order.id,
                reference = %reference,
                expected = order.total_amount,
                settled = verification.amount,
                "Settled amount does not match order total"
            );
            return Err(AppError::GatewayVerificationFailed);
        }

        let paid = self.orders.mark_paid(id, reference).await?;
        tracing::info!(
            order_id = %paid.id,
            reference = %reference,
            "Payment verified, order marked paid"
        );
        Ok(paid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::{Customer, LineItem, Product, ShippingAddress};
    use crate::infra::paystack::{MockPaymentGateway, PaymentVerification};
    use crate::infra::repositories::{MockOrderRepository, MockProductRepository};

    fn sample_customer() -> Customer {
        Customer {
            name: "Ada Okafor".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        }
    }

    fn sample_address() -> ShippingAddress {
        ShippingAddress {
            street: "1 Allen Ave".to_string(),
            city: "Ikeja".to_string(),
            state: "Lagos".to_string(),
            postal_code: "100001".to_string(),
            country: "Nigeria".to_string(),
        }
    }

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem {
                product_id: Uuid::new_v4(),
                name: "Sourdough Loaf".to_string(),
                price: 1000,
                quantity: 2,
                image_url: None,
            },
            LineItem {
                product_id: Uuid::new_v4(),
                name: "Cinnamon Roll".to_string(),
                price: 500,
                quantity: 1,
                image_url: None,
            },
        ]
    }

    fn sample_payload(total: i64) -> CreateOrder {
        CreateOrder {
            customer: sample_customer(),
            shipping_address: sample_address(),
            items: sample_items(),
            total_amount: total,
            status: None,
            notes: None,
        }
    }

    fn stored_order(id: Uuid, status: OrderStatus, reference: Option<&str>) -> Order {
        Order {
            id,
            customer: sample_customer(),
            shipping_address: sample_address(),
            items: sample_items(),
            total_amount: 2500,
            status,
            payment_reference: reference.map(str::to_string),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn manager(orders: MockOrderRepository, gateway: MockPaymentGateway) -> OrderManager {
        OrderManager::new(
            Arc::new(orders),
            Arc::new(MockProductRepository::new()),
            Arc::new(gateway),
        )
    }

    #[tokio::test]
    async fn create_order_rejects_total_mismatch() {
        // No repository expectations: nothing may be persisted
        let service = manager(MockOrderRepository::new(), MockPaymentGateway::new());

        let err = service.create_order(sample_payload(9999)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_order_rejects_invalid_email_without_persisting() {
        let service = manager(MockOrderRepository::new(), MockPaymentGateway::new());

        let mut payload = sample_payload(2500);
        payload.customer.email = "not-an-email".to_string();

        let err = service.create_order(payload).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_order_defaults_to_pending() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_create()
            .withf(|data: &NewOrder| data.status == OrderStatus::Pending)
            .returning(|data| {
                let mut order = stored_order(Uuid::new_v4(), data.status, None);
                order.total_amount = data.total_amount;
                Ok(order)
            });

        let service = manager(orders, MockPaymentGateway::new());
        let order = service.create_order(sample_payload(2500)).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 2500);
    }

    #[tokio::test]
    async fn create_order_honors_explicit_status() {
        let mut orders = MockOrderRepository::new();
        orders
            .expect_create()
            .withf(|data: &NewOrder| data.status == OrderStatus::Paid)
            .returning(|data| Ok(stored_order(Uuid::new_v4(), data.status, None)));

        let service = manager(orders, MockPaymentGateway::new());
        let mut payload = sample_payload(2500);
        payload.status = Some(OrderStatus::Paid);

        let order = service.create_order(payload).await.unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn verify_payment_marks_order_paid() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Pending, None))));
        orders
            .expect_mark_paid()
            .with(eq(id), eq("ref-1"))
            .returning(move |_, r| Ok(stored_order(id, OrderStatus::Paid, Some(r))));

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify().with(eq("ref-1")).returning(|r| {
            Ok(PaymentVerification {
                reference: r.to_string(),
                amount: 2500,
                verified: true,
            })
        });

        let service = manager(orders, gateway);
        let order = service.verify_payment(id, "ref-1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
        assert_eq!(order.payment_reference.as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn verify_payment_is_idempotent_for_same_reference() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Paid, Some("ref-1")))));

        // Already verified: the gateway must not be called again
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify().times(0);

        let service = manager(orders, gateway);
        let order = service.verify_payment(id, "ref-1").await.unwrap();
        assert_eq!(order.status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn verify_payment_rejects_conflicting_reference() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Paid, Some("ref-1")))));

        let service = manager(orders, MockPaymentGateway::new());
        let err = service.verify_payment(id, "ref-2").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn verify_payment_fails_when_gateway_does_not_confirm() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Pending, None))));
        // No mark_paid expectation: the order must stay pending

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify().returning(|r| {
            Ok(PaymentVerification {
                reference: r.to_string(),
                amount: 2500,
                verified: false,
            })
        });

        let service = manager(orders, gateway);
        let err = service.verify_payment(id, "ref-1").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayVerificationFailed));
    }

    #[tokio::test]
    async fn verify_payment_fails_on_reference_mismatch() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Pending, None))));
        // No mark_paid expectation: the order must stay pending

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify().returning(|_| {
            Ok(PaymentVerification {
                // Gateway settles a transaction other than the one requested
                reference: "ref-other".to_string(),
                amount: 2500,
                verified: true,
            })
        });

        let service = manager(orders, gateway);
        let err = service.verify_payment(id, "ref-1").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayVerificationFailed));
    }

    #[tokio::test]
    async fn verify_payment_fails_on_amount_mismatch() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Pending, None))));

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_verify().returning(|r| {
            Ok(PaymentVerification {
                reference: r.to_string(),
                // Settled less than the order total
                amount: 100,
                verified: true,
            })
        });

        let service = manager(orders, gateway);
        let err = service.verify_payment(id, "ref-1").await.unwrap_err();
        assert!(matches!(err, AppError::GatewayVerificationFailed));
    }

    #[tokio::test]
    async fn verify_payment_propagates_upstream_errors() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Pending, None))));

        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_verify()
            .returning(|_| Err(AppError::upstream("timed out")));

        let service = manager(orders, gateway);
        let err = service.verify_payment(id, "ref-1").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn verify_payment_unknown_order_is_not_found() {
        let mut orders = MockOrderRepository::new();
        orders.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(orders, MockPaymentGateway::new());
        let err = service
            .verify_payment(Uuid::new_v4(), "ref-1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn get_order_attaches_catalog_images() {
        let id = Uuid::new_v4();
        let order = stored_order(id, OrderStatus::Pending, None);
        let pictured_id = order.items[0].product_id;

        let mut orders = MockOrderRepository::new();
        let found = order.clone();
        orders
            .expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(found.clone())));

        // One item still in the catalog, the other deleted since checkout
        let mut products = MockProductRepository::new();
        products.expect_find_by_id().returning(move |pid| {
            if pid == pictured_id {
                Ok(Some(Product {
                    id: pid,
                    name: "Sourdough Loaf".to_string(),
                    description: "Naturally leavened".to_string(),
                    price: 1000,
                    image_urls: vec!["https://cdn.example.com/sourdough.jpg".to_string()],
                    category: "bread".to_string(),
                }))
            } else {
                Ok(None)
            }
        });

        let service = OrderManager::new(
            Arc::new(orders),
            Arc::new(products),
            Arc::new(MockPaymentGateway::new()),
        );

        let resolved = service.get_order(id).await.unwrap();
        assert_eq!(
            resolved.items[0].image_url.as_deref(),
            Some("https://cdn.example.com/sourdough.jpg")
        );
        assert_eq!(resolved.items[1].image_url, None);
    }

    #[tokio::test]
    async fn update_status_allows_backwards_moves() {
        let id = Uuid::new_v4();

        let mut orders = MockOrderRepository::new();
        orders
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored_order(id, OrderStatus::Delivered, Some("ref-1")))));
        orders
            .expect_update_status()
            .with(eq(id), eq(OrderStatus::Pending))
            .returning(move |_, status| Ok(stored_order(id, status, Some("ref-1"))));

        let service = manager(orders, MockPaymentGateway::new());
        let order = service.update_status(id, OrderStatus::Pending).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
