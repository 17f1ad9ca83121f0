//! Order Manager
//!
//! Single entry point for order state changes. Guards are checked
//! against a fresh read, and the final write re-checks them in the
//! database so concurrent callers cannot both win.

use rand::Rng;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::money;
use super::OrderError;
use crate::auth::{CurrentUser, Role};
use crate::db::models::{
    Order, OrderCreate, OrderItem, PaymentReceipt, PaymentRequest, RefundReceipt,
};
use crate::db::repository::order::{OrderFilter, PaymentSummaryRow};
use crate::db::repository::{MenuRepository, OrderRepository, RepoError, parse_id};
use crate::utils::time::now_ms;
use shared::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};

/// Attempts before giving up on a unique order number
const ORDER_NUMBER_RETRIES: usize = 3;

#[derive(Clone)]
pub struct OrderManager {
    orders: OrderRepository,
    menu: MenuRepository,
}

impl OrderManager {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu: MenuRepository::new(db),
        }
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.orders
    }

    /// Place a new order.
    ///
    /// Prices and names come from the menu at this moment, never from
    /// the request; unavailable items reject the whole order.
    pub async fn create_order(
        &self,
        customer: RecordId,
        payload: OrderCreate,
    ) -> Result<Order, OrderError> {
        // 1. Validate the request shape
        if payload.items.is_empty() {
            return Err(OrderError::InvalidOperation(
                "Order must contain at least one item".to_string(),
            ));
        }
        for item in &payload.items {
            money::validate_order_item(item)?;
        }
        if payload.order_type == OrderType::DineIn && payload.table_number.is_none() {
            return Err(OrderError::InvalidOperation(
                "Table number is required for dine-in orders".to_string(),
            ));
        }

        // 2. Capture prices from the menu
        let mut items: Vec<OrderItem> = Vec::with_capacity(payload.items.len());
        let mut lines: Vec<(f64, i64)> = Vec::with_capacity(payload.items.len());
        let mut slowest_prep: i64 = 0;
        for input in &payload.items {
            let menu_item = self
                .menu
                .find_by_id(&input.menu_item)
                .await?
                .filter(|m| m.is_available)
                .ok_or_else(|| OrderError::ItemUnavailable(input.menu_item.clone()))?;

            let menu_id = menu_item
                .id
                .clone()
                .ok_or_else(|| RepoError::Database("Menu item without id".to_string()))?;
            lines.push((menu_item.price, input.quantity));
            slowest_prep = slowest_prep.max(menu_item.preparation_time);
            items.push(OrderItem {
                menu_item: menu_id,
                name: menu_item.name,
                quantity: input.quantity,
                price: menu_item.price,
            });
        }
        let total_amount = money::order_total(&lines);

        // 3. Insert, regenerating the order number on a collision
        let now = now_ms();
        let order = Order {
            id: None,
            order_number: generate_order_number(),
            customer,
            items,
            total_amount,
            order_type: payload.order_type,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: payload.payment_method,
            delivery_address: payload.delivery_address,
            table_number: payload.table_number,
            special_instructions: payload.special_instructions,
            estimated_preparation_time: Some(slowest_prep),
            assigned_chef: None,
            transaction_id: None,
            refund_id: None,
            created_at: now,
            updated_at: now,
        };

        let mut attempt = order;
        for _ in 0..ORDER_NUMBER_RETRIES {
            match self.orders.insert(attempt.clone()).await {
                Ok(created) => {
                    tracing::info!(order_number = %created.order_number, "Order created");
                    return Ok(created);
                }
                Err(RepoError::Duplicate(_)) => {
                    attempt.order_number = generate_order_number();
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(OrderError::Repo(RepoError::Database(
            "Could not allocate a unique order number".to_string(),
        )))
    }

    /// Process a (mock) payment for the customer's own order.
    ///
    /// Card payments are validated against the supplied details; a
    /// failed validation is persisted as `payment_status = failed`.
    /// Cash keeps the kitchen status unless the order was still
    /// pending; card and online always confirm.
    pub async fn process_payment(
        &self,
        customer: &RecordId,
        request: PaymentRequest,
    ) -> Result<PaymentReceipt, OrderError> {
        // 1. Load and guard
        let order = self
            .orders
            .find_owned(&request.order_id, customer)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.payment_status == PaymentStatus::Paid {
            return Err(OrderError::AlreadyPaid);
        }
        if order.status == OrderStatus::Cancelled {
            return Err(OrderError::OrderCancelled);
        }

        // 2. Card validation: all three fields present and non-empty
        if request.payment_method == PaymentMethod::Card {
            let valid = request
                .payment_details
                .as_ref()
                .map(|d| {
                    has_value(&d.card_number) && has_value(&d.expiry_date) && has_value(&d.cvv)
                })
                .unwrap_or(false);

            if !valid {
                self.orders.mark_payment_failed(&request.order_id).await?;
                tracing::warn!(order_number = %order.order_number, "Card payment rejected");
                return Err(OrderError::PaymentFailed);
            }
        }

        // 3. Commit: electronic payments confirm outright, cash only
        //    promotes a pending order
        let new_status = if request.payment_method.is_electronic() {
            OrderStatus::Confirmed
        } else if order.status == OrderStatus::Pending {
            OrderStatus::Confirmed
        } else {
            order.status
        };

        let transaction_id = format!("TXN{}", now_ms());
        let updated = self
            .orders
            .conditional_mark_paid(
                &request.order_id,
                request.payment_method,
                new_status,
                &transaction_id,
            )
            .await?;

        match updated {
            Some(order) => {
                tracing::info!(
                    order_number = %order.order_number,
                    transaction_id = %transaction_id,
                    "Payment processed"
                );
                let paid_amount = order.total_amount;
                Ok(PaymentReceipt {
                    order,
                    transaction_id,
                    payment_status: PaymentStatus::Paid,
                    paid_amount,
                })
            }
            // Another writer raced us; re-read to report the real reason
            None => match self.orders.find_by_id(&request.order_id).await? {
                Some(order) if order.payment_status == PaymentStatus::Paid => {
                    Err(OrderError::AlreadyPaid)
                }
                Some(_) => Err(OrderError::OrderCancelled),
                None => Err(OrderError::NotFound),
            },
        }
    }

    /// Refund a paid, not-yet-completed order. The order is cancelled
    /// along with the refund.
    pub async fn refund_payment(&self, order_id: &str) -> Result<RefundReceipt, OrderError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.payment_status != PaymentStatus::Paid {
            return Err(OrderError::NotPaid);
        }
        if order.status == OrderStatus::Completed {
            return Err(OrderError::AlreadyCompleted);
        }

        let refund_id = format!("REF{}", now_ms());
        let updated = self
            .orders
            .conditional_refund(order_id, &refund_id)
            .await?;

        match updated {
            Some(order) => {
                tracing::info!(
                    order_number = %order.order_number,
                    refund_id = %refund_id,
                    "Payment refunded"
                );
                Ok(RefundReceipt {
                    order_id: order
                        .id
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| order_id.to_string()),
                    refund_amount: order.total_amount,
                    refund_status: "processed",
                    transaction_id: refund_id,
                })
            }
            None => match self.orders.find_by_id(order_id).await? {
                Some(order) if order.payment_status != PaymentStatus::Paid => {
                    Err(OrderError::NotPaid)
                }
                Some(_) => Err(OrderError::AlreadyCompleted),
                None => Err(OrderError::NotFound),
            },
        }
    }

    /// Move an order through the kitchen pipeline.
    ///
    /// Only forward transitions from the lifecycle table are allowed.
    /// A chef taking an order into preparation gets assigned to it.
    pub async fn update_order_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
        actor: &CurrentUser,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound)?;

        if !order.status.can_transition_to(new_status) {
            return Err(OrderError::InvalidTransition {
                from: order.status.as_str(),
                to: new_status.as_str(),
            });
        }

        let assigned_chef = if new_status == OrderStatus::Preparing && actor.role == Role::Chef {
            Some(parse_id("user", &actor.id)?)
        } else {
            None
        };

        let updated = self
            .orders
            .set_status(order_id, new_status, assigned_chef)
            .await?;
        tracing::info!(
            order_number = %updated.order_number,
            status = %new_status,
            "Order status updated"
        );
        Ok(updated)
    }

    /// Customer cancellation, only while the order is still pending
    pub async fn cancel_order(
        &self,
        customer: &RecordId,
        order_id: &str,
    ) -> Result<Order, OrderError> {
        let order = self
            .orders
            .find_owned(order_id, customer)
            .await?
            .ok_or(OrderError::NotFound)?;

        if order.status != OrderStatus::Pending {
            return Err(OrderError::NotCancellable);
        }

        match self.orders.conditional_cancel(order_id).await? {
            Some(order) => {
                tracing::info!(order_number = %order.order_number, "Order cancelled");
                Ok(order)
            }
            None => Err(OrderError::NotCancellable),
        }
    }

    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<(Vec<Order>, u64), OrderError> {
        Ok(self.orders.find_paged(filter).await?)
    }

    pub async fn payment_summary(
        &self,
        customer: &RecordId,
    ) -> Result<Vec<PaymentSummaryRow>, OrderError> {
        Ok(self.orders.payment_summary(customer).await?)
    }
}

fn has_value(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// "ORD" + unix millis + 5 random uppercase alphanumerics
fn generate_order_number() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..5)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("ORD{}{}", now_ms(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{MenuCategory, MenuItemCreate, OrderItemInput, PaymentDetails};

    async fn setup() -> (OrderManager, MenuRepository, RecordId) {
        let db = DbService::memory().await.unwrap();
        let manager = OrderManager::new(db.db.clone());
        let menu = MenuRepository::new(db.db.clone());
        let customer = RecordId::from_table_key("user", "alice");
        (manager, menu, customer)
    }

    async fn seed_menu_item(menu: &MenuRepository, name: &str, price: f64) -> String {
        let item = menu
            .create(MenuItemCreate {
                name: name.to_string(),
                category: MenuCategory::MainCourse,
                description: "test item".to_string(),
                price,
                image: None,
                ingredients: vec![],
                preparation_time: 15,
                is_available: None,
                nutritional_info: None,
            })
            .await
            .unwrap();
        item.id.unwrap().to_string()
    }

    fn order_payload(item_id: &str, quantity: i64) -> OrderCreate {
        OrderCreate {
            items: vec![OrderItemInput {
                menu_item: item_id.to_string(),
                quantity,
            }],
            order_type: OrderType::Takeaway,
            payment_method: PaymentMethod::Card,
            delivery_address: None,
            table_number: None,
            special_instructions: None,
        }
    }

    fn card_details() -> Option<PaymentDetails> {
        Some(PaymentDetails {
            card_number: Some("4111111111111111".to_string()),
            expiry_date: Some("12/27".to_string()),
            cvv: Some("123".to_string()),
        })
    }

    #[tokio::test]
    async fn test_create_order_captures_menu_prices() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 18.5).await;

        let order = manager
            .create_order(customer, order_payload(&item_id, 3))
            .await
            .unwrap();

        assert!(order.order_number.starts_with("ORD"));
        assert_eq!(order.total_amount, 55.5);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.items[0].name, "Paella");
        assert_eq!(order.estimated_preparation_time, Some(15));
    }

    #[tokio::test]
    async fn test_menu_price_change_leaves_placed_order_untouched() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 18.5).await;
        let order = manager
            .create_order(customer, order_payload(&item_id, 3))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let repriced = menu
            .update(
                &item_id,
                crate::db::models::MenuItemUpdate {
                    price: Some(25.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(repriced.price, 25.0);

        // The stored snapshot still carries the price at order time
        let order = manager.repository().find_by_id(&order_id).await.unwrap().unwrap();
        assert_eq!(order.items[0].price, 18.5);
        assert_eq!(order.total_amount, 55.5);
    }

    #[tokio::test]
    async fn test_create_order_rejects_unavailable_item() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 18.5).await;
        menu.update(
            &item_id,
            crate::db::models::MenuItemUpdate {
                is_available: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = manager
            .create_order(customer, order_payload(&item_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ItemUnavailable(_)));
    }

    #[tokio::test]
    async fn test_create_order_requires_table_for_dine_in() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 18.5).await;

        let mut payload = order_payload(&item_id, 1);
        payload.order_type = OrderType::DineIn;
        let err = manager.create_order(customer, payload).await.unwrap_err();
        assert!(matches!(err, OrderError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn test_card_payment_confirms_order() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 2))
            .await
            .unwrap();

        let receipt = manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id: order.id.unwrap().to_string(),
                    payment_method: PaymentMethod::Card,
                    payment_details: card_details(),
                },
            )
            .await
            .unwrap();

        assert!(receipt.transaction_id.starts_with("TXN"));
        assert_eq!(receipt.paid_amount, 40.0);
        assert_eq!(receipt.order.status, OrderStatus::Confirmed);
        assert_eq!(receipt.order.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_card_payment_without_details_persists_failure() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let err = manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id: order_id.clone(),
                    payment_method: PaymentMethod::Card,
                    payment_details: Some(PaymentDetails {
                        card_number: Some("4111111111111111".to_string()),
                        expiry_date: None,
                        cvv: Some("123".to_string()),
                    }),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::PaymentFailed));

        // The failure is recorded, and the order can still be retried
        let order = manager.repository().find_by_id(&order_id).await.unwrap().unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Failed);
        assert_eq!(order.status, OrderStatus::Pending);

        let receipt = manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id,
                    payment_method: PaymentMethod::Card,
                    payment_details: card_details(),
                },
            )
            .await
            .unwrap();
        assert_eq!(receipt.order.payment_status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_cash_payment_keeps_kitchen_status() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        // Move the order into preparation before the cash changes hands
        let staff = CurrentUser {
            id: "user:staff1".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
        };
        manager
            .update_order_status(&order_id, OrderStatus::Confirmed, &staff)
            .await
            .unwrap();
        manager
            .update_order_status(&order_id, OrderStatus::Preparing, &staff)
            .await
            .unwrap();

        let receipt = manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id,
                    payment_method: PaymentMethod::Cash,
                    payment_details: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(receipt.order.payment_status, PaymentStatus::Paid);
        assert_eq!(receipt.order.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_double_payment_rejected() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let request = PaymentRequest {
            order_id,
            payment_method: PaymentMethod::Online,
            payment_details: None,
        };
        manager
            .process_payment(&customer, request.clone())
            .await
            .unwrap();
        let err = manager
            .process_payment(&customer, request)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyPaid));
    }

    #[tokio::test]
    async fn test_payment_for_cancelled_order_rejected() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        manager.cancel_order(&customer, &order_id).await.unwrap();
        let err = manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id,
                    payment_method: PaymentMethod::Online,
                    payment_details: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::OrderCancelled));
    }

    #[tokio::test]
    async fn test_refund_cancels_paid_order() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 2))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id: order_id.clone(),
                    payment_method: PaymentMethod::Online,
                    payment_details: None,
                },
            )
            .await
            .unwrap();

        let receipt = manager.refund_payment(&order_id).await.unwrap();
        assert!(receipt.transaction_id.starts_with("REF"));
        assert_eq!(receipt.refund_amount, 40.0);

        let order = manager.repository().find_by_id(&order_id).await.unwrap().unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Refunded);
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_refund_requires_paid_order() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer, order_payload(&item_id, 1))
            .await
            .unwrap();

        let err = manager
            .refund_payment(&order.id.unwrap().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotPaid));
    }

    #[tokio::test]
    async fn test_refund_rejected_after_completion() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id: order_id.clone(),
                    payment_method: PaymentMethod::Online,
                    payment_details: None,
                },
            )
            .await
            .unwrap();

        let staff = CurrentUser {
            id: "user:staff1".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
        };
        manager
            .update_order_status(&order_id, OrderStatus::Completed, &staff)
            .await
            .unwrap();

        let err = manager.refund_payment(&order_id).await.unwrap_err();
        assert!(matches!(err, OrderError::AlreadyCompleted));
    }

    #[tokio::test]
    async fn test_status_transitions_follow_lifecycle() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer, order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let staff = CurrentUser {
            id: "user:staff1".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
        };

        // Pending cannot jump straight to ready
        let err = manager
            .update_order_status(&order_id, OrderStatus::Ready, &staff)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));

        manager
            .update_order_status(&order_id, OrderStatus::Confirmed, &staff)
            .await
            .unwrap();
        manager
            .update_order_status(&order_id, OrderStatus::Preparing, &staff)
            .await
            .unwrap();
        manager
            .update_order_status(&order_id, OrderStatus::Ready, &staff)
            .await
            .unwrap();
        let done = manager
            .update_order_status(&order_id, OrderStatus::Completed, &staff)
            .await
            .unwrap();
        assert_eq!(done.status, OrderStatus::Completed);

        // Terminal
        let err = manager
            .update_order_status(&order_id, OrderStatus::Pending, &staff)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_chef_assignment_on_preparing() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer, order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let chef = CurrentUser {
            id: "user:chef1".to_string(),
            name: "Chef".to_string(),
            role: Role::Chef,
        };
        manager
            .update_order_status(&order_id, OrderStatus::Confirmed, &chef)
            .await
            .unwrap();
        assert!(
            manager
                .repository()
                .find_by_id(&order_id)
                .await
                .unwrap()
                .unwrap()
                .assigned_chef
                .is_none()
        );

        let updated = manager
            .update_order_status(&order_id, OrderStatus::Preparing, &chef)
            .await
            .unwrap();
        let chef_id = updated.assigned_chef.unwrap();
        assert_eq!(chef_id.to_string(), "user:chef1");
    }

    #[tokio::test]
    async fn test_cancel_only_while_pending() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        let order_id = order.id.unwrap().to_string();

        let staff = CurrentUser {
            id: "user:staff1".to_string(),
            name: "Staff".to_string(),
            role: Role::Staff,
        };
        manager
            .update_order_status(&order_id, OrderStatus::Confirmed, &staff)
            .await
            .unwrap();

        let err = manager
            .cancel_order(&customer, &order_id)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotCancellable));
    }

    #[tokio::test]
    async fn test_orders_scoped_to_customer() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 20.0).await;
        let order = manager
            .create_order(customer, order_payload(&item_id, 1))
            .await
            .unwrap();

        let stranger = RecordId::from_table_key("user", "mallory");
        let err = manager
            .cancel_order(&stranger, &order.id.unwrap().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::NotFound));
    }

    #[tokio::test]
    async fn test_payment_summary_groups_by_status() {
        let (manager, menu, customer) = setup().await;
        let item_id = seed_menu_item(&menu, "Paella", 10.0).await;

        let first = manager
            .create_order(customer.clone(), order_payload(&item_id, 1))
            .await
            .unwrap();
        manager
            .create_order(customer.clone(), order_payload(&item_id, 2))
            .await
            .unwrap();
        manager
            .process_payment(
                &customer,
                PaymentRequest {
                    order_id: first.id.unwrap().to_string(),
                    payment_method: PaymentMethod::Online,
                    payment_details: None,
                },
            )
            .await
            .unwrap();

        let summary = manager.payment_summary(&customer).await.unwrap();
        let paid = summary
            .iter()
            .find(|row| row.payment_status == PaymentStatus::Paid)
            .unwrap();
        assert_eq!(paid.count, 1);
        assert_eq!(paid.total_amount, 10.0);
        let pending = summary
            .iter()
            .find(|row| row.payment_status == PaymentStatus::Pending)
            .unwrap();
        assert_eq!(pending.count, 1);
        assert_eq!(pending.total_amount, 20.0);
    }
}
