//! Order Repository
//!
//! Persistence for orders, including the conditional writes the
//! payment flow relies on. State decisions live in the order manager;
//! this layer only guarantees that concurrent writers cannot both win.

use serde::Deserialize;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Order;
use crate::utils::time::now_ms;
use shared::{OrderStatus, OrderType, PaymentMethod, PaymentStatus};

pub const TABLE: &str = "orders";

/// Listing filter + pagination
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Scope to one customer (always set for customer callers)
    pub customer: Option<RecordId>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
    pub payment_status: Option<PaymentStatus>,
    pub page: u32,
    pub limit: u32,
}

/// One row of the per-status payment aggregate
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct PaymentSummaryRow {
    pub payment_status: PaymentStatus,
    pub count: i64,
    pub total_amount: f64,
}

#[derive(Deserialize)]
struct CountRow {
    count: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new order.
    ///
    /// A collision on the unique order-number index surfaces as
    /// `Duplicate`; the caller regenerates the number and retries.
    pub async fn insert(&self, order: Order) -> RepoResult<Order> {
        let number = order.order_number.clone();
        let created: Result<Option<Order>, surrealdb::Error> =
            self.base.db().create(TABLE).content(order).await;

        match created {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(RepoError::Database("Failed to create order".to_string())),
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("idx_order_number") {
                    Err(RepoError::Duplicate(format!(
                        "Order number '{}' already exists",
                        number
                    )))
                } else {
                    Err(RepoError::Database(msg))
                }
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_id(TABLE, id)?;
        let order: Option<Order> = self.base.db().select(rid).await?;
        Ok(order)
    }

    /// Find an order only if it belongs to `customer`
    pub async fn find_owned(&self, id: &str, customer: &RecordId) -> RepoResult<Option<Order>> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM $thing WHERE customer = $customer")
            .bind(("thing", rid))
            .bind(("customer", customer.clone()))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// List orders, newest first, with the matching total
    pub async fn find_paged(&self, filter: &OrderFilter) -> RepoResult<(Vec<Order>, u64)> {
        let page = filter.page.max(1);
        let limit = filter.limit.clamp(1, 100);

        let mut conditions: Vec<&str> = Vec::new();
        if filter.customer.is_some() {
            conditions.push("customer = $customer");
        }
        if filter.status.is_some() {
            conditions.push("status = $status");
        }
        if filter.order_type.is_some() {
            conditions.push("order_type = $order_type");
        }
        if filter.payment_status.is_some() {
            conditions.push("payment_status = $payment_status");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        // LIMIT/START are inlined: parameterised limits are unreliable
        // in embedded SurrealDB
        let list_sql = format!(
            "SELECT * FROM {TABLE}{where_clause} ORDER BY created_at DESC LIMIT {} START {}",
            limit,
            (page - 1) * limit
        );
        let count_sql = format!("SELECT count() AS count FROM {TABLE}{where_clause} GROUP ALL");

        let mut result = self
            .base
            .db()
            .query(list_sql)
            .query(count_sql)
            .bind(("customer", filter.customer.clone()))
            .bind(("status", filter.status))
            .bind(("order_type", filter.order_type))
            .bind(("payment_status", filter.payment_status))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        let counts: Vec<CountRow> = result.take(1)?;
        let total = counts.first().map(|c| c.count.max(0) as u64).unwrap_or(0);
        Ok((orders, total))
    }

    /// Commit a payment only if the order is still payable.
    ///
    /// The WHERE clause makes the paid/cancelled check and the write a
    /// single atomic statement; `None` means another writer got there
    /// first (or the order vanished).
    pub async fn conditional_mark_paid(
        &self,
        id: &str,
        payment_method: PaymentMethod,
        new_status: OrderStatus,
        transaction_id: &str,
    ) -> RepoResult<Option<Order>> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    payment_status = 'paid',
                    payment_method = $payment_method,
                    status = $new_status,
                    transaction_id = $transaction_id,
                    updated_at = $now
                WHERE payment_status != 'paid' AND status != 'cancelled'
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("payment_method", payment_method))
            .bind(("new_status", new_status))
            .bind(("transaction_id", transaction_id.to_string()))
            .bind(("now", now_ms()))
            .await?;

        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Record a failed payment attempt
    pub async fn mark_payment_failed(&self, id: &str) -> RepoResult<Order> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET payment_status = 'failed', updated_at = $now RETURN AFTER")
            .bind(("thing", rid))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Refund: paid -> refunded, and the order is cancelled with it.
    ///
    /// Conditional for the same reason as [`Self::conditional_mark_paid`].
    pub async fn conditional_refund(
        &self,
        id: &str,
        refund_id: &str,
    ) -> RepoResult<Option<Order>> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    payment_status = 'refunded',
                    status = 'cancelled',
                    refund_id = $refund_id,
                    updated_at = $now
                WHERE payment_status = 'paid' AND status != 'completed'
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("refund_id", refund_id.to_string()))
            .bind(("now", now_ms()))
            .await?;

        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: OrderStatus,
        assigned_chef: Option<RecordId>,
    ) -> RepoResult<Order> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    status = $status,
                    assigned_chef = $chef OR assigned_chef,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("status", status))
            .bind(("chef", assigned_chef))
            .bind(("now", now_ms()))
            .await?;

        result
            .take::<Option<Order>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Cancel only while still pending; `None` means the order had
    /// already moved on
    pub async fn conditional_cancel(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_id(TABLE, id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET status = 'cancelled', updated_at = $now
                WHERE status = 'pending'
                RETURN AFTER"#,
            )
            .bind(("thing", rid))
            .bind(("now", now_ms()))
            .await?;

        let updated: Vec<Order> = result.take(0)?;
        Ok(updated.into_iter().next())
    }

    /// Per-payment-status counts and totals for one customer
    pub async fn payment_summary(
        &self,
        customer: &RecordId,
    ) -> RepoResult<Vec<PaymentSummaryRow>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT payment_status,
                       count() AS count,
                       math::sum(total_amount) AS total_amount
                FROM orders
                WHERE customer = $customer
                GROUP BY payment_status"#,
            )
            .bind(("customer", customer.clone()))
            .await?;

        let rows: Vec<PaymentSummaryRow> = result.take(0)?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::OrderItem;

    fn sample_order(number: &str) -> Order {
        let now = now_ms();
        Order {
            id: None,
            order_number: number.to_string(),
            customer: RecordId::from_table_key("user", "alice"),
            items: vec![OrderItem {
                menu_item: RecordId::from_table_key("menu_item", "paella"),
                name: "Paella".to_string(),
                quantity: 1,
                price: 18.5,
            }],
            total_amount: 18.5,
            order_type: OrderType::Takeaway,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::Cash,
            delivery_address: None,
            table_number: None,
            special_instructions: None,
            estimated_preparation_time: Some(15),
            assigned_chef: None,
            transaction_id: None,
            refund_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_reports_duplicate_order_number() {
        let db = DbService::memory().await.unwrap();
        let repo = OrderRepository::new(db.db);

        repo.insert(sample_order("ORD1700000000000AAAAA"))
            .await
            .unwrap();

        // The unique index rejects the collision as Duplicate, which
        // is what drives the regenerate-and-retry loop upstream
        let err = repo
            .insert(sample_order("ORD1700000000000AAAAA"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // A fresh number goes through
        repo.insert(sample_order("ORD1700000000000BBBBB"))
            .await
            .unwrap();
    }
}
