use async_trait::async_trait;
use common::{CustomerId, OrderId, OrderLineId, ProductId};
use domain::{Money, NewOrder, Order, OrderLine, OrderLineRequest, PaymentMethod};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Result, StoreError,
    store::{OrderStore, OrderStream},
};

const SELECT_ORDER_BY_ID: &str = r#"
    SELECT id, reference, total_amount_cents, payment_method, customer_id, created_at
    FROM customer_order
    WHERE id = $1
"#;

const SELECT_ALL_ORDERS: &str = r#"
    SELECT id, reference, total_amount_cents, payment_method, customer_id, created_at
    FROM customer_order
    ORDER BY id ASC
"#;

/// PostgreSQL-backed order store implementation.
#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    /// Creates a new PostgreSQL order store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_order(row: PgRow) -> Result<Order> {
        let payment_method: String = row.try_get("payment_method")?;
        let payment_method = payment_method
            .parse::<PaymentMethod>()
            .map_err(|e| StoreError::InvalidValue {
                column: "payment_method",
                reason: e.to_string(),
            })?;

        Ok(Order {
            id: OrderId::new(row.try_get("id")?),
            reference: row.try_get("reference")?,
            amount: Money::from_cents(row.try_get("total_amount_cents")?),
            payment_method,
            customer_id: CustomerId::new(row.try_get::<String, _>("customer_id")?),
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_line(row: PgRow) -> Result<OrderLine> {
        let quantity: i64 = row.try_get("quantity")?;
        let quantity = u32::try_from(quantity).map_err(|e| StoreError::InvalidValue {
            column: "quantity",
            reason: e.to_string(),
        })?;

        Ok(OrderLine {
            id: OrderLineId::new(row.try_get("id")?),
            order_id: OrderId::new(row.try_get("order_id")?),
            product_id: ProductId::new(row.try_get("product_id")?),
            quantity,
        })
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self, order), fields(reference = %order.reference))]
    async fn save_order(&self, order: NewOrder) -> Result<Order> {
        let row = sqlx::query(
            r#"
            INSERT INTO customer_order (reference, total_amount_cents, payment_method, customer_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at
            "#,
        )
        .bind(&order.reference)
        .bind(order.amount.cents())
        .bind(order.payment_method.as_str())
        .bind(order.customer_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        let id = OrderId::new(row.try_get("id")?);
        let created_at = row.try_get("created_at")?;
        Ok(order.into_order(id, created_at))
    }

    #[tracing::instrument(skip(self))]
    async fn save_order_line(&self, line: OrderLineRequest) -> Result<OrderLine> {
        let row = sqlx::query(
            r#"
            INSERT INTO order_line (order_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(line.order_id.as_i64())
        .bind(line.product_id.as_i64())
        .bind(i64::from(line.quantity))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The foreign key on order_id is the only way this insert can
            // reference a missing row.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return StoreError::OrderMissing(line.order_id);
            }
            StoreError::Database(e)
        })?;

        Ok(OrderLine {
            id: OrderLineId::new(row.try_get("id")?),
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
        })
    }

    async fn stream_orders(&self) -> Result<OrderStream> {
        use futures_util::StreamExt;

        let stream = sqlx::query(SELECT_ALL_ORDERS)
            .fetch(&self.pool)
            .map(|result| match result {
                Ok(row) => Self::row_to_order(row),
                Err(e) => Err(StoreError::Database(e)),
            });

        Ok(Box::pin(stream))
    }

    #[tracing::instrument(skip(self))]
    async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row: Option<PgRow> = sqlx::query(SELECT_ORDER_BY_ID)
            .bind(order_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_order).transpose()
    }

    #[tracing::instrument(skip(self))]
    async fn find_lines_for_order(&self, order_id: OrderId) -> Result<Vec<OrderLine>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, quantity
            FROM order_line
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(order_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_line).collect()
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
