//! Database repository pattern for customer data access.
//!
//! This module provides:
//! - The `CustomerRepository` trait the service layer is written against
//! - The PostgreSQL implementation backed by `sqlx`

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::{Customer, NewCustomer};

pub type RepositoryResult<T> = Result<T, sqlx::Error>;

/// Storage operations for customer rows
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ordered by id
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>>;

    /// Find customer by ID
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>>;

    /// Insert a new customer, the store assigns the id
    async fn insert(&self, customer: NewCustomer) -> RepositoryResult<Customer>;

    /// Replace both names; `None` when no row has this id
    async fn update(&self, id: i64, customer: NewCustomer) -> RepositoryResult<Option<Customer>>;

    /// Delete by ID; `false` when nothing was removed
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    /// Count all customers
    async fn count(&self) -> RepositoryResult<i64>;
}

const CUSTOMER_COLUMNS: &str = "id, firstname, lastname, created_at, updated_at";

/// PostgreSQL-backed customer repository
#[derive(Clone, Debug)]
pub struct PgCustomerRepository {
    db_pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY id",
            CUSTOMER_COLUMNS
        ))
        .fetch_all(&self.db_pool)
        .await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await
    }

    #[instrument(skip(self))]
    async fn insert(&self, customer: NewCustomer) -> RepositoryResult<Customer> {
        sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (firstname, lastname, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(customer.firstname)
        .bind(customer.lastname)
        .fetch_one(&self.db_pool)
        .await
    }

    #[instrument(skip(self))]
    async fn update(&self, id: i64, customer: NewCustomer) -> RepositoryResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET firstname = $2, lastname = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .bind(customer.firstname)
        .bind(customer.lastname)
        .fetch_optional(&self.db_pool)
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db_pool)
            .await
    }
}
