//! In-process customer store for the `memory` backend and tests.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::repository::{CustomerRepository, RepositoryResult};
use crate::models::{Customer, NewCustomer};

#[derive(Debug)]
pub struct InMemoryCustomerRepository {
    customers: DashMap<i64, Customer>,
    next_id: AtomicI64,
}

impl Default for InMemoryCustomerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        let mut customers: Vec<Customer> = self
            .customers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        customers.sort_by_key(|c| c.id);
        Ok(customers)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, customer: NewCustomer) -> RepositoryResult<Customer> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let stored = Customer {
            id,
            firstname: customer.firstname,
            lastname: customer.lastname,
            created_at: now,
            updated_at: now,
        };
        self.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, customer: NewCustomer) -> RepositoryResult<Option<Customer>> {
        Ok(self.customers.get_mut(&id).map(|mut entry| {
            let stored = entry.value_mut();
            stored.firstname = customer.firstname;
            stored.lastname = customer.lastname;
            stored.updated_at = Utc::now();
            stored.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        Ok(self.customers.remove(&id).is_some())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(self.customers.len() as i64)
    }
}
