//! Customer service: the capability the HTTP layer is written against.
//!
//! Lookups and mutations go through a `CustomerRepository`; results leave as
//! DTOs with the resource URL filled in. Absence is reported as
//! `CustomerError::ResourceNotFound`, which the HTTP boundary turns into 404.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, instrument};
use validator::{Validate, ValidationErrors};

use crate::database::CustomerRepository;
use crate::models::{Customer, CustomerDto, CustomerListDto, NewCustomer};

pub type Result<T> = std::result::Result<T, CustomerError>;

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("Customer {id} not found")]
    ResourceNotFound { id: i64 },

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Invalid customer: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl CustomerError {
    pub fn not_found(id: i64) -> Self {
        CustomerError::ResourceNotFound { id }
    }
}

#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Every stored customer, in store order
    async fn all_customers(&self) -> Result<CustomerListDto>;

    async fn customer_by_id(&self, id: i64) -> Result<CustomerDto>;

    /// Persist a new customer; incoming `id` and `customerUrl` are ignored
    async fn create_new_customer(&self, dto: CustomerDto) -> Result<CustomerDto>;

    /// Full replacement of an existing customer
    async fn save_customer_by_dto(&self, id: i64, dto: CustomerDto) -> Result<CustomerDto>;

    /// Overwrite only the fields the patch carries with a non-blank value
    async fn patch_customer(&self, id: i64, dto: CustomerDto) -> Result<CustomerDto>;

    async fn delete_customer(&self, id: i64) -> Result<()>;
}

/// Repository-backed implementation used by the running server
#[derive(Clone)]
pub struct DefaultCustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl DefaultCustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    #[cfg(test)]
    async fn count(&self) -> Result<i64> {
        Ok(self.repository.count().await?)
    }
}

#[async_trait]
impl CustomerService for DefaultCustomerService {
    #[instrument(skip(self))]
    async fn all_customers(&self) -> Result<CustomerListDto> {
        let customers = self.repository.find_all().await?;
        debug!("Loaded {} customers", customers.len());

        Ok(customers.into_iter().map(CustomerDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn customer_by_id(&self, id: i64) -> Result<CustomerDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(CustomerDto::from)
            .ok_or_else(|| CustomerError::not_found(id))
    }

    #[instrument(skip(self, dto))]
    async fn create_new_customer(&self, dto: CustomerDto) -> Result<CustomerDto> {
        let fields = required_fields(dto)?;
        let customer = self.repository.insert(fields).await?;
        info!(customer_id = customer.id, "Customer created");

        Ok(customer.into())
    }

    #[instrument(skip(self, dto))]
    async fn save_customer_by_dto(&self, id: i64, dto: CustomerDto) -> Result<CustomerDto> {
        let fields = required_fields(dto)?;
        let customer = self
            .repository
            .update(id, fields)
            .await?
            .ok_or_else(|| CustomerError::not_found(id))?;
        info!(customer_id = id, "Customer replaced");

        Ok(customer.into())
    }

    #[instrument(skip(self, dto))]
    async fn patch_customer(&self, id: i64, dto: CustomerDto) -> Result<CustomerDto> {
        dto.validate()?;

        let current = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CustomerError::not_found(id))?;

        let customer = self
            .repository
            .update(id, apply_patch(&current, dto))
            .await?
            .ok_or_else(|| CustomerError::not_found(id))?;
        info!(customer_id = id, "Customer patched");

        Ok(customer.into())
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(CustomerError::not_found(id));
        }
        info!(customer_id = id, "Customer deleted");
        Ok(())
    }
}

/// Validate a create/replace body and pull out both names.
fn required_fields(dto: CustomerDto) -> Result<NewCustomer> {
    dto.validate()?;

    Ok(NewCustomer {
        firstname: non_blank(dto.firstname).ok_or(CustomerError::MissingField("firstname"))?,
        lastname: non_blank(dto.lastname).ok_or(CustomerError::MissingField("lastname"))?,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Merge a patch body onto a stored customer.
///
/// A field overwrites only when it is present and not blank, so a patch can
/// never store a name that create or replace would reject.
pub fn apply_patch(current: &Customer, patch: CustomerDto) -> NewCustomer {
    NewCustomer {
        firstname: non_blank(patch.firstname).unwrap_or_else(|| current.firstname.clone()),
        lastname: non_blank(patch.lastname).unwrap_or_else(|| current.lastname.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryCustomerRepository;
    use chrono::Utc;
    use proptest::prelude::*;

    fn service() -> DefaultCustomerService {
        DefaultCustomerService::new(Arc::new(InMemoryCustomerRepository::new()))
    }

    fn stored(firstname: &str, lastname: &str) -> Customer {
        let now = Utc::now();
        Customer {
            id: 122,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_url() {
        let service = service();
        let mut dto = CustomerDto::new("Duglas", "Costa");
        dto.id = Some(99);
        dto.customer_url = Some("/elsewhere".to_string());

        let created = service.create_new_customer(dto).await.unwrap();
        assert_eq!(created.id, Some(1));
        assert_eq!(created.firstname.as_deref(), Some("Duglas"));
        assert_eq!(created.lastname.as_deref(), Some("Costa"));
        assert_eq!(created.customer_url.as_deref(), Some("/api/v1/customers/1"));
    }

    #[tokio::test]
    async fn test_create_requires_both_names() {
        let service = service();
        let err = service
            .create_new_customer(CustomerDto::with_firstname("Duglas"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::MissingField("lastname")));

        let err = service
            .create_new_customer(CustomerDto::new("  ", "Costa"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::MissingField("firstname")));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_overlong_names() {
        let err = service()
            .create_new_customer(CustomerDto::new("x".repeat(300), "Costa"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::Invalid(_)));
    }

    #[tokio::test]
    async fn test_customer_by_id_not_found() {
        let err = service().customer_by_id(8885).await.unwrap_err();
        assert!(matches!(err, CustomerError::ResourceNotFound { id: 8885 }));
        assert_eq!(err.to_string(), "Customer 8885 not found");
    }

    #[tokio::test]
    async fn test_all_customers_lists_everything() {
        let service = service();
        for (first, last) in [("Duglas", "Costa"), ("Roberto", "Badjo"), ("Ana", "Lima")] {
            service
                .create_new_customer(CustomerDto::new(first, last))
                .await
                .unwrap();
        }

        let list = service.all_customers().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.customers[1].customer_url.as_deref(), Some("/api/v1/customers/2"));
    }

    #[tokio::test]
    async fn test_save_replaces_all_fields() {
        let service = service();
        service
            .create_new_customer(CustomerDto::new("Roberto", "Badjo"))
            .await
            .unwrap();

        let saved = service
            .save_customer_by_dto(1, CustomerDto::new("Duglas", "Costa"))
            .await
            .unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.firstname.as_deref(), Some("Duglas"));
        assert_eq!(saved.lastname.as_deref(), Some("Costa"));
        assert_eq!(saved.customer_url.as_deref(), Some("/api/v1/customers/1"));
    }

    #[tokio::test]
    async fn test_save_missing_customer_does_not_create() {
        let service = service();
        let err = service
            .save_customer_by_dto(5, CustomerDto::new("Duglas", "Costa"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::ResourceNotFound { id: 5 }));
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_patch_keeps_unsent_fields() {
        let service = service();
        service
            .create_new_customer(CustomerDto::new("Roberto-original", "Badjo"))
            .await
            .unwrap();

        let patched = service
            .patch_customer(1, CustomerDto::with_firstname("Roberto"))
            .await
            .unwrap();
        assert_eq!(patched.firstname.as_deref(), Some("Roberto"));
        assert_eq!(patched.lastname.as_deref(), Some("Badjo"));
        assert_eq!(patched.customer_url.as_deref(), Some("/api/v1/customers/1"));

        let fetched = service.customer_by_id(1).await.unwrap();
        assert_eq!(fetched, patched);
    }

    #[tokio::test]
    async fn test_patch_missing_customer() {
        let err = service()
            .patch_customer(3, CustomerDto::with_lastname("Costa"))
            .await
            .unwrap_err();
        assert!(matches!(err, CustomerError::ResourceNotFound { id: 3 }));
    }

    #[tokio::test]
    async fn test_delete_then_lookup() {
        let service = service();
        service
            .create_new_customer(CustomerDto::new("Duglas", "Costa"))
            .await
            .unwrap();

        service.delete_customer(1).await.unwrap();
        assert!(matches!(
            service.customer_by_id(1).await.unwrap_err(),
            CustomerError::ResourceNotFound { id: 1 }
        ));
        assert!(matches!(
            service.delete_customer(1).await.unwrap_err(),
            CustomerError::ResourceNotFound { id: 1 }
        ));
    }

    #[test]
    fn test_apply_patch_ignores_empty_strings() {
        let current = stored("Roberto", "Badjo");
        let patch = CustomerDto {
            firstname: Some(String::new()),
            lastname: Some("Costa".to_string()),
            ..Default::default()
        };

        let merged = apply_patch(&current, patch);
        assert_eq!(merged.firstname, "Roberto");
        assert_eq!(merged.lastname, "Costa");
    }

    #[test]
    fn test_apply_patch_ignores_whitespace_only_values() {
        let current = stored("Roberto", "Badjo");
        let patch = CustomerDto::new("   ", "\t");

        let merged = apply_patch(&current, patch);
        assert_eq!(merged.firstname, "Roberto");
        assert_eq!(merged.lastname, "Badjo");
    }

    #[tokio::test]
    async fn test_patch_with_blank_name_keeps_stored_value() {
        let service = service();
        service
            .create_new_customer(CustomerDto::new("Roberto", "Badjo"))
            .await
            .unwrap();

        let patched = service
            .patch_customer(1, CustomerDto::with_firstname("   "))
            .await
            .unwrap();
        assert_eq!(patched.firstname.as_deref(), Some("Roberto"));
        assert_eq!(patched.lastname.as_deref(), Some("Badjo"));
    }

    proptest! {
        #[test]
        fn prop_apply_patch_field_wise(
            firstname in proptest::option::of(".{0,12}"),
            lastname in proptest::option::of(".{0,12}"),
        ) {
            let current = stored("Stored-first", "Stored-last");
            let patch = CustomerDto {
                firstname: firstname.clone(),
                lastname: lastname.clone(),
                ..Default::default()
            };

            let merged = apply_patch(&current, patch);

            let expected_first = firstname.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "Stored-first".to_string());
            let expected_last = lastname.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "Stored-last".to_string());
            prop_assert_eq!(merged.firstname, expected_first);
            prop_assert_eq!(merged.lastname, expected_last);
        }

        #[test]
        fn prop_blank_patch_is_identity(
            firstname in "[ \t\n]{0,6}",
            lastname in "[ \t\n]{0,6}",
        ) {
            let current = stored("Roberto", "Badjo");
            let patch = CustomerDto {
                firstname: Some(firstname),
                lastname: Some(lastname),
                ..Default::default()
            };

            let merged = apply_patch(&current, patch);
            prop_assert_eq!(merged.firstname, current.firstname);
            prop_assert_eq!(merged.lastname, current.lastname);
        }

        #[test]
        fn prop_empty_patch_is_identity(id in 1i64..10_000) {
            let mut current = stored("Roberto", "Badjo");
            current.id = id;
            let merged = apply_patch(&current, CustomerDto { id: Some(id + 1), ..Default::default() });
            prop_assert_eq!(merged.firstname, current.firstname);
            prop_assert_eq!(merged.lastname, current.lastname);
        }
    }
}
