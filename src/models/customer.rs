use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::constants::API_URL_V1;

/// Persisted customer row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Customer {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values written on insert and full update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub firstname: String,
    pub lastname: String,
}

/// Wire representation of a customer.
///
/// Every field is optional so the same shape serves create, full update and
/// partial update bodies. `id` and `customerUrl` are server-owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub firstname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub lastname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/api/v1/customers/1")]
    pub customer_url: Option<String>,
}

impl CustomerDto {
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: Some(firstname.into()),
            lastname: Some(lastname.into()),
            ..Default::default()
        }
    }

    /// Patch body carrying only a first name
    pub fn with_firstname(firstname: impl Into<String>) -> Self {
        Self {
            firstname: Some(firstname.into()),
            ..Default::default()
        }
    }

    /// Patch body carrying only a last name
    pub fn with_lastname(lastname: impl Into<String>) -> Self {
        Self {
            lastname: Some(lastname.into()),
            ..Default::default()
        }
    }
}

impl From<&Customer> for CustomerDto {
    fn from(customer: &Customer) -> Self {
        Self {
            id: Some(customer.id),
            firstname: Some(customer.firstname.clone()),
            lastname: Some(customer.lastname.clone()),
            customer_url: Some(customer_url(customer.id)),
        }
    }
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        let customer_url = customer_url(customer.id);
        Self {
            id: Some(customer.id),
            firstname: Some(customer.firstname),
            lastname: Some(customer.lastname),
            customer_url: Some(customer_url),
        }
    }
}

/// Response envelope for the collection endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerListDto {
    pub customers: Vec<CustomerDto>,
}

impl CustomerListDto {
    pub fn new(customers: Vec<CustomerDto>) -> Self {
        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl FromIterator<CustomerDto> for CustomerListDto {
    fn from_iter<I: IntoIterator<Item = CustomerDto>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Canonical resource URL of a stored customer
pub fn customer_url(id: i64) -> String {
    format!("{}{}", API_URL_V1, id)
}
