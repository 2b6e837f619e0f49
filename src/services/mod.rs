// Business logic services
// Customer lookups and mutations behind the HTTP layer.

pub mod customer_service;

pub use customer_service::{CustomerError, CustomerService, DefaultCustomerService};
