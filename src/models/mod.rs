// Data models and DTOs
// Database rows and API request/response models.

pub mod customer;

pub use customer::{customer_url, Customer, CustomerDto, CustomerListDto, NewCustomer};
