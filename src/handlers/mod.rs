pub mod customers;
pub mod extractors;
pub mod health;
pub mod response;

// Re-export commonly used types
pub use customers::v1_customers_routes;
pub use extractors::ValidatedId;
pub use response::{Created, EmptyOk};
