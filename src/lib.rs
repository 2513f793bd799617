//! Showbook - customers, shows and venues with enrollment and hosting
//! relations over SQLite.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Config;
pub use db::{init_pool, run_migrations};
pub use error::{ServiceError, ValidationError};
pub use models::{Avanue, Customer, Message, Show};
pub use routes::create_router;
pub use routes::error::ApiError;
pub use services::{AvanueService, CustomerService, RelationManager, ShowService};
pub use state::AppState;
pub use store::{Enrollments, Record, Store};
pub use validation::Validator;
