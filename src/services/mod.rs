//! Lifecycle and relationship components.
//!
//! Each component borrows the connection of one open transaction. The
//! caller commits when an operation returns `Ok` and drops the transaction
//! otherwise.

pub mod avanue;
pub mod customer;
pub mod relations;
pub mod show;

pub use avanue::AvanueService;
pub use customer::CustomerService;
pub use relations::RelationManager;
pub use show::ShowService;
