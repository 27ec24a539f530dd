//! Outbound adapters implementing the domain storage ports.
//!
//! - **memory**: process-local maps, lost on restart
//! - **persistence**: SQLite via Diesel
//!
//! Adapters translate between domain types and their storage representation
//! and hold no business rules beyond the ordering critical section.

pub mod memory;
pub mod persistence;
