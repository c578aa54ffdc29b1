//! Account domain - identity records and phone bindings
//!
//! Responsibilities:
//! - Account / phone-binding / user-info rows
//! - Phone -> account resolution with lazy, transactional account creation

pub mod models;
pub mod resolver;

pub use resolver::resolve_or_create_by_phone;
