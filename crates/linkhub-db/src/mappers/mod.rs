//! Model to entity mappers
//!
//! Rows whose text columns fail to parse into domain enums surface as
//! `DomainError::InternalError`; the schema's CHECK constraints make that a
//! corruption case.

mod link;
mod user;
mod view;
