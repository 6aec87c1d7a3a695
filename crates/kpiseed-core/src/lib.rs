//! kpiseed Core Types and Definitions
//!
//! This crate provides the foundational types shared by every kpiseed crate:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Records**: Objects, attributes, literals and relationships of an
//!   object diagram ([`record`] module)

pub mod identifier;
pub mod record;
