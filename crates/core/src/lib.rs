//! Core types for the report filter extraction engine
//!
//! This crate provides the types shared by the parser, its configuration and
//! its callers:
//! - Canonical filter values (`Status`, `RiskLevel`, `AuditYear`)
//! - The filter set and caller-supplied vocabulary (`ParsedFilters`, `AvailableOptions`)
//! - The per-turn outcome (`ParseResult`)
//! - Error types

pub mod error;
pub mod filters;
pub mod labels;
pub mod result;

pub use error::{Error, Result};
pub use filters::{AvailableOptions, FilterField, ParsedFilters};
pub use labels::{AuditYear, RiskLevel, Status};
pub use result::{ParseResult, RequestKind};
