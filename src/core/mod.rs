//! Core types and functionality for samcheck
//!
//! This module forms the foundation of samcheck's type system: the error
//! taxonomy shared by every stage of the check pipeline and the closed set of
//! resource kinds the graph can hold.
//!
//! ## `error` - Error Handling
//! - [`CheckError`] - Enumerated error types covering all expected failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`NestedStackContext`] - Context marking errors from nested stack templates
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## `resource` - Resource Kinds
//! - [`ResourceKind`] - Enumeration of resource kinds tracked by the graph
//! - CloudFormation/SAM resource type name constants

pub mod error;
pub mod resource;

pub use error::{CheckError, ErrorContext, NestedStackContext, user_friendly_error};
pub use resource::ResourceKind;
