//! Type-to-value registry.
//!
//! A [`TypeRegistry`] associates values with types in three ways and resolves
//! a query type against them in priority order:
//!
//! 1. [`TypeRegistry::register_exact`]: the type itself, nothing else.
//! 2. [`TypeRegistry::register_marker`]: any type carrying the marker (or a
//!    specialization of it) directly.
//! 3. [`TypeRegistry::register_assignable`]: the type and everything that
//!    extends or implements it.
//!
//! Types, markers and their relations come from a
//! [`TypeHierarchy`](typeassoc_primitives::TypeHierarchy), usually a
//! [`TypeTable`](typeassoc_primitives::TypeTable) built at startup.

pub mod config;
pub mod error;
pub mod global;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{InvalidQueryReason, RegistryError, StaticRegistryError};
pub use global::StaticRegistry;
pub use registry::{MatchSource, Resolution, TypeRegistry};
pub use typeassoc_primitives as primitives;
