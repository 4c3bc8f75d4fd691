//! Type descriptors and hierarchy tables resolved against by `typeassoc-registry`.

/// Boxing of primitive descriptors.
pub mod boxing;
/// Seed universe of common reference and primitive types.
pub mod core_types;
/// Hierarchy construction errors.
pub mod error;
/// The introspection capability trait.
pub mod hierarchy;
/// Dense type and marker identities.
pub mod key;
/// Type and primitive kinds.
pub mod kind;
/// Declarative TOML hierarchy descriptions.
pub mod spec;
/// Explicit parent-pointer table.
pub mod table;

pub use boxing::box_type;
pub use core_types::{CoreTypes, core_types, declare_core_types};
pub use error::HierarchyError;
pub use hierarchy::TypeHierarchy;
pub use key::{MarkerKey, TypeKey};
pub use kind::{PrimitiveKind, TypeKind};
pub use spec::{DeclaredKind, HierarchySpec, MarkerSpec, TypeSpec};
pub use table::{MarkerDescriptor, TypeDescriptor, TypeTable, TypeTableBuilder};
