use typeassoc_primitives::TypeKey;

/// Why a query key cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidQueryReason {
	/// Arrays carry no markers and have no class hierarchy to walk.
	Array,
	/// Primitive kinds are not reference types.
	Primitive,
	/// The key does not belong to the registry's hierarchy.
	Unknown,
}

impl std::fmt::Display for InvalidQueryReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Array => write!(f, "array types cannot be resolved"),
			Self::Primitive => write!(f, "primitive types cannot be resolved"),
			Self::Unknown => write!(f, "type is not part of the hierarchy"),
		}
	}
}

/// Errors returned by [`TypeRegistry`](crate::TypeRegistry) queries.
///
/// A query that finds no association is not an error; it resolves to `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("invalid query for {name} ({ty}): {reason}")]
	InvalidQuery {
		ty: TypeKey,
		name: String,
		reason: InvalidQueryReason,
	},
}

impl RegistryError {
	pub fn reason(&self) -> InvalidQueryReason {
		match self {
			Self::InvalidQuery { reason, .. } => *reason,
		}
	}
}

/// Errors from process-wide registry setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaticRegistryError {
	#[error("static registry {label:?} is already initialized")]
	AlreadyInitialized { label: &'static str },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
