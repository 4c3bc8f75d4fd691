use serde::Deserialize;

use crate::key::TypeKey;

/// Shape of a type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// A concrete or abstract class with at most one superclass.
	Class,
	/// An interface. Interfaces have no superclass; they extend other interfaces.
	Interface,
	/// An array of `element`.
	Array { element: TypeKey },
	/// A non-reference value kind.
	Primitive(PrimitiveKind),
}

impl TypeKind {
	/// Returns true for kinds that carry a class/interface hierarchy.
	pub const fn is_reference(self) -> bool {
		matches!(self, Self::Class | Self::Interface)
	}

	pub const fn is_array(self) -> bool {
		matches!(self, Self::Array { .. })
	}

	pub const fn is_primitive(self) -> bool {
		matches!(self, Self::Primitive(_))
	}

	pub const fn as_primitive(self) -> Option<PrimitiveKind> {
		match self {
			Self::Primitive(p) => Some(p),
			_ => None,
		}
	}
}

impl std::fmt::Display for TypeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Class => write!(f, "class"),
			Self::Interface => write!(f, "interface"),
			Self::Array { .. } => write!(f, "array"),
			Self::Primitive(p) => write!(f, "primitive {p}"),
		}
	}
}

/// The primitive value kinds, including the "no value" kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
	Boolean,
	Byte,
	Char,
	Short,
	Int,
	Long,
	Float,
	Double,
	Void,
}

impl PrimitiveKind {
	pub const ALL: [PrimitiveKind; 9] = [
		Self::Boolean,
		Self::Byte,
		Self::Char,
		Self::Short,
		Self::Int,
		Self::Long,
		Self::Float,
		Self::Double,
		Self::Void,
	];

	/// Source-level name of the primitive.
	pub const fn name(self) -> &'static str {
		match self {
			Self::Boolean => "boolean",
			Self::Byte => "byte",
			Self::Char => "char",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Float => "float",
			Self::Double => "double",
			Self::Void => "void",
		}
	}

	/// Canonical name of the boxed reference type.
	pub const fn boxed_name(self) -> &'static str {
		match self {
			Self::Boolean => "Boolean",
			Self::Byte => "Byte",
			Self::Char => "Character",
			Self::Short => "Short",
			Self::Int => "Integer",
			Self::Long => "Long",
			Self::Float => "Float",
			Self::Double => "Double",
			Self::Void => "Void",
		}
	}

	/// Whether the boxed counterpart is a numeric reference type.
	pub const fn is_numeric(self) -> bool {
		matches!(
			self,
			Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
		)
	}
}

impl std::fmt::Display for PrimitiveKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}
