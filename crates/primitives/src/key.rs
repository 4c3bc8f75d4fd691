//! Dense identities for type and marker descriptors.

/// Identity of a class, interface, array or primitive descriptor.
///
/// Keys are dense indices into the [`TypeHierarchy`](crate::TypeHierarchy)
/// that produced them and are only meaningful relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey(pub u32);

impl TypeKey {
	pub const INVALID: TypeKey = TypeKey(u32::MAX);

	#[inline]
	pub fn is_valid(self) -> bool {
		self != Self::INVALID
	}

	#[inline]
	pub fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

impl std::fmt::Display for TypeKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if *self == Self::INVALID {
			write!(f, "TypeKey(INVALID)")
		} else {
			write!(f, "TypeKey({})", self.0)
		}
	}
}

/// Identity of a marker descriptor (the annotation-like tags attached to types).
///
/// Markers live in their own namespace: a `MarkerKey` never compares equal to
/// a [`TypeKey`], even when the indices coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerKey(pub u32);

impl MarkerKey {
	pub const INVALID: MarkerKey = MarkerKey(u32::MAX);

	#[inline]
	pub fn is_valid(self) -> bool {
		self != Self::INVALID
	}

	#[inline]
	pub fn as_u32(self) -> u32 {
		self.0
	}

	#[inline]
	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

impl std::fmt::Display for MarkerKey {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if *self == Self::INVALID {
			write!(f, "MarkerKey(INVALID)")
		} else {
			write!(f, "MarkerKey({})", self.0)
		}
	}
}
