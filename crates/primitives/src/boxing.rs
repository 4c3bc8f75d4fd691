use crate::hierarchy::TypeHierarchy;
use crate::key::TypeKey;
use crate::kind::TypeKind;

/// Maps a primitive descriptor to its boxed reference descriptor.
///
/// Every other kind, including keys the hierarchy does not know, is returned
/// unchanged. The `void` primitive boxes to its own singleton counterpart like
/// any other primitive.
pub fn box_type<H: TypeHierarchy + ?Sized>(hierarchy: &H, ty: TypeKey) -> TypeKey {
	match hierarchy.kind(ty) {
		Some(TypeKind::Primitive(_)) => hierarchy.boxed(ty).unwrap_or(ty),
		_ => ty,
	}
}
