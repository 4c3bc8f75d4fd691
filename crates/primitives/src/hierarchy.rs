//! Introspection capability consumed by the registry.

use crate::key::{MarkerKey, TypeKey};
use crate::kind::TypeKind;

/// Runtime view of a type universe.
///
/// Implementations answer structural questions about descriptors: their kind,
/// their direct superclass, the interfaces they directly implement (or, for an
/// interface, directly extend), and the markers directly attached to them.
/// Nothing here is transitive; callers walk the graph themselves.
///
/// [`TypeTable`](crate::TypeTable) is the explicit, built-at-startup
/// implementation. Hosts with their own descriptor model can implement the
/// trait directly; they must keep superclass chains, interface graphs and
/// marker parent chains acyclic.
pub trait TypeHierarchy {
	/// Kind of `ty`, or `None` when the key does not belong to this hierarchy.
	fn kind(&self, ty: TypeKey) -> Option<TypeKind>;

	/// Human-readable name, used in logs and errors.
	fn name(&self, ty: TypeKey) -> &str;

	/// Direct superclass. `None` for the root, interfaces, arrays and primitives.
	fn superclass(&self, ty: TypeKey) -> Option<TypeKey>;

	/// Interfaces directly implemented by a class or extended by an interface,
	/// in declaration order.
	fn interfaces(&self, ty: TypeKey) -> &[TypeKey];

	/// Markers attached directly to `ty`. Markers on ancestors are not included.
	fn markers(&self, ty: TypeKey) -> &[MarkerKey];

	/// Human-readable marker name.
	fn marker_name(&self, marker: MarkerKey) -> &str;

	/// The marker `marker` specializes, if any.
	fn marker_parent(&self, marker: MarkerKey) -> Option<MarkerKey>;

	/// Boxed reference counterpart of a primitive descriptor.
	fn boxed(&self, ty: TypeKey) -> Option<TypeKey>;

	/// Returns true when `marker` is `target` or specializes it, directly or
	/// through a chain of parents.
	fn marker_is_a(&self, marker: MarkerKey, target: MarkerKey) -> bool {
		let mut cursor = Some(marker);
		while let Some(m) = cursor {
			if m == target {
				return true;
			}
			cursor = self.marker_parent(m);
		}
		false
	}
}
