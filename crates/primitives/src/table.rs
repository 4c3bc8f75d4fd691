//! Explicit parent-pointer type table.
//!
//! # Purpose
//!
//! Provide a [`TypeHierarchy`] for hosts without runtime reflection. The table
//! is assembled once at startup through [`TypeTableBuilder`], validated, and
//! then shared read-only (typically behind an `Arc`) by every registry that
//! resolves against it.
//!
//! # Invariants
//!
//! * Type names and marker names are unique within a table.
//! * Only classes have a superclass, and it is always a class.
//! * Superclass chains, interface extension graphs and marker parent chains
//!   are acyclic.
//! * Every primitive has a boxed counterpart, and it is a class.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{HierarchyError, Result};
use crate::hierarchy::TypeHierarchy;
use crate::key::{MarkerKey, TypeKey};
use crate::kind::{PrimitiveKind, TypeKind};

/// One type descriptor.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
	pub name: Box<str>,
	pub kind: TypeKind,
	pub superclass: Option<TypeKey>,
	pub interfaces: SmallVec<[TypeKey; 4]>,
	pub markers: SmallVec<[MarkerKey; 2]>,
	pub boxed: Option<TypeKey>,
}

/// One marker descriptor.
#[derive(Debug, Clone)]
pub struct MarkerDescriptor {
	pub name: Box<str>,
	pub parent: Option<MarkerKey>,
}

/// Validated, immutable type universe.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
	types: Vec<TypeDescriptor>,
	markers: Vec<MarkerDescriptor>,
	by_name: FxHashMap<Box<str>, TypeKey>,
	markers_by_name: FxHashMap<Box<str>, MarkerKey>,
}

impl TypeTable {
	pub fn builder() -> TypeTableBuilder {
		TypeTableBuilder::new()
	}

	/// Looks up a type by name.
	pub fn lookup(&self, name: &str) -> Option<TypeKey> {
		self.by_name.get(name).copied()
	}

	/// Looks up a marker by name.
	pub fn lookup_marker(&self, name: &str) -> Option<MarkerKey> {
		self.markers_by_name.get(name).copied()
	}

	pub fn descriptor(&self, ty: TypeKey) -> Option<&TypeDescriptor> {
		self.types.get(ty.index())
	}

	pub fn marker_descriptor(&self, marker: MarkerKey) -> Option<&MarkerDescriptor> {
		self.markers.get(marker.index())
	}

	/// Number of type descriptors.
	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	pub fn marker_count(&self) -> usize {
		self.markers.len()
	}

	/// Iterates all type descriptors in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (TypeKey, &TypeDescriptor)> + '_ {
		self.types
			.iter()
			.enumerate()
			.map(|(i, d)| (TypeKey(i as u32), d))
	}
}

impl TypeHierarchy for TypeTable {
	fn kind(&self, ty: TypeKey) -> Option<TypeKind> {
		self.descriptor(ty).map(|d| d.kind)
	}

	fn name(&self, ty: TypeKey) -> &str {
		self.descriptor(ty).map_or("<unknown>", |d| &*d.name)
	}

	fn superclass(&self, ty: TypeKey) -> Option<TypeKey> {
		self.descriptor(ty).and_then(|d| d.superclass)
	}

	fn interfaces(&self, ty: TypeKey) -> &[TypeKey] {
		self.descriptor(ty)
			.map_or(&[][..], |d| d.interfaces.as_slice())
	}

	fn markers(&self, ty: TypeKey) -> &[MarkerKey] {
		self.descriptor(ty)
			.map_or(&[][..], |d| d.markers.as_slice())
	}

	fn marker_name(&self, marker: MarkerKey) -> &str {
		self.marker_descriptor(marker)
			.map_or("<unknown>", |d| &*d.name)
	}

	fn marker_parent(&self, marker: MarkerKey) -> Option<MarkerKey> {
		self.marker_descriptor(marker).and_then(|d| d.parent)
	}

	fn boxed(&self, ty: TypeKey) -> Option<TypeKey> {
		self.descriptor(ty).and_then(|d| d.boxed)
	}
}

/// Incremental table assembly.
///
/// Declarations allocate keys immediately; relations may reference any key
/// already handed out, so forward references are expressed by declaring first
/// and linking afterwards. All structural checks run in [`Self::build`].
#[derive(Debug, Default)]
pub struct TypeTableBuilder {
	types: Vec<TypeDescriptor>,
	markers: Vec<MarkerDescriptor>,
}

impl TypeTableBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	fn declare(&mut self, name: impl Into<Box<str>>, kind: TypeKind) -> TypeKey {
		let key = TypeKey(self.types.len() as u32);
		self.types.push(TypeDescriptor {
			name: name.into(),
			kind,
			superclass: None,
			interfaces: SmallVec::new(),
			markers: SmallVec::new(),
			boxed: None,
		});
		key
	}

	pub fn class(&mut self, name: impl Into<Box<str>>) -> TypeKey {
		self.declare(name, TypeKind::Class)
	}

	pub fn interface(&mut self, name: impl Into<Box<str>>) -> TypeKey {
		self.declare(name, TypeKind::Interface)
	}

	pub fn primitive(&mut self, name: impl Into<Box<str>>, primitive: PrimitiveKind) -> TypeKey {
		self.declare(name, TypeKind::Primitive(primitive))
	}

	/// Declares an array of `element`, named `<element>[]`.
	pub fn array(&mut self, element: TypeKey) -> TypeKey {
		let name = match self.types.get(element.index()) {
			Some(d) => format!("{}[]", d.name),
			None => format!("{element}[]"),
		};
		self.declare(name, TypeKind::Array { element })
	}

	/// Declares an array under an explicit name.
	pub fn named_array(&mut self, name: impl Into<Box<str>>, element: TypeKey) -> TypeKey {
		self.declare(name, TypeKind::Array { element })
	}

	pub fn marker(&mut self, name: impl Into<Box<str>>) -> MarkerKey {
		let key = MarkerKey(self.markers.len() as u32);
		self.markers.push(MarkerDescriptor {
			name: name.into(),
			parent: None,
		});
		key
	}

	/// Finds a type declared so far by name.
	pub fn lookup(&self, name: &str) -> Option<TypeKey> {
		self.types
			.iter()
			.position(|d| &*d.name == name)
			.map(|i| TypeKey(i as u32))
	}

	/// Finds a marker declared so far by name.
	pub fn lookup_marker(&self, name: &str) -> Option<MarkerKey> {
		self.markers
			.iter()
			.position(|d| &*d.name == name)
			.map(|i| MarkerKey(i as u32))
	}

	pub(crate) fn set_element(&mut self, array: TypeKey, element: TypeKey) -> &mut Self {
		if let Some(d) = self.types.get_mut(array.index())
			&& let TypeKind::Array { element: slot } = &mut d.kind
		{
			*slot = element;
		}
		self
	}

	pub fn extends(&mut self, ty: TypeKey, superclass: TypeKey) -> &mut Self {
		if let Some(d) = self.types.get_mut(ty.index()) {
			d.superclass = Some(superclass);
		}
		self
	}

	/// Appends to the direct interfaces of `ty`, preserving order.
	pub fn implements(&mut self, ty: TypeKey, interfaces: &[TypeKey]) -> &mut Self {
		if let Some(d) = self.types.get_mut(ty.index()) {
			d.interfaces.extend_from_slice(interfaces);
		}
		self
	}

	pub fn mark(&mut self, ty: TypeKey, markers: &[MarkerKey]) -> &mut Self {
		if let Some(d) = self.types.get_mut(ty.index()) {
			d.markers.extend_from_slice(markers);
		}
		self
	}

	pub fn specializes(&mut self, marker: MarkerKey, parent: MarkerKey) -> &mut Self {
		if let Some(d) = self.markers.get_mut(marker.index()) {
			d.parent = Some(parent);
		}
		self
	}

	pub fn boxes_to(&mut self, primitive: TypeKey, boxed: TypeKey) -> &mut Self {
		if let Some(d) = self.types.get_mut(primitive.index()) {
			d.boxed = Some(boxed);
		}
		self
	}

	/// Validates and freezes the table.
	pub fn build(self) -> Result<TypeTable> {
		let mut by_name = FxHashMap::default();
		for (i, d) in self.types.iter().enumerate() {
			if by_name.insert(d.name.clone(), TypeKey(i as u32)).is_some() {
				return Err(HierarchyError::DuplicateType(d.name.to_string()));
			}
		}
		let mut markers_by_name = FxHashMap::default();
		for (i, m) in self.markers.iter().enumerate() {
			if markers_by_name
				.insert(m.name.clone(), MarkerKey(i as u32))
				.is_some()
			{
				return Err(HierarchyError::DuplicateMarker(m.name.to_string()));
			}
		}

		let table = TypeTable {
			types: self.types,
			markers: self.markers,
			by_name,
			markers_by_name,
		};
		validate::references(&table)?;
		validate::shapes(&table)?;
		validate::acyclic(&table)?;

		tracing::debug!(
			types = table.types.len(),
			markers = table.markers.len(),
			"type table built"
		);
		Ok(table)
	}
}

mod validate {
	use super::*;

	fn owner(table: &TypeTable, ty: TypeKey) -> String {
		table.name(ty).to_string()
	}

	pub(super) fn references(table: &TypeTable) -> Result<()> {
		let in_range = |k: TypeKey| k.index() < table.types.len();
		for (ty, d) in table.iter() {
			let linked = d
				.superclass
				.iter()
				.chain(d.interfaces.iter())
				.chain(d.boxed.iter())
				.copied()
				.chain(match d.kind {
					TypeKind::Array { element } => Some(element),
					_ => None,
				});
			for key in linked {
				if !in_range(key) {
					return Err(HierarchyError::DanglingType {
						owner: owner(table, ty),
						key,
					});
				}
			}
			for &m in &d.markers {
				if m.index() >= table.markers.len() {
					return Err(HierarchyError::DanglingMarker {
						owner: owner(table, ty),
						key: m,
					});
				}
			}
		}
		for m in &table.markers {
			if let Some(parent) = m.parent
				&& parent.index() >= table.markers.len()
			{
				return Err(HierarchyError::DanglingMarker {
					owner: m.name.to_string(),
					key: parent,
				});
			}
		}
		Ok(())
	}

	pub(super) fn shapes(table: &TypeTable) -> Result<()> {
		for (ty, d) in table.iter() {
			if let Some(superclass) = d.superclass {
				if d.kind != TypeKind::Class {
					return Err(HierarchyError::SuperclassOnNonClass {
						ty: owner(table, ty),
					});
				}
				if table.kind(superclass) != Some(TypeKind::Class) {
					return Err(HierarchyError::SuperclassNotClass {
						ty: owner(table, ty),
						superclass: owner(table, superclass),
					});
				}
			}
			if !d.interfaces.is_empty() && !d.kind.is_reference() {
				return Err(HierarchyError::InterfacesOnNonReference {
					ty: owner(table, ty),
				});
			}
			if let Some(&listed) = d
				.interfaces
				.iter()
				.find(|&&i| table.kind(i) != Some(TypeKind::Interface))
			{
				return Err(HierarchyError::NotAnInterface {
					ty: owner(table, ty),
					listed: owner(table, listed),
				});
			}
			if !d.markers.is_empty() && !d.kind.is_reference() {
				return Err(HierarchyError::MarkersOnNonReference {
					ty: owner(table, ty),
				});
			}
			match (d.kind, d.boxed) {
				(TypeKind::Primitive(_), None) => {
					return Err(HierarchyError::MissingBoxed {
						ty: owner(table, ty),
					});
				}
				(TypeKind::Primitive(_), Some(boxed)) if table.kind(boxed) != Some(TypeKind::Class) => {
					return Err(HierarchyError::BoxedNotClass {
						ty: owner(table, ty),
						boxed: owner(table, boxed),
					});
				}
				(TypeKind::Primitive(_), Some(_)) | (_, None) => {}
				(_, Some(_)) => {
					return Err(HierarchyError::BoxedOnNonPrimitive {
						ty: owner(table, ty),
					});
				}
			}
		}
		Ok(())
	}

	pub(super) fn acyclic(table: &TypeTable) -> Result<()> {
		let limit = table.types.len();
		for (ty, _) in table.iter() {
			let mut cursor = table.superclass(ty);
			let mut steps = 0;
			while let Some(next) = cursor {
				steps += 1;
				if next == ty || steps > limit {
					return Err(HierarchyError::SuperclassCycle {
						ty: owner(table, ty),
					});
				}
				cursor = table.superclass(next);
			}
		}

		#[derive(Clone, Copy, PartialEq)]
		enum Mark {
			Unvisited,
			Active,
			Done,
		}
		let mut marks = vec![Mark::Unvisited; limit];
		for (root, _) in table.iter() {
			if marks[root.index()] != Mark::Unvisited {
				continue;
			}
			// Iterative DFS; the second tuple field is the next child to visit.
			let mut stack: Vec<(TypeKey, usize)> = vec![(root, 0)];
			marks[root.index()] = Mark::Active;
			while let Some(top) = stack.last_mut() {
				let ty = top.0;
				let next = table.interfaces(ty).get(top.1).copied();
				top.1 += 1;
				if let Some(next) = next {
					match marks[next.index()] {
						Mark::Active => {
							return Err(HierarchyError::InterfaceCycle {
								ty: owner(table, next),
							});
						}
						Mark::Unvisited => {
							marks[next.index()] = Mark::Active;
							stack.push((next, 0));
						}
						Mark::Done => {}
					}
				} else {
					marks[ty.index()] = Mark::Done;
					stack.pop();
				}
			}
		}

		let marker_limit = table.markers.len();
		for (i, m) in table.markers.iter().enumerate() {
			let start = MarkerKey(i as u32);
			let mut cursor = m.parent;
			let mut steps = 0;
			while let Some(next) = cursor {
				steps += 1;
				if next == start || steps > marker_limit {
					return Err(HierarchyError::MarkerCycle {
						marker: m.name.to_string(),
					});
				}
				cursor = table.marker_parent(next);
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
