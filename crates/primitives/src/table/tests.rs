use pretty_assertions::assert_eq;

use super::*;
use crate::core_types::core_types;

#[test]
fn core_universe_shape() {
	let (table, core) = core_types().unwrap();

	assert_eq!(table.lookup("Object"), Some(core.object));
	assert_eq!(table.superclass(core.object), None);
	assert_eq!(table.superclass(core.integer()), Some(core.number));
	assert_eq!(table.superclass(core.number), Some(core.object));
	assert_eq!(
		table.interfaces(core.number),
		&[core.serializable, core.comparable]
	);
	assert!(table.interfaces(core.integer()).is_empty());
	assert_eq!(
		table.kind(core.int_array),
		Some(TypeKind::Array {
			element: core.primitive(PrimitiveKind::Int)
		})
	);
	assert_eq!(table.name(core.int_array), "int[]");
	assert_eq!(table.name(core.object_array), "Object[]");
}

#[test]
fn unknown_keys_answer_empty() {
	let (table, _) = core_types().unwrap();
	let stray = TypeKey(10_000);

	assert_eq!(table.kind(stray), None);
	assert_eq!(table.name(stray), "<unknown>");
	assert!(table.interfaces(stray).is_empty());
	assert!(table.markers(stray).is_empty());
	assert_eq!(table.superclass(stray), None);
}

#[test]
fn marker_specialization_chain() {
	let mut b = TypeTable::builder();
	let entity = b.marker("Entity");
	let table_marker = b.marker("Table");
	let view = b.marker("View");
	b.specializes(table_marker, entity);
	b.specializes(view, table_marker);
	let table = b.build().unwrap();

	assert!(table.marker_is_a(view, entity));
	assert!(table.marker_is_a(view, view));
	assert!(table.marker_is_a(table_marker, entity));
	assert!(!table.marker_is_a(entity, table_marker));
	assert_eq!(table.lookup_marker("View"), Some(view));
	assert_eq!(table.marker_name(view), "View");
}

#[test]
fn rejects_duplicate_type_names() {
	let mut b = TypeTable::builder();
	b.class("A");
	b.interface("A");
	assert!(matches!(b.build(), Err(HierarchyError::DuplicateType(name)) if name == "A"));
}

#[test]
fn rejects_duplicate_marker_names() {
	let mut b = TypeTable::builder();
	b.marker("M");
	b.marker("M");
	assert!(matches!(b.build(), Err(HierarchyError::DuplicateMarker(_))));
}

#[test]
fn rejects_interface_as_superclass() {
	let mut b = TypeTable::builder();
	let a = b.class("A");
	let i = b.interface("I");
	b.extends(a, i);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::SuperclassNotClass { .. })
	));
}

#[test]
fn rejects_superclass_on_interface() {
	let mut b = TypeTable::builder();
	let a = b.class("A");
	let i = b.interface("I");
	b.extends(i, a);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::SuperclassOnNonClass { .. })
	));
}

#[test]
fn rejects_class_in_interface_list() {
	let mut b = TypeTable::builder();
	let a = b.class("A");
	let c = b.class("C");
	b.implements(a, &[c]);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::NotAnInterface { ty, listed }) if ty == "A" && listed == "C"
	));
}

#[test]
fn rejects_superclass_cycle() {
	let mut b = TypeTable::builder();
	let a = b.class("A");
	let c = b.class("C");
	b.extends(a, c).extends(c, a);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::SuperclassCycle { .. })
	));
}

#[test]
fn rejects_interface_cycle() {
	let mut b = TypeTable::builder();
	let i = b.interface("I");
	let j = b.interface("J");
	let k = b.interface("K");
	b.implements(i, &[j]).implements(j, &[k]).implements(k, &[i]);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::InterfaceCycle { .. })
	));
}

#[test]
fn accepts_interface_diamond() {
	let mut b = TypeTable::builder();
	let top = b.interface("Top");
	let left = b.interface("Left");
	let right = b.interface("Right");
	let bottom = b.class("Bottom");
	b.implements(left, &[top])
		.implements(right, &[top])
		.implements(bottom, &[left, right]);
	assert!(b.build().is_ok());
}

#[test]
fn rejects_marker_cycle() {
	let mut b = TypeTable::builder();
	let m = b.marker("M");
	let n = b.marker("N");
	b.specializes(m, n).specializes(n, m);
	assert!(matches!(b.build(), Err(HierarchyError::MarkerCycle { .. })));
}

#[test]
fn primitives_need_a_class_counterpart() {
	let mut b = TypeTable::builder();
	b.primitive("int", PrimitiveKind::Int);
	assert!(matches!(b.build(), Err(HierarchyError::MissingBoxed { .. })));

	let mut b = TypeTable::builder();
	let int = b.primitive("int", PrimitiveKind::Int);
	let i = b.interface("I");
	b.boxes_to(int, i);
	assert!(matches!(b.build(), Err(HierarchyError::BoxedNotClass { .. })));

	let mut b = TypeTable::builder();
	let a = b.class("A");
	let c = b.class("C");
	b.boxes_to(a, c);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::BoxedOnNonPrimitive { .. })
	));
}

#[test]
fn markers_only_on_reference_types() {
	let mut b = TypeTable::builder();
	let object = b.class("Object");
	let array = b.array(object);
	let m = b.marker("M");
	b.mark(array, &[m]);
	assert!(matches!(
		b.build(),
		Err(HierarchyError::MarkersOnNonReference { .. })
	));
}

#[test]
fn rejects_foreign_keys() {
	let mut b = TypeTable::builder();
	let a = b.class("A");
	b.extends(a, TypeKey(42));
	assert!(matches!(
		b.build(),
		Err(HierarchyError::DanglingType { key: TypeKey(42), .. })
	));
}
