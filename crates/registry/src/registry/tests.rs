use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use typeassoc_primitives::{CoreTypes, PrimitiveKind, TypeTable, declare_core_types};

use super::*;

struct Zoo {
	table: Arc<TypeTable>,
	core: CoreTypes,
	entity: MarkerKey,
	persistent: MarkerKey,
	audited: MarkerKey,
	named: TypeKey,
	pet: TypeKey,
	swimmer: TypeKey,
	animal: TypeKey,
	mammal: TypeKey,
	dog: TypeKey,
	puppy: TypeKey,
	otter: TypeKey,
	record: TypeKey,
	ledger: TypeKey,
}

/// ```text
/// Object
/// └── Animal
///     └── Mammal
///         ├── Dog : Pet (: Named)
///         │   └── Puppy
///         └── Otter : Named, Swimmer
/// Object
/// └── Record     @Persistent (specializes @Entity), @Audited
///     └── Ledger
/// ```
#[fixture]
fn zoo() -> Zoo {
	let mut b = TypeTable::builder();
	let core = declare_core_types(&mut b);

	let entity = b.marker("Entity");
	let persistent = b.marker("Persistent");
	let audited = b.marker("Audited");
	b.specializes(persistent, entity);

	let named = b.interface("Named");
	let pet = b.interface("Pet");
	let swimmer = b.interface("Swimmer");
	b.implements(pet, &[named]);

	let animal = b.class("Animal");
	let mammal = b.class("Mammal");
	let dog = b.class("Dog");
	let puppy = b.class("Puppy");
	let otter = b.class("Otter");
	b.extends(animal, core.object)
		.extends(mammal, animal)
		.extends(dog, mammal)
		.extends(puppy, dog)
		.extends(otter, mammal)
		.implements(dog, &[pet])
		.implements(otter, &[named, swimmer]);

	let record = b.class("Record");
	let ledger = b.class("Ledger");
	b.extends(record, core.object)
		.extends(ledger, record)
		.mark(record, &[persistent, audited]);

	Zoo {
		table: Arc::new(b.build().unwrap()),
		core,
		entity,
		persistent,
		audited,
		named,
		pet,
		swimmer,
		animal,
		mammal,
		dog,
		puppy,
		otter,
		record,
		ledger,
	}
}

fn registry(zoo: &Zoo) -> TypeRegistry<&'static str> {
	TypeRegistry::new(Arc::clone(&zoo.table))
}

#[rstest]
fn empty_registry_resolves_nothing(zoo: Zoo) {
	let reg = registry(&zoo);
	assert_eq!(reg.resolve(zoo.dog), Ok(None));
	assert_eq!(reg.resolve(zoo.core.object), Ok(None));
	assert!(reg.is_empty());
}

#[rstest]
fn exact_matches_only_the_type_itself(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_exact(zoo.dog, "dog");

	assert_eq!(reg.resolve(zoo.dog), Ok(Some("dog")));
	assert_eq!(reg.resolve(zoo.dog), Ok(Some("dog")));
	assert_eq!(reg.resolve(zoo.puppy), Ok(None));
	assert_eq!(reg.resolve(zoo.mammal), Ok(None));
}

#[rstest]
fn exact_beats_marker_and_assignable(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.record, "assignable");
	reg.register_marker(zoo.persistent, "marker");
	reg.register_exact(zoo.record, "exact");

	assert_eq!(reg.resolve(zoo.record), Ok(Some("exact")));
	assert_eq!(
		reg.explain(zoo.record).unwrap().map(|r| r.source),
		Some(MatchSource::Exact)
	);
}

#[rstest]
fn marker_beats_assignable(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.record, "assignable");
	reg.register_marker(zoo.audited, "audited");

	assert_eq!(reg.resolve(zoo.record), Ok(Some("audited")));
	assert_eq!(
		reg.explain(zoo.record).unwrap().map(|r| r.source),
		Some(MatchSource::Marker {
			marker: zoo.audited
		})
	);
}

#[rstest]
fn specialized_marker_matches_registered_parent(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_marker(zoo.entity, "entity");

	assert_eq!(reg.resolve(zoo.record), Ok(Some("entity")));
}

#[rstest]
fn markers_are_not_inherited(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_marker(zoo.persistent, "persistent");

	assert_eq!(reg.resolve(zoo.record), Ok(Some("persistent")));
	assert_eq!(reg.resolve(zoo.ledger), Ok(None));
}

#[rstest]
fn marker_scan_follows_registration_order(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_marker(zoo.audited, "audited");
	reg.register_marker(zoo.entity, "entity");
	assert_eq!(reg.resolve(zoo.record), Ok(Some("audited")));

	let reg = registry(&zoo);
	reg.register_marker(zoo.entity, "entity");
	reg.register_marker(zoo.audited, "audited");
	assert_eq!(reg.resolve(zoo.record), Ok(Some("entity")));

	// Overwriting keeps the original scan position.
	reg.register_marker(zoo.audited, "audited again");
	reg.register_marker(zoo.entity, "entity again");
	assert_eq!(reg.resolve(zoo.record), Ok(Some("entity again")));
}

#[rstest]
fn nearer_ancestor_wins(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.animal, "animal");
	reg.register_assignable(zoo.mammal, "mammal");

	assert_eq!(reg.resolve(zoo.puppy), Ok(Some("mammal")));
	assert_eq!(reg.resolve(zoo.animal), Ok(Some("animal")));
	assert_eq!(reg.resolve(zoo.record), Ok(None));
}

#[rstest]
fn interface_of_a_level_beats_its_superclass(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.mammal, "mammal");
	reg.register_assignable(zoo.pet, "pet");

	assert_eq!(reg.resolve(zoo.dog), Ok(Some("pet")));
	assert_eq!(reg.resolve(zoo.otter), Ok(Some("mammal")));
}

#[rstest]
fn breadth_first_finds_registered_sibling_interface(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.swimmer, "swimmer");

	assert_eq!(reg.resolve(zoo.otter), Ok(Some("swimmer")));
	assert_eq!(
		reg.explain(zoo.otter).unwrap().map(|r| r.source),
		Some(MatchSource::Assignable {
			level: zoo.otter,
			via: zoo.swimmer
		})
	);
}

#[rstest]
fn superinterfaces_match_from_higher_levels(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.named, "named");

	// Puppy has no interfaces; Dog's Pet extends Named.
	assert_eq!(
		reg.explain(zoo.puppy).unwrap(),
		Some(Resolution {
			value: "named",
			source: MatchSource::Assignable {
				level: zoo.dog,
				via: zoo.named
			},
		})
	);
	assert_eq!(reg.resolve(zoo.pet), Ok(Some("named")));
}

#[rstest]
fn root_matches_classes_but_not_interfaces(zoo: Zoo) {
	let reg = registry(&zoo);
	assert_eq!(reg.resolve(zoo.core.object), Ok(None));

	reg.register_assignable(zoo.core.object, "object");
	assert_eq!(reg.resolve(zoo.ledger), Ok(Some("object")));
	assert_eq!(reg.resolve(zoo.core.object), Ok(Some("object")));
	assert_eq!(reg.resolve(zoo.pet), Ok(None));
}

#[rstest]
fn registration_overwrites(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.mammal, "first");
	assert_eq!(reg.resolve(zoo.dog), Ok(Some("first")));

	reg.register_assignable(zoo.mammal, "second");
	assert_eq!(reg.resolve(zoo.dog), Ok(Some("second")));
	assert_eq!(reg.len(), 1);
}

#[rstest]
fn rejects_arrays_primitives_and_foreign_keys(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.core.object, "object");

	let array = reg.resolve(zoo.core.object_array).unwrap_err();
	assert_eq!(array.reason(), InvalidQueryReason::Array);

	let int = reg
		.resolve(zoo.core.primitive(PrimitiveKind::Int))
		.unwrap_err();
	assert_eq!(int.reason(), InvalidQueryReason::Primitive);
	assert_eq!(
		int,
		RegistryError::InvalidQuery {
			ty: zoo.core.primitive(PrimitiveKind::Int),
			name: "int".to_string(),
			reason: InvalidQueryReason::Primitive,
		}
	);

	let foreign = reg.resolve(TypeKey(9_999)).unwrap_err();
	assert_eq!(foreign.reason(), InvalidQueryReason::Unknown);

	assert!(reg.explain(zoo.core.int_array).is_err());
	assert_eq!(
		reg.resolve_or(zoo.core.primitive(PrimitiveKind::Void), "fallback")
			.unwrap_err()
			.reason(),
		InvalidQueryReason::Primitive
	);
}

#[rstest]
fn hits_are_cached_and_misses_are_not(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.pet, "pet");

	assert_eq!(reg.resolve(zoo.record), Ok(None));
	assert_eq!(reg.cached_len(), 0);

	assert_eq!(reg.resolve(zoo.puppy), Ok(Some("pet")));
	assert_eq!(reg.cached_len(), 1);
	assert_eq!(reg.resolve(zoo.puppy), Ok(Some("pet")));
	assert_eq!(reg.cached_len(), 1);

	reg.register_exact(zoo.record, "record");
	assert_eq!(reg.cached_len(), 0);
	assert_eq!(reg.resolve(zoo.puppy), Ok(Some("pet")));
}

#[rstest]
fn explain_bypasses_the_cache(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.pet, "pet");

	assert!(reg.explain(zoo.dog).unwrap().is_some());
	assert_eq!(reg.cached_len(), 0);
}

#[rstest]
fn late_registration_is_visible_after_a_miss(zoo: Zoo) {
	let reg = registry(&zoo);
	assert_eq!(reg.resolve(zoo.ledger), Ok(None));

	reg.register_assignable(zoo.record, "record");
	assert_eq!(reg.resolve(zoo.ledger), Ok(Some("record")));
}

#[rstest]
fn cached_result_is_replaced_by_higher_precedence_write(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_assignable(zoo.animal, "animal");
	assert_eq!(reg.resolve(zoo.dog), Ok(Some("animal")));

	reg.register_exact(zoo.dog, "dog");
	assert_eq!(reg.resolve(zoo.dog), Ok(Some("dog")));
}

#[rstest]
fn copies_are_isolated(zoo: Zoo) {
	let original = registry(&zoo);
	original.register_assignable(zoo.animal, "animal");
	original.register_marker(zoo.entity, "entity");
	original.register_exact(zoo.named, "named");
	assert_eq!(original.resolve(zoo.dog), Ok(Some("animal")));

	let copy = TypeRegistry::new_from(&original);
	assert_eq!(copy.cached_len(), 0);
	assert_eq!(copy.resolve(zoo.dog), Ok(Some("animal")));
	assert_eq!(copy.resolve(zoo.record), Ok(Some("entity")));
	assert_eq!(copy.resolve(zoo.named), Ok(Some("named")));
	assert_eq!(copy.resolve(zoo.core.string), Ok(None));

	copy.register_exact(zoo.dog, "copy dog");
	assert_eq!(copy.resolve(zoo.dog), Ok(Some("copy dog")));
	assert_eq!(original.resolve(zoo.dog), Ok(Some("animal")));

	original.register_exact(zoo.otter, "original otter");
	assert_eq!(original.resolve(zoo.otter), Ok(Some("original otter")));
	assert_eq!(copy.resolve(zoo.otter), Ok(Some("animal")));

	let cloned = copy.clone();
	assert_eq!(cloned.resolve(zoo.dog), Ok(Some("copy dog")));
	assert_eq!(cloned.len(), copy.len());
}

#[rstest]
fn disabled_cache_still_resolves(zoo: Zoo) {
	let reg: TypeRegistry<&str> = TypeRegistry::with_config(
		Arc::clone(&zoo.table),
		RegistryConfig::new("uncached").without_cache(),
	);
	reg.register_assignable(zoo.named, "named");

	assert_eq!(reg.resolve(zoo.otter), Ok(Some("named")));
	assert_eq!(reg.resolve(zoo.otter), Ok(Some("named")));
	assert_eq!(reg.cached_len(), 0);
	assert_eq!(reg.label(), "uncached");
}

#[rstest]
fn presence_checks_and_counts(zoo: Zoo) {
	let reg = registry(&zoo);
	reg.register_exact(zoo.dog, "dog");
	reg.register_marker(zoo.audited, "audited");
	reg.register_assignable(zoo.named, "named");

	assert!(reg.contains_exact(zoo.dog));
	assert!(!reg.contains_exact(zoo.puppy));
	assert!(reg.contains_marker(zoo.audited));
	assert!(!reg.contains_marker(zoo.entity));
	assert!(reg.contains_assignable(zoo.named));
	assert!(!reg.contains_assignable(zoo.dog));
	assert_eq!(reg.len(), 3);
	assert!(!reg.is_empty());

	assert_eq!(reg.resolve_or(zoo.core.string, "fallback"), Ok("fallback"));
	assert_eq!(reg.resolve_or(zoo.otter, "fallback"), Ok("named"));
}
