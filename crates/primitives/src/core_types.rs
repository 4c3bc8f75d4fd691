//! Seed universe of the common reference and primitive types.
//!
//! ```text
//! Object
//! ├── Number : Serializable, Comparable
//! │   ├── Byte, Short, Integer, Long, Float, Double
//! ├── Boolean, Character : Serializable, Comparable
//! ├── String : Serializable, Comparable, CharSequence
//! └── Void
//! ```
//!
//! Each primitive boxes to its reference counterpart; `void` boxes to `Void`.

use crate::error::Result;
use crate::key::TypeKey;
use crate::kind::PrimitiveKind;
use crate::table::{TypeTable, TypeTableBuilder};

/// Keys of the seeded descriptors.
#[derive(Debug, Clone, Copy)]
pub struct CoreTypes {
	pub object: TypeKey,
	pub serializable: TypeKey,
	pub comparable: TypeKey,
	pub char_sequence: TypeKey,
	pub number: TypeKey,
	pub string: TypeKey,
	pub object_array: TypeKey,
	pub int_array: TypeKey,
	boxed: [TypeKey; 9],
	primitives: [TypeKey; 9],
}

impl CoreTypes {
	/// Key of the primitive descriptor for `kind`.
	pub fn primitive(&self, kind: PrimitiveKind) -> TypeKey {
		self.primitives[slot(kind)]
	}

	/// Key of the boxed reference descriptor for `kind`.
	pub fn boxed(&self, kind: PrimitiveKind) -> TypeKey {
		self.boxed[slot(kind)]
	}

	pub fn integer(&self) -> TypeKey {
		self.boxed(PrimitiveKind::Int)
	}
}

// `PrimitiveKind::ALL` lists variants in declaration order.
fn slot(kind: PrimitiveKind) -> usize {
	kind as usize
}

/// Declares the seed universe into an existing builder.
///
/// Callers extend the result with their own types before building.
pub fn declare_core_types(b: &mut TypeTableBuilder) -> CoreTypes {
	let object = b.class("Object");
	let serializable = b.interface("Serializable");
	let comparable = b.interface("Comparable");
	let char_sequence = b.interface("CharSequence");

	let number = b.class("Number");
	b.extends(number, object)
		.implements(number, &[serializable, comparable]);

	let string = b.class("String");
	b.extends(string, object)
		.implements(string, &[serializable, comparable, char_sequence]);

	let boxed = PrimitiveKind::ALL.map(|kind| {
		let ty = b.class(kind.boxed_name());
		if kind.is_numeric() {
			b.extends(ty, number);
		} else {
			b.extends(ty, object);
			if kind != PrimitiveKind::Void {
				b.implements(ty, &[serializable, comparable]);
			}
		}
		ty
	});

	let primitives = PrimitiveKind::ALL.map(|kind| b.primitive(kind.name(), kind));
	for (&p, &boxed) in primitives.iter().zip(boxed.iter()) {
		b.boxes_to(p, boxed);
	}

	let object_array = b.array(object);
	let int_array = b.array(primitives[slot(PrimitiveKind::Int)]);

	CoreTypes {
		object,
		serializable,
		comparable,
		char_sequence,
		number,
		string,
		object_array,
		int_array,
		boxed,
		primitives,
	}
}

/// Builds a table holding only the seed universe.
pub fn core_types() -> Result<(TypeTable, CoreTypes)> {
	let mut builder = TypeTable::builder();
	let core = declare_core_types(&mut builder);
	Ok((builder.build()?, core))
}
