//! Declarative hierarchy descriptions.
//!
//! A hierarchy can be described in TOML and turned into a [`TypeTable`] at
//! startup:
//!
//! ```toml
//! [[markers]]
//! name = "Entity"
//!
//! [[markers]]
//! name = "Table"
//! parent = "Entity"
//!
//! [[types]]
//! name = "Object"
//! kind = "class"
//!
//! [[types]]
//! name = "Account"
//! kind = "class"
//! superclass = "Object"
//! markers = ["Table"]
//! ```
//!
//! Names may be referenced before they are declared. Names already present in
//! the builder (for example the seed universe from
//! [`declare_core_types`](crate::declare_core_types)) are visible too.

use serde::Deserialize;

use crate::error::{HierarchyError, Result};
use crate::key::{MarkerKey, TypeKey};
use crate::kind::PrimitiveKind;
use crate::table::{TypeTable, TypeTableBuilder};

/// Top-level hierarchy document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HierarchySpec {
	#[serde(default)]
	pub markers: Vec<MarkerSpec>,
	#[serde(default)]
	pub types: Vec<TypeSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkerSpec {
	pub name: String,
	#[serde(default)]
	pub parent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
	pub name: String,
	pub kind: DeclaredKind,
	#[serde(default)]
	pub superclass: Option<String>,
	#[serde(default)]
	pub interfaces: Vec<String>,
	#[serde(default)]
	pub markers: Vec<String>,
	/// Primitive kind, for `kind = "primitive"`.
	#[serde(default)]
	pub primitive: Option<PrimitiveKind>,
	/// Boxed counterpart, for `kind = "primitive"`.
	#[serde(default)]
	pub boxed: Option<String>,
	/// Element type, for `kind = "array"`.
	#[serde(default)]
	pub element: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
	Class,
	Interface,
	Array,
	Primitive,
}

impl HierarchySpec {
	pub fn from_toml(src: &str) -> Result<Self> {
		Ok(toml::from_str(src)?)
	}

	/// Builds a standalone table from this spec.
	pub fn build(&self) -> Result<TypeTable> {
		let mut builder = TypeTable::builder();
		self.declare_into(&mut builder)?;
		builder.build()
	}

	/// Declares every marker and type of this spec into `builder`, then links
	/// relations by name.
	pub fn declare_into(&self, builder: &mut TypeTableBuilder) -> Result<()> {
		let markers: Vec<MarkerKey> = self
			.markers
			.iter()
			.map(|m| builder.marker(m.name.as_str()))
			.collect();

		let mut types = Vec::with_capacity(self.types.len());
		for spec in &self.types {
			let key = match spec.kind {
				DeclaredKind::Class => builder.class(spec.name.as_str()),
				DeclaredKind::Interface => builder.interface(spec.name.as_str()),
				DeclaredKind::Array => builder.named_array(spec.name.as_str(), TypeKey::INVALID),
				DeclaredKind::Primitive => {
					let Some(primitive) = spec.primitive else {
						return Err(HierarchyError::MissingPrimitive {
							ty: spec.name.clone(),
						});
					};
					builder.primitive(spec.name.as_str(), primitive)
				}
			};
			types.push(key);
		}

		for (m, &key) in self.markers.iter().zip(&markers) {
			if let Some(parent) = &m.parent {
				let parent = marker_ref(builder, &m.name, parent)?;
				builder.specializes(key, parent);
			}
		}

		for (spec, &key) in self.types.iter().zip(&types) {
			if let Some(superclass) = &spec.superclass {
				let superclass = type_ref(builder, &spec.name, superclass)?;
				builder.extends(key, superclass);
			}
			let interfaces = spec
				.interfaces
				.iter()
				.map(|name| type_ref(builder, &spec.name, name))
				.collect::<Result<Vec<_>>>()?;
			builder.implements(key, &interfaces);

			let attached = spec
				.markers
				.iter()
				.map(|name| marker_ref(builder, &spec.name, name))
				.collect::<Result<Vec<_>>>()?;
			builder.mark(key, &attached);

			if let Some(boxed) = &spec.boxed {
				let boxed = type_ref(builder, &spec.name, boxed)?;
				builder.boxes_to(key, boxed);
			}

			if spec.kind == DeclaredKind::Array {
				let Some(element) = &spec.element else {
					return Err(HierarchyError::MissingElement {
						ty: spec.name.clone(),
					});
				};
				let element = type_ref(builder, &spec.name, element)?;
				builder.set_element(key, element);
			}
		}
		Ok(())
	}
}

impl TypeTable {
	/// Parses and builds a table from a TOML hierarchy document.
	pub fn from_toml(src: &str) -> Result<Self> {
		HierarchySpec::from_toml(src)?.build()
	}
}

fn type_ref(builder: &TypeTableBuilder, owner: &str, name: &str) -> Result<TypeKey> {
	builder
		.lookup(name)
		.ok_or_else(|| HierarchyError::UnknownType {
			owner: owner.to_string(),
			name: name.to_string(),
		})
}

fn marker_ref(builder: &TypeTableBuilder, owner: &str, name: &str) -> Result<MarkerKey> {
	builder
		.lookup_marker(name)
		.ok_or_else(|| HierarchyError::UnknownMarker {
			owner: owner.to_string(),
			name: name.to_string(),
		})
}
