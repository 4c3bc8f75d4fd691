use crate::key::{MarkerKey, TypeKey};

/// Errors raised while assembling a [`TypeTable`](crate::TypeTable).
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
	#[error("duplicate type name: {0}")]
	DuplicateType(String),
	#[error("duplicate marker name: {0}")]
	DuplicateMarker(String),
	#[error("{owner}: unknown type {name:?}")]
	UnknownType { owner: String, name: String },
	#[error("{owner}: unknown marker {name:?}")]
	UnknownMarker { owner: String, name: String },
	#[error("{owner}: {key} does not belong to this table")]
	DanglingType { owner: String, key: TypeKey },
	#[error("{owner}: {key} does not belong to this table")]
	DanglingMarker { owner: String, key: MarkerKey },
	#[error("{ty}: only classes may declare a superclass")]
	SuperclassOnNonClass { ty: String },
	#[error("{ty}: superclass {superclass} is not a class")]
	SuperclassNotClass { ty: String, superclass: String },
	#[error("{ty}: only classes and interfaces may list interfaces")]
	InterfacesOnNonReference { ty: String },
	#[error("{ty}: {listed} is not an interface")]
	NotAnInterface { ty: String, listed: String },
	#[error("{ty}: only classes and interfaces may carry markers")]
	MarkersOnNonReference { ty: String },
	#[error("{ty}: superclass chain is cyclic")]
	SuperclassCycle { ty: String },
	#[error("{ty}: interface extension graph is cyclic")]
	InterfaceCycle { ty: String },
	#[error("{marker}: marker parent chain is cyclic")]
	MarkerCycle { marker: String },
	#[error("{ty}: only primitives have a boxed counterpart")]
	BoxedOnNonPrimitive { ty: String },
	#[error("{ty}: primitive has no boxed counterpart")]
	MissingBoxed { ty: String },
	#[error("{ty}: boxed counterpart {boxed} is not a class")]
	BoxedNotClass { ty: String, boxed: String },
	#[error("{ty}: array declaration needs an element type")]
	MissingElement { ty: String },
	#[error("{ty}: primitive declaration needs a primitive kind")]
	MissingPrimitive { ty: String },
	#[error("failed to parse hierarchy spec: {0}")]
	Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
