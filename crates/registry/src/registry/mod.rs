//! Type-to-value registry with prioritized matching.
//!
//! # Purpose
//!
//! Associate values with types and resolve a query type to the value of the
//! highest-precedence association that matches it.
//!
//! # Mental model
//!
//! * Three independent association tables, each an immutable map published
//!   through an [`ArcSwap`]: `exact`, `marker` and `assignable`.
//! * Readers pin the current maps and resolve against them without locking.
//! * A resolution cache memoizes successful lookups and is cleared by every
//!   write. Misses are never cached, so an association registered after a
//!   failed query is visible to the next query.
//!
//! # Precedence
//!
//! 1. `exact`: the query type itself.
//! 2. `marker`: a marker attached directly to the query type is, or
//!    specializes, a registered marker. Registered markers are scanned in
//!    registration order.
//! 3. `assignable`: walking the query type and then each superclass; at each
//!    level the level's own type, then its interfaces breadth-first.
//!
//! When several associations at the same rank qualify (two attached markers,
//! two interfaces at the same depth) the first one found in the order above
//! wins. That order is stable for a fixed registration sequence and is the
//! only tie-break offered.
//!
//! # Concurrency & ordering
//!
//! * Each table is published independently. Two `register_*` calls are two
//!   publications; readers may observe the state between them.
//! * Writers clear the cache before publishing and hold the cache lock until
//!   the publication is done, so no reader sees a cached value that predates
//!   a completed write.
//! * Copies take each table independently; a copy made during a concurrent
//!   write on the source may reflect the write in some tables only.

use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::{debug, trace, warn};
use typeassoc_primitives::{MarkerKey, TypeHierarchy, TypeKey, TypeKind, TypeTable};

use crate::config::RegistryConfig;
use crate::error::{InvalidQueryReason, RegistryError, Result};

mod cache;
mod lookup;

use cache::{Lookup, ResolutionCache};
pub use lookup::MatchSource;

pub(crate) type MarkerTable<T> = IndexMap<MarkerKey, T, FxBuildHasher>;

/// A fresh resolution together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution<T> {
	pub value: T,
	pub source: MatchSource,
}

/// Registry resolving types to values by exact type, marker, or assignability.
pub struct TypeRegistry<T, H = TypeTable> {
	hierarchy: Arc<H>,
	config: RegistryConfig,
	exact: ArcSwap<FxHashMap<TypeKey, T>>,
	marker: ArcSwap<MarkerTable<T>>,
	assignable: ArcSwap<FxHashMap<TypeKey, T>>,
	cache: ResolutionCache<T>,
}

impl<T, H> TypeRegistry<T, H>
where
	T: Clone,
	H: TypeHierarchy,
{
	/// Creates an empty registry resolving against `hierarchy`.
	pub fn new(hierarchy: Arc<H>) -> Self {
		Self::with_config(hierarchy, RegistryConfig::default())
	}

	pub fn with_config(hierarchy: Arc<H>, config: RegistryConfig) -> Self {
		Self {
			hierarchy,
			config,
			exact: ArcSwap::from_pointee(FxHashMap::default()),
			marker: ArcSwap::from_pointee(MarkerTable::default()),
			assignable: ArcSwap::from_pointee(FxHashMap::default()),
			cache: ResolutionCache::new(),
		}
	}

	/// Creates an independent copy of `other`'s associations.
	///
	/// The copy shares the hierarchy but none of the tables; later writes to
	/// either registry are invisible to the other. The cache starts empty.
	pub fn new_from(other: &Self) -> Self {
		Self {
			hierarchy: Arc::clone(&other.hierarchy),
			config: other.config,
			exact: ArcSwap::from_pointee(FxHashMap::clone(&other.exact.load())),
			marker: ArcSwap::from_pointee(MarkerTable::clone(&other.marker.load())),
			assignable: ArcSwap::from_pointee(FxHashMap::clone(&other.assignable.load())),
			cache: ResolutionCache::new(),
		}
	}

	/// Associates `value` with exactly `ty`. Subtypes are not affected.
	pub fn register_exact(&self, ty: TypeKey, value: T) {
		debug!(
			registry = self.config.label,
			table = "exact",
			ty = self.hierarchy.name(ty),
			"registering association"
		);
		self.cache.invalidate_with(|| {
			self.exact.rcu(|current| {
				let mut next = FxHashMap::clone(current);
				next.insert(ty, value.clone());
				next
			});
		});
	}

	/// Associates `value` with every type carrying `marker`, or a
	/// specialization of it, directly.
	///
	/// Re-registering a marker replaces its value but keeps its original
	/// position in the scan order.
	pub fn register_marker(&self, marker: MarkerKey, value: T) {
		debug!(
			registry = self.config.label,
			table = "marker",
			marker = self.hierarchy.marker_name(marker),
			"registering association"
		);
		self.cache.invalidate_with(|| {
			self.marker.rcu(|current| {
				let mut next = MarkerTable::clone(current);
				next.insert(marker, value.clone());
				next
			});
		});
	}

	/// Associates `value` with `ty` and everything that extends or implements it.
	pub fn register_assignable(&self, ty: TypeKey, value: T) {
		debug!(
			registry = self.config.label,
			table = "assignable",
			ty = self.hierarchy.name(ty),
			"registering association"
		);
		self.cache.invalidate_with(|| {
			self.assignable.rcu(|current| {
				let mut next = FxHashMap::clone(current);
				next.insert(ty, value.clone());
				next
			});
		});
	}

	/// Resolves `ty` to the value of its highest-precedence association.
	///
	/// Returns `Ok(None)` when nothing matches. Array and primitive kinds, and
	/// keys foreign to the hierarchy, fail with [`RegistryError::InvalidQuery`].
	pub fn resolve(&self, ty: TypeKey) -> Result<Option<T>> {
		self.check_query(ty)?;

		let generation = if self.config.cache {
			match self.cache.lookup(ty) {
				Lookup::Hit(value) => {
					trace!(
						registry = self.config.label,
						ty = self.hierarchy.name(ty),
						"cache hit"
					);
					return Ok(Some(value));
				}
				Lookup::Miss { generation } => Some(generation),
			}
		} else {
			None
		};

		let Some(Resolution { value, source }) = self.compute(ty) else {
			trace!(
				registry = self.config.label,
				ty = self.hierarchy.name(ty),
				"no association"
			);
			return Ok(None);
		};

		trace!(
			registry = self.config.label,
			ty = self.hierarchy.name(ty),
			?source,
			"resolved"
		);
		if let Some(generation) = generation
			&& !self.cache.insert(generation, ty, value.clone())
		{
			trace!(
				registry = self.config.label,
				ty = self.hierarchy.name(ty),
				"discarded resolution computed before a concurrent write"
			);
		}
		Ok(Some(value))
	}

	/// Resolves `ty`, falling back to `default` when nothing matches.
	pub fn resolve_or(&self, ty: TypeKey, default: T) -> Result<T> {
		Ok(self.resolve(ty)?.unwrap_or(default))
	}

	/// Resolves `ty` without consulting or filling the cache, reporting which
	/// strategy matched.
	pub fn explain(&self, ty: TypeKey) -> Result<Option<Resolution<T>>> {
		self.check_query(ty)?;
		Ok(self.compute(ty))
	}

	fn check_query(&self, ty: TypeKey) -> Result<()> {
		let reason = match self.hierarchy.kind(ty) {
			Some(TypeKind::Class | TypeKind::Interface) => return Ok(()),
			Some(TypeKind::Array { .. }) => InvalidQueryReason::Array,
			Some(TypeKind::Primitive(_)) => InvalidQueryReason::Primitive,
			None => InvalidQueryReason::Unknown,
		};
		let name = self.hierarchy.name(ty).to_string();
		warn!(
			registry = self.config.label,
			ty = %name,
			%reason,
			"rejected query"
		);
		Err(RegistryError::InvalidQuery { ty, name, reason })
	}

	fn compute(&self, ty: TypeKey) -> Option<Resolution<T>> {
		let hierarchy = &*self.hierarchy;

		let exact = self.exact.load_full();
		if let Some(m) = lookup::exact(&exact, ty) {
			return Some(Resolution {
				value: m.value.clone(),
				source: m.source,
			});
		}

		let marker = self.marker.load_full();
		if let Some(m) = lookup::by_marker(hierarchy, &marker, ty) {
			return Some(Resolution {
				value: m.value.clone(),
				source: m.source,
			});
		}

		let assignable = self.assignable.load_full();
		lookup::by_ancestry(hierarchy, &assignable, ty).map(|m| Resolution {
			value: m.value.clone(),
			source: m.source,
		})
	}
}

impl<T, H> TypeRegistry<T, H> {
	pub fn hierarchy(&self) -> &Arc<H> {
		&self.hierarchy
	}

	pub fn config(&self) -> RegistryConfig {
		self.config
	}

	pub fn label(&self) -> &'static str {
		self.config.label
	}

	pub fn contains_exact(&self, ty: TypeKey) -> bool {
		self.exact.load().contains_key(&ty)
	}

	pub fn contains_marker(&self, marker: MarkerKey) -> bool {
		self.marker.load().contains_key(&marker)
	}

	pub fn contains_assignable(&self, ty: TypeKey) -> bool {
		self.assignable.load().contains_key(&ty)
	}

	/// Total number of associations across the three tables.
	pub fn len(&self) -> usize {
		self.exact.load().len() + self.marker.load().len() + self.assignable.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl<T: Clone, H> TypeRegistry<T, H> {
	/// Number of memoized resolutions.
	pub fn cached_len(&self) -> usize {
		self.cache.len()
	}
}

impl<T, H> Clone for TypeRegistry<T, H>
where
	T: Clone,
	H: TypeHierarchy,
{
	fn clone(&self) -> Self {
		Self::new_from(self)
	}
}

impl<T, H> std::fmt::Debug for TypeRegistry<T, H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeRegistry")
			.field("label", &self.config.label)
			.field("exact", &self.exact.load().len())
			.field("marker", &self.marker.load().len())
			.field("assignable", &self.assignable.load().len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests;
