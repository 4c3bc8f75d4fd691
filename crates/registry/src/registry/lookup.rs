//! Fresh (uncached) resolution against pinned table snapshots.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use typeassoc_primitives::{MarkerKey, TypeHierarchy, TypeKey};

use super::MarkerTable;

/// Which strategy produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
	/// The query type itself was registered exactly.
	Exact,
	/// A marker directly attached to the query type is, or specializes, the
	/// registered `marker`.
	Marker { marker: MarkerKey },
	/// `via` was registered as assignable. `level` is the class in the query
	/// type's ancestry whose own type or interface graph contained `via`.
	Assignable { level: TypeKey, via: TypeKey },
}

pub(crate) struct Matched<'a, T> {
	pub(crate) value: &'a T,
	pub(crate) source: MatchSource,
}

pub(crate) fn exact<'a, T>(
	table: &'a FxHashMap<TypeKey, T>,
	ty: TypeKey,
) -> Option<Matched<'a, T>> {
	table.get(&ty).map(|value| Matched {
		value,
		source: MatchSource::Exact,
	})
}

/// Scans registered markers in registration order against the markers
/// attached directly to `ty`.
pub(crate) fn by_marker<'a, T, H>(
	hierarchy: &H,
	table: &'a MarkerTable<T>,
	ty: TypeKey,
) -> Option<Matched<'a, T>>
where
	H: TypeHierarchy + ?Sized,
{
	let attached = hierarchy.markers(ty);
	if attached.is_empty() {
		return None;
	}
	table.iter().find_map(|(&registered, value)| {
		attached
			.iter()
			.any(|&m| hierarchy.marker_is_a(m, registered))
			.then_some(Matched {
				value,
				source: MatchSource::Marker { marker: registered },
			})
	})
}

/// Walks `ty` and its superclasses. At each level the level's own type is
/// checked first, then its interface graph breadth-first.
pub(crate) fn by_ancestry<'a, T, H>(
	hierarchy: &H,
	table: &'a FxHashMap<TypeKey, T>,
	ty: TypeKey,
) -> Option<Matched<'a, T>>
where
	H: TypeHierarchy + ?Sized,
{
	if table.is_empty() {
		return None;
	}

	let mut queue = VecDeque::new();
	// An interface that failed to match once fails everywhere, so diamonds
	// and interfaces repeated across levels are scanned once.
	let mut seen = FxHashSet::default();
	let mut level = Some(ty);

	while let Some(current) = level {
		if let Some(value) = table.get(&current) {
			return Some(Matched {
				value,
				source: MatchSource::Assignable {
					level: current,
					via: current,
				},
			});
		}

		queue.clear();
		queue.extend(hierarchy.interfaces(current).iter().copied());
		while let Some(iface) = queue.pop_front() {
			if !seen.insert(iface) {
				continue;
			}
			if let Some(value) = table.get(&iface) {
				return Some(Matched {
					value,
					source: MatchSource::Assignable {
						level: current,
						via: iface,
					},
				});
			}
			queue.extend(hierarchy.interfaces(iface).iter().copied());
		}

		level = hierarchy.superclass(current);
	}
	None
}
