//! Invalidate-on-write memoization of resolved lookups.
//!
//! Writers clear the cache and bump its generation while holding the write
//! lock, and publish their table change before releasing it. Readers note the
//! generation on a miss and only insert their result if it is unchanged, so a
//! value computed against tables that a completed write has since replaced is
//! never stored.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use typeassoc_primitives::TypeKey;

pub(crate) enum Lookup<T> {
	Hit(T),
	Miss { generation: u64 },
}

struct CacheState<T> {
	generation: u64,
	entries: FxHashMap<TypeKey, T>,
}

pub(crate) struct ResolutionCache<T> {
	state: RwLock<CacheState<T>>,
}

impl<T: Clone> ResolutionCache<T> {
	pub(crate) fn new() -> Self {
		Self {
			state: RwLock::new(CacheState {
				generation: 0,
				entries: FxHashMap::default(),
			}),
		}
	}

	pub(crate) fn lookup(&self, ty: TypeKey) -> Lookup<T> {
		let state = self.state.read();
		match state.entries.get(&ty) {
			Some(value) => Lookup::Hit(value.clone()),
			None => Lookup::Miss {
				generation: state.generation,
			},
		}
	}

	/// Stores `value` unless a write happened since `generation` was observed.
	pub(crate) fn insert(&self, generation: u64, ty: TypeKey, value: T) -> bool {
		let mut state = self.state.write();
		if state.generation != generation {
			return false;
		}
		state.entries.insert(ty, value);
		true
	}

	/// Clears the cache and runs `publish` before any reader can observe the
	/// cleared state.
	pub(crate) fn invalidate_with<R>(&self, publish: impl FnOnce() -> R) -> R {
		let mut state = self.state.write();
		state.entries.clear();
		state.generation = state.generation.wrapping_add(1);
		publish()
	}

	pub(crate) fn len(&self) -> usize {
		self.state.read().entries.len()
	}
}
