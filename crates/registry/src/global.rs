//! Process-wide registries.
//!
//! A [`StaticRegistry`] is declared as a `static` and initialized explicitly
//! once at startup, after the hierarchy it resolves against has been built.
//! It then lives for the process duration; there is no teardown.
//!
//! ```ignore
//! static CODECS: StaticRegistry<Codec> = StaticRegistry::new("codecs");
//!
//! fn startup() -> Result<(), Box<dyn std::error::Error>> {
//!     let (table, core) = core_types()?;
//!     let codecs = CODECS.init(TypeRegistry::new(Arc::new(table)))?;
//!     codecs.register_assignable(core.number, Codec::Numeric);
//!     Ok(())
//! }
//! ```

use std::sync::OnceLock;

use typeassoc_primitives::TypeTable;

use crate::error::StaticRegistryError;
use crate::registry::TypeRegistry;

/// A [`TypeRegistry`] slot suitable for a `static` item.
pub struct StaticRegistry<T, H = TypeTable> {
	label: &'static str,
	cell: OnceLock<TypeRegistry<T, H>>,
}

impl<T, H> StaticRegistry<T, H> {
	pub const fn new(label: &'static str) -> Self {
		Self {
			label,
			cell: OnceLock::new(),
		}
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the registry, or `None` before [`Self::init`].
	pub fn get(&self) -> Option<&TypeRegistry<T, H>> {
		self.cell.get()
	}

	pub fn is_initialized(&self) -> bool {
		self.cell.get().is_some()
	}

	/// Installs `registry`. Fails if a registry was already installed; the
	/// installed one is left untouched.
	pub fn init(
		&self,
		registry: TypeRegistry<T, H>,
	) -> Result<&TypeRegistry<T, H>, StaticRegistryError> {
		let already = StaticRegistryError::AlreadyInitialized { label: self.label };
		if self.cell.set(registry).is_err() {
			return Err(already);
		}
		tracing::debug!(registry = self.label, "static registry initialized");
		self.cell.get().ok_or(already)
	}

	/// Returns the registry, installing the one built by `init` if none is
	/// installed yet.
	pub fn get_or_init(&self, init: impl FnOnce() -> TypeRegistry<T, H>) -> &TypeRegistry<T, H> {
		self.cell.get_or_init(init)
	}
}
