/// Construction-time settings of a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
	/// Name carried on every log event emitted by the registry.
	pub label: &'static str,
	/// Memoize successful resolutions. When off, every query re-scans.
	pub cache: bool,
}

impl RegistryConfig {
	pub const fn new(label: &'static str) -> Self {
		Self { label, cache: true }
	}

	pub const fn without_cache(self) -> Self {
		Self {
			cache: false,
			..self
		}
	}
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self::new("types")
	}
}
