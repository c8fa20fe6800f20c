//! Registry trait for self-registering implementations.
//!
//! This module provides the base trait that pluggable implementations
//! (currently the upstream price feeds) implement to register themselves
//! with their configuration name and factory function.

/// Base trait for implementation registries.
///
/// Each implementation module must provide a Registry struct implementing
/// this trait, declaring its configuration name and a factory function.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this
	/// implementation, for example "coingecko" for
	/// `upstream.implementations.coingecko`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
