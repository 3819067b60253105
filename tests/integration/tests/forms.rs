//! Integration tests for the reactive forms crates.
//!
//! End-to-end scenarios exercising the core, builder and binding crates together.

mod forms {
	mod async_validation;
	mod properties;
	mod scenarios;
	#[cfg(feature = "tokio")]
	mod tokio_runtime;
}
