//! Executor resolution for async validators
//!
//! The control tree never drives futures itself. An async validation is spawned
//! on a [`LocalSpawn`] executor resolved in this order:
//!
//! 1. the executor given in the control's own [`ControlOptions`](crate::ControlOptions)
//! 2. the nearest ancestor's executor
//! 3. the thread default installed with [`set_default_spawner`]
//!
//! ```
//! use futures::executor::LocalPool;
//! use reactive_forms_core::runtime;
//! use std::rc::Rc;
//!
//! let pool = LocalPool::new();
//! runtime::set_default_spawner(Rc::new(pool.spawner()));
//! assert!(runtime::default_spawner().is_some());
//! runtime::clear_default_spawner();
//! ```

use futures::task::LocalSpawn;
use std::cell::RefCell;
use std::rc::Rc;

thread_local! {
	static DEFAULT_SPAWNER: RefCell<Option<Rc<dyn LocalSpawn>>> = const { RefCell::new(None) };
}

/// Installs the default executor for the current thread, returning the previous one.
pub fn set_default_spawner(spawner: Rc<dyn LocalSpawn>) -> Option<Rc<dyn LocalSpawn>> {
	DEFAULT_SPAWNER.with(|slot| slot.borrow_mut().replace(spawner))
}

/// Removes the default executor for the current thread.
pub fn clear_default_spawner() -> Option<Rc<dyn LocalSpawn>> {
	DEFAULT_SPAWNER.with(|slot| slot.borrow_mut().take())
}

/// Default executor for the current thread, if any.
pub fn default_spawner() -> Option<Rc<dyn LocalSpawn>> {
	DEFAULT_SPAWNER.with(|slot| slot.borrow().clone())
}

#[cfg(feature = "tokio")]
pub use self::tokio_spawner::TokioLocalSpawner;

#[cfg(feature = "tokio")]
mod tokio_spawner {
	use futures::future::LocalFutureObj;
	use futures::task::{LocalSpawn, SpawnError};

	/// Spawns onto the current tokio [`LocalSet`](tokio::task::LocalSet).
	///
	/// Must only be used from inside `LocalSet::run_until` / `LocalSet::block_on`.
	#[derive(Debug, Clone, Copy, Default)]
	pub struct TokioLocalSpawner;

	impl LocalSpawn for TokioLocalSpawner {
		fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
			tokio::task::spawn_local(future);
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::LocalPool;
	use rstest::rstest;

	#[rstest]
	fn test_set_and_clear_default_spawner() {
		// Arrange
		let pool = LocalPool::new();

		// Act
		let previous = set_default_spawner(Rc::new(pool.spawner()));

		// Assert
		assert!(previous.is_none());
		assert!(default_spawner().is_some());
		assert!(clear_default_spawner().is_some());
		assert!(default_spawner().is_none());
	}
}
