//! Integration test utilities for reactive forms
//!
//! Shared fixtures for the end-to-end scenarios under `integration/tests`.

use futures::channel::oneshot;
use reactive_forms::core::{AsyncValidator, AsyncValidatorError, ValidationErrors};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Once;

pub type AsyncOutcome = Result<Option<ValidationErrors>, AsyncValidatorError>;

/// Async validator whose outcomes are supplied by the test, one per call.
///
/// Every invocation parks a reply slot; [`resolve`](Self::resolve) settles the
/// oldest open slot.
#[derive(Clone, Default)]
pub struct ScriptedValidator {
	replies: Rc<RefCell<Vec<oneshot::Sender<AsyncOutcome>>>>,
	calls: Rc<Cell<usize>>,
}

impl ScriptedValidator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn validator(&self) -> AsyncValidator {
		let replies = Rc::clone(&self.replies);
		let calls = Rc::clone(&self.calls);
		AsyncValidator::new(move |_| {
			let (tx, rx) = oneshot::channel();
			replies.borrow_mut().push(tx);
			calls.set(calls.get() + 1);
			async move { rx.await? }
		})
	}

	/// Settles the oldest open call. Returns `false` if no call is open.
	pub fn resolve(&self, outcome: AsyncOutcome) -> bool {
		let mut replies = self.replies.borrow_mut();
		if replies.is_empty() {
			return false;
		}
		// A cancelled validation has dropped its receiver; the send just fails.
		let _ = replies.remove(0).send(outcome);
		true
	}

	pub fn calls(&self) -> usize {
		self.calls.get()
	}

	pub fn open(&self) -> usize {
		self.replies.borrow().len()
	}
}

static TRACING: Once = Once::new();

/// Routes `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
	TRACING.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_test_writer()
			.try_init();
	});
}
