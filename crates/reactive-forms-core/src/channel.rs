//! Notification channel
//!
//! A minimal multicast publish/subscribe primitive. Every control owns three of
//! them: value changes, status changes and a combined state-change channel.
//!
//! ## Semantics
//!
//! - [`Channel::emit`] calls every registered listener synchronously, in
//!   subscription order.
//! - The listener list is snapshotted before iterating: a listener subscribed
//!   during an emit is first invoked by the *next* emit, and a listener removed
//!   during an emit is still invoked by the current one.
//! - There is no buffering: listeners only see payloads emitted after they
//!   subscribed.
//!
//! ## Example
//!
//! ```
//! use reactive_forms_core::Channel;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let channel = Channel::<i32>::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let id = channel.subscribe(move |value| sink.borrow_mut().push(*value));
//!
//! channel.emit(&1);
//! channel.unsubscribe(id);
//! channel.emit(&2);
//!
//! assert_eq!(*seen.borrow(), vec![1]);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

type Listener<T> = Rc<dyn Fn(&T)>;

/// Identity of a subscribed listener, returned by [`Channel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Synchronous multicast channel.
pub struct Channel<T> {
	listeners: RefCell<Vec<(ListenerId, Listener<T>)>>,
	next_id: Cell<u64>,
}

impl<T> Channel<T> {
	/// Creates a channel with no listeners.
	pub fn new() -> Self {
		Self {
			listeners: RefCell::new(Vec::new()),
			next_id: Cell::new(0),
		}
	}

	/// Registers `listener` and returns the id used to unsubscribe it.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(&T) + 'static,
	{
		let id = ListenerId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.listeners.borrow_mut().push((id, Rc::new(listener)));
		id
	}

	/// Removes one listener. Returns `false` if it was not subscribed.
	pub fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.borrow_mut();
		let before = listeners.len();
		listeners.retain(|(listener_id, _)| *listener_id != id);
		listeners.len() != before
	}

	/// Removes every listener.
	pub fn unsubscribe_all(&self) {
		self.listeners.borrow_mut().clear();
	}

	/// Calls every current listener with `payload`.
	pub fn emit(&self, payload: &T) {
		let snapshot: Vec<Listener<T>> = self
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in snapshot {
			listener(payload);
		}
	}

	/// Number of subscribed listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.borrow().len()
	}

	/// Whether `id` is currently subscribed.
	pub fn is_subscribed(&self, id: ListenerId) -> bool {
		self.listeners
			.borrow()
			.iter()
			.any(|(listener_id, _)| *listener_id == id)
	}
}

impl<T> Default for Channel<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for Channel<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Channel")
			.field("listeners", &self.listener_count())
			.finish()
	}
}
