//! Construction and mutation options

use crate::state::UpdateOn;
use crate::validators::{AsyncValidator, Validator};
use futures::task::LocalSpawn;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;

/// Options accepted by every control constructor.
///
/// ```
/// use reactive_forms_core::{ControlOptions, UpdateOn, validators};
///
/// let options = ControlOptions::new()
/// 	.validator(validators::required())
/// 	.validator(validators::max_length(20))
/// 	.update_on(UpdateOn::Blur);
/// assert_eq!(options.validators.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ControlOptions {
	pub validators: Vec<Validator>,
	pub async_validators: Vec<AsyncValidator>,
	/// Explicit strategy. `None` inherits from the parent.
	pub update_on: Option<UpdateOn>,
	pub meta: Map<String, Value>,
	/// Executor for async validators of this control and its descendants.
	pub spawner: Option<Rc<dyn LocalSpawn>>,
}

impl ControlOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn validator(mut self, validator: Validator) -> Self {
		self.validators.push(validator);
		self
	}

	pub fn validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
		self.validators.extend(validators);
		self
	}

	pub fn async_validator(mut self, validator: AsyncValidator) -> Self {
		self.async_validators.push(validator);
		self
	}

	pub fn async_validators(mut self, validators: impl IntoIterator<Item = AsyncValidator>) -> Self {
		self.async_validators.extend(validators);
		self
	}

	pub fn update_on(mut self, update_on: UpdateOn) -> Self {
		self.update_on = Some(update_on);
		self
	}

	pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.meta.insert(key.into(), value.into());
		self
	}

	pub fn spawner(mut self, spawner: Rc<dyn LocalSpawn>) -> Self {
		self.spawner = Some(spawner);
		self
	}
}

impl fmt::Debug for ControlOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ControlOptions")
			.field("validators", &self.validators.len())
			.field("async_validators", &self.async_validators.len())
			.field("update_on", &self.update_on)
			.field("meta", &self.meta)
			.field("spawner", &self.spawner.is_some())
			.finish()
	}
}

/// Flags accepted by mutating operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOptions {
	/// Skip propagation to the parent.
	pub only_self: bool,
	/// Emit value/status/state notifications.
	pub emit_event: bool,
}

impl UpdateOptions {
	/// Propagate, but do not notify.
	pub fn silent() -> Self {
		Self {
			only_self: false,
			emit_event: false,
		}
	}

	/// Notify, but do not propagate.
	pub fn only_self() -> Self {
		Self {
			only_self: true,
			emit_event: true,
		}
	}

	pub fn with_emit_event(mut self, emit_event: bool) -> Self {
		self.emit_event = emit_event;
		self
	}

	pub fn with_only_self(mut self, only_self: bool) -> Self {
		self.only_self = only_self;
		self
	}
}

impl Default for UpdateOptions {
	fn default() -> Self {
		Self {
			only_self: false,
			emit_event: true,
		}
	}
}
