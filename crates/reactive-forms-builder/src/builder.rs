//! Builder convenience API

use reactive_forms_core::{
	AsyncValidator, Control, ControlOptions, FormArray, FormControl, FormGroup, FormState, UpdateOn, Validator,
};
use serde_json::Value;

/// Description of one node for [`FormBuilder`].
#[derive(Debug, Clone)]
pub enum ControlConfig {
	/// An existing control, used as is.
	Control(Control),
	/// A leaf with no validators.
	Value(FormState),
	/// A leaf with validators and an optional update strategy.
	Field {
		state: FormState,
		validators: Vec<Validator>,
		async_validators: Vec<AsyncValidator>,
		update_on: Option<UpdateOn>,
	},
	/// A nested group.
	Group(Vec<(String, ControlConfig)>),
	/// A nested array.
	Array(Vec<ControlConfig>),
}

impl ControlConfig {
	/// Leaf with synchronous validators.
	pub fn field(state: impl Into<FormState>, validators: impl IntoIterator<Item = Validator>) -> Self {
		Self::Field {
			state: state.into(),
			validators: validators.into_iter().collect(),
			async_validators: Vec::new(),
			update_on: None,
		}
	}

	/// Adds async validators to a [`Field`](Self::Field). Other variants are
	/// returned unchanged.
	pub fn with_async_validators(mut self, extra: impl IntoIterator<Item = AsyncValidator>) -> Self {
		if let Self::Field { async_validators, .. } = &mut self {
			async_validators.extend(extra);
		}
		self
	}

	/// Sets the update strategy of a [`Field`](Self::Field).
	pub fn with_update_on(mut self, strategy: UpdateOn) -> Self {
		if let Self::Field { update_on, .. } = &mut self {
			*update_on = Some(strategy);
		}
		self
	}

	/// Nested group from `(name, config)` pairs.
	pub fn group<I, K>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, ControlConfig)>,
		K: Into<String>,
	{
		Self::Group(entries.into_iter().map(|(name, config)| (name.into(), config)).collect())
	}

	fn build(self) -> Control {
		match self {
			Self::Control(control) => control,
			Self::Value(state) => FormControl::new(state, ControlOptions::default()).into(),
			Self::Field {
				state,
				validators,
				async_validators,
				update_on,
			} => FormBuilder::control(state, validators, async_validators, update_on).into(),
			Self::Group(entries) => FormBuilder::group(entries, ControlOptions::default()).into(),
			Self::Array(items) => FormBuilder::array(items, ControlOptions::default()).into(),
		}
	}
}

impl From<Control> for ControlConfig {
	fn from(control: Control) -> Self {
		Self::Control(control)
	}
}

impl From<FormControl> for ControlConfig {
	fn from(control: FormControl) -> Self {
		Self::Control(control.into())
	}
}

impl From<FormGroup> for ControlConfig {
	fn from(group: FormGroup) -> Self {
		Self::Control(group.into())
	}
}

impl From<FormArray> for ControlConfig {
	fn from(array: FormArray) -> Self {
		Self::Control(array.into())
	}
}

impl From<Value> for ControlConfig {
	fn from(value: Value) -> Self {
		Self::Value(FormState::from(value))
	}
}

impl From<FormState> for ControlConfig {
	fn from(state: FormState) -> Self {
		Self::Value(state)
	}
}

impl From<&str> for ControlConfig {
	fn from(value: &str) -> Self {
		Self::Value(FormState::from(value))
	}
}

/// Builds controls from [`ControlConfig`] descriptions.
///
/// `extra` carries the group or array level validators, async validators and
/// update strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBuilder;

impl FormBuilder {
	pub fn control(
		state: impl Into<FormState>,
		validators: impl IntoIterator<Item = Validator>,
		async_validators: impl IntoIterator<Item = AsyncValidator>,
		update_on: Option<UpdateOn>,
	) -> FormControl {
		let mut options = ControlOptions::new()
			.validators(validators)
			.async_validators(async_validators);
		options.update_on = update_on;
		FormControl::new(state, options)
	}

	pub fn group<I, K, C>(config: I, extra: ControlOptions) -> FormGroup
	where
		I: IntoIterator<Item = (K, C)>,
		K: Into<String>,
		C: Into<ControlConfig>,
	{
		let controls: Vec<(String, Control)> = config
			.into_iter()
			.map(|(name, config)| (name.into(), config.into().build()))
			.collect();
		FormGroup::new(controls, extra)
	}

	pub fn array<I, C>(config: I, extra: ControlOptions) -> FormArray
	where
		I: IntoIterator<Item = C>,
		C: Into<ControlConfig>,
	{
		let controls: Vec<Control> = config.into_iter().map(|config| config.into().build()).collect();
		FormArray::new(controls, extra)
	}
}
