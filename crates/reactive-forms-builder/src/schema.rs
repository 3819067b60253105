//! Serializable form descriptions
//!
//! A schema node is one of three shapes, told apart by their fields:
//!
//! - `{"controls": {"name": <node>, ...}, "options": ..., "meta": ...}` builds a group
//! - `{"controls": [<node>, ...], "options": ..., "meta": ...}` builds an array
//! - `{"value": ..., "disabled": ..., "options": ..., "meta": ...}` builds a leaf
//!
//! Group entries whose name starts with [`STATIC_FIELD_PREFIX`] describe
//! render-only content and produce no control.

use indexmap::IndexMap;
use reactive_forms_core::{
	Control, ControlOptions, FormArray, FormControl, FormGroup, FormResult, FormState, UpdateOn, Validator,
	validators,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name prefix of group entries that are skipped when building.
pub const STATIC_FIELD_PREFIX: &str = "$field_";

/// Named built-in validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidatorSpec {
	Required,
	RequiredTrue,
	Email,
	Min { min: f64 },
	Max { max: f64 },
	MinLength { min_length: usize },
	MaxLength { max_length: usize },
	Pattern { pattern: String },
}

impl ValidatorSpec {
	/// Fails only for a `pattern` that does not compile.
	pub fn to_validator(&self) -> FormResult<Validator> {
		Ok(match self {
			Self::Required => validators::required(),
			Self::RequiredTrue => validators::required_true(),
			Self::Email => validators::email(),
			Self::Min { min } => validators::min(*min),
			Self::Max { max } => validators::max(*max),
			Self::MinLength { min_length } => validators::min_length(*min_length),
			Self::MaxLength { max_length } => validators::max_length(*max_length),
			Self::Pattern { pattern } => validators::pattern(pattern)?,
		})
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaOptions {
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub validators: Vec<ValidatorSpec>,
	#[serde(default, alias = "updateOn", skip_serializing_if = "Option::is_none")]
	pub update_on: Option<UpdateOn>,
}

impl SchemaOptions {
	fn to_control_options(&self, meta: &Map<String, Value>) -> FormResult<ControlOptions> {
		let validators = self
			.validators
			.iter()
			.map(ValidatorSpec::to_validator)
			.collect::<FormResult<Vec<_>>>()?;
		let mut options = ControlOptions::new().validators(validators);
		options.update_on = self.update_on;
		options.meta = meta.clone();
		Ok(options)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSchema {
	pub controls: IndexMap<String, FormSchema>,
	#[serde(default)]
	pub options: SchemaOptions,
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySchema {
	pub controls: Vec<FormSchema>,
	#[serde(default)]
	pub options: SchemaOptions,
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlSchema {
	#[serde(default)]
	pub value: Value,
	#[serde(default)]
	pub disabled: bool,
	#[serde(default)]
	pub options: SchemaOptions,
	#[serde(default, skip_serializing_if = "Map::is_empty")]
	pub meta: Map<String, Value>,
}

/// One node of a serializable form description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormSchema {
	Group(GroupSchema),
	Array(ArraySchema),
	Control(ControlSchema),
}

impl FormSchema {
	pub fn from_json(json: &str) -> FormResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn from_value(value: Value) -> FormResult<Self> {
		Ok(serde_json::from_value(value)?)
	}

	/// Builds the described tree.
	pub fn build(&self) -> FormResult<Control> {
		match self {
			Self::Group(group) => {
				let mut controls = Vec::with_capacity(group.controls.len());
				for (name, child) in &group.controls {
					if name.starts_with(STATIC_FIELD_PREFIX) {
						tracing::debug!(name = %name, "skipping static schema entry");
						continue;
					}
					controls.push((name.clone(), child.build()?));
				}
				let options = group.options.to_control_options(&group.meta)?;
				Ok(FormGroup::new(controls, options).into())
			}
			Self::Array(array) => {
				let controls = array
					.controls
					.iter()
					.map(FormSchema::build)
					.collect::<FormResult<Vec<_>>>()?;
				let options = array.options.to_control_options(&array.meta)?;
				Ok(FormArray::new(controls, options).into())
			}
			Self::Control(leaf) => {
				let options = leaf.options.to_control_options(&leaf.meta)?;
				let state = FormState::boxed(leaf.value.clone(), leaf.disabled);
				Ok(FormControl::new(state, options).into())
			}
		}
	}
}
