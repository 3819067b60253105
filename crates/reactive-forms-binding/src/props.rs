//! Input-prop mapping

use reactive_forms_core::state::truthy;
use reactive_forms_core::{FormControl, UpdateOn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rendering host. Native hosts use `editable` instead of `disabled` for
/// text-like inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostPlatform {
	#[default]
	Web,
	Native,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
	Text,
	Checkbox,
	/// A radio button carrying its own option value.
	Radio(Value),
	Select,
	Switch,
}

impl InputKind {
	fn type_attr(&self) -> Option<&'static str> {
		match self {
			Self::Checkbox => Some("checkbox"),
			Self::Radio(_) => Some("radio"),
			_ => None,
		}
	}
}

/// Props for one input element, plus the event intakes of its control.
#[derive(Debug, Clone, Serialize)]
pub struct InputProps {
	pub value: Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub checked: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub disabled: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub editable: Option<bool>,
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub input_type: Option<&'static str>,
	#[serde(skip)]
	control: FormControl,
}

impl InputProps {
	pub fn control(&self) -> &FormControl {
		&self.control
	}

	pub fn on_change(&self, value: Value) {
		self.control.on_change(value);
	}

	/// Change intake for radio buttons: selects this option's value.
	pub fn select(&self) {
		self.control.on_change(self.value.clone());
	}

	pub fn on_blur(&self) {
		self.control.on_blur();
	}

	pub fn on_focus(&self) {
		self.control.on_focus();
	}
}

/// Maps `control` onto the props of an input of the given kind.
///
/// Controls that do not commit on change show their pending buffer, so
/// uncommitted input stays visible. A null value is shown as `""`.
pub fn input_props(control: &FormControl, kind: &InputKind, platform: HostPlatform) -> InputProps {
	let shown = if control.update_on() == UpdateOn::Change {
		control.value()
	} else {
		control.pending_value()
	};
	let shown = match shown {
		Value::Null => Value::String(String::new()),
		other => other,
	};

	let (disabled, editable) = match (platform, kind) {
		(HostPlatform::Native, InputKind::Switch) | (HostPlatform::Web, _) => (Some(control.disabled()), None),
		(HostPlatform::Native, _) => (None, Some(control.enabled())),
	};

	let (value, checked) = match kind {
		InputKind::Checkbox => {
			let checked = truthy(&shown);
			(shown, Some(checked))
		}
		InputKind::Radio(option) => (option.clone(), Some(shown == *option)),
		_ => (shown, None),
	};

	InputProps {
		value,
		checked,
		disabled,
		editable,
		input_type: kind.type_attr(),
		control: control.clone(),
	}
}
