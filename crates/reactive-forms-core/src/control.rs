//! Control tree
//!
//! [`Control`] is a reference-counted handle to one node of a form tree. The three
//! node kinds share every algorithm in this module (status calculation, value and
//! validity propagation, interaction flags, error lookup) and differ only in how
//! they store and aggregate children:
//!
//! | Kind | Handle | Aggregate value |
//! |------|--------|-----------------|
//! | [`ControlKind::Leaf`] | [`FormControl`] | its own value |
//! | [`ControlKind::Group`] | [`FormGroup`] | object of enabled children by name |
//! | [`ControlKind::Array`] | [`FormArray`] | array of enabled children in order |
//!
//! A container owns its children. A child only keeps a [`Weak`] back-reference to
//! its container, used for upward propagation and update-strategy inheritance.
//!
//! ## Propagation
//!
//! Every commit runs [`Control::update_value_and_validity`], which recomputes the
//! control and then its ancestors up to the root:
//!
//! ```text
//!   leaf.set_value(v)
//!     └─ leaf:   status → sync validators → async launch → emit
//!        └─ group:  aggregate → status → sync validators → async launch → emit
//!           └─ root:  ...
//! ```
//!
//! ## Borrowing
//!
//! Node state lives in a `RefCell`. No borrow is ever held across a validator
//! call, a channel emit or a call into another control, so listeners and
//! validators may freely read or mutate the tree.

mod array;
mod group;
mod leaf;
pub mod path;

pub use array::FormArray;
pub use group::FormGroup;
pub use leaf::FormControl;

use crate::channel::Channel;
use crate::error::{FormError, FormResult};
use crate::options::{ControlOptions, UpdateOptions};
use crate::runtime;
use crate::state::{ControlStatus, FormState, UpdateOn};
use crate::validators::{self, AsyncValidator, AsyncValidatorError, ValidationErrors, Validator};
use futures::future::{AbortHandle, Abortable, FutureExt};
use futures::task::{LocalSpawn, LocalSpawnExt};
use indexmap::IndexMap;
use path::{ControlPath, PathSegment};
use serde_json::{Map, Value};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// Node kind of a [`Control`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
	Leaf,
	Group,
	Array,
}

impl ControlKind {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Leaf => "FormControl",
			Self::Group => "FormGroup",
			Self::Array => "FormArray",
		}
	}
}

pub(crate) enum Children {
	Leaf,
	Group(IndexMap<String, Control>),
	Array(Vec<Control>),
}

impl Children {
	fn snapshot(&self) -> Vec<Control> {
		match self {
			Self::Leaf => Vec::new(),
			Self::Group(map) => map.values().cloned().collect(),
			Self::Array(items) => items.clone(),
		}
	}
}

pub(crate) struct ControlState {
	value: Value,
	status: ControlStatus,
	errors: Option<ValidationErrors>,
	validator: Option<Validator>,
	async_validator: Option<AsyncValidator>,
	pristine: bool,
	touched: bool,
	submitted: bool,
	update_on: Option<UpdateOn>,
	meta: Map<String, Value>,
	spawner: Option<Rc<dyn LocalSpawn>>,
	parent: Option<Weak<ControlInner>>,
	on_collection_change: Option<Rc<dyn Fn()>>,
	async_task: Option<AbortHandle>,
	async_generation: u64,
	// Leaf only.
	initial: FormState,
	pending_value: Value,
	pending_change: bool,
	pending_dirty: bool,
	pending_touched: bool,
	active: bool,
}

pub(crate) struct ControlInner {
	kind: ControlKind,
	state: RefCell<ControlState>,
	children: RefCell<Children>,
	value_changes: Channel<Value>,
	status_changes: Channel<ControlStatus>,
	state_changes: Channel<()>,
}

/// Shared handle to a node of the form tree.
///
/// Cloning is cheap and yields another handle to the same node. Equality is
/// identity.
#[derive(Clone)]
pub struct Control {
	inner: Rc<ControlInner>,
}

impl PartialEq for Control {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl Eq for Control {}

impl fmt::Debug for Control {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state();
		f.debug_struct(self.inner.kind.name())
			.field("value", &state.value)
			.field("status", &state.status)
			.field("errors", &state.errors)
			.field("pristine", &state.pristine)
			.field("touched", &state.touched)
			.finish_non_exhaustive()
	}
}

impl Control {
	pub(crate) fn from_parts(
		kind: ControlKind,
		children: Children,
		options: ControlOptions,
		initial: FormState,
	) -> Self {
		let ControlOptions {
			validators,
			async_validators,
			update_on,
			meta,
			spawner,
		} = options;
		let value = initial.value().clone();
		let state = ControlState {
			pending_value: value.clone(),
			value,
			status: ControlStatus::Valid,
			errors: None,
			validator: validators::compose(validators),
			async_validator: validators::compose_async(async_validators),
			pristine: true,
			touched: false,
			submitted: false,
			update_on,
			meta,
			spawner,
			parent: None,
			on_collection_change: None,
			async_task: None,
			async_generation: 0,
			initial,
			pending_change: false,
			pending_dirty: false,
			pending_touched: false,
			active: false,
		};
		Self {
			inner: Rc::new(ControlInner {
				kind,
				state: RefCell::new(state),
				children: RefCell::new(children),
				value_changes: Channel::new(),
				status_changes: Channel::new(),
				state_changes: Channel::new(),
			}),
		}
	}

	fn from_inner(inner: Rc<ControlInner>) -> Self {
		Self { inner }
	}

	pub(crate) fn state(&self) -> Ref<'_, ControlState> {
		self.inner.state.borrow()
	}

	pub(crate) fn state_mut(&self) -> RefMut<'_, ControlState> {
		self.inner.state.borrow_mut()
	}

	pub(crate) fn children(&self) -> Vec<Control> {
		self.inner.children.borrow().snapshot()
	}

	// ---- accessors -------------------------------------------------------

	pub fn kind(&self) -> ControlKind {
		self.inner.kind
	}

	/// Committed value. For containers, the aggregate of enabled children.
	pub fn value(&self) -> Value {
		self.state().value.clone()
	}

	pub fn status(&self) -> ControlStatus {
		self.state().status
	}

	pub fn errors(&self) -> Option<ValidationErrors> {
		self.state().errors.clone()
	}

	pub fn valid(&self) -> bool {
		self.status() == ControlStatus::Valid
	}

	pub fn invalid(&self) -> bool {
		self.status() == ControlStatus::Invalid
	}

	pub fn pending(&self) -> bool {
		self.status() == ControlStatus::Pending
	}

	pub fn disabled(&self) -> bool {
		self.status() == ControlStatus::Disabled
	}

	pub fn enabled(&self) -> bool {
		!self.disabled()
	}

	pub fn touched(&self) -> bool {
		self.state().touched
	}

	pub fn untouched(&self) -> bool {
		!self.touched()
	}

	pub fn pristine(&self) -> bool {
		self.state().pristine
	}

	pub fn dirty(&self) -> bool {
		!self.pristine()
	}

	pub fn submitted(&self) -> bool {
		self.state().submitted
	}

	pub fn meta(&self) -> Map<String, Value> {
		self.state().meta.clone()
	}

	/// Effective update strategy: own setting, else the parent's, else `change`.
	pub fn update_on(&self) -> UpdateOn {
		let (own, parent) = {
			let state = self.state();
			(state.update_on, state.parent.clone())
		};
		own.or_else(|| {
			parent
				.and_then(|weak| weak.upgrade())
				.map(|inner| Control::from_inner(inner).update_on())
		})
		.unwrap_or_default()
	}

	pub fn parent(&self) -> Option<Control> {
		self.state()
			.parent
			.as_ref()
			.and_then(Weak::upgrade)
			.map(Control::from_inner)
	}

	/// Top-most ancestor, or `self` when detached.
	pub fn root(&self) -> Control {
		let mut current = self.clone();
		while let Some(parent) = current.parent() {
			current = parent;
		}
		current
	}

	/// Notifies with the committed value after every recomputation.
	pub fn value_changes(&self) -> &Channel<Value> {
		&self.inner.value_changes
	}

	/// Notifies with the status after every recomputation.
	pub fn status_changes(&self) -> &Channel<ControlStatus> {
		&self.inner.status_changes
	}

	/// Notifies on any observable change, including interaction flags.
	pub fn state_changes(&self) -> &Channel<()> {
		&self.inner.state_changes
	}

	pub fn to_form_control(&self) -> Option<FormControl> {
		(self.kind() == ControlKind::Leaf).then(|| FormControl::from_control(self.clone()))
	}

	pub fn to_form_group(&self) -> Option<FormGroup> {
		(self.kind() == ControlKind::Group).then(|| FormGroup::from_control(self.clone()))
	}

	pub fn to_form_array(&self) -> Option<FormArray> {
		(self.kind() == ControlKind::Array).then(|| FormArray::from_control(self.clone()))
	}

	// ---- validators --------------------------------------------------------

	/// Replaces the synchronous validators. Takes effect on the next validity pass.
	pub fn set_validators(&self, validators: impl IntoIterator<Item = Validator>) {
		self.state_mut().validator = validators::compose(validators);
	}

	pub fn clear_validators(&self) {
		self.state_mut().validator = None;
	}

	/// Replaces the asynchronous validators. Takes effect on the next validity pass.
	pub fn set_async_validators(&self, validators: impl IntoIterator<Item = AsyncValidator>) {
		self.state_mut().async_validator = validators::compose_async(validators);
	}

	pub fn clear_async_validators(&self) {
		self.state_mut().async_validator = None;
	}

	pub fn validator(&self) -> Option<Validator> {
		self.state().validator.clone()
	}

	pub fn async_validator(&self) -> Option<AsyncValidator> {
		self.state().async_validator.clone()
	}

	// ---- lookup ------------------------------------------------------------

	/// Descendant at `path` (`"address.street"`, `"items.0"`, or explicit segments).
	///
	/// An empty path resolves to nothing.
	pub fn get(&self, path: impl Into<ControlPath>) -> Option<Control> {
		let path = path.into();
		if path.is_empty() {
			return None;
		}
		path.segments()
			.iter()
			.try_fold(self.clone(), |control, segment| control.child(segment))
	}

	fn child(&self, segment: &PathSegment) -> Option<Control> {
		match (&*self.inner.children.borrow(), segment) {
			(Children::Group(map), PathSegment::Name(name)) => map.get(name).cloned(),
			(Children::Group(map), PathSegment::Index(index)) => map.get(&index.to_string()).cloned(),
			(Children::Array(items), PathSegment::Index(index)) => items.get(*index).cloned(),
			(Children::Array(items), PathSegment::Name(name)) => {
				name.parse::<usize>().ok().and_then(|index| items.get(index).cloned())
			}
			(Children::Leaf, _) => None,
		}
	}

	/// Detail of error `code` on this control.
	pub fn get_error(&self, code: &str) -> Option<Value> {
		self.state()
			.errors
			.as_ref()
			.and_then(|errors| errors.get(code).cloned())
	}

	/// Detail of error `code` on the descendant at `path`.
	pub fn get_error_at(&self, code: &str, path: impl Into<ControlPath>) -> Option<Value> {
		self.get(path).and_then(|control| control.get_error(code))
	}

	pub fn has_error(&self, code: &str) -> bool {
		self.get_error(code).is_some()
	}

	pub fn has_error_at(&self, code: &str, path: impl Into<ControlPath>) -> bool {
		self.get_error_at(code, path).is_some()
	}

	// ---- value and validity --------------------------------------------------

	/// Recomputes value, errors and status, emits, then does the same for every
	/// ancestor unless `only_self` is set.
	pub fn update_value_and_validity(&self, opts: UpdateOptions) {
		self.set_initial_status();
		self.update_value();

		if self.enabled() {
			self.cancel_async_validation();
			if self.should_validate() {
				let errors = self.run_validator();
				self.state_mut().errors = errors;
				let status = self.calculate_status();
				self.state_mut().status = status;
				if matches!(status, ControlStatus::Valid | ControlStatus::Pending) {
					self.run_async_validator(opts.emit_event);
				}
			} else {
				// Deferred until submit: own validators are skipped, children still count.
				self.state_mut().errors = None;
				let status = self.calculate_status();
				self.state_mut().status = status;
			}
		}

		if opts.emit_event {
			self.emit_value_and_status();
		}

		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.update_value_and_validity(opts);
		}
	}

	/// Sets errors manually and recomputes the status of this control and its
	/// ancestors.
	///
	/// Errors set this way are replaced by the next validity pass.
	pub fn set_errors(&self, errors: Option<ValidationErrors>, emit_event: bool) {
		self.state_mut().errors = errors;
		self.update_controls_errors(emit_event);
	}

	fn update_controls_errors(&self, emit_event: bool) {
		let status = self.calculate_status();
		self.state_mut().status = status;
		if emit_event {
			self.inner.status_changes.emit(&status);
			self.inner.state_changes.emit(&());
		}
		if let Some(parent) = self.parent() {
			parent.update_controls_errors(emit_event);
		}
	}

	fn emit_value_and_status(&self) {
		let (value, status) = {
			let state = self.state();
			(state.value.clone(), state.status)
		};
		self.inner.value_changes.emit(&value);
		self.inner.status_changes.emit(&status);
		self.inner.state_changes.emit(&());
	}

	fn emit_state(&self, emit_event: bool) {
		if emit_event {
			self.inner.state_changes.emit(&());
		}
	}

	fn should_validate(&self) -> bool {
		self.update_on() != UpdateOn::Submit || self.submitted()
	}

	fn set_initial_status(&self) {
		let status = if self.all_controls_disabled() {
			ControlStatus::Disabled
		} else {
			ControlStatus::Valid
		};
		self.state_mut().status = status;
	}

	fn calculate_status(&self) -> ControlStatus {
		if self.all_controls_disabled() {
			return ControlStatus::Disabled;
		}
		let (has_errors, self_pending) = {
			let state = self.state();
			(state.errors.is_some(), state.async_task.is_some())
		};
		if has_errors {
			ControlStatus::Invalid
		} else if self_pending || self.any_controls_have_status(ControlStatus::Pending) {
			ControlStatus::Pending
		} else if self.any_controls_have_status(ControlStatus::Invalid) {
			ControlStatus::Invalid
		} else {
			ControlStatus::Valid
		}
	}

	fn all_controls_disabled(&self) -> bool {
		if self.kind() == ControlKind::Leaf {
			return self.disabled();
		}
		let children = self.children();
		if children.iter().any(Control::enabled) {
			return false;
		}
		!children.is_empty() || self.disabled()
	}

	fn any_controls<F>(&self, condition: F) -> bool
	where
		F: Fn(&Control) -> bool,
	{
		self.children()
			.iter()
			.any(|child| child.enabled() && condition(child))
	}

	fn any_controls_have_status(&self, status: ControlStatus) -> bool {
		self.any_controls(|child| child.status() == status)
	}

	fn update_value(&self) {
		let include_disabled = self.disabled();
		let value = match &*self.inner.children.borrow() {
			Children::Leaf => return,
			Children::Group(map) => Value::Object(
				map.iter()
					.filter(|(_, child)| include_disabled || child.enabled())
					.map(|(name, child)| (name.clone(), child.value()))
					.collect(),
			),
			Children::Array(items) => Value::Array(
				items
					.iter()
					.filter(|child| include_disabled || child.enabled())
					.map(Control::value)
					.collect(),
			),
		};
		self.state_mut().value = value;
	}

	fn run_validator(&self) -> Option<ValidationErrors> {
		let validator = self.state().validator.clone();
		validator.and_then(|validator| validator.validate(self))
	}

	fn resolve_spawner(&self) -> Option<Rc<dyn LocalSpawn>> {
		let own = self.state().spawner.clone();
		own.or_else(|| self.parent().and_then(|parent| parent.resolve_spawner()))
			.or_else(runtime::default_spawner)
	}

	fn run_async_validator(&self, emit_event: bool) {
		let Some(validator) = self.state().async_validator.clone() else {
			return;
		};
		let Some(spawner) = self.resolve_spawner() else {
			tracing::warn!(
				kind = self.kind().name(),
				"async validator skipped: no executor available, install one with runtime::set_default_spawner"
			);
			return;
		};

		let validation = validator.validate(self);
		let (handle, registration) = AbortHandle::new_pair();
		let generation = {
			let mut state = self.state_mut();
			state.async_generation += 1;
			state.async_task = Some(handle);
			state.status = ControlStatus::Pending;
			state.async_generation
		};

		let weak = Rc::downgrade(&self.inner);
		let task = Abortable::new(validation, registration).map(move |outcome| {
			let Ok(result) = outcome else {
				return;
			};
			match weak.upgrade() {
				Some(inner) => Control::from_inner(inner).settle_async_validation(generation, result, emit_event),
				None => tracing::debug!(generation, "async validation settled after control was dropped"),
			}
		});

		tracing::debug!(kind = self.kind().name(), generation, "async validation started");
		if let Err(err) = spawner.spawn_local(task) {
			tracing::warn!(error = %err, "executor refused async validation");
			self.state_mut().async_task = None;
			let status = self.calculate_status();
			self.state_mut().status = status;
		}
	}

	fn settle_async_validation(
		&self,
		generation: u64,
		result: Result<Option<ValidationErrors>, AsyncValidatorError>,
		emit_event: bool,
	) {
		{
			let mut state = self.state_mut();
			if state.async_generation != generation || state.async_task.is_none() {
				tracing::debug!(generation, "discarding stale async validation result");
				return;
			}
			state.async_task = None;
		}
		let errors = match result {
			Ok(errors) => errors,
			Err(err) => {
				tracing::warn!(error = %err, "async validator failed");
				Some(err.to_errors())
			}
		};
		tracing::debug!(generation, invalid = errors.is_some(), "async validation settled");
		self.set_errors(errors, emit_event);
	}

	fn cancel_async_validation(&self) {
		let task = self.state_mut().async_task.take();
		if let Some(handle) = task {
			handle.abort();
			tracing::debug!(kind = self.kind().name(), "async validation cancelled");
		}
	}

	// ---- enable / disable ----------------------------------------------------

	/// Disables this control and every descendant.
	///
	/// A disabled control has status `DISABLED`, no errors, and is left out of
	/// its parent's value and validity.
	pub fn disable(&self, opts: UpdateOptions) {
		self.cancel_async_validation();
		{
			let mut state = self.state_mut();
			state.status = ControlStatus::Disabled;
			state.errors = None;
		}
		let child_opts = UpdateOptions {
			only_self: true,
			emit_event: opts.emit_event,
		};
		for child in self.children() {
			child.disable(child_opts);
		}
		self.update_value();
		if opts.emit_event {
			self.emit_value_and_status();
		}
		self.update_ancestors(opts);
	}

	/// Enables this control and every descendant, then revalidates.
	pub fn enable(&self, opts: UpdateOptions) {
		self.state_mut().status = ControlStatus::Valid;
		let child_opts = UpdateOptions {
			only_self: true,
			emit_event: opts.emit_event,
		};
		for child in self.children() {
			child.enable(child_opts);
		}
		self.update_value_and_validity(child_opts);
		self.update_ancestors(opts);
	}

	fn update_ancestors(&self, opts: UpdateOptions) {
		if opts.only_self {
			return;
		}
		if let Some(parent) = self.parent() {
			parent.update_value_and_validity(opts);
			parent.update_pristine(opts);
			parent.update_touched(opts);
		}
	}

	// ---- interaction flags ---------------------------------------------------

	/// Marks this control and its ancestors touched.
	pub fn mark_as_touched(&self, opts: UpdateOptions) {
		self.state_mut().touched = true;
		self.emit_state(opts.emit_event);
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.mark_as_touched(opts);
		}
	}

	/// Marks this control and its descendants untouched, then recomputes the
	/// ancestors.
	pub fn mark_as_untouched(&self, opts: UpdateOptions) {
		{
			let mut state = self.state_mut();
			state.touched = false;
			state.pending_touched = false;
		}
		for child in self.children() {
			child.mark_as_untouched(opts.with_only_self(true));
		}
		self.emit_state(opts.emit_event);
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.update_touched(opts);
		}
	}

	/// Marks this control and its ancestors dirty.
	pub fn mark_as_dirty(&self, opts: UpdateOptions) {
		self.state_mut().pristine = false;
		self.emit_state(opts.emit_event);
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.mark_as_dirty(opts);
		}
	}

	/// Marks this control and its descendants pristine, then recomputes the
	/// ancestors.
	pub fn mark_as_pristine(&self, opts: UpdateOptions) {
		{
			let mut state = self.state_mut();
			state.pristine = true;
			state.pending_dirty = false;
		}
		for child in self.children() {
			child.mark_as_pristine(opts.with_only_self(true));
		}
		self.emit_state(opts.emit_event);
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.update_pristine(opts);
		}
	}

	/// Marks this control and every descendant submitted.
	pub fn mark_as_submitted(&self, opts: UpdateOptions) {
		self.set_submitted(true, opts.emit_event);
	}

	/// Clears the submitted flag on this control and every descendant.
	pub fn mark_as_unsubmitted(&self, opts: UpdateOptions) {
		self.set_submitted(false, opts.emit_event);
	}

	fn set_submitted(&self, submitted: bool, emit_event: bool) {
		self.state_mut().submitted = submitted;
		for child in self.children() {
			child.set_submitted(submitted, emit_event);
		}
		self.emit_state(emit_event);
	}

	fn update_pristine(&self, opts: UpdateOptions) {
		let pristine = !self.any_controls(Control::dirty);
		let changed = std::mem::replace(&mut self.state_mut().pristine, pristine) != pristine;
		if changed {
			self.emit_state(opts.emit_event);
		}
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.update_pristine(opts);
		}
	}

	fn update_touched(&self, opts: UpdateOptions) {
		let touched = self.any_controls(Control::touched);
		let changed = std::mem::replace(&mut self.state_mut().touched, touched) != touched;
		if changed {
			self.emit_state(opts.emit_event);
		}
		if !opts.only_self
			&& let Some(parent) = self.parent()
		{
			parent.update_touched(opts);
		}
	}

	// ---- value operations ------------------------------------------------------

	/// Strictly sets the value of this control and, for containers, of every child.
	///
	/// A group needs an object with exactly its child names, an array needs an
	/// array of exactly its length. The whole value is checked against the tree
	/// before anything changes, so a mismatch leaves the tree untouched.
	pub fn set_value(&self, value: Value, opts: UpdateOptions) -> FormResult<()> {
		self.check_value(&value)?;
		self.apply_value(value, opts);
		Ok(())
	}

	/// Leniently sets the value: entries without a matching child are ignored,
	/// children without a matching entry keep their value.
	pub fn patch_value(&self, value: Value, opts: UpdateOptions) {
		if self.kind() == ControlKind::Leaf {
			self.apply_value(value, opts);
			return;
		}
		let Some(pairs) = self.pair_children(value) else {
			return;
		};
		let child_opts = opts.with_only_self(true);
		for (child, value) in pairs {
			child.patch_value(value, child_opts);
		}
		self.update_value_and_validity(opts);
	}

	/// Resets to `value`, or to the constructed state when `None`, and marks the
	/// subtree pristine, untouched and unsubmitted.
	///
	/// A container hands each child its entry of `value` (by name or index).
	pub fn reset(&self, value: Option<Value>, opts: UpdateOptions) {
		if self.kind() == ControlKind::Leaf {
			self.reset_leaf(value, opts);
			return;
		}
		self.set_submitted(false, false);
		let entries: Vec<(Control, Option<Value>)> = {
			let children = self.inner.children.borrow();
			match (&*children, value) {
				(Children::Group(map), Some(Value::Object(mut entries))) => map
					.iter()
					.map(|(name, child)| (child.clone(), entries.remove(name)))
					.collect(),
				(Children::Array(items), Some(Value::Array(entries))) => {
					let mut entries = entries.into_iter();
					items
						.iter()
						.map(|child| (child.clone(), entries.next()))
						.collect()
				}
				(children, _) => children.snapshot().into_iter().map(|child| (child, None)).collect(),
			}
		};
		let child_opts = opts.with_only_self(true);
		for (child, value) in entries {
			child.reset(value, child_opts);
		}
		self.update_value_and_validity(opts);
		self.update_pristine(opts);
		self.update_touched(opts);
	}

	/// Value of every descendant, disabled ones included.
	pub fn get_raw_value(&self) -> Value {
		match &*self.inner.children.borrow() {
			Children::Leaf => self.value(),
			Children::Group(map) => Value::Object(
				map.iter()
					.map(|(name, child)| (name.clone(), child.get_raw_value()))
					.collect(),
			),
			Children::Array(items) => Value::Array(items.iter().map(Control::get_raw_value).collect()),
		}
	}

	fn check_value(&self, value: &Value) -> FormResult<()> {
		match &*self.inner.children.borrow() {
			Children::Leaf => Ok(()),
			Children::Group(map) => {
				let Value::Object(entries) = value else {
					return Err(FormError::unexpected("FormGroup", "an object", value));
				};
				if let Some(name) = map.keys().find(|name| !entries.contains_key(*name)) {
					return Err(FormError::MissingValue { name: name.clone() });
				}
				entries.iter().try_for_each(|(name, entry)| {
					map.get(name)
						.ok_or_else(|| FormError::NoControl { name: name.clone() })?
						.check_value(entry)
				})
			}
			Children::Array(items) => {
				let Value::Array(entries) = value else {
					return Err(FormError::unexpected("FormArray", "an array", value));
				};
				if entries.len() < items.len() {
					return Err(FormError::MissingValueAtIndex { index: entries.len() });
				}
				if entries.len() > items.len() {
					return Err(FormError::NoControlAtIndex { index: items.len() });
				}
				items
					.iter()
					.zip(entries)
					.try_for_each(|(child, entry)| child.check_value(entry))
			}
		}
	}

	fn apply_value(&self, value: Value, opts: UpdateOptions) {
		if self.kind() == ControlKind::Leaf {
			{
				let mut state = self.state_mut();
				state.pending_value = value.clone();
				state.value = value;
				state.pending_change = false;
			}
			self.update_value_and_validity(opts);
			return;
		}
		let child_opts = opts.with_only_self(true);
		for (child, value) in self.pair_children(value).unwrap_or_default() {
			child.apply_value(value, child_opts);
		}
		self.update_value_and_validity(opts);
	}

	// Matches the entries of a container value with existing children. `None`
	// when the value has the wrong shape for this container.
	fn pair_children(&self, value: Value) -> Option<Vec<(Control, Value)>> {
		let children = self.inner.children.borrow();
		match (&*children, value) {
			(Children::Group(map), Value::Object(entries)) => Some(
				entries
					.into_iter()
					.filter_map(|(name, value)| map.get(&name).map(|child| (child.clone(), value)))
					.collect(),
			),
			(Children::Array(items), Value::Array(entries)) => Some(
				items
					.iter()
					.cloned()
					.zip(entries)
					.collect(),
			),
			_ => None,
		}
	}

	// ---- submit ----------------------------------------------------------------

	/// Submits the subtree rooted here.
	///
	/// Every control is marked submitted without emitting. Buffered input is then
	/// committed and every control whose value changed or whose validation was
	/// deferred until submit is recomputed once, bottom-up. A final validity pass
	/// runs on this control and, unless `only_self` is set, its ancestors.
	pub fn handle_submit(&self, opts: UpdateOptions) {
		self.set_submitted(true, false);
		let child_opts = opts.with_only_self(true);
		let mut recomputed = false;
		for child in self.children() {
			recomputed |= child.flush_submitted(child_opts);
		}
		let committed = self.commit_pending_leaf();
		tracing::debug!(kind = self.kind().name(), recomputed, committed, "form submitted");
		self.update_value_and_validity(opts);
	}

	// Commits buffered input and recomputes controls that are stale after a
	// submit. Returns whether this control was recomputed.
	fn flush_submitted(&self, opts: UpdateOptions) -> bool {
		let mut stale = false;
		for child in self.children() {
			stale |= child.flush_submitted(opts);
		}
		stale |= self.commit_pending_leaf();
		if stale || self.update_on() == UpdateOn::Submit {
			self.update_value_and_validity(opts);
			return true;
		}
		false
	}

	/// Commits buffered leaf changes in the subtree and recomputes what changed.
	/// Returns whether anything was committed.
	///
	/// Descendants are recomputed on their own; `opts` applies to this control.
	pub fn sync_pending_controls(&self, opts: UpdateOptions) -> bool {
		let child_opts = opts.with_only_self(true);
		let mut updated = false;
		for child in self.children() {
			updated |= child.sync_pending_controls(child_opts);
		}
		updated |= self.commit_pending_leaf();
		if updated {
			self.update_value_and_validity(opts);
		}
		updated
	}

	// ---- structure -------------------------------------------------------------

	/// Callback fired when this container's children are added, removed or
	/// replaced. Attaching a control to a container replaces its callback.
	pub fn register_on_collection_change(&self, callback: impl Fn() + 'static) {
		self.state_mut().on_collection_change = Some(Rc::new(callback));
	}

	pub(crate) fn notify_collection_change(&self) {
		let callback = self.state().on_collection_change.clone();
		if let Some(callback) = callback {
			callback();
		}
	}

	pub(crate) fn adopt(&self, child: &Control) {
		let weak = Rc::downgrade(&self.inner);
		let on_change = weak.clone();
		let mut state = child.state_mut();
		if state.parent.as_ref().and_then(Weak::upgrade).is_some() {
			tracing::debug!(kind = child.kind().name(), "re-parenting control");
		}
		state.parent = Some(weak);
		state.on_collection_change = Some(Rc::new(move || {
			if let Some(parent) = on_change.upgrade() {
				parent.state_changes.emit(&());
			}
		}));
	}

	pub(crate) fn release(child: &Control) {
		let mut state = child.state_mut();
		state.parent = None;
		state.on_collection_change = None;
	}

	pub(crate) fn children_mut(&self) -> RefMut<'_, Children> {
		self.inner.children.borrow_mut()
	}

	pub(crate) fn children_ref(&self) -> Ref<'_, Children> {
		self.inner.children.borrow()
	}
}

impl AsRef<Control> for Control {
	fn as_ref(&self) -> &Control {
		self
	}
}

/// Non-owning handle to a [`Control`], for listeners stored on the control itself.
#[derive(Clone)]
pub struct WeakControl {
	inner: Weak<ControlInner>,
}

impl WeakControl {
	pub fn upgrade(&self) -> Option<Control> {
		self.inner.upgrade().map(Control::from_inner)
	}
}

impl fmt::Debug for WeakControl {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WeakControl")
			.field("alive", &(self.inner.strong_count() > 0))
			.finish()
	}
}

impl Control {
	pub fn downgrade(&self) -> WeakControl {
		WeakControl {
			inner: Rc::downgrade(&self.inner),
		}
	}
}
