use super::{AsyncValidator, ValidationErrors, Validator};
use futures::future::try_join_all;

/// Merges error maps in order. Later maps overwrite earlier ones on a shared
/// key. Returns `None` when nothing is left.
pub fn merge_errors<I>(results: I) -> Option<ValidationErrors>
where
	I: IntoIterator<Item = Option<ValidationErrors>>,
{
	let merged = results
		.into_iter()
		.flatten()
		.fold(ValidationErrors::new(), |mut acc, errors| {
			acc.extend(errors);
			acc
		});
	(!merged.is_empty()).then_some(merged)
}

/// Combines validators into one that runs all of them and merges the results.
///
/// Absent entries are discarded. Returns `None` when no validator is left.
///
/// ```
/// use reactive_forms_core::{ControlOptions, FormControl, validators};
/// use serde_json::json;
///
/// let both = validators::compose([validators::required(), validators::min_length(3)]).unwrap();
/// let control = FormControl::new(json!(""), ControlOptions::default());
/// assert_eq!(both.validate(&control), Some(validators::error("required", true)));
/// ```
pub fn compose<I, V>(validators: I) -> Option<Validator>
where
	I: IntoIterator<Item = V>,
	V: Into<Option<Validator>>,
{
	let present: Vec<Validator> = validators.into_iter().filter_map(Into::into).collect();
	match present.len() {
		0 => None,
		1 => present.into_iter().next(),
		_ => Some(Validator::new(move |control| {
			merge_errors(present.iter().map(|validator| validator.validate(control)))
		})),
	}
}

/// Combines async validators into one that runs them concurrently.
///
/// The combined future fails as soon as any validator fails; otherwise the
/// results are merged like [`compose`].
pub fn compose_async<I, V>(validators: I) -> Option<AsyncValidator>
where
	I: IntoIterator<Item = V>,
	V: Into<Option<AsyncValidator>>,
{
	let present: Vec<AsyncValidator> = validators.into_iter().filter_map(Into::into).collect();
	match present.len() {
		0 => None,
		1 => present.into_iter().next(),
		_ => Some(AsyncValidator::new(move |control| {
			let pending: Vec<_> = present.iter().map(|validator| validator.validate(control)).collect();
			async move { try_join_all(pending).await.map(merge_errors) }
		})),
	}
}
