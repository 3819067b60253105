//! Async validators running on a tokio `LocalSet`

use reactive_forms::core::runtime::TokioLocalSpawner;
use reactive_forms::core::validators::{self, AsyncValidator};
use reactive_forms::prelude::*;
use reactive_forms_integration_tests::init_tracing;
use serde_json::json;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;

const LOOKUP_DELAY: Duration = Duration::from_millis(20);

// Reports `taken` for "admin" after a simulated lookup.
fn availability() -> AsyncValidator {
	AsyncValidator::new(|control: &Control| {
		let value = control.value();
		async move {
			tokio::time::sleep(LOOKUP_DELAY).await;
			Ok((value == json!("admin")).then(|| validators::error("taken", true)))
		}
	})
}

fn username() -> FormControl {
	FormControl::new(
		json!(""),
		ControlOptions::new()
			.async_validator(availability())
			.spawner(Rc::new(TokioLocalSpawner)),
	)
}

#[tokio::test]
async fn test_delayed_validation_settles() {
	init_tracing();
	LocalSet::new()
		.run_until(async {
			// Arrange
			let control = username();
			tokio::time::sleep(LOOKUP_DELAY * 3).await;

			// Act
			control.set_value(json!("admin"), UpdateOptions::default()).unwrap();

			// Assert
			assert_eq!(control.status(), ControlStatus::Pending);
			tokio::time::sleep(LOOKUP_DELAY * 3).await;
			assert_eq!(control.status(), ControlStatus::Invalid);
			assert!(control.has_error("taken"));
		})
		.await;
}

#[tokio::test]
async fn test_newer_value_wins_over_slower_lookup() {
	init_tracing();
	LocalSet::new()
		.run_until(async {
			// Arrange
			let control = username();
			control.set_value(json!("admin"), UpdateOptions::default()).unwrap();

			// Act
			control.set_value(json!("ann"), UpdateOptions::default()).unwrap();
			tokio::time::sleep(LOOKUP_DELAY * 3).await;

			// Assert
			assert_eq!(control.status(), ControlStatus::Valid);
			assert!(!control.has_error("taken"));
		})
		.await;
}
