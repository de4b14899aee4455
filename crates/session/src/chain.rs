// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	error,
	fmt::{self, Display, Formatter},
	future::Future,
};

use futures_util::future::BoxFuture;
use tidal_type::{classify, CompletionError, EngineError, PersistenceError};
use tracing::debug;

use crate::config::CompatibilityMode;

/// A failure raised inside a chain step, before translation.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
	#[error(transparent)]
	Engine(#[from] EngineError),
	#[error(transparent)]
	Persistence(#[from] PersistenceError),
}

impl From<StepError> for tidal_type::RaisedError {
	fn from(err: StepError) -> Self {
		match err {
			StepError::Engine(e) => {
				tidal_type::RaisedError::Engine(e)
			}
			StepError::Persistence(p) => {
				tidal_type::RaisedError::Persistence(p)
			}
		}
	}
}

/// The failure observed by a chain's terminal handler.
///
/// Which variant appears is decided by the session's
/// [`CompatibilityMode`], never by the kind of failure. Walking
/// `source()` from either variant reaches the originating
/// [`EngineError`].
#[derive(Debug)]
pub enum ChainError {
	/// Default contract: the classified error, exactly one carrier
	/// deep.
	Completion(CompletionError),
	/// Legacy 5.1 contract: the classified error itself.
	Persistence(PersistenceError),
}

impl ChainError {
	/// The classified error, regardless of contract shape.
	pub fn persistence(&self) -> &PersistenceError {
		match self {
			ChainError::Completion(err) => err.persistence(),
			ChainError::Persistence(err) => err,
		}
	}
}

impl Display for ChainError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ChainError::Completion(_) => {
				f.write_str("chain completed exceptionally")
			}
			ChainError::Persistence(err) => Display::fmt(err, f),
		}
	}
}

impl error::Error for ChainError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		match self {
			ChainError::Completion(err) => Some(err),
			ChainError::Persistence(err) => Some(err),
		}
	}
}

type StepFn =
	Box<dyn FnOnce() -> BoxFuture<'static, Result<(), StepError>> + Send>;

/// An ordered sequence of asynchronous steps sharing one failure
/// contract.
///
/// Steps run strictly in order, one at a time, each awaited to
/// completion before its successor starts. The first failure short
/// circuits the chain: later steps are never invoked and the
/// translated failure is returned from [`Chain::run`].
pub struct Chain {
	mode: CompatibilityMode,
	steps: Vec<StepFn>,
}

impl Chain {
	pub(crate) fn new(mode: CompatibilityMode) -> Self {
		Self {
			mode,
			steps: Vec::new(),
		}
	}

	/// Appends a step scheduled after every step queued so far.
	pub fn then<F, Fut>(mut self, step: F) -> Self
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = Result<(), StepError>> + Send + 'static,
	{
		self.steps.push(Box::new(move || Box::pin(step())));
		self
	}

	/// Drives the chain to completion.
	pub async fn run(self) -> Result<(), ChainError> {
		let mode = self.mode;
		for (index, step) in self.steps.into_iter().enumerate() {
			if let Err(err) = step().await {
				debug!(
					step = index,
					"chain step failed, short circuiting"
				);
				return Err(lift(err, mode));
			}
		}
		Ok(())
	}
}

/// Translates a step failure into the shape the terminal handler
/// observes.
///
/// Classification is idempotent, carrier wrapping is not: under
/// [`CompatibilityMode::Default`] the classified error ends up exactly
/// one carrier deep, never zero, never two. Translation itself cannot
/// fail, so the original failure is never displaced.
fn lift(err: StepError, mode: CompatibilityMode) -> ChainError {
	let persistence = classify(err.into());
	debug!(
		kind = %persistence.kind(),
		mode = ?mode,
		"translated step failure"
	);
	match mode {
		CompatibilityMode::Default => ChainError::Completion(
			CompletionError::new(persistence),
		),
		// Pre-rework shape for sessions that opt in via the
		// `legacy-exception-compliance` option.
		CompatibilityMode::Legacy51 => {
			ChainError::Persistence(persistence)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{
		atomic::{AtomicUsize, Ordering},
		Arc,
	};

	use tidal_type::PersistenceKind;

	use super::*;

	fn duplicate_key() -> EngineError {
		EngineError::new("duplicate key value").with_sqlstate("23505")
	}

	#[test]
	fn test_lift_wraps_once_in_default_mode() {
		let err = lift(
			StepError::Engine(duplicate_key()),
			CompatibilityMode::Default,
		);
		let ChainError::Completion(completion) = err else {
			panic!("expected completion carrier");
		};
		assert_eq!(
			completion.persistence().kind(),
			PersistenceKind::DuplicateKey
		);
	}

	#[test]
	fn test_lift_keeps_classified_error_one_carrier_deep() {
		let classified = classify(duplicate_key().into());
		let err = lift(
			StepError::Persistence(classified.clone()),
			CompatibilityMode::Default,
		);
		let ChainError::Completion(completion) = err else {
			panic!("expected completion carrier");
		};
		// One carrier, not two: unwrapping yields the classified
		// error itself.
		assert_eq!(completion.into_persistence(), classified);
	}

	#[test]
	fn test_lift_presents_bare_error_in_legacy_mode() {
		let err = lift(
			StepError::Engine(duplicate_key()),
			CompatibilityMode::Legacy51,
		);
		let ChainError::Persistence(persistence) = err else {
			panic!("expected bare persistence error");
		};
		assert_eq!(persistence.kind(), PersistenceKind::DuplicateKey);
	}

	#[tokio::test]
	async fn test_steps_run_in_order() {
		let order = Arc::new(AtomicUsize::new(0));
		let mut chain = Chain::new(CompatibilityMode::Default);
		for expected in 0..4 {
			let order = Arc::clone(&order);
			chain = chain.then(move || async move {
				let seen = order.fetch_add(1, Ordering::SeqCst);
				assert_eq!(seen, expected);
				Ok(())
			});
		}
		chain.run().await.unwrap();
		assert_eq!(order.load(Ordering::SeqCst), 4);
	}

	#[tokio::test]
	async fn test_empty_chain_completes() {
		Chain::new(CompatibilityMode::Default).run().await.unwrap();
	}
}
