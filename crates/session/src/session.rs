// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use std::sync::Arc;

use crate::{
	chain::{Chain, StepError},
	config::{CompatibilityMode, SessionConfig},
	executor::{Entity, Executor, Operation},
};

/// A reactive persistence session.
///
/// Cheap to clone; clones share the executor and the compatibility
/// mode chosen at construction. Sessions hold no mutable state of
/// their own, so independent sessions can have chains in flight
/// concurrently.
#[derive(Clone)]
pub struct Session {
	executor: Arc<dyn Executor>,
	mode: CompatibilityMode,
}

impl Session {
	/// The compatibility mode is derived from the config here, once;
	/// it cannot change for the session's lifetime.
	pub fn new(executor: Arc<dyn Executor>, config: &SessionConfig) -> Self {
		Self {
			executor,
			mode: config.compatibility_mode(),
		}
	}

	pub fn compatibility_mode(&self) -> CompatibilityMode {
		self.mode
	}

	/// Queues the entity for insertion.
	pub async fn persist(&self, entity: Entity) -> Result<(), StepError> {
		self.execute(Operation::Persist(entity)).await
	}

	/// Writes queued operations out to the engine.
	pub async fn flush(&self) -> Result<(), StepError> {
		self.execute(Operation::Flush).await
	}

	async fn execute(&self, op: Operation) -> Result<(), StepError> {
		self.executor.execute(op).await.map_err(StepError::from)
	}

	/// Starts an ordered chain of asynchronous steps bound to this
	/// session's failure contract.
	pub fn chain(&self) -> Chain {
		Chain::new(self.mode)
	}
}
