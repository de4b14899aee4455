// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	collections::HashSet,
	sync::{Mutex, Once},
};

use futures_util::future::BoxFuture;
use tidal_session::{Entity, Executor, Operation};
use tidal_type::EngineError;

/// In-memory engine with a unique constraint on `unique_name`.
///
/// Persisted rows stay pending until flush, matching the write-behind
/// behaviour of a real session: the constraint violation is raised by
/// the flush, not the persist.
pub struct MemoryEngine {
	state: Mutex<EngineState>,
}

#[derive(Default)]
struct EngineState {
	pending: Vec<Entity>,
	unique: HashSet<String>,
}

impl MemoryEngine {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(EngineState::default()),
		}
	}
}

impl Executor for MemoryEngine {
	fn execute(
		&self,
		op: Operation,
	) -> BoxFuture<'_, Result<(), EngineError>> {
		Box::pin(async move {
			let mut state = self.state.lock().unwrap();
			let EngineState {
				pending,
				unique,
			} = &mut *state;
			match op {
				Operation::Persist(entity) => {
					pending.push(entity);
					Ok(())
				}
				Operation::Flush => {
					for entity in pending.drain(..) {
						if !unique.insert(
							entity.unique_name.clone(),
						) {
							return Err(duplicate_key(
								&entity.unique_name,
							));
						}
					}
					Ok(())
				}
			}
		})
	}
}

fn duplicate_key(value: &str) -> EngineError {
	EngineError::new(format!(
		"duplicate key value {value:?} violates unique constraint \"person_unique_name_key\""
	))
	.with_sqlstate("23505")
}

pub fn init_tracing() {
	static INIT: Once = Once::new();
	INIT.call_once(|| {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(
				tracing_subscriber::EnvFilter::from_default_env(),
			)
			.with_test_writer()
			.try_init();
	});
}
