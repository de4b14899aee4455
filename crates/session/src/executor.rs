// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use futures_util::future::BoxFuture;
use tidal_type::EngineError;

/// Minimal record persisted through a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
	pub id: String,
	pub unique_name: String,
}

/// A unit of work handed to the storage engine.
#[derive(Debug, Clone)]
pub enum Operation {
	/// Queue the entity for insertion.
	Persist(Entity),
	/// Write queued operations out to the engine.
	Flush,
}

/// Seam to the external storage engine.
///
/// Implementations execute operations asynchronously and raise
/// [`EngineError`] on failure; constraint enforcement, pooling, and
/// transactions all live behind this trait.
pub trait Executor: Send + Sync {
	fn execute(
		&self,
		op: Operation,
	) -> BoxFuture<'_, Result<(), EngineError>>;
}
