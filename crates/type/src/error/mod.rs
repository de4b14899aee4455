// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use std::{
	error,
	fmt::{self, Display, Formatter},
};

use serde::{Deserialize, Serialize};

mod classify;

pub use classify::{classify, RaisedError};

/// Five character SQLSTATE code reported by the storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlState(String);

impl SqlState {
	pub fn new(code: impl Into<String>) -> Self {
		Self(code.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The two character SQLSTATE class, e.g. `23` for integrity
	/// constraint violations.
	///
	/// Engine-supplied codes are opaque; if the code is shorter than
	/// two bytes or not sliceable at a char boundary, the whole code
	/// is returned instead of panicking.
	pub fn class(&self) -> &str {
		self.0.get(..2).unwrap_or(&self.0)
	}
}

impl Display for SqlState {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// An error raised by the storage engine or its driver.
///
/// Opaque to everything above the translation layer, which only reads
/// it. Immutable once raised; nested driver causes are kept as an
/// owned chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineError {
	message: String,
	sqlstate: Option<SqlState>,
	vendor_code: Option<i32>,
	cause: Option<Box<EngineError>>,
}

impl EngineError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			sqlstate: None,
			vendor_code: None,
			cause: None,
		}
	}

	pub fn with_sqlstate(mut self, sqlstate: impl Into<String>) -> Self {
		self.sqlstate = Some(SqlState::new(sqlstate));
		self
	}

	pub fn with_vendor_code(mut self, code: i32) -> Self {
		self.vendor_code = Some(code);
		self
	}

	pub fn with_cause(mut self, cause: EngineError) -> Self {
		self.cause = Some(Box::new(cause));
		self
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn sqlstate(&self) -> Option<&SqlState> {
		self.sqlstate.as_ref()
	}

	pub fn vendor_code(&self) -> Option<i32> {
		self.vendor_code
	}
}

impl Display for EngineError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.sqlstate {
			Some(state) => write!(f, "[{state}] {}", self.message),
			None => f.write_str(&self.message),
		}
	}
}

impl error::Error for EngineError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		self.cause.as_deref().map(|cause| cause as &(dyn error::Error + 'static))
	}
}

/// Semantic category of a persistence failure.
///
/// Closed set: consumers match on the kind instead of probing the
/// concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceKind {
	DuplicateKey,
	OptimisticLock,
	ConstraintViolation,
	Connection,
	Generic,
}

impl Display for PersistenceKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			PersistenceKind::DuplicateKey => f.write_str("duplicate key"),
			PersistenceKind::OptimisticLock => f.write_str("optimistic lock"),
			PersistenceKind::ConstraintViolation => f.write_str("constraint violation"),
			PersistenceKind::Connection => f.write_str("connection"),
			PersistenceKind::Generic => f.write_str("persistence"),
		}
	}
}

/// A classified persistence failure.
///
/// Created once per failed operation, either by [`classify`] or
/// directly via [`PersistenceError::new`], and never mutated
/// afterwards. The originating [`EngineError`] is always carried as
/// the cause; nothing in its chain is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceError {
	kind: PersistenceKind,
	message: String,
	cause: EngineError,
}

impl PersistenceError {
	/// Attaches the engine failure as the cause of a classified
	/// error. The input is taken as is; no logging, no mutation.
	pub fn new(
		kind: PersistenceKind,
		message: impl Into<String>,
		cause: EngineError,
	) -> Self {
		Self {
			kind,
			message: message.into(),
			cause,
		}
	}

	pub fn kind(&self) -> PersistenceKind {
		self.kind
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	pub fn engine_cause(&self) -> &EngineError {
		&self.cause
	}
}

impl Display for PersistenceError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

impl error::Error for PersistenceError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		Some(&self.cause)
	}
}

/// Uniform failure carrier delivered to a chain's terminal handler.
///
/// Wraps exactly one [`PersistenceError`]; the chain adapter is the
/// only producer. Consumers reach the classified error through
/// [`CompletionError::persistence`] or by walking `source()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionError(PersistenceError);

impl CompletionError {
	pub fn new(inner: PersistenceError) -> Self {
		Self(inner)
	}

	pub fn persistence(&self) -> &PersistenceError {
		&self.0
	}

	pub fn into_persistence(self) -> PersistenceError {
		self.0
	}
}

impl Display for CompletionError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "chain step failed: {}", self.0)
	}
}

impl error::Error for CompletionError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		Some(&self.0)
	}
}
