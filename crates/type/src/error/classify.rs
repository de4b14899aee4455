// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use super::{EngineError, PersistenceError, PersistenceKind};

/// A failure surfaced by a chain step, before translation.
#[derive(Debug, Clone, PartialEq)]
pub enum RaisedError {
	Engine(EngineError),
	Persistence(PersistenceError),
}

impl From<EngineError> for RaisedError {
	fn from(err: EngineError) -> Self {
		RaisedError::Engine(err)
	}
}

impl From<PersistenceError> for RaisedError {
	fn from(err: PersistenceError) -> Self {
		RaisedError::Persistence(err)
	}
}

/// Classifies a raised failure into a [`PersistenceError`].
///
/// Idempotent: an already classified error passes through unchanged,
/// same kind, same cause. Infallible: an engine error that matches no
/// known category falls back to [`PersistenceKind::Generic`] rather
/// than failing classification itself.
pub fn classify(raised: RaisedError) -> PersistenceError {
	match raised {
		RaisedError::Persistence(err) => err,
		RaisedError::Engine(err) => {
			let kind = kind_of(&err);
			let message = format!("{} failure: {}", kind, err.message());
			PersistenceError::new(kind, message, err)
		}
	}
}

// Vendor codes without a usable SQLSTATE: MySQL 1062, SQL Server
// 2601/2627, Oracle ORA-00001.
const DUPLICATE_KEY_VENDOR_CODES: [i32; 4] = [1, 1062, 2601, 2627];

fn kind_of(err: &EngineError) -> PersistenceKind {
	if let Some(code) = err.vendor_code() {
		if DUPLICATE_KEY_VENDOR_CODES.contains(&code) {
			return PersistenceKind::DuplicateKey;
		}
	}

	let Some(state) = err.sqlstate() else {
		return PersistenceKind::Generic;
	};

	match state.as_str() {
		"23505" => PersistenceKind::DuplicateKey,
		"40001" | "40P01" => PersistenceKind::OptimisticLock,
		_ => match state.class() {
			"23" => PersistenceKind::ConstraintViolation,
			"08" => PersistenceKind::Connection,
			_ => PersistenceKind::Generic,
		},
	}
}
