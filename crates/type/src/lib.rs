// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

//! Persistence failure model for Tidal.
//!
//! This crate defines the three layers every failed operation moves
//! through on its way to a chain's terminal handler:
//!
//! - [`EngineError`] — the opaque error raised by the storage engine
//!   or its driver.
//! - [`PersistenceError`] — the classified, library level
//!   representation, carrying the engine error as its cause.
//! - [`CompletionError`] — the uniform carrier a chain hands to its
//!   terminal handler.
//!
//! The whole chain is walkable through [`std::error::Error::source`]
//! and is acyclic by construction.

pub mod error;

pub use error::{
	classify, CompletionError, EngineError, PersistenceError,
	PersistenceKind, RaisedError, SqlState,
};
