// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

//! Reactive persistence session for Tidal.
//!
//! A [`Session`] drives ordered chains of asynchronous steps against a
//! storage engine reached through the [`Executor`] seam. The session's
//! job is failure translation: a synchronous engine error raised
//! inside any step surfaces to the chain's terminal handler as a
//! rejected step, classified and with its full cause chain intact,
//! never as an error escaping the call that started the chain.
//!
//! The shape of the observed failure is fixed per session by
//! [`CompatibilityMode`]: the default contract wraps the classified
//! error in a completion carrier, the legacy 5.1 contract presents it
//! bare.

pub mod chain;
pub mod config;
pub mod executor;
pub mod session;

pub use chain::{Chain, ChainError, StepError};
pub use config::{
	CompatibilityMode, ConfigError, SessionConfig,
	LEGACY_EXCEPTION_COMPLIANCE,
};
pub use executor::{Entity, Executor, Operation};
pub use session::Session;
