#![no_std]

//! # Bridge Executor Base
//!
//! Shared timelock core for cross-domain governance executors. Batches of
//! calls ("actions sets") arrive from a single trusted upstream governance
//! address, wait out a configurable delay, may be canceled by a guardian, and
//! expire when not executed within the grace period.
//!
//! ## Structure
//!
//! - [`executor`]: queue / execute / cancel and the configuration updaters
//! - [`engine`]: runs the actions of a set
//! - [`auth`]: the three origin authenticators (relay-attested, alias-derived,
//!   messenger-attested)
//!
//! Variant contracts wire their entrypoints to these functions; all state lives
//! in the variant contract's own storage.
//!
//! ## Code replacement
//!
//! An executed actions set can target the executor itself and call `upgrade`,
//! which replaces the executor's code while keeping its storage. Delegate-mode
//! actions also let the target spend the executor's native asset. Anything the
//! trusted origin queues can therefore rewrite the executor entirely; the
//! guardian's cancel power and the timelock are the only safeguards.
//!
//! ## Aliased origins
//!
//! [`AliasAuthenticator`] trusts a contract address derived from the upstream
//! sender. No deployed contract can hold that id, so the aliased caller's
//! `require_auth` only passes where the host environment supplies
//! authorization for it; a stock network never does.

pub mod actions;
pub mod auth;
pub mod engine;
pub mod error;
pub mod events;
pub mod executor;
pub mod storage;
pub mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use actions::{hash_action, ActionsPayload};
pub use auth::{
    AliasAuthenticator, AliasEnvelope, Authorized, MessengerAuthenticator, MessengerEnvelope,
    OriginAuthenticator, RelayEnvelope, SelfAmendable, StateSyncAuthenticator,
};
pub use error::ExecutorError;
pub use types::{
    ActionsBatch, ActionsSet, ActionsSetState, EvmAddress, ExecutorConfig, ExecutorParams,
    MINIMUM_GRACE_PERIOD,
};
