//! Origin authentication
//!
//! Each executor variant proves that a queue request comes from the single
//! trusted upstream address with a different cross-domain mechanism. All of
//! them produce the same [`Authorized`] proof, which is the only way to reach
//! [`crate::executor::queue`].

use soroban_sdk::{Env, Symbol, Val, Vec};

use crate::engine::single_arg;
use crate::error::ExecutorError;
use crate::events;
use crate::executor;
use crate::storage;
use crate::types::EvmAddress;

pub mod alias;
pub mod messenger;
pub mod relay;

pub use alias::{AliasAuthenticator, AliasEnvelope};
pub use messenger::{MessengerAuthenticator, MessengerEnvelope};
pub use relay::{RelayEnvelope, StateSyncAuthenticator};

/// Proof that a queue request was authenticated against the trusted origin
#[derive(Debug)]
pub struct Authorized {
    _sealed: (),
}

impl Authorized {
    pub(crate) fn new() -> Self {
        Self { _sealed: () }
    }
}

/// Verifies that an inbound envelope originates from the trusted upstream address
pub trait OriginAuthenticator {
    type Envelope;

    fn authenticate(env: &Env, envelope: &Self::Envelope) -> Result<Authorized, ExecutorError>;
}

/// Self-amendment hook for configuration fields owned by an authenticator
pub trait SelfAmendable {
    /// Apply a self-targeting action to one of this authenticator's fields.
    /// Returns `None` when `function` is not one of its updaters.
    fn dispatch_self_call(
        env: &Env,
        function: &Symbol,
        args: &Vec<Val>,
    ) -> Option<Result<(), ExecutorError>>;
}

/// Replace the upstream governance executor trusted by the alias and messenger variants
pub fn update_ethereum_governance_executor(
    env: &Env,
    ethereum_governance_executor: EvmAddress,
) -> Result<(), ExecutorError> {
    executor::require_self(env)?;

    let old = storage::get_ethereum_governance_executor(env)?;
    storage::set_ethereum_governance_executor(env, &ethereum_governance_executor);

    events::emit_ethereum_governance_executor_update(env, &old, &ethereum_governance_executor);
    Ok(())
}

fn dispatch_ethereum_governance_executor_update(
    env: &Env,
    function: &Symbol,
    args: &Vec<Val>,
) -> Option<Result<(), ExecutorError>> {
    if *function != Symbol::new(env, "update_governance_executor") {
        return None;
    }
    Some(
        single_arg(env, args)
            .and_then(|executor| update_ethereum_governance_executor(env, executor)),
    )
}
