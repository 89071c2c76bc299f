//! Relay-attested origin: a state-sync child relay delivers the message and
//! attests the upstream sender inside it.
//!
//! Two independent checks: the caller must be the trusted relay (`fx_child`)
//! and the sender the relay reports must be the trusted root sender.

use soroban_sdk::{log, Address, Env, Symbol, Val, Vec};

use super::{Authorized, OriginAuthenticator, SelfAmendable};
use crate::engine::single_arg;
use crate::error::ExecutorError;
use crate::events;
use crate::executor;
use crate::storage;
use crate::types::EvmAddress;

/// Message handed over by the state-sync relay
#[derive(Clone, Debug)]
pub struct RelayEnvelope {
    /// Contract delivering the message
    pub relay: Address,
    /// Relay-assigned state sync id
    pub state_id: u64,
    /// Upstream sender attested by the relay
    pub root_message_sender: EvmAddress,
}

pub struct StateSyncAuthenticator;

impl StateSyncAuthenticator {
    pub fn initialize(env: &Env, fx_root_sender: &EvmAddress, fx_child: &Address) {
        storage::set_fx_root_sender(env, fx_root_sender);
        storage::set_fx_child(env, fx_child);
    }

    pub fn update_fx_root_sender(env: &Env, fx_root_sender: EvmAddress) -> Result<(), ExecutorError> {
        executor::require_self(env)?;

        let old = storage::get_fx_root_sender(env)?;
        storage::set_fx_root_sender(env, &fx_root_sender);

        events::emit_fx_root_sender_update(env, &old, &fx_root_sender);
        Ok(())
    }

    pub fn update_fx_child(env: &Env, fx_child: Address) -> Result<(), ExecutorError> {
        executor::require_self(env)?;

        let old = storage::get_fx_child(env)?;
        storage::set_fx_child(env, &fx_child);

        events::emit_fx_child_update(env, &old, &fx_child);
        Ok(())
    }
}

impl OriginAuthenticator for StateSyncAuthenticator {
    type Envelope = RelayEnvelope;

    /// # Errors
    /// * `UnauthorizedChildOrigin` - Caller is not the trusted relay
    /// * `UnauthorizedRootOrigin` - Relayed sender is not the trusted root sender
    fn authenticate(env: &Env, envelope: &RelayEnvelope) -> Result<Authorized, ExecutorError> {
        envelope.relay.require_auth();

        if envelope.relay != storage::get_fx_child(env)? {
            return Err(ExecutorError::UnauthorizedChildOrigin);
        }
        if envelope.root_message_sender != storage::get_fx_root_sender(env)? {
            return Err(ExecutorError::UnauthorizedRootOrigin);
        }

        log!(env, "state sync message accepted", envelope.state_id);
        Ok(Authorized::new())
    }
}

impl SelfAmendable for StateSyncAuthenticator {
    fn dispatch_self_call(
        env: &Env,
        function: &Symbol,
        args: &Vec<Val>,
    ) -> Option<Result<(), ExecutorError>> {
        let result = if *function == Symbol::new(env, "update_fx_root_sender") {
            single_arg(env, args).and_then(|sender| Self::update_fx_root_sender(env, sender))
        } else if *function == Symbol::new(env, "update_fx_child") {
            single_arg(env, args).and_then(|fx_child| Self::update_fx_child(env, fx_child))
        } else {
            return None;
        };
        Some(result)
    }
}
