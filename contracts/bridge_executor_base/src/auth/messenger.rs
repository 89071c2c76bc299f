//! Messenger-attested origin: a cross-domain messenger contract delivers the
//! message and reports the upstream sender of the message it is relaying.
//!
//! The messenger must authorize the queue call itself. Contracts cannot
//! re-enter each other on Soroban, so a production messenger authorizes the
//! executor call through its own `__check_auth` rather than calling back in.

use soroban_sdk::{Address, BytesN, Env, Symbol, Val, Vec};

use super::{Authorized, OriginAuthenticator, SelfAmendable};
use crate::error::ExecutorError;
use crate::events;
use crate::executor;
use crate::storage;
use crate::types::EvmAddress;

#[derive(Clone, Debug)]
pub struct MessengerEnvelope {
    pub messenger: Address,
}

pub struct MessengerAuthenticator;

impl MessengerAuthenticator {
    pub fn initialize(env: &Env, messenger: &Address, ethereum_governance_executor: &EvmAddress) {
        storage::set_cross_domain_messenger(env, messenger);
        storage::set_ethereum_governance_executor(env, ethereum_governance_executor);
    }

    pub fn update_cross_domain_messenger(env: &Env, messenger: Address) -> Result<(), ExecutorError> {
        executor::require_self(env)?;

        let old = storage::get_cross_domain_messenger(env)?;
        storage::set_cross_domain_messenger(env, &messenger);

        events::emit_cross_domain_messenger_update(env, &old, &messenger);
        Ok(())
    }

    fn x_domain_message_sender(env: &Env, messenger: &Address) -> EvmAddress {
        env.invoke_contract::<BytesN<20>>(
            messenger,
            &Symbol::new(env, "x_domain_message_sender"),
            Vec::new(env),
        )
    }
}

impl OriginAuthenticator for MessengerAuthenticator {
    type Envelope = MessengerEnvelope;

    /// # Errors
    /// * `UnauthorizedMessenger` - Caller is not the configured messenger
    /// * `UnauthorizedCrossDomainSender` - Messenger reports another upstream sender
    fn authenticate(env: &Env, envelope: &MessengerEnvelope) -> Result<Authorized, ExecutorError> {
        envelope.messenger.require_auth();

        if envelope.messenger != storage::get_cross_domain_messenger(env)? {
            return Err(ExecutorError::UnauthorizedMessenger);
        }

        let sender = Self::x_domain_message_sender(env, &envelope.messenger);
        if sender != storage::get_ethereum_governance_executor(env)? {
            return Err(ExecutorError::UnauthorizedCrossDomainSender);
        }
        Ok(Authorized::new())
    }
}

impl SelfAmendable for MessengerAuthenticator {
    fn dispatch_self_call(
        env: &Env,
        function: &Symbol,
        args: &Vec<Val>,
    ) -> Option<Result<(), ExecutorError>> {
        if *function == Symbol::new(env, "update_cross_domain_messenger") {
            return Some(
                crate::engine::single_arg(env, args)
                    .and_then(|messenger| Self::update_cross_domain_messenger(env, messenger)),
            );
        }
        super::dispatch_ethereum_governance_executor_update(env, function, args)
    }
}
