//! Address-aliased origin
//!
//! The rollup rewrites the upstream sender into an aliased identity before the
//! message reaches this domain. The caller must be exactly that alias of the
//! configured upstream governance executor.
//!
//! The alias is `(upstream + 0x1111000000000000000000000000000000001111) mod 2^160`,
//! embedded in the low 20 bytes of a 32-byte contract id.
//!
//! No deployed contract can ever hold such an id, so on a live network the
//! alias can only authorize when the host environment vouches for it.

use soroban_sdk::{xdr::FromXdr, Address, Bytes, Env, Symbol, Val, Vec};

use super::{Authorized, OriginAuthenticator, SelfAmendable};
use crate::error::ExecutorError;
use crate::storage;
use crate::types::EvmAddress;

const ALIAS_OFFSET: [u8; 20] = [
    0x11, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x11, 0x11,
];

/// `ScVal::Address` discriminant followed by `ScAddress::Contract`
const CONTRACT_ADDRESS_XDR_PREFIX: [u8; 8] = [0, 0, 0, 18, 0, 0, 0, 1];

/// Message handed over by the aliased caller
#[derive(Clone, Debug)]
pub struct AliasEnvelope {
    pub caller: Address,
}

pub struct AliasAuthenticator;

impl AliasAuthenticator {
    pub fn initialize(env: &Env, ethereum_governance_executor: &EvmAddress) {
        storage::set_ethereum_governance_executor(env, ethereum_governance_executor);
    }

    /// Identity the configured upstream executor appears as in this domain
    pub fn aliased_ethereum_governance_executor(env: &Env) -> Result<Address, ExecutorError> {
        let upstream = storage::get_ethereum_governance_executor(env)?;
        aliased_address(env, &upstream)
    }
}

impl OriginAuthenticator for AliasAuthenticator {
    type Envelope = AliasEnvelope;

    fn authenticate(env: &Env, envelope: &AliasEnvelope) -> Result<Authorized, ExecutorError> {
        envelope.caller.require_auth();

        if envelope.caller != Self::aliased_ethereum_governance_executor(env)? {
            return Err(ExecutorError::UnauthorizedEthereumExecutor);
        }
        Ok(Authorized::new())
    }
}

impl SelfAmendable for AliasAuthenticator {
    fn dispatch_self_call(
        env: &Env,
        function: &Symbol,
        args: &Vec<Val>,
    ) -> Option<Result<(), ExecutorError>> {
        super::dispatch_ethereum_governance_executor_update(env, function, args)
    }
}

// ============================================================================
// Alias Derivation
// ============================================================================

/// Add the alias offset to a 20-byte address, wrapping at 2^160
pub fn apply_l1_to_l2_alias(address: [u8; 20]) -> [u8; 20] {
    let mut aliased = [0u8; 20];
    let mut carry = 0u16;
    for i in (0..20).rev() {
        let sum = address[i] as u16 + ALIAS_OFFSET[i] as u16 + carry;
        aliased[i] = sum as u8;
        carry = sum >> 8;
    }
    aliased
}

/// Map an upstream address to the executor-domain address it is aliased to
pub fn aliased_address(env: &Env, upstream: &EvmAddress) -> Result<Address, ExecutorError> {
    let aliased = apply_l1_to_l2_alias(upstream.to_array());

    let mut contract_id = [0u8; 32];
    contract_id[12..].copy_from_slice(&aliased);
    contract_address(env, &contract_id)
}

/// Address of the contract with the given 32-byte id
pub fn contract_address(env: &Env, contract_id: &[u8; 32]) -> Result<Address, ExecutorError> {
    let mut encoded = Bytes::from_array(env, &CONTRACT_ADDRESS_XDR_PREFIX);
    encoded.extend_from_array(contract_id);
    Address::from_xdr(env, &encoded).map_err(|_| ExecutorError::UnauthorizedEthereumExecutor)
}
