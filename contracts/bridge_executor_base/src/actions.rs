//! Actions set shape rules and per-action identity hashes

use soroban_sdk::{
    xdr::{FromXdr, ToXdr},
    Address, Bytes, BytesN, Env, String, Vec,
};

use crate::error::ExecutorError;
use crate::types::{ActionsBatch, ActionsSet};

/// Wire layout of a relayed actions payload
pub type ActionsPayload = (Vec<Address>, Vec<i128>, Vec<String>, Vec<Bytes>, Vec<bool>);

impl ActionsBatch {
    pub fn new(
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<String>,
        calldatas: Vec<Bytes>,
        with_delegatecalls: Vec<bool>,
    ) -> Self {
        Self {
            targets,
            values,
            signatures,
            calldatas,
            with_delegatecalls,
        }
    }

    /// Decode an XDR-encoded `ActionsPayload`
    pub fn from_payload(env: &Env, payload: &Bytes) -> Result<Self, ExecutorError> {
        if payload.is_empty() {
            return Err(ExecutorError::InvalidCalldata);
        }
        let (targets, values, signatures, calldatas, with_delegatecalls) =
            <ActionsPayload as FromXdr>::from_xdr(env, payload)
                .map_err(|_| ExecutorError::InvalidCalldata)?;
        Ok(Self::new(
            targets,
            values,
            signatures,
            calldatas,
            with_delegatecalls,
        ))
    }

    /// Check the batch has at least one action and five lists of equal length
    ///
    /// # Errors
    /// * `EmptyTargets` - No targets
    /// * `InconsistentParamsLength` - List lengths differ
    /// * `NegativeActionValue` - An amount is below zero
    pub fn validate(&self) -> Result<(), ExecutorError> {
        let len = self.targets.len();
        if len == 0 {
            return Err(ExecutorError::EmptyTargets);
        }
        if self.values.len() != len
            || self.signatures.len() != len
            || self.calldatas.len() != len
            || self.with_delegatecalls.len() != len
        {
            return Err(ExecutorError::InconsistentParamsLength);
        }
        if self.values.iter().any(|value| value < 0) {
            return Err(ExecutorError::NegativeActionValue);
        }
        Ok(())
    }

    /// Turn the batch into a fresh queued set
    pub fn into_actions_set(self, execution_time: u64) -> ActionsSet {
        ActionsSet {
            targets: self.targets,
            values: self.values,
            signatures: self.signatures,
            calldatas: self.calldatas,
            with_delegatecalls: self.with_delegatecalls,
            execution_time,
            executed: false,
            canceled: false,
        }
    }
}

impl ActionsSet {
    pub fn len(&self) -> u32 {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Identity hash of the action at `index`
    pub fn action_hash(&self, env: &Env, index: u32) -> BytesN<32> {
        hash_action(
            env,
            &self.targets.get_unchecked(index),
            self.values.get_unchecked(index),
            &self.signatures.get_unchecked(index),
            &self.calldatas.get_unchecked(index),
            self.execution_time,
            self.with_delegatecalls.get_unchecked(index),
        )
    }

    /// Identity hashes of every action, in order
    pub fn action_hashes(&self, env: &Env) -> Vec<BytesN<32>> {
        let mut hashes = Vec::new(env);
        for i in 0..self.len() {
            hashes.push_back(self.action_hash(env, i));
        }
        hashes
    }

    /// Sum of the native asset amounts, `None` on overflow
    pub fn total_value(&self) -> Option<i128> {
        self.values
            .iter()
            .try_fold(0i128, |total, value| total.checked_add(value))
    }
}

/// `sha256` over the XDR encoding of one action and its execution time
pub fn hash_action(
    env: &Env,
    target: &Address,
    value: i128,
    signature: &String,
    calldata: &Bytes,
    execution_time: u64,
    with_delegatecall: bool,
) -> BytesN<32> {
    let encoded = (
        target.clone(),
        value,
        signature.clone(),
        calldata.clone(),
        execution_time,
        with_delegatecall,
    )
        .to_xdr(env);
    env.crypto().sha256(&encoded).to_bytes()
}
