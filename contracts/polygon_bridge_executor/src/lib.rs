#![no_std]

//! # Polygon Bridge Executor
//!
//! Timelocked governance executor fed by a state-sync child relay. The relay
//! (`fx_child`) delivers messages and attests which upstream contract sent
//! them; only messages from the trusted root sender are queued.
//!
//! ## Flow
//! - `process_message_from_root`: relay delivers an XDR-encoded actions payload
//! - `execute`: anyone runs a queued set once its delay has passed
//! - `cancel`: the guardian drops a queued set
//!
//! Configuration changes, including code replacement, are only reachable
//! through an executed actions set that targets this contract.

use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, Val, Vec};

use bridge_executor_base::{
    executor, storage, ActionsBatch, ActionsSet, ActionsSetState, ExecutorConfig, ExecutorError,
    ExecutorParams, OriginAuthenticator, RelayEnvelope, StateSyncAuthenticator,
};

// ============================================================================
// Contract Implementation
// ============================================================================

#[contract]
pub struct PolygonBridgeExecutor;

#[contractimpl]
impl PolygonBridgeExecutor {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the executor
    ///
    /// # Arguments
    /// * `params` - Delay bounds, grace period, guardian and native asset
    /// * `fx_root_sender` - Upstream contract allowed to send actions
    /// * `fx_child` - State-sync relay contract delivering messages
    ///
    /// # Errors
    /// * `AlreadyInitialized` - Contract has already been initialized
    /// * `InvalidInitParams` - Delay or grace period out of bounds
    pub fn initialize(
        env: Env,
        params: ExecutorParams,
        fx_root_sender: BytesN<20>,
        fx_child: Address,
    ) -> Result<(), ExecutorError> {
        executor::initialize(&env, params)?;
        StateSyncAuthenticator::initialize(&env, &fx_root_sender, &fx_child);
        Ok(())
    }

    // ========================================================================
    // Actions Set Lifecycle
    // ========================================================================

    /// Queue the actions carried by a relayed message
    ///
    /// # Arguments
    /// * `caller` - Relay delivering the message (must authorize)
    /// * `state_id` - Relay state sync id
    /// * `root_message_sender` - Upstream sender attested by the relay
    /// * `data` - XDR-encoded `(targets, values, signatures, calldatas, with_delegatecalls)`
    ///
    /// # Returns
    /// Id of the new actions set
    ///
    /// # Errors
    /// * `UnauthorizedChildOrigin` - Caller is not `fx_child`
    /// * `UnauthorizedRootOrigin` - Attested sender is not `fx_root_sender`
    /// * `InvalidCalldata` - Payload does not decode to the five action lists
    pub fn process_message_from_root(
        env: Env,
        caller: Address,
        state_id: u64,
        root_message_sender: BytesN<20>,
        data: Bytes,
    ) -> Result<u32, ExecutorError> {
        executor::ensure_initialized(&env)?;

        let envelope = RelayEnvelope {
            relay: caller,
            state_id,
            root_message_sender,
        };
        let origin = StateSyncAuthenticator::authenticate(&env, &envelope)?;
        let batch = ActionsBatch::from_payload(&env, &data)?;

        executor::queue(&env, origin, batch)
    }

    /// Execute a queued actions set whose delay has passed
    ///
    /// # Returns
    /// Raw return value of every action, in order
    pub fn execute(env: Env, caller: Address, actions_set_id: u32) -> Result<Vec<Val>, ExecutorError> {
        executor::execute::<StateSyncAuthenticator>(&env, caller, actions_set_id)
    }

    /// Cancel a queued actions set (guardian only)
    pub fn cancel(env: Env, caller: Address, actions_set_id: u32) -> Result<(), ExecutorError> {
        executor::cancel(&env, caller, actions_set_id)
    }

    /// Move `amount` of the native asset from `from` into the executor
    pub fn receive_funds(env: Env, from: Address, amount: i128) -> Result<(), ExecutorError> {
        executor::receive_funds(&env, from, amount)
    }

    // ========================================================================
    // Self-Amendment Functions
    // ========================================================================
    //
    // Direct invocations always fail with `OnlyCallableByThis`; the same
    // operations run when an executed actions set targets this contract.

    pub fn update_guardian(env: Env, guardian: Address) -> Result<(), ExecutorError> {
        executor::update_guardian(&env, guardian)
    }

    pub fn update_delay(env: Env, delay: u64) -> Result<(), ExecutorError> {
        executor::update_delay(&env, delay)
    }

    pub fn update_grace_period(env: Env, grace_period: u64) -> Result<(), ExecutorError> {
        executor::update_grace_period(&env, grace_period)
    }

    pub fn update_minimum_delay(env: Env, minimum_delay: u64) -> Result<(), ExecutorError> {
        executor::update_minimum_delay(&env, minimum_delay)
    }

    pub fn update_maximum_delay(env: Env, maximum_delay: u64) -> Result<(), ExecutorError> {
        executor::update_maximum_delay(&env, maximum_delay)
    }

    pub fn update_fx_root_sender(env: Env, fx_root_sender: BytesN<20>) -> Result<(), ExecutorError> {
        StateSyncAuthenticator::update_fx_root_sender(&env, fx_root_sender)
    }

    pub fn update_fx_child(env: Env, fx_child: Address) -> Result<(), ExecutorError> {
        StateSyncAuthenticator::update_fx_child(&env, fx_child)
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) -> Result<(), ExecutorError> {
        executor::upgrade(&env, new_wasm_hash)
    }

    // ========================================================================
    // Query Functions
    // ========================================================================

    pub fn get_config(env: Env) -> Result<ExecutorConfig, ExecutorError> {
        executor::config(&env)
    }

    pub fn get_delay(env: Env) -> Result<u64, ExecutorError> {
        Ok(executor::config(&env)?.delay)
    }

    pub fn get_grace_period(env: Env) -> Result<u64, ExecutorError> {
        Ok(executor::config(&env)?.grace_period)
    }

    pub fn get_minimum_delay(env: Env) -> Result<u64, ExecutorError> {
        Ok(executor::config(&env)?.minimum_delay)
    }

    pub fn get_maximum_delay(env: Env) -> Result<u64, ExecutorError> {
        Ok(executor::config(&env)?.maximum_delay)
    }

    pub fn get_guardian(env: Env) -> Result<Address, ExecutorError> {
        Ok(executor::config(&env)?.guardian)
    }

    pub fn get_native_asset(env: Env) -> Result<Address, ExecutorError> {
        Ok(executor::config(&env)?.native_asset)
    }

    pub fn get_actions_set_count(env: Env) -> Result<u32, ExecutorError> {
        executor::actions_set_count(&env)
    }

    pub fn get_actions_set_by_id(env: Env, actions_set_id: u32) -> Result<ActionsSet, ExecutorError> {
        executor::actions_set(&env, actions_set_id)
    }

    pub fn get_current_state(env: Env, actions_set_id: u32) -> Result<ActionsSetState, ExecutorError> {
        executor::current_state(&env, actions_set_id)
    }

    pub fn is_action_queued(env: Env, action_hash: BytesN<32>) -> bool {
        executor::is_action_queued(&env, &action_hash)
    }

    pub fn get_fx_root_sender(env: Env) -> Result<BytesN<20>, ExecutorError> {
        storage::get_fx_root_sender(&env)
    }

    pub fn get_fx_child(env: Env) -> Result<Address, ExecutorError> {
        storage::get_fx_child(&env)
    }
}

mod test;
