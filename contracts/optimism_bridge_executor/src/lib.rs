#![no_std]

//! # Optimism Bridge Executor
//!
//! Timelocked governance executor fed by a cross-domain messenger. The
//! messenger must be the caller, and the upstream sender it reports for the
//! message being relayed must be the trusted governance executor.

use soroban_sdk::{contract, contractimpl, Address, Bytes, BytesN, Env, String, Val, Vec};

use bridge_executor_base::{
    auth, executor, storage, ActionsBatch, ActionsSet, ActionsSetState, ExecutorConfig,
    ExecutorError, ExecutorParams, MessengerAuthenticator, MessengerEnvelope, OriginAuthenticator,
};

#[contract]
pub struct OptimismBridgeExecutor;

#[contractimpl]
impl OptimismBridgeExecutor {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Initialize the executor
    ///
    /// # Arguments
    /// * `params` - Delay bounds, grace period, guardian and native asset
    /// * `cross_domain_messenger` - Messenger contract delivering upstream messages
    /// * `ethereum_governance_executor` - Upstream sender the messenger must report
    pub fn initialize(
        env: Env,
        params: ExecutorParams,
        cross_domain_messenger: Address,
        ethereum_governance_executor: BytesN<20>,
    ) -> Result<(), ExecutorError> {
        executor::initialize(&env, params)?;
        MessengerAuthenticator::initialize(
            &env,
            &cross_domain_messenger,
            &ethereum_governance_executor,
        );
        Ok(())
    }

    // ========================================================================
    // Actions Set Lifecycle
    // ========================================================================

    /// Queue an actions set relayed by the cross-domain messenger
    ///
    /// # Errors
    /// * `UnauthorizedMessenger` - Caller is not the configured messenger
    /// * `UnauthorizedCrossDomainSender` - Messenger reports another upstream sender
    pub fn queue(
        env: Env,
        messenger: Address,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<String>,
        calldatas: Vec<Bytes>,
        with_delegatecalls: Vec<bool>,
    ) -> Result<u32, ExecutorError> {
        executor::ensure_initialized(&env)?;

        let origin = MessengerAuthenticator::authenticate(&env, &MessengerEnvelope { messenger })?;
        let batch = ActionsBatch::new(targets, values, signatures, calldatas, with_delegatecalls);

        executor::queue(&env, origin, batch)
    }

    pub fn execute(env: Env, caller: Address, actions_set_id: u32) -> Result<Vec<Val>, ExecutorError> {
        executor::execute::<MessengerAuthenticator>(&env, caller, actions_set_id)
    }

    pub fn cancel(env: Env, caller: Address, actions_set_id: u32) -> Result<(), ExecutorError> {
        executor::cancel(&env, caller, actions_set_id)
    }

    pub fn receive_funds(env: Env, from: Address, amount: i128) -> Result<(), ExecutorError> {
        executor::receive_funds(&env, from, amount)
    }

    // ========================================================================
    // Self-Amendment Functions
    // ========================================================================

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

    pub fn update_cross_domain_messenger(env: Env, messenger: Address) -> Result<(), ExecutorError> {
        MessengerAuthenticator::update_cross_domain_messenger(&env, messenger)
    }

    pub fn update_governance_executor(
        env: Env,
        ethereum_governance_executor: BytesN<20>,
    ) -> Result<(), ExecutorError> {
        auth::update_ethereum_governance_executor(&env, ethereum_governance_executor)
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

    pub fn get_governance_executor(env: Env) -> Result<BytesN<20>, ExecutorError> {
        storage::get_ethereum_governance_executor(&env)
    }

    pub fn get_cross_domain_messenger(env: Env) -> Result<Address, ExecutorError> {
        storage::get_cross_domain_messenger(&env)
    }
}
