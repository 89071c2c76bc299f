//! Base executor: queue / execute / cancel orchestration and self-amending configuration
//!
//! Every function here operates on the storage of the calling contract. Variant
//! contracts authenticate the upstream origin first (see [`crate::auth`]) and
//! then hand the resulting [`Authorized`] proof to [`queue`].

use soroban_sdk::{log, token::TokenClient, Address, BytesN, Env, Val, Vec};

use crate::auth::{Authorized, SelfAmendable};
use crate::engine;
use crate::error::ExecutorError;
use crate::events;
use crate::storage;
use crate::types::{
    ActionsBatch, ActionsSet, ActionsSetState, ExecutorConfig, ExecutorParams,
    MINIMUM_GRACE_PERIOD,
};

// ============================================================================
// Initialization
// ============================================================================

/// Validate and store the deployment parameters
///
/// # Errors
/// * `AlreadyInitialized` - Contract has already been initialized
/// * `InvalidInitParams` - `grace_period < MINIMUM_GRACE_PERIOD`, `minimum_delay >= maximum_delay`
///   or `delay` outside `[minimum_delay, maximum_delay]`
pub fn initialize(env: &Env, params: ExecutorParams) -> Result<(), ExecutorError> {
    if storage::is_initialized(env) {
        return Err(ExecutorError::AlreadyInitialized);
    }

    if params.grace_period < MINIMUM_GRACE_PERIOD
        || params.minimum_delay >= params.maximum_delay
        || params.delay < params.minimum_delay
        || params.delay > params.maximum_delay
    {
        return Err(ExecutorError::InvalidInitParams);
    }

    let config = ExecutorConfig::from(params);
    storage::set_config(env, &config);
    storage::set_actions_set_count(env, 0);
    storage::set_initialized(env);
    storage::extend_instance_ttl(env);

    events::emit_initialized(
        env,
        config.delay,
        config.grace_period,
        config.minimum_delay,
        config.maximum_delay,
        &config.guardian,
    );

    Ok(())
}

pub fn ensure_initialized(env: &Env) -> Result<(), ExecutorError> {
    if !storage::is_initialized(env) {
        return Err(ExecutorError::NotInitialized);
    }
    Ok(())
}

/// Fail unless called from a self-targeting action of an executing actions set
pub fn require_self(env: &Env) -> Result<(), ExecutorError> {
    ensure_initialized(env)?;
    if !storage::is_self_call(env) {
        return Err(ExecutorError::OnlyCallableByThis);
    }
    Ok(())
}

// ============================================================================
// Actions Set Lifecycle
// ============================================================================

/// Queue an authenticated batch as a new actions set and return its id
///
/// # Errors
/// * `EmptyTargets` / `InconsistentParamsLength` / `NegativeActionValue` - Malformed batch
/// * `DuplicateAction` - An action is already queued, or repeated inside the batch
pub fn queue(env: &Env, _origin: Authorized, batch: ActionsBatch) -> Result<u32, ExecutorError> {
    ensure_initialized(env)?;
    storage::extend_instance_ttl(env);
    batch.validate()?;

    let config = storage::get_config(env)?;
    let execution_time = env.ledger().timestamp().saturating_add(config.delay);
    let actions_set = batch.into_actions_set(execution_time);

    let hashes = actions_set.action_hashes(env);
    for i in 0..hashes.len() {
        let hash = hashes.get_unchecked(i);
        if storage::is_action_queued(env, &hash) || hashes.first_index_of(&hash) != Some(i) {
            return Err(ExecutorError::DuplicateAction);
        }
    }

    let id = storage::get_actions_set_count(env);
    storage::set_actions_set(env, id, &actions_set);
    storage::set_actions_set_count(env, id + 1);
    for hash in hashes.iter() {
        storage::set_action_queued(env, &hash);
    }

    events::emit_actions_set_queued(env, id, &actions_set);
    log!(env, "actions set queued", id, execution_time);

    Ok(id)
}

/// Execute a queued actions set whose timelock has elapsed
///
/// Sub-call failures abort the whole invocation with the callee's own error,
/// so no partial execution is ever observable. The callee's contract error code
/// reaches the caller unchanged and shares one code space with
/// `ExecutorError`: a target failing with code 1 to 34 is indistinguishable
/// from the executor's own error of that code on the client side.
///
/// # Errors
/// * `InvalidActionsSetId` - Unknown id
/// * `OnlyQueuedActions` - Set is executed, canceled or expired
/// * `TimelockNotFinished` - Execution time not reached
/// * `InsufficientBalance` - Executor holds less native asset than the set transfers
pub fn execute<A: SelfAmendable>(
    env: &Env,
    initiator: Address,
    id: u32,
) -> Result<Vec<Val>, ExecutorError> {
    ensure_initialized(env)?;
    initiator.require_auth();
    storage::extend_instance_ttl(env);

    if current_state(env, id)? != ActionsSetState::Queued {
        return Err(ExecutorError::OnlyQueuedActions);
    }

    let mut actions_set =
        storage::get_actions_set(env, id).ok_or(ExecutorError::InvalidActionsSetId)?;
    if env.ledger().timestamp() < actions_set.execution_time {
        return Err(ExecutorError::TimelockNotFinished);
    }

    let config = storage::get_config(env)?;
    let total_value = actions_set
        .total_value()
        .ok_or(ExecutorError::InsufficientBalance)?;
    if total_value > 0 {
        let balance = TokenClient::new(env, &config.native_asset)
            .balance(&env.current_contract_address());
        if balance < total_value {
            return Err(ExecutorError::InsufficientBalance);
        }
    }

    // Mark as executed BEFORE external calls (CEI pattern)
    actions_set.executed = true;
    storage::set_actions_set(env, id, &actions_set);
    unqueue_actions(env, &actions_set);

    let returned_data = engine::run_actions_set::<A>(env, &config, &actions_set)?;

    events::emit_actions_set_executed(env, id, &initiator, &returned_data);
    log!(env, "actions set executed", id);

    Ok(returned_data)
}

/// Cancel a queued actions set (guardian only)
///
/// # Errors
/// * `NotGuardian` - Caller is not the guardian
/// * `InvalidActionsSetId` - Unknown id
/// * `OnlyQueuedActions` - Set is executed, canceled or expired
pub fn cancel(env: &Env, caller: Address, id: u32) -> Result<(), ExecutorError> {
    ensure_initialized(env)?;
    caller.require_auth();

    let config = storage::get_config(env)?;
    if caller != config.guardian {
        return Err(ExecutorError::NotGuardian);
    }

    if current_state(env, id)? != ActionsSetState::Queued {
        return Err(ExecutorError::OnlyQueuedActions);
    }

    let mut actions_set =
        storage::get_actions_set(env, id).ok_or(ExecutorError::InvalidActionsSetId)?;
    actions_set.canceled = true;
    storage::set_actions_set(env, id, &actions_set);
    unqueue_actions(env, &actions_set);

    events::emit_actions_set_canceled(env, id);
    log!(env, "actions set canceled", id);

    Ok(())
}

/// Derive the lifecycle state of an actions set
pub fn current_state(env: &Env, id: u32) -> Result<ActionsSetState, ExecutorError> {
    let actions_set = actions_set(env, id)?;
    if actions_set.canceled {
        return Ok(ActionsSetState::Canceled);
    }
    if actions_set.executed {
        return Ok(ActionsSetState::Executed);
    }

    let config = storage::get_config(env)?;
    let deadline = actions_set
        .execution_time
        .saturating_add(config.grace_period);
    if env.ledger().timestamp() > deadline {
        return Ok(ActionsSetState::Expired);
    }
    Ok(ActionsSetState::Queued)
}

fn unqueue_actions(env: &Env, actions_set: &ActionsSet) {
    for hash in actions_set.action_hashes(env).iter() {
        storage::remove_action_queued(env, &hash);
    }
}

// ============================================================================
// Funding
// ============================================================================

/// Pull `amount` of the native asset from `from` into the executor
pub fn receive_funds(env: &Env, from: Address, amount: i128) -> Result<(), ExecutorError> {
    ensure_initialized(env)?;
    from.require_auth();

    if amount <= 0 {
        return Err(ExecutorError::InvalidAmount);
    }

    let config = storage::get_config(env)?;
    TokenClient::new(env, &config.native_asset).transfer(
        &from,
        &env.current_contract_address(),
        &amount,
    );

    events::emit_funds_received(env, &from, amount);
    Ok(())
}

// ============================================================================
// Self-Amendment Functions (only reachable through executed actions sets)
// ============================================================================

pub fn update_guardian(env: &Env, guardian: Address) -> Result<(), ExecutorError> {
    require_self(env)?;

    let mut config = storage::get_config(env)?;
    let old = config.guardian.clone();
    config.guardian = guardian.clone();
    storage::set_config(env, &config);

    events::emit_guardian_update(env, &old, &guardian);
    log!(env, "guardian updated", guardian);
    Ok(())
}

pub fn update_delay(env: &Env, delay: u64) -> Result<(), ExecutorError> {
    require_self(env)?;

    let mut config = storage::get_config(env)?;
    validate_delay(&config, delay)?;
    let old = config.delay;
    config.delay = delay;
    storage::set_config(env, &config);

    events::emit_delay_update(env, old, delay);
    log!(env, "delay updated", old, delay);
    Ok(())
}

pub fn update_grace_period(env: &Env, grace_period: u64) -> Result<(), ExecutorError> {
    require_self(env)?;

    if grace_period < MINIMUM_GRACE_PERIOD {
        return Err(ExecutorError::GracePeriodTooShort);
    }

    let mut config = storage::get_config(env)?;
    let old = config.grace_period;
    config.grace_period = grace_period;
    storage::set_config(env, &config);

    events::emit_grace_period_update(env, old, grace_period);
    log!(env, "grace period updated", old, grace_period);
    Ok(())
}

/// The current delay must still fit the new bound
pub fn update_minimum_delay(env: &Env, minimum_delay: u64) -> Result<(), ExecutorError> {
    require_self(env)?;

    let mut config = storage::get_config(env)?;
    if minimum_delay >= config.maximum_delay {
        return Err(ExecutorError::MinimumDelayTooLong);
    }
    let old = config.minimum_delay;
    config.minimum_delay = minimum_delay;
    validate_delay(&config, config.delay)?;
    storage::set_config(env, &config);

    events::emit_minimum_delay_update(env, old, minimum_delay);
    log!(env, "minimum delay updated", old, minimum_delay);
    Ok(())
}

/// The current delay must still fit the new bound
pub fn update_maximum_delay(env: &Env, maximum_delay: u64) -> Result<(), ExecutorError> {
    require_self(env)?;

    let mut config = storage::get_config(env)?;
    if maximum_delay <= config.minimum_delay {
        return Err(ExecutorError::MaximumDelayTooShort);
    }
    let old = config.maximum_delay;
    config.maximum_delay = maximum_delay;
    validate_delay(&config, config.delay)?;
    storage::set_config(env, &config);

    events::emit_maximum_delay_update(env, old, maximum_delay);
    log!(env, "maximum delay updated", old, maximum_delay);
    Ok(())
}

/// Replace the executor's own code
///
/// Takes effect once the executing invocation completes. Anything queued
/// through the trusted origin can do this, so the new code inherits all state.
pub fn upgrade(env: &Env, new_wasm_hash: BytesN<32>) -> Result<(), ExecutorError> {
    require_self(env)?;

    env.deployer()
        .update_current_contract_wasm(new_wasm_hash.clone());

    events::emit_contract_upgraded(env, &new_wasm_hash);
    log!(env, "executor code replaced", new_wasm_hash);
    Ok(())
}

fn validate_delay(config: &ExecutorConfig, delay: u64) -> Result<(), ExecutorError> {
    if delay < config.minimum_delay {
        return Err(ExecutorError::DelayShorterThanMin);
    }
    if delay > config.maximum_delay {
        return Err(ExecutorError::DelayLongerThanMax);
    }
    Ok(())
}

// ============================================================================
// Query Functions
// ============================================================================

pub fn config(env: &Env) -> Result<ExecutorConfig, ExecutorError> {
    storage::get_config(env)
}

pub fn actions_set_count(env: &Env) -> Result<u32, ExecutorError> {
    ensure_initialized(env)?;
    Ok(storage::get_actions_set_count(env))
}

pub fn actions_set(env: &Env, id: u32) -> Result<ActionsSet, ExecutorError> {
    if id >= actions_set_count(env)? {
        return Err(ExecutorError::InvalidActionsSetId);
    }
    storage::get_actions_set(env, id).ok_or(ExecutorError::InvalidActionsSetId)
}

pub fn is_action_queued(env: &Env, action_hash: &BytesN<32>) -> bool {
    storage::is_action_queued(env, action_hash)
}
