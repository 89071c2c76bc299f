//! Storage keys and helpers for the bridge executors

use soroban_sdk::{contracttype, Address, BytesN, Env};

use crate::error::ExecutorError;
use crate::types::{ActionsSet, EvmAddress, ExecutorConfig};

/// Ledgers below which instance storage is bumped (~1 day at 5s per ledger)
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = 17_280;
/// Ledgers instance storage is bumped to (~5 days)
pub const INSTANCE_BUMP_AMOUNT: u32 = 86_400;
/// Ledgers below which an actions set entry is bumped (~7 days)
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 120_960;
/// Ledgers an actions set entry is bumped to (~60 days)
pub const PERSISTENT_BUMP_AMOUNT: u32 = 1_051_200;

/// Storage keys for the bridge executors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Boolean flag indicating contract initialization (instance storage)
    Initialized,
    /// Executor configuration (instance storage)
    Config,
    /// Id assigned to the next queued actions set (instance storage)
    ActionsSetCounter,
    /// A queued actions set (persistent storage)
    ActionsSet(u32),
    /// Marker for an action hash that belongs to a queued set (persistent storage)
    QueuedAction(BytesN<32>),
    /// Set while a self-targeting action is being dispatched (temporary storage)
    SelfCall,
    /// Upstream sender trusted by the state-sync relay variant (instance storage)
    FxRootSender,
    /// State-sync relay contract (instance storage)
    FxChild,
    /// Upstream governance executor (instance storage)
    EthereumGovernanceExecutor,
    /// Cross-domain messenger contract (instance storage)
    CrossDomainMessenger,
}

// ============================================================================
// Initialization Helpers
// ============================================================================

/// Check if the contract is initialized
pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Initialized)
        .unwrap_or(false)
}

/// Mark the contract as initialized
pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

/// Keep configuration, counter and trusted origins alive
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ============================================================================
// Configuration Helpers
// ============================================================================

/// Get the executor configuration
pub fn get_config(env: &Env) -> Result<ExecutorConfig, ExecutorError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ExecutorError::NotInitialized)
}

/// Set the executor configuration
pub fn set_config(env: &Env, config: &ExecutorConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

// ============================================================================
// Actions Set Helpers
// ============================================================================

/// Number of actions sets ever queued
pub fn get_actions_set_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get::<DataKey, u32>(&DataKey::ActionsSetCounter)
        .unwrap_or(0)
}

/// Set the actions set counter
pub fn set_actions_set_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ActionsSetCounter, &count);
}

/// Get an actions set by id
pub fn get_actions_set(env: &Env, id: u32) -> Option<ActionsSet> {
    env.storage().persistent().get(&DataKey::ActionsSet(id))
}

/// Store an actions set under its id
pub fn set_actions_set(env: &Env, id: u32, actions_set: &ActionsSet) {
    let key = DataKey::ActionsSet(id);
    env.storage().persistent().set(&key, actions_set);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// ============================================================================
// Queued Action Helpers
// ============================================================================

/// Check if an action hash is currently queued
pub fn is_action_queued(env: &Env, action_hash: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .get::<DataKey, bool>(&DataKey::QueuedAction(action_hash.clone()))
        .unwrap_or(false)
}

/// Mark an action hash as queued
pub fn set_action_queued(env: &Env, action_hash: &BytesN<32>) {
    let key = DataKey::QueuedAction(action_hash.clone());
    env.storage().persistent().set(&key, &true);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

/// Forget an action hash once its set leaves the queue
pub fn remove_action_queued(env: &Env, action_hash: &BytesN<32>) {
    env.storage()
        .persistent()
        .remove(&DataKey::QueuedAction(action_hash.clone()));
}

// ============================================================================
// Self-Call Frame Helpers
// ============================================================================

/// Check if a self-targeting action is being dispatched
pub fn is_self_call(env: &Env) -> bool {
    env.storage()
        .temporary()
        .get::<DataKey, bool>(&DataKey::SelfCall)
        .unwrap_or(false)
}

/// Open the self-call frame
pub fn enter_self_call(env: &Env) {
    env.storage().temporary().set(&DataKey::SelfCall, &true);
}

/// Close the self-call frame
pub fn exit_self_call(env: &Env) {
    env.storage().temporary().remove(&DataKey::SelfCall);
}

// ============================================================================
// Trusted Origin Helpers
// ============================================================================

pub fn get_fx_root_sender(env: &Env) -> Result<EvmAddress, ExecutorError> {
    env.storage()
        .instance()
        .get(&DataKey::FxRootSender)
        .ok_or(ExecutorError::NotInitialized)
}

pub fn set_fx_root_sender(env: &Env, sender: &EvmAddress) {
    env.storage().instance().set(&DataKey::FxRootSender, sender);
}

pub fn get_fx_child(env: &Env) -> Result<Address, ExecutorError> {
    env.storage()
        .instance()
        .get(&DataKey::FxChild)
        .ok_or(ExecutorError::NotInitialized)
}

pub fn set_fx_child(env: &Env, fx_child: &Address) {
    env.storage().instance().set(&DataKey::FxChild, fx_child);
}

pub fn get_ethereum_governance_executor(env: &Env) -> Result<EvmAddress, ExecutorError> {
    env.storage()
        .instance()
        .get(&DataKey::EthereumGovernanceExecutor)
        .ok_or(ExecutorError::NotInitialized)
}

pub fn set_ethereum_governance_executor(env: &Env, executor: &EvmAddress) {
    env.storage()
        .instance()
        .set(&DataKey::EthereumGovernanceExecutor, executor);
}

pub fn get_cross_domain_messenger(env: &Env) -> Result<Address, ExecutorError> {
    env.storage()
        .instance()
        .get(&DataKey::CrossDomainMessenger)
        .ok_or(ExecutorError::NotInitialized)
}

pub fn set_cross_domain_messenger(env: &Env, messenger: &Address) {
    env.storage()
        .instance()
        .set(&DataKey::CrossDomainMessenger, messenger);
}
