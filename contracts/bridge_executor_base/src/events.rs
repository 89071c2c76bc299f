use soroban_sdk::{contractevent, Address, Bytes, BytesN, Env, String, Val, Vec};

use crate::types::{ActionsSet, EvmAddress};

#[contractevent(topics = ["BridgeExecutor", "INIT"])]
pub struct ExecutorInitialized {
    pub delay: u64,
    pub grace_period: u64,
    pub minimum_delay: u64,
    pub maximum_delay: u64,
    pub guardian: Address,
}

#[contractevent(topics = ["BridgeExecutor", "QUEUED"])]
pub struct ActionsSetQueued {
    pub id: u32,
    pub targets: Vec<Address>,
    pub values: Vec<i128>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Bytes>,
    pub with_delegatecalls: Vec<bool>,
    pub execution_time: u64,
}

#[contractevent(topics = ["BridgeExecutor", "EXECUTED"])]
pub struct ActionsSetExecuted {
    pub id: u32,
    pub initiator: Address,
    pub returned_data: Vec<Val>,
}

#[contractevent(topics = ["BridgeExecutor", "CANCELED"])]
pub struct ActionsSetCanceled {
    pub id: u32,
}

#[contractevent(topics = ["BridgeExecutor", "GUARDIAN_UPD"])]
pub struct GuardianUpdate {
    pub old: Address,
    pub new: Address,
}

#[contractevent(topics = ["BridgeExecutor", "DELAY_UPD"])]
pub struct DelayUpdate {
    pub old: u64,
    pub new: u64,
}

#[contractevent(topics = ["BridgeExecutor", "GRACE_UPD"])]
pub struct GracePeriodUpdate {
    pub old: u64,
    pub new: u64,
}

#[contractevent(topics = ["BridgeExecutor", "MIN_DELAY_UPD"])]
pub struct MinimumDelayUpdate {
    pub old: u64,
    pub new: u64,
}

#[contractevent(topics = ["BridgeExecutor", "MAX_DELAY_UPD"])]
pub struct MaximumDelayUpdate {
    pub old: u64,
    pub new: u64,
}

#[contractevent(topics = ["BridgeExecutor", "FX_ROOT_UPD"])]
pub struct FxRootSenderUpdate {
    pub old: BytesN<20>,
    pub new: BytesN<20>,
}

#[contractevent(topics = ["BridgeExecutor", "FX_CHILD_UPD"])]
pub struct FxChildUpdate {
    pub old: Address,
    pub new: Address,
}

#[contractevent(topics = ["BridgeExecutor", "ETH_EXECUTOR_UPD"])]
pub struct EthereumGovernanceExecutorUpdate {
    pub old: BytesN<20>,
    pub new: BytesN<20>,
}

#[contractevent(topics = ["BridgeExecutor", "MESSENGER_UPD"])]
pub struct CrossDomainMessengerUpdate {
    pub old: Address,
    pub new: Address,
}

#[contractevent(topics = ["BridgeExecutor", "FUNDS"])]
pub struct FundsReceived {
    pub from: Address,
    pub amount: i128,
}

#[contractevent(topics = ["BridgeExecutor", "UPGRADED"])]
pub struct ContractUpgraded {
    pub new_wasm_hash: BytesN<32>,
}

pub fn emit_initialized(
    env: &Env,
    delay: u64,
    grace_period: u64,
    minimum_delay: u64,
    maximum_delay: u64,
    guardian: &Address,
) {
    ExecutorInitialized {
        delay,
        grace_period,
        minimum_delay,
        maximum_delay,
        guardian: guardian.clone(),
    }
    .publish(env);
}

pub fn emit_actions_set_queued(env: &Env, id: u32, actions_set: &ActionsSet) {
    ActionsSetQueued {
        id,
        targets: actions_set.targets.clone(),
        values: actions_set.values.clone(),
        signatures: actions_set.signatures.clone(),
        calldatas: actions_set.calldatas.clone(),
        with_delegatecalls: actions_set.with_delegatecalls.clone(),
        execution_time: actions_set.execution_time,
    }
    .publish(env);
}

pub fn emit_actions_set_executed(env: &Env, id: u32, initiator: &Address, returned_data: &Vec<Val>) {
    ActionsSetExecuted {
        id,
        initiator: initiator.clone(),
        returned_data: returned_data.clone(),
    }
    .publish(env);
}

pub fn emit_actions_set_canceled(env: &Env, id: u32) {
    ActionsSetCanceled { id }.publish(env);
}

pub fn emit_guardian_update(env: &Env, old: &Address, new: &Address) {
    GuardianUpdate {
        old: old.clone(),
        new: new.clone(),
    }
    .publish(env);
}

pub fn emit_delay_update(env: &Env, old: u64, new: u64) {
    DelayUpdate { old, new }.publish(env);
}

pub fn emit_grace_period_update(env: &Env, old: u64, new: u64) {
    GracePeriodUpdate { old, new }.publish(env);
}

pub fn emit_minimum_delay_update(env: &Env, old: u64, new: u64) {
    MinimumDelayUpdate { old, new }.publish(env);
}

pub fn emit_maximum_delay_update(env: &Env, old: u64, new: u64) {
    MaximumDelayUpdate { old, new }.publish(env);
}

pub fn emit_fx_root_sender_update(env: &Env, old: &EvmAddress, new: &EvmAddress) {
    FxRootSenderUpdate {
        old: old.clone(),
        new: new.clone(),
    }
    .publish(env);
}

pub fn emit_fx_child_update(env: &Env, old: &Address, new: &Address) {
    FxChildUpdate {
        old: old.clone(),
        new: new.clone(),
    }
    .publish(env);
}

pub fn emit_ethereum_governance_executor_update(env: &Env, old: &EvmAddress, new: &EvmAddress) {
    EthereumGovernanceExecutorUpdate {
        old: old.clone(),
        new: new.clone(),
    }
    .publish(env);
}

pub fn emit_cross_domain_messenger_update(env: &Env, old: &Address, new: &Address) {
    CrossDomainMessengerUpdate {
        old: old.clone(),
        new: new.clone(),
    }
    .publish(env);
}

pub fn emit_funds_received(env: &Env, from: &Address, amount: i128) {
    FundsReceived {
        from: from.clone(),
        amount,
    }
    .publish(env);
}

pub fn emit_contract_upgraded(env: &Env, new_wasm_hash: &BytesN<32>) {
    ContractUpgraded {
        new_wasm_hash: new_wasm_hash.clone(),
    }
    .publish(env);
}
