//! Data types for the bridge executors

use soroban_sdk::{contracttype, Address, Bytes, BytesN, String, Vec};

/// Lower bound for the grace period (10 minutes)
pub const MINIMUM_GRACE_PERIOD: u64 = 10 * 60;

/// A 20-byte account on the EVM primary ledger
pub type EvmAddress = BytesN<20>;

/// Lifecycle state of an actions set, derived from its flags and the ledger clock
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ActionsSetState {
    /// Waiting for its execution time, or inside the grace period
    Queued = 0,
    /// All actions ran successfully
    Executed = 1,
    /// Canceled by the guardian
    Canceled = 2,
    /// Grace period elapsed without execution
    Expired = 3,
}

/// One queued batch of calls sharing a single execution time
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionsSet {
    /// Contracts to call
    pub targets: Vec<Address>,
    /// Native asset amount accounted to each call
    pub values: Vec<i128>,
    /// Function names; an empty name means the call data carries the function
    pub signatures: Vec<String>,
    /// XDR-encoded argument lists
    pub calldatas: Vec<Bytes>,
    /// Whether each call runs in the executor's own context
    pub with_delegatecalls: Vec<bool>,
    /// Earliest timestamp at which the set can be executed
    pub execution_time: u64,
    /// Set once the actions ran
    pub executed: bool,
    /// Set once the guardian canceled the set
    pub canceled: bool,
}

/// The five parallel action lists of an incoming queue request
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ActionsBatch {
    pub targets: Vec<Address>,
    pub values: Vec<i128>,
    pub signatures: Vec<String>,
    pub calldatas: Vec<Bytes>,
    pub with_delegatecalls: Vec<bool>,
}

/// Deployment parameters common to every executor variant
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutorParams {
    /// Timelock applied to newly queued actions sets
    pub delay: u64,
    /// Window after the execution time during which execution stays possible
    pub grace_period: u64,
    /// Lower bound for `delay`
    pub minimum_delay: u64,
    /// Upper bound for `delay`
    pub maximum_delay: u64,
    /// Address allowed to cancel queued actions sets
    pub guardian: Address,
    /// Token contract whose balance funds value-carrying actions
    pub native_asset: Address,
}

/// Runtime configuration, only mutable through executed self-targeting actions
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutorConfig {
    pub delay: u64,
    pub grace_period: u64,
    pub minimum_delay: u64,
    pub maximum_delay: u64,
    pub guardian: Address,
    pub native_asset: Address,
}

impl From<ExecutorParams> for ExecutorConfig {
    fn from(params: ExecutorParams) -> Self {
        Self {
            delay: params.delay,
            grace_period: params.grace_period,
            minimum_delay: params.minimum_delay,
            maximum_delay: params.maximum_delay,
            guardian: params.guardian,
            native_asset: params.native_asset,
        }
    }
}
