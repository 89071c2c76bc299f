//! Error types shared by every bridge executor variant

use soroban_sdk::contracterror;

/// Bridge executor errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ExecutorError {
    /// Contract has already been initialized
    AlreadyInitialized = 1,
    /// Contract has not been initialized
    NotInitialized = 2,
    /// Deployment parameters violate the delay / grace period invariants
    InvalidInitParams = 3,
    /// Caller is not the guardian
    NotGuardian = 4,
    /// Operation is only reachable through an executed actions set targeting this contract
    OnlyCallableByThis = 5,
    /// New minimum delay is not below the maximum delay
    MinimumDelayTooLong = 6,
    /// New maximum delay is not above the minimum delay
    MaximumDelayTooShort = 7,
    /// Grace period is below `MINIMUM_GRACE_PERIOD`
    GracePeriodTooShort = 8,
    /// Delay is below the minimum delay
    DelayShorterThanMin = 9,
    /// Delay is above the maximum delay
    DelayLongerThanMax = 10,
    /// Actions set is not in the `Queued` state
    OnlyQueuedActions = 11,
    /// Execution time has not been reached yet
    TimelockNotFinished = 12,
    /// No actions set exists with the given id
    InvalidActionsSetId = 13,
    /// Actions set has no targets
    EmptyTargets = 14,
    /// Action parameter lists have different lengths
    InconsistentParamsLength = 15,
    /// An identical action is already queued
    DuplicateAction = 16,
    /// Executor holds less native asset than the actions set transfers
    InsufficientBalance = 17,
    /// An action carries a negative native asset amount
    NegativeActionValue = 18,
    /// Function signature is not a valid contract function name
    InvalidSignature = 19,
    /// Call data does not decode to a function and argument list
    InvalidCalldata = 20,
    /// Self-targeted action names a function the executor does not expose
    UnsupportedSelfCall = 21,
    /// Amount must be strictly positive
    InvalidAmount = 22,

    /// Caller is not the trusted state-sync relay
    UnauthorizedChildOrigin = 30,
    /// Relayed message was not sent by the trusted root sender
    UnauthorizedRootOrigin = 31,
    /// Caller is not the aliased Ethereum governance executor
    UnauthorizedEthereumExecutor = 32,
    /// Caller is not the trusted cross-domain messenger
    UnauthorizedMessenger = 33,
    /// Cross-domain sender reported by the messenger is not trusted
    UnauthorizedCrossDomainSender = 34,
}
