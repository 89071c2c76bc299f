#![cfg(test)]

use super::*;
use bridge_executor_base::testutils::{
    encode_arg, encode_args, Collector, FailingTarget, Greeter, GreeterClient,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger, MockAuth, MockAuthInvoke},
    token::{StellarAssetClient, TokenClient},
    vec,
    xdr::ToXdr,
    IntoVal, InvokeError, String, Symbol, TryFromVal,
};

const DELAY: u64 = 50;
const MAXIMUM_DELAY: u64 = 100;
const MINIMUM_DELAY: u64 = 1;
const GRACE_PERIOD: u64 = 1000;
const START: u64 = 100_000;

// ============================================================================
// Test Helpers
// ============================================================================

struct TestSetup {
    env: Env,
    executor: Address,
    guardian: Address,
    fx_child: Address,
    fx_root_sender: BytesN<20>,
    asset: Address,
    greeter: Address,
}

fn create_test_env() -> TestSetup {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let asset_admin = Address::generate(&env);
    let asset = env
        .register_stellar_asset_contract_v2(asset_admin)
        .address();

    TestSetup {
        executor: env.register(PolygonBridgeExecutor, ()),
        guardian: Address::generate(&env),
        fx_child: Address::generate(&env),
        fx_root_sender: BytesN::from_array(&env, &[0xaa; 20]),
        greeter: env.register(Greeter, ()),
        asset,
        env,
    }
}

fn params(setup: &TestSetup) -> ExecutorParams {
    ExecutorParams {
        delay: DELAY,
        grace_period: GRACE_PERIOD,
        minimum_delay: MINIMUM_DELAY,
        maximum_delay: MAXIMUM_DELAY,
        guardian: setup.guardian.clone(),
        native_asset: setup.asset.clone(),
    }
}

fn client(setup: &TestSetup) -> PolygonBridgeExecutorClient<'static> {
    PolygonBridgeExecutorClient::new(&setup.env, &setup.executor)
}

fn initialize_contract() -> TestSetup {
    let setup = create_test_env();
    client(&setup).initialize(&params(&setup), &setup.fx_root_sender, &setup.fx_child);
    setup
}

fn action(
    env: &Env,
    target: &Address,
    value: i128,
    signature: &str,
    calldata: Bytes,
    with_delegatecall: bool,
) -> ActionsBatch {
    ActionsBatch::new(
        vec![env, target.clone()],
        vec![env, value],
        vec![env, String::from_str(env, signature)],
        vec![env, calldata],
        vec![env, with_delegatecall],
    )
}

fn greeting(env: &Env, greeter: &Address, message: &str) -> ActionsBatch {
    action(
        env,
        greeter,
        0,
        "set_message",
        encode_arg(env, String::from_str(env, message)),
        false,
    )
}

fn join(mut first: ActionsBatch, second: ActionsBatch) -> ActionsBatch {
    first.targets.append(&second.targets);
    first.values.append(&second.values);
    first.signatures.append(&second.signatures);
    first.calldatas.append(&second.calldatas);
    first.with_delegatecalls.append(&second.with_delegatecalls);
    first
}

fn encode_payload(env: &Env, batch: &ActionsBatch) -> Bytes {
    (
        batch.targets.clone(),
        batch.values.clone(),
        batch.signatures.clone(),
        batch.calldatas.clone(),
        batch.with_delegatecalls.clone(),
    )
        .to_xdr(env)
}

fn queue(setup: &TestSetup, batch: &ActionsBatch) -> u32 {
    client(setup).process_message_from_root(
        &setup.fx_child,
        &1,
        &setup.fx_root_sender,
        &encode_payload(&setup.env, batch),
    )
}

fn advance_past_delay(setup: &TestSetup) {
    let now = setup.env.ledger().timestamp();
    setup.env.ledger().set_timestamp(now + DELAY + 1);
}

fn fund_executor(setup: &TestSetup, amount: i128) {
    let funder = Address::generate(&setup.env);
    StellarAssetClient::new(&setup.env, &setup.asset).mint(&funder, &amount);
    client(setup).receive_funds(&funder, &amount);
}

// ============================================================================
// Initialization Tests
// ============================================================================

#[test]
fn test_initialize_success() {
    let setup = initialize_contract();
    let client = client(&setup);

    assert_eq!(client.get_delay(), DELAY);
    assert_eq!(client.get_grace_period(), GRACE_PERIOD);
    assert_eq!(client.get_minimum_delay(), MINIMUM_DELAY);
    assert_eq!(client.get_maximum_delay(), MAXIMUM_DELAY);
    assert_eq!(client.get_guardian(), setup.guardian);
    assert_eq!(client.get_native_asset(), setup.asset);
    assert_eq!(client.get_fx_root_sender(), setup.fx_root_sender);
    assert_eq!(client.get_fx_child(), setup.fx_child);
    assert_eq!(client.get_actions_set_count(), 0);
}

#[test]
fn test_initialize_twice_fails() {
    let setup = initialize_contract();

    let result =
        client(&setup).try_initialize(&params(&setup), &setup.fx_root_sender, &setup.fx_child);
    assert_eq!(result, Err(Ok(ExecutorError::AlreadyInitialized)));
}

#[test]
fn test_initialize_invalid_params() {
    let setup = create_test_env();
    let client = client(&setup);

    let mut invalid = params(&setup);
    invalid.delay = MAXIMUM_DELAY + 1;
    let result = client.try_initialize(&invalid, &setup.fx_root_sender, &setup.fx_child);
    assert_eq!(result, Err(Ok(ExecutorError::InvalidInitParams)));

    let mut invalid = params(&setup);
    invalid.grace_period = 599;
    let result = client.try_initialize(&invalid, &setup.fx_root_sender, &setup.fx_child);
    assert_eq!(result, Err(Ok(ExecutorError::InvalidInitParams)));
}

#[test]
fn test_entrypoints_require_initialization() {
    let setup = create_test_env();
    let batch = greeting(&setup.env, &setup.greeter, "hello");

    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &1,
        &setup.fx_root_sender,
        &encode_payload(&setup.env, &batch),
    );
    assert_eq!(result, Err(Ok(ExecutorError::NotInitialized)));

    let result = client(&setup).try_get_delay();
    assert_eq!(result, Err(Ok(ExecutorError::NotInitialized)));
}

// ============================================================================
// Origin Tests
// ============================================================================

#[test]
fn test_rejects_unknown_relay() {
    let setup = initialize_contract();
    let batch = greeting(&setup.env, &setup.greeter, "hello");
    let impostor = Address::generate(&setup.env);

    let result = client(&setup).try_process_message_from_root(
        &impostor,
        &1,
        &setup.fx_root_sender,
        &encode_payload(&setup.env, &batch),
    );
    assert_eq!(result, Err(Ok(ExecutorError::UnauthorizedChildOrigin)));
}

#[test]
fn test_relay_must_authorize_call() {
    let setup = initialize_contract();
    let payload = encode_payload(&setup.env, &greeting(&setup.env, &setup.greeter, "hello"));

    // Claiming to be the relay without its signature
    setup.env.set_auths(&[]);
    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &1,
        &setup.fx_root_sender,
        &payload,
    );
    assert!(result.is_err());
    assert_eq!(client(&setup).get_actions_set_count(), 0);
}

#[test]
fn test_rejects_unknown_root_sender() {
    let setup = initialize_contract();
    let batch = greeting(&setup.env, &setup.greeter, "hello");

    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &1,
        &BytesN::from_array(&setup.env, &[0xbb; 20]),
        &encode_payload(&setup.env, &batch),
    );
    assert_eq!(result, Err(Ok(ExecutorError::UnauthorizedRootOrigin)));
    assert_eq!(client(&setup).get_actions_set_count(), 0);
}

#[test]
fn test_rejects_malformed_payload() {
    let setup = initialize_contract();

    let wrong_shape = (1u32, 2u32).to_xdr(&setup.env);
    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &1,
        &setup.fx_root_sender,
        &wrong_shape,
    );
    assert_eq!(result, Err(Ok(ExecutorError::InvalidCalldata)));
}

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_queue_and_execute() {
    let setup = initialize_contract();
    let client = client(&setup);
    let greeter = GreeterClient::new(&setup.env, &setup.greeter);

    let id = queue(&setup, &greeting(&setup.env, &setup.greeter, "hello"));
    assert_eq!(id, 0);
    assert_eq!(client.get_current_state(&id), ActionsSetState::Queued);

    let actions_set = client.get_actions_set_by_id(&id);
    assert_eq!(actions_set.execution_time, START + DELAY);
    let hash = actions_set.action_hash(&setup.env, 0);
    assert!(client.is_action_queued(&hash));

    let caller = Address::generate(&setup.env);
    setup.env.ledger().set_timestamp(START + DELAY - 1);
    let result = client.try_execute(&caller, &id);
    assert_eq!(result, Err(Ok(ExecutorError::TimelockNotFinished)));

    setup.env.ledger().set_timestamp(START + DELAY);
    let returned = client.execute(&caller, &id);
    assert_eq!(returned.len(), 1);
    assert_eq!(
        u32::try_from_val(&setup.env, &returned.get(0).unwrap()).unwrap(),
        1
    );

    assert_eq!(greeter.calls(), 1);
    assert_eq!(
        greeter.message(),
        Some(String::from_str(&setup.env, "hello"))
    );
    assert_eq!(client.get_current_state(&id), ActionsSetState::Executed);
    assert!(!client.is_action_queued(&hash));

    let result = client.try_execute(&caller, &id);
    assert_eq!(result, Err(Ok(ExecutorError::OnlyQueuedActions)));
}

#[test]
fn test_execute_raw_calldata_action() {
    let setup = initialize_contract();
    let env = &setup.env;

    let parts: Vec<Val> = vec![
        env,
        Symbol::new(env, "set_message").into_val(env),
        String::from_str(env, "raw").into_val(env),
    ];
    let batch = action(env, &setup.greeter, 0, "", encode_args(env, parts), false);
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    client(&setup).execute(&setup.guardian, &id);

    let greeter = GreeterClient::new(env, &setup.greeter);
    assert_eq!(greeter.message(), Some(String::from_str(env, "raw")));
}

#[test]
fn test_duplicate_actions_rejected() {
    let setup = initialize_contract();
    let batch = greeting(&setup.env, &setup.greeter, "hello");

    queue(&setup, &batch);

    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &2,
        &setup.fx_root_sender,
        &encode_payload(&setup.env, &batch),
    );
    assert_eq!(result, Err(Ok(ExecutorError::DuplicateAction)));

    let doubled = join(batch.clone(), batch);
    setup.env.ledger().set_timestamp(START + 1);
    let result = client(&setup).try_process_message_from_root(
        &setup.fx_child,
        &3,
        &setup.fx_root_sender,
        &encode_payload(&setup.env, &doubled),
    );
    assert_eq!(result, Err(Ok(ExecutorError::DuplicateAction)));
    assert_eq!(client(&setup).get_actions_set_count(), 1);
}

#[test]
fn test_cancel_by_guardian() {
    let setup = initialize_contract();
    let client = client(&setup);
    let batch = greeting(&setup.env, &setup.greeter, "hello");
    let id = queue(&setup, &batch);

    let stranger = Address::generate(&setup.env);
    let result = client.try_cancel(&stranger, &id);
    assert_eq!(result, Err(Ok(ExecutorError::NotGuardian)));

    client.cancel(&setup.guardian, &id);
    assert_eq!(client.get_current_state(&id), ActionsSetState::Canceled);

    advance_past_delay(&setup);
    let result = client.try_execute(&stranger, &id);
    assert_eq!(result, Err(Ok(ExecutorError::OnlyQueuedActions)));

    // Same actions can be queued again once canceled
    setup.env.ledger().set_timestamp(START);
    assert_eq!(queue(&setup, &batch), 1);
}

#[test]
fn test_cancel_requires_guardian_signature() {
    let setup = initialize_contract();
    let client = client(&setup);
    let id = queue(&setup, &greeting(&setup.env, &setup.greeter, "hello"));

    setup.env.set_auths(&[]);
    assert!(client.try_cancel(&setup.guardian, &id).is_err());
    assert_eq!(client.get_current_state(&id), ActionsSetState::Queued);
}

#[test]
fn test_executed_set_cannot_be_canceled() {
    let setup = initialize_contract();
    let client = client(&setup);
    let id = queue(&setup, &greeting(&setup.env, &setup.greeter, "hello"));

    advance_past_delay(&setup);
    client.execute(&setup.guardian, &id);

    let result = client.try_cancel(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::OnlyQueuedActions)));
    assert_eq!(client.get_current_state(&id), ActionsSetState::Executed);
}

#[test]
fn test_expired_set_cannot_run() {
    let setup = initialize_contract();
    let client = client(&setup);
    let id = queue(&setup, &greeting(&setup.env, &setup.greeter, "hello"));

    setup
        .env
        .ledger()
        .set_timestamp(START + DELAY + GRACE_PERIOD + 1);
    assert_eq!(client.get_current_state(&id), ActionsSetState::Expired);

    let result = client.try_execute(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::OnlyQueuedActions)));
    let result = client.try_cancel(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::OnlyQueuedActions)));
}

#[test]
fn test_failing_action_rolls_back_set() {
    let setup = initialize_contract();
    let client = client(&setup);
    let failing = setup.env.register(FailingTarget, ());

    let batch = join(
        greeting(&setup.env, &setup.greeter, "hello"),
        action(&setup.env, &failing, 0, "reject", Bytes::new(&setup.env), false),
    );
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    // The target's own error code reaches the caller untouched
    let result = client.try_execute(&setup.guardian, &id);
    assert_eq!(result, Err(Err(InvokeError::Contract(1000))));

    let actions_set = client.get_actions_set_by_id(&id);
    assert!(!actions_set.executed);
    assert_eq!(client.get_current_state(&id), ActionsSetState::Queued);
    for hash in actions_set.action_hashes(&setup.env).iter() {
        assert!(client.is_action_queued(&hash));
    }
    assert_eq!(GreeterClient::new(&setup.env, &setup.greeter).calls(), 0);
}

// ============================================================================
// Self-Amendment Tests
// ============================================================================

#[test]
fn test_self_amendment_through_actions_set() {
    let setup = initialize_contract();
    let client = client(&setup);
    let env = &setup.env;
    let new_child = Address::generate(env);
    let new_guardian = Address::generate(env);

    let batch = join(
        join(
            action(env, &setup.executor, 0, "update_delay", encode_arg(env, 60u64), false),
            action(
                env,
                &setup.executor,
                0,
                "update_fx_child",
                encode_arg(env, new_child.clone()),
                false,
            ),
        ),
        action(
            env,
            &setup.executor,
            0,
            "update_guardian",
            encode_arg(env, new_guardian.clone()),
            false,
        ),
    );
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    client.execute(&setup.guardian, &id);

    assert_eq!(client.get_delay(), 60);
    assert_eq!(client.get_fx_child(), new_child);
    assert_eq!(client.get_guardian(), new_guardian);

    // The previous relay is no longer trusted
    let result = client.try_process_message_from_root(
        &setup.fx_child,
        &9,
        &setup.fx_root_sender,
        &encode_payload(env, &greeting(env, &setup.greeter, "late")),
    );
    assert_eq!(result, Err(Ok(ExecutorError::UnauthorizedChildOrigin)));
}

#[test]
fn test_invalid_self_amendment_aborts_execution() {
    let setup = initialize_contract();
    let client = client(&setup);
    let env = &setup.env;

    let batch = action(
        env,
        &setup.executor,
        0,
        "update_delay",
        encode_arg(env, MAXIMUM_DELAY + 1),
        false,
    );
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    let result = client.try_execute(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::DelayLongerThanMax)));
    assert_eq!(client.get_current_state(&id), ActionsSetState::Queued);
    assert_eq!(client.get_delay(), DELAY);
}

#[test]
fn test_unknown_self_call_rejected() {
    let setup = initialize_contract();
    let client = client(&setup);
    let env = &setup.env;

    let batch = action(env, &setup.executor, 0, "get_delay", Bytes::new(env), false);
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    let result = client.try_execute(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::UnsupportedSelfCall)));
}

#[test]
fn test_direct_updates_rejected() {
    let setup = initialize_contract();
    let client = client(&setup);
    let other = Address::generate(&setup.env);

    assert_eq!(
        client.try_update_guardian(&other),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_delay(&60),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_grace_period(&2000),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_minimum_delay(&2),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_maximum_delay(&200),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_fx_root_sender(&BytesN::from_array(&setup.env, &[0xcc; 20])),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_update_fx_child(&other),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
    assert_eq!(
        client.try_upgrade(&BytesN::from_array(&setup.env, &[0u8; 32])),
        Err(Ok(ExecutorError::OnlyCallableByThis))
    );
}

// ============================================================================
// Value Tests
// ============================================================================

#[test]
fn test_receive_funds() {
    let setup = initialize_contract();
    let token = TokenClient::new(&setup.env, &setup.asset);

    fund_executor(&setup, 500);
    assert_eq!(token.balance(&setup.executor), 500);

    let funder = Address::generate(&setup.env);
    let result = client(&setup).try_receive_funds(&funder, &0);
    assert_eq!(result, Err(Ok(ExecutorError::InvalidAmount)));
}

#[test]
fn test_value_transferred_to_target() {
    let setup = initialize_contract();
    let token = TokenClient::new(&setup.env, &setup.asset);
    fund_executor(&setup, 500);

    let batch = action(
        &setup.env,
        &setup.greeter,
        100,
        "set_message",
        encode_arg(&setup.env, String::from_str(&setup.env, "paid")),
        false,
    );
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    client(&setup).execute(&setup.guardian, &id);

    assert_eq!(token.balance(&setup.greeter), 100);
    assert_eq!(token.balance(&setup.executor), 400);
}

#[test]
fn test_insufficient_balance() {
    let setup = initialize_contract();
    let client = client(&setup);

    let batch = action(
        &setup.env,
        &setup.greeter,
        100,
        "set_message",
        encode_arg(&setup.env, String::from_str(&setup.env, "paid")),
        false,
    );
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    let result = client.try_execute(&setup.guardian, &id);
    assert_eq!(result, Err(Ok(ExecutorError::InsufficientBalance)));
    assert_eq!(client.get_current_state(&id), ActionsSetState::Queued);
}

#[test]
fn test_own_context_action_spends_executor_funds() {
    let setup = initialize_contract();
    let env = &setup.env;
    let token = TokenClient::new(env, &setup.asset);
    fund_executor(&setup, 300);

    let collector = env.register(Collector, ());
    let args: Vec<Val> = vec![
        env,
        setup.asset.into_val(env),
        setup.executor.into_val(env),
        100i128.into_val(env),
    ];
    let batch = action(env, &collector, 100, "collect", encode_args(env, args), true);
    let id = queue(&setup, &batch);

    advance_past_delay(&setup);
    // Only the initiator signs; the executor authorizes its own transfer
    env.mock_auths(&[MockAuth {
        address: &setup.guardian,
        invoke: &MockAuthInvoke {
            contract: &setup.executor,
            fn_name: "execute",
            args: (setup.guardian.clone(), id).into_val(env),
            sub_invokes: &[],
        },
    }]);
    client(&setup).execute(&setup.guardian, &id);

    assert_eq!(token.balance(&collector), 100);
    assert_eq!(token.balance(&setup.executor), 200);
}
