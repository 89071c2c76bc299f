//! Action execution engine
//!
//! Runs the actions of one set in order. Each action resolves to a function
//! symbol and an argument list, then is dispatched one of three ways:
//!
//! - targets equal to the executor itself run internally inside a self-call
//!   frame, the only place where `OnlyCallableByThis` operations succeed
//!   (contracts cannot re-enter themselves on Soroban);
//! - `with_delegatecall = false`: `value` is transferred to the target, then
//!   the target is invoked in its own context;
//! - `with_delegatecall = true`: nothing moves at the call boundary; the
//!   executor instead authorizes, as itself, a `transfer` of `value` to the
//!   target for the duration of the call.
//!
//! A failing sub-call is never caught. It aborts the enclosing invocation with
//! its original error, which also rolls back `executed = true`.

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    token::TokenClient,
    vec,
    xdr::FromXdr,
    Address, Bytes, Env, IntoVal, String, Symbol, TryFromVal, Val, Vec,
};

use crate::auth::SelfAmendable;
use crate::error::ExecutorError;
use crate::executor;
use crate::storage;
use crate::types::{ActionsSet, ExecutorConfig};

/// Soroban symbols are at most 32 characters long
const MAX_SYMBOL_LEN: usize = 32;

/// Run every action of `actions_set` and collect the raw return values
pub fn run_actions_set<A: SelfAmendable>(
    env: &Env,
    config: &ExecutorConfig,
    actions_set: &ActionsSet,
) -> Result<Vec<Val>, ExecutorError> {
    let this = env.current_contract_address();
    let mut returned_data = Vec::new(env);

    for i in 0..actions_set.len() {
        let target = actions_set.targets.get_unchecked(i);
        let value = actions_set.values.get_unchecked(i);
        let (function, args) = resolve_call(
            env,
            &actions_set.signatures.get_unchecked(i),
            &actions_set.calldatas.get_unchecked(i),
        )?;

        let result: Val = if target == this {
            dispatch_self_call::<A>(env, &function, &args)?;
            ().into_val(env)
        } else if actions_set.with_delegatecalls.get_unchecked(i) {
            if value > 0 {
                authorize_transfer(env, &config.native_asset, &this, &target, value);
            }
            env.invoke_contract::<Val>(&target, &function, args)
        } else {
            if value > 0 {
                TokenClient::new(env, &config.native_asset).transfer(&this, &target, &value);
            }
            env.invoke_contract::<Val>(&target, &function, args)
        };

        returned_data.push_back(result);
    }

    Ok(returned_data)
}

/// Split an action into the function to invoke and its arguments
///
/// A non-empty `signature` names the function and `calldata` holds the XDR
/// argument list (empty means no arguments). An empty `signature` means
/// `calldata` is an XDR list whose head is the function symbol.
pub fn resolve_call(
    env: &Env,
    signature: &String,
    calldata: &Bytes,
) -> Result<(Symbol, Vec<Val>), ExecutorError> {
    if signature.is_empty() {
        if calldata.is_empty() {
            return Err(ExecutorError::InvalidCalldata);
        }
        let parts = decode_args(env, calldata)?;
        let head = parts.get(0).ok_or(ExecutorError::InvalidCalldata)?;
        let function =
            Symbol::try_from_val(env, &head).map_err(|_| ExecutorError::InvalidCalldata)?;
        return Ok((function, parts.slice(1..)));
    }

    let function = symbol_from_string(env, signature)?;
    let args = if calldata.is_empty() {
        Vec::new(env)
    } else {
        decode_args(env, calldata)?
    };
    Ok((function, args))
}

/// Well-formed XDR of any other type is `InvalidCalldata`; malformed XDR traps the host
fn decode_args(env: &Env, calldata: &Bytes) -> Result<Vec<Val>, ExecutorError> {
    Vec::<Val>::from_xdr(env, calldata).map_err(|_| ExecutorError::InvalidCalldata)
}

fn symbol_from_string(env: &Env, name: &String) -> Result<Symbol, ExecutorError> {
    let len = name.len() as usize;
    if len == 0 || len > MAX_SYMBOL_LEN {
        return Err(ExecutorError::InvalidSignature);
    }

    let mut buf = [0u8; MAX_SYMBOL_LEN];
    let buf = &mut buf[..len];
    name.copy_into_slice(buf);
    if !buf.iter().all(|c| c.is_ascii_alphanumeric() || *c == b'_') {
        return Err(ExecutorError::InvalidSignature);
    }

    let name = core::str::from_utf8(buf).map_err(|_| ExecutorError::InvalidSignature)?;
    Ok(Symbol::new(env, name))
}

/// Let `target` move `value` of the executor's native asset during the next call
fn authorize_transfer(env: &Env, native_asset: &Address, this: &Address, target: &Address, value: i128) {
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: native_asset.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (this.clone(), target.clone(), value).into_val(env),
            },
            sub_invocations: Vec::new(env),
        }),
    ]);
}

// ============================================================================
// Self-Call Dispatch
// ============================================================================

fn dispatch_self_call<A: SelfAmendable>(
    env: &Env,
    function: &Symbol,
    args: &Vec<Val>,
) -> Result<(), ExecutorError> {
    storage::enter_self_call(env);
    let result = dispatch_base(env, function, args)
        .or_else(|| A::dispatch_self_call(env, function, args))
        .unwrap_or(Err(ExecutorError::UnsupportedSelfCall));
    storage::exit_self_call(env);
    result
}

fn dispatch_base(env: &Env, function: &Symbol, args: &Vec<Val>) -> Option<Result<(), ExecutorError>> {
    let result = if *function == Symbol::new(env, "update_guardian") {
        single_arg(env, args).and_then(|guardian| executor::update_guardian(env, guardian))
    } else if *function == Symbol::new(env, "update_delay") {
        single_arg(env, args).and_then(|delay| executor::update_delay(env, delay))
    } else if *function == Symbol::new(env, "update_grace_period") {
        single_arg(env, args).and_then(|period| executor::update_grace_period(env, period))
    } else if *function == Symbol::new(env, "update_minimum_delay") {
        single_arg(env, args).and_then(|delay| executor::update_minimum_delay(env, delay))
    } else if *function == Symbol::new(env, "update_maximum_delay") {
        single_arg(env, args).and_then(|delay| executor::update_maximum_delay(env, delay))
    } else if *function == Symbol::new(env, "upgrade") {
        single_arg(env, args).and_then(|hash| executor::upgrade(env, hash))
    } else {
        return None;
    };
    Some(result)
}

/// Decode the only argument of a self-targeting action
pub fn single_arg<T>(env: &Env, args: &Vec<Val>) -> Result<T, ExecutorError>
where
    T: TryFromVal<Env, Val>,
{
    if args.len() != 1 {
        return Err(ExecutorError::InvalidCalldata);
    }
    let val = args.get(0).ok_or(ExecutorError::InvalidCalldata)?;
    T::try_from_val(env, &val).map_err(|_| ExecutorError::InvalidCalldata)
}
