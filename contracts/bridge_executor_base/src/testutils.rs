//! Mock contracts for exercising executors in tests

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, token::TokenClient, xdr::ToXdr, Address,
    Bytes, BytesN, Env, IntoVal, String, Val, Vec,
};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum MockKey {
    Message,
    Calls,
    XDomainMessageSender,
}

/// Encode call arguments the way actions carry them
pub fn encode_args(env: &Env, args: Vec<Val>) -> Bytes {
    args.to_xdr(env)
}

/// Encode a single call argument
pub fn encode_arg<T: IntoVal<Env, Val>>(env: &Env, arg: T) -> Bytes {
    let args: Vec<Val> = Vec::from_array(env, [arg.into_val(env)]);
    encode_args(env, args)
}

// ============================================================================
// Greeter
// ============================================================================

/// Records the last message and how many times it was set
#[contract]
pub struct Greeter;

#[contractimpl]
impl Greeter {
    pub fn set_message(env: Env, message: String) -> u32 {
        let calls = Self::calls(env.clone()) + 1;
        env.storage().instance().set(&MockKey::Message, &message);
        env.storage().instance().set(&MockKey::Calls, &calls);
        calls
    }

    pub fn message(env: Env) -> Option<String> {
        env.storage().instance().get(&MockKey::Message)
    }

    pub fn calls(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&MockKey::Calls)
            .unwrap_or(0)
    }
}

// ============================================================================
// Failing Target
// ============================================================================

/// Codes sit above every `ExecutorError` discriminant
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockError {
    Rejected = 1000,
}

#[contract]
pub struct FailingTarget;

#[contractimpl]
impl FailingTarget {
    pub fn reject(_env: Env) -> Result<(), MockError> {
        Err(MockError::Rejected)
    }
}

// ============================================================================
// Collector
// ============================================================================

/// Pulls native asset from a payer during its own invocation
#[contract]
pub struct Collector;

#[contractimpl]
impl Collector {
    pub fn collect(env: Env, asset: Address, payer: Address, amount: i128) {
        TokenClient::new(&env, &asset).transfer(&payer, &env.current_contract_address(), &amount);
    }
}

// ============================================================================
// Cross-Domain Messenger
// ============================================================================

/// Messenger that reports a configurable upstream sender
#[contract]
pub struct MockCrossDomainMessenger;

#[contractimpl]
impl MockCrossDomainMessenger {
    pub fn set_x_domain_message_sender(env: Env, sender: BytesN<20>) {
        env.storage()
            .instance()
            .set(&MockKey::XDomainMessageSender, &sender);
    }

    pub fn x_domain_message_sender(env: Env) -> BytesN<20> {
        env.storage()
            .instance()
            .get(&MockKey::XDomainMessageSender)
            .unwrap_or(BytesN::from_array(&env, &[0u8; 20]))
    }
}
