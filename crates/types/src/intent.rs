use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt},
    json_abi::Function,
    primitives::{Address, Bytes, U256},
};

/// A contract call to execute.
///
/// Carries the target, the ABI descriptor of the called function, the
/// ordered arguments, and an optional native value. Never mutated once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionIntent {
    to: Address,
    function: Function,
    args: Vec<DynSolValue>,
    value: Option<U256>,
}

impl TransactionIntent {
    /// Create an intent with no native value.
    pub const fn new(to: Address, function: Function, args: Vec<DynSolValue>) -> Self {
        Self { to, function, args, value: None }
    }

    /// Attach a native value.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// The target contract.
    pub const fn to(&self) -> Address {
        self.to
    }

    /// The function descriptor.
    pub const fn function(&self) -> &Function {
        &self.function
    }

    /// The function's name.
    pub fn function_name(&self) -> &str {
        &self.function.name
    }

    /// The ordered call arguments.
    pub fn args(&self) -> &[DynSolValue] {
        &self.args
    }

    /// The native value, if any.
    pub const fn value(&self) -> Option<U256> {
        self.value
    }

    /// ABI-encode the call: selector followed by the encoded arguments.
    pub fn calldata(&self) -> Result<Bytes, alloy::dyn_abi::Error> {
        self.function.abi_encode_input(&self.args).map(Into::into)
    }
}
