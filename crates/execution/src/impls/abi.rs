use crate::CallEncoder;
use alloy::primitives::Bytes;
use txflow_types::TransactionIntent;

/// Encodes an intent with its ABI function descriptor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbiCallEncoder;

impl CallEncoder for AbiCallEncoder {
    type Error = alloy::dyn_abi::Error;

    fn encode_call(&self, intent: &TransactionIntent) -> Result<Bytes, Self::Error> {
        intent.calldata()
    }
}
