use crate::types::Type;
use crate::values::Value;
use serde::{Deserialize, Serialize};

/// The lowering layer emits exactly two instruction kinds: explicit type
/// conversions and direct calls to declared symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    Convert {
        result: Value,
        value: Value,
        to: Type,
    },
    Call {
        result: Option<Value>,
        callee: String,
        args: Vec<Value>,
    },
}

impl Instruction {
    pub fn result(&self) -> Option<&Value> {
        match self {
            Instruction::Convert { result, .. } => Some(result),
            Instruction::Call { result, .. } => result.as_ref(),
        }
    }
}
