use fortir_core::{
    block::Terminator,
    values::{Constant, Value},
};
use std::collections::HashMap;

/// Per-function renumbering so emitted values count up from `v0` in
/// emission order, regardless of the temp and param ids underneath.
pub struct SSAContext {
    next_value: u32,
    value_map: HashMap<String, u32>,
}

impl SSAContext {
    pub fn new() -> Self {
        Self {
            next_value: 0,
            value_map: HashMap::new(),
        }
    }

    pub fn reset(&mut self) {
        self.next_value = 0;
        self.value_map.clear();
    }

    pub fn get_or_allocate(&mut self, value: &Value) -> u32 {
        let key = format!("{:?}", value);
        if let Some(&v) = self.value_map.get(&key) {
            v
        } else {
            let v = self.next_value;
            self.value_map.insert(key, v);
            self.next_value += 1;
            v
        }
    }
}

impl Default for SSAContext {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FormatterBase;

impl FormatterBase {
    pub fn format_value(value: &Value, ssa: &mut SSAContext) -> String {
        match value {
            Value::Temp(_) | Value::Param(_) => format!("v{}", ssa.get_or_allocate(value)),
            Value::Constant(c) => Self::format_constant(c),
        }
    }

    pub fn format_constant(constant: &Constant) -> String {
        match constant {
            Constant::Int(val, bits) => format!("{}i{}", val, bits),
            Constant::Index(val) => format!("{}idx", val),
            Constant::Logical(b) => b.to_string(),
            Constant::Real(val, bits) => format!("{}f{}", val, bits),
            Constant::Str(s) => format!("\"{}\"", s.escape_default()),
            Constant::Null(_) => "null".to_string(),
        }
    }

    pub fn format_terminator(terminator: &Terminator, ssa: &mut SSAContext) -> String {
        match terminator {
            Terminator::Return(None) => "return".to_string(),
            Terminator::Return(Some(val)) => {
                format!("return {}", Self::format_value(val, ssa))
            }
            Terminator::Jump(target) => format!("jump {}", target),
            Terminator::Branch {
                condition,
                then_block,
                else_block,
            } => format!(
                "br {}, {}, {}",
                Self::format_value(condition, ssa),
                then_block,
                else_block
            ),
            Terminator::Unreachable => "unreachable".to_string(),
            Terminator::Invalid => "invalid".to_string(),
        }
    }
}
