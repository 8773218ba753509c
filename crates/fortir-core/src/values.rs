use crate::types::Type;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TempId(pub u32);

impl std::fmt::Display for TempId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamId(pub u32);

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Temp(TempId),
    Param(ParamId),
    Constant(Constant),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constant {
    Int(i64, u16),
    Index(i64),
    Logical(bool),
    Real(f64, u16),
    Str(String),
    Null(Type),
}

impl Constant {
    pub fn ty(&self) -> Type {
        match self {
            Constant::Int(_, bits) => Type::Int(*bits),
            Constant::Index(_) => Type::Index,
            Constant::Logical(_) => Type::Logical,
            Constant::Real(_, bits) => Type::Real(*bits),
            Constant::Str(_) => Type::char_ptr(),
            Constant::Null(ty) => ty.clone(),
        }
    }

    /// Zero of `ty`, for numeric and logical types only.
    pub fn zero(ty: &Type) -> Option<Self> {
        match ty {
            Type::Int(bits) => Some(Constant::Int(0, *bits)),
            Type::Index => Some(Constant::Index(0)),
            Type::Logical => Some(Constant::Logical(false)),
            Type::Real(bits) => Some(Constant::Real(0.0, *bits)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::Int(val, bits) => write!(f, "{}i{}", val, bits),
            Constant::Index(val) => write!(f, "{}idx", val),
            Constant::Logical(b) => write!(f, "{}", b),
            Constant::Real(val, bits) => write!(f, "{}f{}", val, bits),
            Constant::Str(s) => write!(f, "\"{}\"", s.escape_default()),
            Constant::Null(_) => write!(f, "null"),
        }
    }
}

/// Shape of a lowered expression as handed to the runtime-call layer.
///
/// `Scalar` wraps a single value, `Char` carries character data together
/// with its length, `Descriptor` is a boxed array or pointer handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprValue {
    Scalar(Value),
    Char { data: Value, len: Value },
    Descriptor(Value),
}

impl ExprValue {
    pub fn shape_name(&self) -> &'static str {
        match self {
            ExprValue::Scalar(_) => "scalar",
            ExprValue::Char { .. } => "char",
            ExprValue::Descriptor(_) => "descriptor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_types() {
        assert_eq!(Constant::Int(42, 32).ty(), Type::Int(32));
        assert_eq!(Constant::Index(3).ty(), Type::Index);
        assert_eq!(Constant::Str("bye".to_string()).ty(), Type::char_ptr());
        assert_eq!(Constant::Null(Type::Descriptor).ty(), Type::Descriptor);
    }

    #[test]
    fn test_constant_zero() {
        assert_eq!(Constant::zero(&Type::Int(32)), Some(Constant::Int(0, 32)));
        assert_eq!(Constant::zero(&Type::Logical), Some(Constant::Logical(false)));
        assert_eq!(Constant::zero(&Type::Descriptor), None);
    }

    #[test]
    fn test_constant_display() {
        assert_eq!(Constant::Int(42, 32).to_string(), "42i32");
        assert_eq!(Constant::Logical(true).to_string(), "true");
        assert_eq!(Constant::Str("bye".to_string()).to_string(), "\"bye\"");
        assert_eq!(Constant::Null(Type::Descriptor).to_string(), "null");
    }

    #[test]
    fn test_expr_value_shape_names() {
        let scalar = ExprValue::Scalar(Value::Constant(Constant::Int(1, 32)));
        assert_eq!(scalar.shape_name(), "scalar");

        let boxed = ExprValue::Descriptor(Value::Param(ParamId(0)));
        assert_eq!(boxed.shape_name(), "descriptor");
    }
}
