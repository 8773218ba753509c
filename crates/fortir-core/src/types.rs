use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Int(u16),
    Logical,
    Real(u16),
    Char,
    Ptr(Box<Type>),
    Descriptor,
    Index,
    Unit,
}

impl Type {
    pub fn char_ptr() -> Self {
        Type::Ptr(Box::new(Type::Char))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Unit)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int(bits) => write!(f, "i{}", bits),
            Type::Logical => write!(f, "i1"),
            Type::Real(bits) => write!(f, "f{}", bits),
            Type::Char => write!(f, "char"),
            Type::Ptr(inner) => write!(f, "ref<{}>", inner),
            Type::Descriptor => write!(f, "box"),
            Type::Index => write!(f, "index"),
            Type::Unit => write!(f, "void"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl FuncType {
    pub fn new(params: Vec<Type>, ret: Type) -> Self {
        Self { params, ret }
    }

    pub fn param(&self, index: usize) -> Option<&Type> {
        self.params.get(index)
    }
}

impl std::fmt::Display for FuncType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self.params.iter().map(|t| t.to_string()).collect();
        write!(f, "({}) -> {}", params.join(", "), self.ret)
    }
}
