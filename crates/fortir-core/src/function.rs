use crate::block::{BasicBlock, BlockId};
use crate::types::{FuncType, Type};
use crate::values::TempId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Function {
    pub signature: FuncSignature,
    pub body: FunctionBody,
}

impl Function {
    pub fn new(signature: FuncSignature) -> Self {
        Self {
            signature,
            body: FunctionBody::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn entry_block(&self) -> BlockId {
        self.body.entry_block
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuncSignature {
    pub name: String,
    pub params: Vec<Param>,
    pub ret: Type,
}

impl FuncSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            ret: Type::Unit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Block list plus the per-function temp-type table. Temps are typed at
/// creation; `Value::Temp` carries only the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionBody {
    pub entry_block: BlockId,
    pub blocks: IndexMap<BlockId, BasicBlock>,
    pub temps: Vec<Type>,
    next_block_id: u32,
}

impl FunctionBody {
    pub fn new() -> Self {
        let entry_block = BlockId(0);
        let mut blocks = IndexMap::new();
        blocks.insert(entry_block, BasicBlock::new(entry_block));

        Self {
            entry_block,
            blocks,
            temps: Vec::new(),
            next_block_id: 1,
        }
    }

    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId(self.next_block_id);
        self.next_block_id += 1;
        self.blocks.insert(id, BasicBlock::new(id));
        id
    }

    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(&id)
    }

    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(&id)
    }

    pub fn add_temp(&mut self, ty: Type) -> TempId {
        let id = TempId(self.temps.len() as u32);
        self.temps.push(ty);
        id
    }

    pub fn temp_type(&self, id: TempId) -> Option<&Type> {
        self.temps.get(id.0 as usize)
    }
}

impl Default for FunctionBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Declaration of an external callee, typically a runtime entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: String,
    pub ty: FuncType,
    pub never_returns: bool,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, ty: FuncType, never_returns: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            never_returns,
        }
    }
}
