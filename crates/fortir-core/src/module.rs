use crate::function::{FuncDecl, Function};
use crate::instructions::Instruction;
use crate::source_location::SourceFiles;
use crate::values::Value;
use crate::{IrError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    pub declarations: IndexMap<String, FuncDecl>,
    pub functions: IndexMap<String, Function>,
    pub metadata: ModuleMetadata,
    #[serde(skip)]
    pub source_files: SourceFiles,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: IndexMap::new(),
            functions: IndexMap::new(),
            metadata: ModuleMetadata::default(),
            source_files: SourceFiles::new(),
        }
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions
            .insert(function.signature.name.clone(), function);
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Idempotent for an identical redeclaration; a declaration under the
    /// same name with a different type or never-returns attribute is
    /// rejected.
    pub fn declare_func(&mut self, decl: FuncDecl) -> Result<&FuncDecl> {
        match self.declarations.get(&decl.name) {
            Some(existing) => {
                if existing.ty != decl.ty || existing.never_returns != decl.never_returns {
                    return Err(IrError::TypeError(format!(
                        "conflicting declaration for {}: {} vs {}",
                        decl.name, existing.ty, decl.ty
                    )));
                }
            }
            None => {
                self.declarations.insert(decl.name.clone(), decl.clone());
            }
        }
        Ok(&self.declarations[&decl.name])
    }

    pub fn find_decl(&self, name: &str) -> Option<&FuncDecl> {
        self.declarations.get(name)
    }

    /// Structural well-formedness: sealed blocks, known branch targets,
    /// declared callees with matching arities, result temps typed and
    /// defined exactly once.
    pub fn validate(&self) -> Result<()> {
        for (name, function) in &self.functions {
            let body = &function.body;

            if !body.blocks.contains_key(&body.entry_block) {
                return Err(IrError::ValidationError(format!(
                    "function {}: entry {} is missing",
                    name, body.entry_block
                )));
            }

            let mut defined = HashSet::new();
            for (id, block) in &body.blocks {
                if !block.is_terminated() {
                    return Err(IrError::ValidationError(format!(
                        "function {}: {} has no terminator",
                        name, id
                    )));
                }

                for succ in block.successors() {
                    if !body.blocks.contains_key(&succ) {
                        return Err(IrError::ValidationError(format!(
                            "function {}: {} targets unknown {}",
                            name, id, succ
                        )));
                    }
                }

                for inst in &block.instructions {
                    if let Some(Value::Temp(temp)) = inst.result() {
                        if body.temp_type(*temp).is_none() {
                            return Err(IrError::ValidationError(format!(
                                "function {}: {} has no recorded type",
                                name, temp
                            )));
                        }
                        if !defined.insert(*temp) {
                            return Err(IrError::ValidationError(format!(
                                "function {}: {} is defined more than once",
                                name, temp
                            )));
                        }
                    }

                    if let Instruction::Call {
                        result,
                        callee,
                        args,
                    } = inst
                    {
                        let decl = self.declarations.get(callee).ok_or_else(|| {
                            IrError::ValidationError(format!(
                                "function {}: call to undeclared {}",
                                name, callee
                            ))
                        })?;

                        if args.len() != decl.ty.params.len() {
                            return Err(IrError::ValidationError(format!(
                                "function {}: {} expects {} arguments, found {}",
                                name,
                                callee,
                                decl.ty.params.len(),
                                args.len()
                            )));
                        }

                        if decl.ty.ret.is_void() != result.is_none() {
                            return Err(IrError::ValidationError(format!(
                                "function {}: call to {} disagrees with its return type {}",
                                name, callee, decl.ty.ret
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub source_file: Option<String>,
}
