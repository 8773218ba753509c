/*! The fixed runtime entry-point table.
 *
 * Every statement this crate lowers targets one of the symbols below. The
 * table is closed: signatures, never-returns attributes, and trailing
 * source-location slots are all known here, and `resolve` materializes the
 * matching declaration in the module exactly once.
 */

use crate::errors::{LowerError, LowerResult};
use fortir_core::builder::FunctionBuilder;
use fortir_core::function::FuncDecl;
use fortir_core::types::{FuncType, Type};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuntimeFunc {
    StopStatement,
    StopStatementText,
    PauseStatement,
    PointerIsAssociatedWith,
    RandomInit,
    RandomNumber,
    RandomSeedSize,
    RandomSeedPut,
    RandomSeedGet,
    RandomSeedDefaultPut,
}

impl RuntimeFunc {
    pub const ALL: [RuntimeFunc; 10] = [
        RuntimeFunc::StopStatement,
        RuntimeFunc::StopStatementText,
        RuntimeFunc::PauseStatement,
        RuntimeFunc::PointerIsAssociatedWith,
        RuntimeFunc::RandomInit,
        RuntimeFunc::RandomNumber,
        RuntimeFunc::RandomSeedSize,
        RuntimeFunc::RandomSeedPut,
        RuntimeFunc::RandomSeedGet,
        RuntimeFunc::RandomSeedDefaultPut,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            RuntimeFunc::StopStatement => "_FortranAStopStatement",
            RuntimeFunc::StopStatementText => "_FortranAStopStatementText",
            RuntimeFunc::PauseStatement => "_FortranAPauseStatement",
            RuntimeFunc::PointerIsAssociatedWith => "_FortranAPointerIsAssociatedWith",
            RuntimeFunc::RandomInit => "_FortranARandomInit",
            RuntimeFunc::RandomNumber => "_FortranARandomNumber",
            RuntimeFunc::RandomSeedSize => "_FortranARandomSeedSize",
            RuntimeFunc::RandomSeedPut => "_FortranARandomSeedPut",
            RuntimeFunc::RandomSeedGet => "_FortranARandomSeedGet",
            RuntimeFunc::RandomSeedDefaultPut => "_FortranARandomSeedDefaultPut",
        }
    }

    pub fn func_type(&self) -> FuncType {
        match self {
            RuntimeFunc::StopStatement => FuncType::new(
                vec![Type::Int(32), Type::Logical, Type::Logical],
                Type::Unit,
            ),
            RuntimeFunc::StopStatementText => FuncType::new(
                vec![Type::char_ptr(), Type::Index, Type::Logical, Type::Logical],
                Type::Unit,
            ),
            RuntimeFunc::PauseStatement => FuncType::new(vec![], Type::Unit),
            RuntimeFunc::PointerIsAssociatedWith => FuncType::new(
                vec![Type::Descriptor, Type::Descriptor],
                Type::Logical,
            ),
            RuntimeFunc::RandomInit => {
                FuncType::new(vec![Type::Logical, Type::Logical], Type::Unit)
            }
            RuntimeFunc::RandomNumber
            | RuntimeFunc::RandomSeedSize
            | RuntimeFunc::RandomSeedPut
            | RuntimeFunc::RandomSeedGet => FuncType::new(
                vec![Type::Descriptor, Type::char_ptr(), Type::Int(32)],
                Type::Unit,
            ),
            RuntimeFunc::RandomSeedDefaultPut => FuncType::new(vec![], Type::Unit),
        }
    }

    /// Termination entry points never hand control back; their blocks must
    /// be closed with an unreachable terminator.
    pub fn never_returns(&self) -> bool {
        matches!(
            self,
            RuntimeFunc::StopStatement | RuntimeFunc::StopStatementText
        )
    }

    /// Whether the trailing two parameters are source-location slots the
    /// marshaller fills with the originating file and line.
    pub fn has_source_loc_args(&self) -> bool {
        matches!(
            self,
            RuntimeFunc::RandomNumber
                | RuntimeFunc::RandomSeedSize
                | RuntimeFunc::RandomSeedPut
                | RuntimeFunc::RandomSeedGet
        )
    }
}

impl std::fmt::Display for RuntimeFunc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One resolved entry point, ready for marshalling and emission.
#[derive(Debug, Clone)]
pub struct ResolvedCallee {
    pub func: RuntimeFunc,
    pub symbol: &'static str,
    pub ty: FuncType,
    pub never_returns: bool,
}

/// Declares `func` in the module on first use. A pre-existing declaration
/// must agree with the table; anything else means the lowering tables and
/// the runtime contract are out of sync.
pub fn resolve(builder: &mut FunctionBuilder, func: RuntimeFunc) -> LowerResult<ResolvedCallee> {
    let symbol = func.symbol();
    let ty = func.func_type();
    let never_returns = func.never_returns();

    let first_use = builder.find_decl(symbol).is_none();
    builder
        .declare_func(FuncDecl::new(symbol, ty.clone(), never_returns))
        .map_err(|err| LowerError::ConflictingDeclaration {
            symbol: symbol.to_string(),
            details: err.to_string(),
        })?;

    if first_use {
        debug!("declared runtime entry point {}", symbol);
    }

    Ok(ResolvedCallee {
        func,
        symbol,
        ty,
        never_returns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortir_core::module::Module;

    #[test]
    fn test_table_is_consistent() {
        for func in RuntimeFunc::ALL {
            assert!(func.symbol().starts_with("_FortranA"));
            assert!(func.func_type().params.len() <= 4);

            if func.never_returns() {
                assert!(func.func_type().ret.is_void());
            }
            if func.has_source_loc_args() {
                let params = func.func_type().params;
                let tail = &params[params.len() - 2..];
                assert_eq!(tail, &[Type::char_ptr(), Type::Int(32)]);
            }
        }
    }

    #[test]
    fn test_only_termination_never_returns() {
        let fatal: Vec<RuntimeFunc> = RuntimeFunc::ALL
            .into_iter()
            .filter(RuntimeFunc::never_returns)
            .collect();
        assert_eq!(
            fatal,
            vec![RuntimeFunc::StopStatement, RuntimeFunc::StopStatementText]
        );
    }

    #[test]
    fn test_resolve_declares_once() {
        let mut module = Module::new("test");
        let mut builder = FunctionBuilder::new(&mut module, "main");

        resolve(&mut builder, RuntimeFunc::PauseStatement).unwrap();
        resolve(&mut builder, RuntimeFunc::PauseStatement).unwrap();

        builder.return_void().unwrap();
        builder.build().unwrap();
        assert_eq!(module.declarations.len(), 1);
    }

    #[test]
    fn test_resolve_rejects_conflicting_declaration() {
        let mut module = Module::new("test");
        module
            .declare_func(FuncDecl::new(
                "_FortranAPauseStatement",
                FuncType::new(vec![Type::Int(32)], Type::Unit),
                false,
            ))
            .unwrap();

        let mut builder = FunctionBuilder::new(&mut module, "main");
        let err = resolve(&mut builder, RuntimeFunc::PauseStatement);
        assert!(matches!(
            err,
            Err(LowerError::ConflictingDeclaration { .. })
        ));
    }
}
