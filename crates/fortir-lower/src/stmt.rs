use fortir_core::source_location::SourceSpan;
use fortir_core::values::{ExprValue, Value};

/// Which termination statement was written. `ErrorStop` reports abnormal
/// termination to the runtime through the error flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopKind {
    Stop,
    ErrorStop,
}

impl StopKind {
    pub fn name(&self) -> &'static str {
        match self {
            StopKind::Stop => "STOP",
            StopKind::ErrorStop => "ERROR STOP",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StopKind::ErrorStop)
    }
}

/// A type-checked STOP or ERROR STOP statement. Both the stop code and the
/// QUIET expression are optional in source.
#[derive(Debug, Clone)]
pub struct StopStmt {
    pub kind: StopKind,
    pub code: Option<TypedExpr>,
    pub quiet: Option<TypedExpr>,
    pub span: SourceSpan,
}

impl StopStmt {
    pub fn new(kind: StopKind, span: SourceSpan) -> Self {
        Self {
            kind,
            code: None,
            quiet: None,
            span,
        }
    }

    pub fn with_code(mut self, code: TypedExpr) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_quiet(mut self, quiet: TypedExpr) -> Self {
        self.quiet = Some(quiet);
        self
    }
}

#[derive(Debug, Clone)]
pub struct PauseStmt {
    pub span: SourceSpan,
}

impl PauseStmt {
    pub fn new(span: SourceSpan) -> Self {
        Self { span }
    }
}

/// Pre-lowered descriptor operands of one RANDOM_SEED call. At most one may
/// be present; all absent selects the default-put form.
#[derive(Debug, Clone, Default)]
pub struct RandomSeedArgs {
    pub size: Option<Value>,
    pub put: Option<Value>,
    pub get: Option<Value>,
}

impl RandomSeedArgs {
    pub fn present_count(&self) -> usize {
        [&self.size, &self.put, &self.get]
            .iter()
            .filter(|arg| arg.is_some())
            .count()
    }
}

/// A type-checked expression as handed down by semantic analysis. Literal
/// forms cover what the statement grammar allows; `Value` passes through an
/// expression a richer lowerer already produced.
#[derive(Debug, Clone)]
pub enum TypedExpr {
    Int(i64),
    Logical(bool),
    Real(f64),
    Char(String),
    Value(ExprValue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortir_core::values::Constant;

    #[test]
    fn test_stop_kind_names() {
        assert_eq!(StopKind::Stop.name(), "STOP");
        assert_eq!(StopKind::ErrorStop.name(), "ERROR STOP");
        assert!(StopKind::ErrorStop.is_error());
        assert!(!StopKind::Stop.is_error());
    }

    #[test]
    fn test_seed_args_present_count() {
        let none = RandomSeedArgs::default();
        assert_eq!(none.present_count(), 0);

        let size_only = RandomSeedArgs {
            size: Some(Value::Constant(Constant::Null(
                fortir_core::types::Type::Descriptor,
            ))),
            ..Default::default()
        };
        assert_eq!(size_only.present_count(), 1);

        let conflicting = RandomSeedArgs {
            put: size_only.size.clone(),
            get: size_only.size.clone(),
            ..Default::default()
        };
        assert_eq!(conflicting.present_count(), 2);
    }
}
