use crate::errors::{LowerError, LowerResult};
use crate::stmt::TypedExpr;
use fortir_core::builder::FunctionBuilder;
use fortir_core::source_location::{SourceFiles, SourceSpan, INVALID_SPAN};
use fortir_core::types::Type;
use fortir_core::values::{Constant, ExprValue, Value};

/// Turns a type-checked expression into a lowered value. Statement lowering
/// consumes the result by shape and never inspects the expression itself.
pub trait ExprLowerer {
    fn lower_expr(
        &mut self,
        builder: &mut FunctionBuilder,
        expr: &TypedExpr,
    ) -> LowerResult<ExprValue>;
}

/// Per-statement lowering state: the source-file table, the span of the
/// statement currently being lowered, and the expression-lowering service.
pub struct LoweringContext {
    files: SourceFiles,
    span: SourceSpan,
    expr_lowerer: Box<dyn ExprLowerer>,
}

impl LoweringContext {
    pub fn new(files: SourceFiles) -> Self {
        Self {
            files,
            span: INVALID_SPAN,
            expr_lowerer: Box::new(ConstantLowerer),
        }
    }

    pub fn with_expr_lowerer(files: SourceFiles, expr_lowerer: Box<dyn ExprLowerer>) -> Self {
        Self {
            files,
            span: INVALID_SPAN,
            expr_lowerer,
        }
    }

    pub fn files(&self) -> &SourceFiles {
        &self.files
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    pub fn set_span(&mut self, span: SourceSpan) {
        self.span = span;
    }

    pub fn lower_expr(
        &mut self,
        builder: &mut FunctionBuilder,
        expr: &TypedExpr,
    ) -> LowerResult<ExprValue> {
        self.expr_lowerer.lower_expr(builder, expr)
    }

    /// `file:line` for the current span, or `unknown:0` when the span does
    /// not resolve.
    pub fn location_string(&self) -> String {
        let origin = self.files.origin(self.span);
        format!("{}:{}", origin.file, origin.line)
    }

    /// The error carries the offending source line, caret-underlined, when
    /// the span resolves.
    pub fn unsupported_shape(&self, stmt: &str, value: &ExprValue) -> LowerError {
        let excerpt = self
            .files
            .snippet(self.span, 0)
            .map(|s| format!("\n{}", s.trim_end()))
            .unwrap_or_default();

        LowerError::UnsupportedShape {
            stmt: stmt.to_string(),
            shape: value.shape_name().to_string(),
            loc: self.location_string(),
            excerpt,
        }
    }
}

/// Literal-only expression lowering. Character literals become a data
/// handle plus an index-typed length, the text-with-length shape.
pub struct ConstantLowerer;

impl ExprLowerer for ConstantLowerer {
    fn lower_expr(
        &mut self,
        builder: &mut FunctionBuilder,
        expr: &TypedExpr,
    ) -> LowerResult<ExprValue> {
        Ok(match expr {
            TypedExpr::Int(value) => {
                ExprValue::Scalar(builder.int_constant(*value, &Type::Int(32))?)
            }
            TypedExpr::Logical(value) => ExprValue::Scalar(builder.logical_constant(*value)),
            TypedExpr::Real(value) => {
                ExprValue::Scalar(Value::Constant(Constant::Real(*value, 32)))
            }
            TypedExpr::Char(text) => ExprValue::Char {
                data: builder.str_constant(text),
                len: builder.int_constant(text.len() as i64, &Type::Index)?,
            },
            TypedExpr::Value(value) => value.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortir_core::module::Module;

    #[test]
    fn test_constant_lowerer_shapes() {
        let mut module = Module::new("test");
        let mut builder = FunctionBuilder::new(&mut module, "main");
        let mut lowerer = ConstantLowerer;

        let int = lowerer
            .lower_expr(&mut builder, &TypedExpr::Int(42))
            .unwrap();
        assert_eq!(
            int,
            ExprValue::Scalar(Value::Constant(Constant::Int(42, 32)))
        );

        let text = lowerer
            .lower_expr(&mut builder, &TypedExpr::Char("bye".to_string()))
            .unwrap();
        assert_eq!(
            text,
            ExprValue::Char {
                data: Value::Constant(Constant::Str("bye".to_string())),
                len: Value::Constant(Constant::Index(3)),
            }
        );
    }

    #[test]
    fn test_location_string_for_invalid_span() {
        let ctx = LoweringContext::new(SourceFiles::new());
        assert_eq!(ctx.location_string(), "unknown:0");
    }

    #[test]
    fn test_location_string_resolves_line() {
        let files = SourceFiles::new();
        let file_id = files
            .add_file("demo.f90".into(), "program t\n  stop 1\nend program\n".to_string())
            .unwrap();

        let mut ctx = LoweringContext::new(files);
        ctx.set_span(SourceSpan::new(file_id, 12, 6));
        assert_eq!(ctx.location_string(), "demo.f90:2");
    }

    #[test]
    fn test_unsupported_shape_underlines_the_statement() {
        let files = SourceFiles::new();
        let file_id = files
            .add_file("demo.f90".into(), "program t\n  stop 1\nend program\n".to_string())
            .unwrap();

        let mut ctx = LoweringContext::new(files);
        ctx.set_span(SourceSpan::new(file_id, 12, 6));

        let shape = ExprValue::Descriptor(Value::Constant(Constant::Null(Type::Descriptor)));
        let message = ctx.unsupported_shape("STOP", &shape).to_string();
        assert!(message.contains("demo.f90:2"));
        assert!(message.contains("2 |   stop 1"));
        assert!(message.contains("^^^^^^"));
    }

    #[test]
    fn test_unsupported_shape_without_span_has_no_excerpt() {
        let ctx = LoweringContext::new(SourceFiles::new());

        let shape = ExprValue::Descriptor(Value::Constant(Constant::Null(Type::Descriptor)));
        let message = ctx.unsupported_shape("STOP", &shape).to_string();
        assert_eq!(
            message,
            "Unsupported operand shape descriptor in STOP at unknown:0"
        );
    }
}
