use fortir_core::IrError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LowerError {
    /// `excerpt` is either empty or a newline-led caret-underlined source
    /// quote, so the message renders cleanly both ways.
    #[error("Unsupported operand shape {shape} in {stmt} at {loc}{excerpt}")]
    UnsupportedShape {
        stmt: String,
        shape: String,
        loc: String,
        excerpt: String,
    },

    #[error("Signature mismatch for {callee}: expected {expected} arguments, marshalled {found}")]
    SignatureMismatch {
        callee: String,
        expected: usize,
        found: usize,
    },

    #[error("Conflicting declaration for runtime symbol {symbol}: {details}")]
    ConflictingDeclaration { symbol: String, details: String },

    #[error("RANDOM_SEED accepts at most one of SIZE, PUT, GET; {found} were supplied")]
    SeedArgConflict { found: usize },

    #[error("IR builder error: {0}")]
    Ir(#[from] IrError),
}

pub type LowerResult<T> = std::result::Result<T, LowerError>;
