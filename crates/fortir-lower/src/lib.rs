/*! Lower Fortran statements onto the runtime library.
 *
 * STOP, PAUSE, ASSOCIATED, and the RANDOM_* intrinsics all reduce to calls
 * against a fixed set of runtime entry points. This crate classifies each
 * statement, resolves the entry point it needs, marshals operands to the
 * exact parameter types, and keeps the block structure well-formed when a
 * call never returns.
 */

pub mod context;
pub mod emit_call;
pub mod errors;
pub mod intrinsics;
pub mod marshal;
pub mod runtime;
pub mod stmt;
pub mod stmts;

pub use context::{ConstantLowerer, ExprLowerer, LoweringContext};
pub use errors::{LowerError, LowerResult};
pub use intrinsics::{
    lower_pointer_associated, lower_random_init, lower_random_number, lower_random_seed,
};
pub use runtime::{resolve, ResolvedCallee, RuntimeFunc};
pub use stmt::{PauseStmt, RandomSeedArgs, StopKind, StopStmt, TypedExpr};
pub use stmts::{lower_pause, lower_stop};
