/*! Turn lowered modules back into readable text.
 *
 * The lowering pipeline produces block-structured IR; these emitters render
 * it for humans reviewing what a statement actually turned into. Output is
 * deterministic for a given module and configuration.
 */

pub mod config;
pub mod emitter;
pub mod formatter;
pub mod ir_emitter;

pub use config::{EmitterConfig, IndentStyle, VerbosityLevel};
pub use emitter::{EmitContext, EmitResult, Emitter, Tint};
pub use formatter::{FormatterBase, SSAContext};
pub use ir_emitter::IrEmitter;
