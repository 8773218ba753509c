/*! Textual rendering of a module.
 *
 * Declarations come first in declaration order, then each function with its
 * labeled blocks. With `include_locations` set, instructions that carry a
 * source span get a trailing `; file:line` comment. Quiet verbosity strips
 * every comment line; verbose adds a size summary per function.
 */

use crate::config::EmitterConfig;
use crate::emitter::{EmitContext, EmitResult, Emitter, Tint};
use crate::formatter::{FormatterBase, SSAContext};
use fortir_core::{
    block::BasicBlock,
    function::{FuncDecl, Function},
    instructions::Instruction,
    module::Module,
    source_location::SourceSpan,
    values::{ParamId, Value},
};
use std::io::Write;

pub struct IrEmitter {
    config: EmitterConfig,
}

impl IrEmitter {
    pub fn new(config: EmitterConfig) -> Self {
        Self { config }
    }

    fn format_declaration(decl: &FuncDecl) -> String {
        let params: Vec<String> = decl.ty.params.iter().map(|t| t.to_string()).collect();
        let mut line = format!("declare @{}({}) -> {}", decl.name, params.join(", "), decl.ty.ret);
        if decl.never_returns {
            line.push_str(" noreturn");
        }
        line
    }

    fn emit_function<W: Write>(
        &self,
        module: &Module,
        function: &Function,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        let mut ssa = SSAContext::new();

        let param_types: Vec<String> = function
            .signature
            .params
            .iter()
            .map(|p| p.ty.to_string())
            .collect();
        let header = format!(
            "func @{}({}) -> {}",
            function.name(),
            param_types.join(", "),
            function.signature.ret
        );

        context.braced(writer, &header, |writer, context| {
            let mut first = true;
            for (id, block) in &function.body.blocks {
                if !first {
                    writeln!(writer)?;
                }
                first = false;

                let label = if *id == function.body.entry_block
                    && !function.signature.params.is_empty()
                {
                    let params: Vec<String> = function
                        .signature
                        .params
                        .iter()
                        .enumerate()
                        .map(|(i, p)| {
                            let value = Value::Param(ParamId(i as u32));
                            format!("{}: {}", FormatterBase::format_value(&value, &mut ssa), p.ty)
                        })
                        .collect();
                    format!("{}({}):", id, params.join(", "))
                } else {
                    format!("{}:", id)
                };
                context.line(writer, &label)?;

                context.indent();
                self.emit_block_body(module, block, writer, context, &mut ssa)?;
                context.dedent();
            }
            Ok(())
        })
    }

    fn emit_block_body<W: Write>(
        &self,
        module: &Module,
        block: &BasicBlock,
        writer: &mut W,
        context: &mut EmitContext,
        ssa: &mut SSAContext,
    ) -> EmitResult {
        let annotate = self.config.include_locations && self.config.verbosity.comments_enabled();
        for (index, inst) in block.instructions.iter().enumerate() {
            let mut line = self.format_instruction(inst, ssa);
            if annotate {
                if let Some(span) = block.metadata.get_location(index) {
                    if let Some(loc) = self.location_comment(module, *span) {
                        line.push_str(&format!(" ; {}", loc));
                    }
                }
            }
            context.line(writer, &line)?;
        }

        let terminator = FormatterBase::format_terminator(&block.terminator, ssa);
        context.line(writer, &terminator)?;
        Ok(())
    }

    fn format_instruction(&self, inst: &Instruction, ssa: &mut SSAContext) -> String {
        match inst {
            Instruction::Convert { result, value, to } => {
                let value_str = FormatterBase::format_value(value, ssa);
                let result_str = FormatterBase::format_value(result, ssa);
                format!("{} = convert.{} {}", result_str, to, value_str)
            }
            Instruction::Call {
                result,
                callee,
                args,
            } => {
                let args_str: Vec<String> = args
                    .iter()
                    .map(|arg| FormatterBase::format_value(arg, ssa))
                    .collect();
                match result {
                    Some(result) => format!(
                        "{} = call @{}({})",
                        FormatterBase::format_value(result, ssa),
                        callee,
                        args_str.join(", ")
                    ),
                    None => format!("call @{}({})", callee, args_str.join(", ")),
                }
            }
        }
    }

    fn location_comment(&self, module: &Module, span: SourceSpan) -> Option<String> {
        let file = module.source_files.file_name(span.file_id)?;
        let (line, _) = module.source_files.to_line_col(span)?;
        Some(format!("{}:{}", file, line))
    }
}

impl Emitter for IrEmitter {
    type Item = Module;

    fn emit<W: Write>(
        &self,
        module: &Module,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult {
        context.set_unit(self.config.indent_style.unit());
        context.set_colors(self.config.use_colors);

        context.tinted(writer, &format!("module @{}", module.name), Tint::Header)?;
        if self.config.verbosity.comments_enabled() {
            if let Some(source) = &module.metadata.source_file {
                context.comment(writer, &format!("source: {}", source))?;
            }
        }

        if !module.declarations.is_empty() {
            writeln!(writer)?;
            for decl in module.declarations.values() {
                context.tinted(writer, &Self::format_declaration(decl), Tint::Symbol)?;
            }
        }

        for function in module.functions.values() {
            writeln!(writer)?;
            if self.config.verbosity.is_verbose() {
                context.comment(
                    writer,
                    &format!(
                        "{} blocks, {} temps",
                        function.body.blocks.len(),
                        function.body.temps.len()
                    ),
                )?;
            }
            self.emit_function(module, function, writer, context)?;
        }

        Ok(())
    }
}
