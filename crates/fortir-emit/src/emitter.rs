use anyhow::Result;
use colored::Colorize;
use std::io::Write;

pub type EmitResult = Result<()>;

/// Colour role of an emitted line. Each role maps to one fixed colour;
/// with colours off the text passes through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Header,
    Symbol,
    Comment,
}

/// Indentation and colour state threaded through one emission pass.
#[derive(Debug, Clone)]
pub struct EmitContext {
    depth: usize,
    unit: String,
    colors: bool,
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            unit: "    ".to_string(),
            colors: true,
        }
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
    }

    pub fn set_colors(&mut self, on: bool) {
        self.colors = on;
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn margin(&self) -> String {
        self.unit.repeat(self.depth)
    }

    fn paint(&self, text: &str, tint: Tint) -> String {
        if !self.colors {
            return text.to_string();
        }
        match tint {
            Tint::Header => text.cyan().to_string(),
            Tint::Symbol => text.yellow().to_string(),
            Tint::Comment => text.green().to_string(),
        }
    }

    pub fn line<W: Write>(&self, writer: &mut W, text: &str) -> EmitResult {
        writeln!(writer, "{}{}", self.margin(), text)?;
        Ok(())
    }

    pub fn tinted<W: Write>(&self, writer: &mut W, text: &str, tint: Tint) -> EmitResult {
        writeln!(writer, "{}{}", self.margin(), self.paint(text, tint))?;
        Ok(())
    }

    pub fn comment<W: Write>(&self, writer: &mut W, text: &str) -> EmitResult {
        self.tinted(writer, &format!("; {}", text), Tint::Comment)
    }

    /// `header {`, the body one level deeper, then the closing `}`.
    pub fn braced<W: Write, F>(&mut self, writer: &mut W, header: &str, body: F) -> EmitResult
    where
        F: FnOnce(&mut W, &mut EmitContext) -> EmitResult,
    {
        self.line(writer, &format!("{} {{", header))?;
        self.indent();
        body(writer, self)?;
        self.dedent();
        self.line(writer, "}")?;
        Ok(())
    }
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Anything that renders one item kind to text.
pub trait Emitter {
    type Item;

    fn emit<W: Write>(
        &self,
        item: &Self::Item,
        writer: &mut W,
        context: &mut EmitContext,
    ) -> EmitResult;

    fn emit_to_string(&self, item: &Self::Item) -> Result<String> {
        let mut buffer = Vec::new();
        let mut context = EmitContext::new();
        self.emit(item, &mut buffer, &mut context)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_context() -> EmitContext {
        let mut ctx = EmitContext::new();
        ctx.set_colors(false);
        ctx
    }

    #[test]
    fn test_indentation_tracks_depth() {
        let mut buffer = Vec::new();
        let mut ctx = plain_context();

        ctx.line(&mut buffer, "a").unwrap();
        ctx.indent();
        ctx.line(&mut buffer, "b").unwrap();
        ctx.dedent();
        ctx.line(&mut buffer, "c").unwrap();

        assert_eq!(String::from_utf8(buffer).unwrap(), "a\n    b\nc\n");
    }

    #[test]
    fn test_dedent_saturates_at_zero() {
        let mut ctx = plain_context();
        ctx.dedent();
        ctx.dedent();

        let mut buffer = Vec::new();
        ctx.line(&mut buffer, "flat").unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "flat\n");
    }

    #[test]
    fn test_custom_unit() {
        let mut ctx = plain_context();
        ctx.set_unit("\t");
        ctx.indent();

        let mut buffer = Vec::new();
        ctx.line(&mut buffer, "unreachable").unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "\tunreachable\n");
    }

    #[test]
    fn test_comment_prefix() {
        let mut buffer = Vec::new();
        plain_context().comment(&mut buffer, "demo.f90:3").unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "; demo.f90:3\n");
    }

    #[test]
    fn test_tinted_without_colors_is_plain() {
        let mut buffer = Vec::new();
        plain_context()
            .tinted(&mut buffer, "module @demo", Tint::Header)
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "module @demo\n");
    }

    #[test]
    fn test_braced_body_is_nested() {
        let mut buffer = Vec::new();
        let mut ctx = plain_context();

        ctx.braced(&mut buffer, "func @main() -> void", |w, c| c.line(w, "return"))
            .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "func @main() -> void {\n    return\n}\n"
        );
    }
}
