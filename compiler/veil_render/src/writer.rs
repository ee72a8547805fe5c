//! Indented source buffer.

/// Line-oriented writer with four-space indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    /// Current indentation level.
    indent: usize,
    output: String,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::with_capacity(4096),
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write a line with the current indentation.
    pub fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Write `header {`, the body one level deeper, then `}`.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.writeln(&format!("{header} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.writeln("}");
    }

    /// Like [`block`](Self::block), closed with `};`.
    pub fn statement_block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.writeln(&format!("{header} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.writeln("};");
    }

    /// Take the generated output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nested_blocks_indent() {
        let mut w = SourceWriter::new();
        w.block("fn outer()", |w| {
            w.writeln("let a = 1;");
            w.block("if a == 1", |w| w.writeln("return;"));
        });
        w.newline();
        assert_eq!(
            w.take_output(),
            "fn outer() {\n    let a = 1;\n    if a == 1 {\n        return;\n    }\n}\n\n"
        );
    }

    #[test]
    fn dedent_saturates() {
        let mut w = SourceWriter::new();
        w.indent();
        w.dedent();
        w.writeln("x");
        assert_eq!(w.take_output(), "x\n");
    }
}
