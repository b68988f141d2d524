//! Block layout engine
//!
//! Generated text is built as a tree of [`Body`] values. Every [`Line`] may open a
//! nested [`Block`]; when rendered, a block is either collapsed onto its opening line
//! or expanded onto its own indented lines.
//!
//! A block collapses only when it fits under [`MAX_COLLAPSED_WIDTH`], is not opened by a
//! structural keyword or an always-expanded option such as `(google.api.http)`, and does
//! not itself contain such a block. The last rule keeps a short `rpc ... {` line that
//! carries an http rule expanded, so the nested option keeps its own lines.

/// Indentation unit per nesting level.
pub const INDENT: &str = "    ";

/// Lines at or beyond this width force their block to expand.
pub const MAX_COLLAPSED_WIDTH: usize = 80;

/// Blocks opened by these keywords never collapse.
const STRUCTURAL_KEYWORDS: [&str; 5] = ["message", "enum", "extend", "oneof", "service"];

/// Options that always render expanded, regardless of width.
const ALWAYS_EXPANDED_OPTIONS: [&str; 1] = ["(google.api.http)"];

/// A sequence of lines at one indentation level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    indent: usize,
    lines: Vec<Line>,
}

/// One line, optionally opening a nested block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: String,
    block: Option<Block>,
}

/// A nested body and the token closing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    close: String,
    body: Body,
}

impl Body {
    /// Create an empty top-level body.
    pub fn new() -> Self { Self::default() }

    /// Append a plain line. An empty line renders as a blank line.
    pub fn add_line(&mut self, content: impl Into<String>) {
        self.lines.push(Line { content: content.into(), block: None });
    }

    /// Append a line opening a block; `fill` populates the nested body.
    pub fn add_block<E>(
        &mut self,
        open: impl Into<String>,
        close: impl Into<String>,
        fill: impl FnOnce(&mut Body) -> Result<(), E>,
    ) -> Result<(), E> {
        let mut body = Body { indent: self.indent + 1, lines: Vec::new() };
        fill(&mut body)?;
        self.lines.push(Line {
            content: open.into(),
            block: Some(Block { close: close.into(), body }),
        });
        Ok(())
    }

    /// Render the body, one line per entry, without a trailing newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        let indent = INDENT.repeat(self.indent);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            line.write(out, &indent);
        }
    }
}

impl Line {
    fn write(&self, out: &mut String, indent: &str) {
        if self.content.is_empty() && self.block.is_none() {
            return;
        }
        out.push_str(indent);
        out.push_str(&self.content);
        let Some(block) = &self.block else {
            return;
        };

        if self.collapses(block, indent) {
            for (i, line) in block.body.lines.iter().enumerate() {
                if i > 0 {
                    out.push(' ');
                }
                line.write(out, "");
            }
        } else {
            out.push('\n');
            block.body.write(out);
            out.push('\n');
            out.push_str(indent);
        }
        out.push_str(&block.close);
    }

    fn collapses(&self, block: &Block, indent: &str) -> bool {
        if self.always_expands() || block.holds_always_expanded() {
            return false;
        }
        indent.len() + self.content.len() + block.collapsed_len() < MAX_COLLAPSED_WIDTH
    }

    /// Structural blocks and `(google.api.http)` options never collapse.
    fn always_expands(&self) -> bool {
        let (first, rest) = self.content.split_once(' ').unwrap_or((self.content.as_str(), ""));
        if STRUCTURAL_KEYWORDS.contains(&first) {
            return true;
        }
        let second = rest.split_once(' ').map_or(rest, |(second, _)| second);
        ALWAYS_EXPANDED_OPTIONS.contains(&second)
    }
}

impl Block {
    /// Whether any nested line opens a block that never collapses; such a block keeps
    /// its parent expanded too.
    fn holds_always_expanded(&self) -> bool {
        self.body.lines.iter().any(|line| {
            line.block.as_ref().is_some_and(|block| {
                line.always_expands() || block.holds_always_expanded()
            })
        })
    }

    /// Width of the block's content when written on one line, separators excluded.
    fn collapsed_len(&self) -> usize {
        self.close.len()
            + self
                .body
                .lines
                .iter()
                .map(|line| line.content.len() + line.block.as_ref().map_or(0, Block::collapsed_len))
                .sum::<usize>()
    }
}
