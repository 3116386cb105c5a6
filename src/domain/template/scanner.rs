// Template scanner: literal runs are copied or encoded, `{...}` runs are expanded

use serde::Serialize;
use tracing::debug;

use super::ast::Operator;
use super::buffer::OutputBuffer;
use super::charclass::{
    is_literal, is_pct_encoded, is_reserved, is_unreserved, is_varname_char, utf8_len,
};
use super::diagnostic::{Diagnostic, DiagnosticCode};
use super::resolver::ExpressionResolver;
use crate::domain::variables::VariableStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Failure,
}

/// Outcome of one template expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionResult {
    pub template: String,
    /// The expanded URI; `None` when a fatal diagnostic stopped the scan
    pub uri: Option<String>,
    /// Everything written before the scan ended, fatal or not
    pub output: String,
    pub status: Status,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpansionResult {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// All diagnostics rendered against the template, in the order they were found
    pub fn render_diagnostics(&self) -> String {
        self.diagnostics
            .iter()
            .map(|d| d.render(&self.template))
            .collect()
    }
}

/// Expand `template` against `store`
pub fn expand(template: &str, store: &VariableStore) -> ExpansionResult {
    TemplateScanner::new(template, store).run()
}

pub struct TemplateScanner<'a> {
    template: &'a str,
    resolver: ExpressionResolver<'a>,
    out: OutputBuffer,
    diagnostics: Vec<Diagnostic>,
    /// byte offset into the template
    pos: usize,
    /// character offset matching `pos`
    column: usize,
}

impl<'a> TemplateScanner<'a> {
    pub fn new(template: &'a str, store: &'a VariableStore) -> Self {
        Self {
            template,
            resolver: ExpressionResolver::new(store),
            out: OutputBuffer::with_capacity(template.len()),
            diagnostics: Vec::new(),
            pos: 0,
            column: 0,
        }
    }

    pub fn run(mut self) -> ExpansionResult {
        let fatal = self.scan().is_err();
        let output = self.out.into_string();
        let status = if self.diagnostics.is_empty() {
            Status::Ok
        } else {
            Status::Failure
        };

        ExpansionResult {
            template: self.template.to_string(),
            uri: (!fatal).then(|| output.clone()),
            output,
            status,
            diagnostics: self.diagnostics,
        }
    }

    /// Err(()) means a fatal diagnostic has been recorded
    fn scan(&mut self) -> Result<(), ()> {
        let template = self.template;
        let bytes = template.as_bytes();

        while self.pos < bytes.len() {
            let rest = &bytes[self.pos..];
            let c = rest[0];

            if c == b'{' {
                self.scan_expression()?;
            } else if is_reserved(c) || is_unreserved(c) {
                self.out.append_char(char::from(c));
                self.advance(1, 1);
            } else if is_pct_encoded(rest) {
                self.out.append_str(&template[self.pos..self.pos + 3]);
                self.advance(3, 3);
            } else if is_literal(rest) {
                let len = utf8_len(c);
                for b in &rest[..len] {
                    self.out.append_pct_byte(*b);
                }
                self.advance(len, 1);
            } else {
                self.record(DiagnosticCode::NonLiteralCharacter, self.column);
                return Err(());
            }
        }

        Ok(())
    }

    /// Handle the expression starting at the current `{`
    fn scan_expression(&mut self) -> Result<(), ()> {
        let template = self.template;
        let start = self.pos;
        let Some(len) = template[start + 1..].find('}') else {
            self.out.append_str(&template[start..]);
            self.record(DiagnosticCode::MalformedExpression, self.column);
            return Err(());
        };

        let body = &template[start + 1..start + 1 + len];
        let end = start + len + 2;

        if body.is_empty() {
            self.out.append_str("{}");
            self.record(DiagnosticCode::EmptyExpression, self.column);
        } else {
            self.dispatch(body, start + 1)?;
        }

        let width = template[start..end].chars().count();
        self.advance(end - start, width);
        Ok(())
    }

    /// Pick the operator and expand `body`, which starts at byte `body_start`
    fn dispatch(&mut self, body: &'a str, body_start: usize) -> Result<(), ()> {
        let first = body.chars().next().unwrap_or_default();

        let (operator, varspecs, varspecs_start) = match Operator::from_char(first) {
            Some(op) => (op, &body[1..], body_start + 1),
            None if is_varname_char(body.as_bytes()) => (Operator::Simple, body, body_start),
            None => {
                debug!(operator = %first, "unimplemented operator copied verbatim");
                self.out.append_char('{');
                self.out.append_str(body);
                self.out.append_char('}');
                self.record(DiagnosticCode::UnimplementedOperator, self.column + 1);
                return Ok(());
            }
        };

        self.resolver
            .resolve(varspecs, operator.rule(), &mut self.out)
            .map_err(|e| {
                let column = char_offset(self.template, varspecs_start + e.offset);
                self.record(e.code, column)
            })
    }

    fn advance(&mut self, bytes: usize, chars: usize) {
        self.pos += bytes;
        self.column += chars;
    }

    fn record(&mut self, code: DiagnosticCode, column: usize) {
        debug!(code = ?code, position = column, "template diagnostic");
        self.diagnostics.push(Diagnostic::new(code, column));
    }
}

/// Character offset of byte offset `byte` in `s`
fn char_offset(s: &str, byte: usize) -> usize {
    s.get(..byte).map_or(byte, |prefix| prefix.chars().count())
}
