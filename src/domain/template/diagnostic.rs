// Positioned diagnostics collected while expanding a template

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    MalformedExpression,
    EmptyExpression,
    UnimplementedOperator,
    NonLiteralCharacter,
    InvalidVariableName,
}

impl DiagnosticCode {
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticCode::MalformedExpression => "Malformed expression",
            DiagnosticCode::EmptyExpression => "Empty expression",
            DiagnosticCode::UnimplementedOperator => "Unimplemented operator",
            DiagnosticCode::NonLiteralCharacter => "Non-literal character found",
            DiagnosticCode::InvalidVariableName => "Invalid variable name",
        }
    }

    /// Fatal codes stop the scan; the others are recorded and scanning goes on
    pub fn is_fatal(self) -> bool {
        !matches!(
            self,
            DiagnosticCode::EmptyExpression | DiagnosticCode::UnimplementedOperator
        )
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A problem found in a template.
///
/// `position` is a character offset into the template, so a caret printed under the
/// template lines up with the offending character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub position: usize,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, position: usize) -> Self {
        Self { code, position }
    }

    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }

    /// Template line, caret line, message line, blank line
    pub fn render(&self, template: &str) -> String {
        format!(
            "{}\n{}^\nUrit error: {}\n\n",
            template,
            " ".repeat(self.position),
            self.code.message()
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.code, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_codes() {
        assert!(DiagnosticCode::MalformedExpression.is_fatal());
        assert!(DiagnosticCode::NonLiteralCharacter.is_fatal());
        assert!(DiagnosticCode::InvalidVariableName.is_fatal());
        assert!(!DiagnosticCode::EmptyExpression.is_fatal());
        assert!(!DiagnosticCode::UnimplementedOperator.is_fatal());
    }

    #[test]
    fn test_render_places_caret() {
        let diag = Diagnostic::new(DiagnosticCode::EmptyExpression, 4);
        assert_eq!(
            diag.render("abc/{}"),
            "abc/{}\n    ^\nUrit error: Empty expression\n\n"
        );
    }

    #[test]
    fn test_render_at_start() {
        let diag = Diagnostic::new(DiagnosticCode::NonLiteralCharacter, 0);
        assert!(diag.render(" x").starts_with(" x\n^\n"));
    }

    #[test]
    fn test_display() {
        let diag = Diagnostic::new(DiagnosticCode::InvalidVariableName, 7);
        assert_eq!(diag.to_string(), "Invalid variable name at position 7");
    }

    #[test]
    fn test_serialize_code_kebab_case() {
        let diag = Diagnostic::new(DiagnosticCode::UnimplementedOperator, 1);
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(json, r#"{"code":"unimplemented-operator","position":1}"#);
    }
}
