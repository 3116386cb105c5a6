// Template module for RFC 6570 URI templates
//
// This module provides character classification, literal value parsing, varspec
// parsing and expansion of templates against a variable store.

mod ast;
mod buffer;
pub mod charclass;
mod diagnostic;
pub mod literal;
mod parser;
mod resolver;
mod scanner;

pub use ast::{
    Modifier, Operator, OperatorRule, VarSpec, FRAGMENT, LABEL, PATH_PARAMETER, PATH_SEGMENT,
    QUERY, QUERY_CONTINUATION, RESERVED, SIMPLE,
};
pub use buffer::OutputBuffer;
pub use charclass::encode;
pub use diagnostic::{Diagnostic, DiagnosticCode};
pub use parser::{VarSpecError, VarSpecParser};
pub use resolver::ExpressionResolver;
pub use scanner::{expand, ExpansionResult, Status, TemplateScanner};
