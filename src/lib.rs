//! RFC 6570 URI template expansion.
//!
//! Build a [`VariableStore`], then call [`expand`] with a template:
//!
//! ```
//! use urit::{expand, VariableStore};
//!
//! let mut store = VariableStore::new();
//! store.add_variable("count", r#"("one","two","three")"#).unwrap();
//!
//! let result = expand("http://www.example.com/{count}", &store);
//! assert_eq!(result.uri.as_deref(), Some("http://www.example.com/one,two,three"));
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod validation;

pub use domain::template::{expand, Diagnostic, DiagnosticCode, ExpansionResult, Status};
pub use domain::{Value, ValueKind, Variable, VariableStore};
pub use error::UritError;
