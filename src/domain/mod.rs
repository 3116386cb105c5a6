// Domain model: variable values, the variable store, and the template engine

pub mod template;
mod value;
mod variables;

pub use value::{Value, ValueKind};
pub use variables::{Variable, VariableStore};
