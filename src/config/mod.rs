pub mod variables_file;

pub use variables_file::{load_variables_file, VariablesFile};
