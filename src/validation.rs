// Validation functions for urit
// Variable names accepted by the store are exactly the names a varspec can reference

use crate::domain::template::charclass::is_pct_encoded;
use crate::error::UritError;

/// Check that `name` is a valid RFC 6570 varname
///
/// Returns Ok(()) if valid, Err(UritError::InvalidVariableName) if invalid
pub fn validate_variable_name(name: &str) -> Result<(), UritError> {
    if is_valid_variable_name(name) {
        Ok(())
    } else {
        Err(UritError::InvalidVariableName(name.to_string()))
    }
}

/// varchar *( ["."] varchar ), where varchar is ALPHA / DIGIT / "_" / pct-encoded
pub fn is_valid_variable_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    let mut i = 0;
    let mut need_char = true;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_alphanumeric() || c == b'_' {
            need_char = false;
            i += 1;
        } else if is_pct_encoded(&bytes[i..]) {
            need_char = false;
            i += 3;
        } else if c == b'.' && !need_char {
            need_char = true;
            i += 1;
        } else {
            return false;
        }
    }

    !need_char
}
