// Varspec parser
//
//   varspec  = varname [ modifier ]
//   varname  = varchar *( ["."] varchar )
//   modifier = "*" / ":" 1*4DIGIT      ; no leading zero

use super::ast::{Modifier, VarSpec};
use super::charclass::is_pct_encoded;
use super::diagnostic::DiagnosticCode;

/// Why a varspec was rejected, and where (byte offset into the parsed text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarSpecError {
    pub code: DiagnosticCode,
    pub offset: usize,
}

impl VarSpecError {
    fn invalid_name(offset: usize) -> Self {
        Self {
            code: DiagnosticCode::InvalidVariableName,
            offset,
        }
    }

    fn malformed(offset: usize) -> Self {
        Self {
            code: DiagnosticCode::MalformedExpression,
            offset,
        }
    }

    /// Shift the offset so it is relative to an enclosing text
    pub fn shifted(self, by: usize) -> Self {
        Self {
            offset: self.offset + by,
            ..self
        }
    }
}

pub struct VarSpecParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> VarSpecParser<'a> {
    /// Parse every comma-separated varspec of an expression body (operator removed).
    ///
    /// Empty tokens (`a,,b`, a trailing comma, an empty body) are skipped.
    pub fn parse_expression(body: &str) -> Result<Vec<VarSpec>, VarSpecError> {
        let mut specs = Vec::new();
        let mut start = 0;

        for token in body.split(',') {
            if !token.is_empty() {
                let spec = Self::parse(token).map_err(|e| e.shifted(start))?;
                specs.push(spec);
            }
            start += token.len() + 1;
        }

        Ok(specs)
    }

    /// Parse a single varspec
    pub fn parse(token: &str) -> Result<VarSpec, VarSpecError> {
        let mut parser = VarSpecParser {
            input: token.as_bytes(),
            pos: 0,
        };

        let name_end = parser.parse_name()?;
        let name = token[..name_end].to_string();
        let modifier = parser.parse_modifier()?;

        Ok(VarSpec { name, modifier })
    }

    /// Consume the variable name, returning where it ends
    fn parse_name(&mut self) -> Result<usize, VarSpecError> {
        // true at the start and after a dot: a varchar must come next
        let mut need_char = true;

        while let Some(c) = self.peek_byte() {
            match c {
                b'.' => {
                    if need_char {
                        return Err(VarSpecError::invalid_name(self.pos));
                    }
                    need_char = true;
                    self.pos += 1;
                }
                b'*' | b':' => break,
                _ if c.is_ascii_alphanumeric() || c == b'_' => {
                    need_char = false;
                    self.pos += 1;
                }
                _ if is_pct_encoded(&self.input[self.pos..]) => {
                    need_char = false;
                    self.pos += 3;
                }
                _ => return Err(VarSpecError::invalid_name(self.pos)),
            }
        }

        if need_char {
            return Err(VarSpecError::invalid_name(self.pos));
        }
        Ok(self.pos)
    }

    fn parse_modifier(&mut self) -> Result<Modifier, VarSpecError> {
        match self.peek_byte() {
            None => Ok(Modifier::None),
            Some(b'*') => {
                self.pos += 1;
                // explode cannot be combined with anything
                match self.peek_byte() {
                    None => Ok(Modifier::Explode),
                    Some(_) => Err(VarSpecError::malformed(self.pos)),
                }
            }
            Some(_) => {
                // ':' is the only other way out of parse_name
                self.pos += 1;
                self.parse_prefix_length().map(Modifier::Prefix)
            }
        }
    }

    fn parse_prefix_length(&mut self) -> Result<u16, VarSpecError> {
        let mut length: u16 = 0;
        let mut digits = 0;

        while let Some(c) = self.peek_byte() {
            let leading_zero = digits == 0 && c == b'0';
            if !c.is_ascii_digit() || leading_zero || digits == 4 {
                return Err(VarSpecError::malformed(self.pos));
            }
            length = length * 10 + u16::from(c - b'0');
            digits += 1;
            self.pos += 1;
        }

        if digits == 0 {
            return Err(VarSpecError::malformed(self.pos));
        }
        Ok(length)
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }
}
