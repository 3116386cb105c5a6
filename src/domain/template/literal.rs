// Parser for list and map values written as flat strings
//
//   list: ("a","b","c")
//   map:  [("k1","v1"),("k2","v2")]
//
// Items are double-quoted; `\"` and `\\` are the only escapes. Spaces are allowed
// around delimiters. The closing bracket must be the last character.

/// Cursor over a literal, in the same shape as the template parser
struct LiteralParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Option<()> {
        self.eat(expected).then_some(())
    }

    fn skip_spaces(&mut self) {
        while self.eat(' ') {}
    }

    fn at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    /// `"..."` with `\"` and `\\` escapes. Any other backslash is kept as-is.
    fn parse_quoted(&mut self) -> Option<String> {
        self.expect('"')?;
        let mut value = String::new();

        loop {
            match self.consume_char()? {
                '"' => return Some(value),
                '\\' => match self.consume_char()? {
                    ch @ ('"' | '\\') => value.push(ch),
                    ch => {
                        value.push('\\');
                        value.push(ch);
                    }
                },
                ch => value.push(ch),
            }
        }
    }

    /// `( "key" , "value" )`
    fn parse_pair(&mut self) -> Option<(String, String)> {
        self.expect('(')?;
        self.skip_spaces();
        let key = self.parse_quoted()?;
        self.skip_spaces();
        self.expect(',')?;
        self.skip_spaces();
        let value = self.parse_quoted()?;
        self.skip_spaces();
        self.expect(')')?;
        Some((key, value))
    }
}

/// Parse a list literal. `None` means the literal is malformed.
pub fn parse_list(input: &str) -> Option<Vec<String>> {
    let mut parser = LiteralParser::new(input);
    parser.expect('(')?;
    parser.skip_spaces();

    let mut items = Vec::new();
    if !parser.eat(')') {
        loop {
            parser.skip_spaces();
            items.push(parser.parse_quoted()?);
            parser.skip_spaces();
            if parser.eat(',') {
                continue;
            }
            parser.expect(')')?;
            break;
        }
    }

    parser.at_end().then_some(items)
}

/// Parse a map literal. `None` means the literal is malformed.
///
/// Keys are kept in order and may repeat.
pub fn parse_map(input: &str) -> Option<Vec<(String, String)>> {
    let mut parser = LiteralParser::new(input);
    parser.expect('[')?;
    parser.skip_spaces();

    let mut pairs = Vec::new();
    if !parser.eat(']') {
        loop {
            parser.skip_spaces();
            pairs.push(parser.parse_pair()?);
            parser.skip_spaces();
            if parser.eat(',') {
                continue;
            }
            parser.expect(']')?;
            break;
        }
    }

    parser.at_end().then_some(pairs)
}
