// Expression building blocks: operators, their expansion rules, and varspecs

/// Expansion behaviour selected by an expression's operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorRule {
    /// Operator character, `None` for simple string expansion
    pub op: Option<char>,
    /// Emitted once before the first defined variable of the expression
    pub first: Option<char>,
    /// Placed between variables, and between exploded items
    pub separator: char,
    /// Emit `name=` before values
    pub named: bool,
    /// Emit a trailing `=` for empty named values
    pub if_empty_equals: bool,
    /// Let reserved characters through unescaped
    pub allow_reserved: bool,
}

pub const SIMPLE: OperatorRule = OperatorRule {
    op: None,
    first: None,
    separator: ',',
    named: false,
    if_empty_equals: false,
    allow_reserved: false,
};

pub const RESERVED: OperatorRule = OperatorRule {
    op: Some('+'),
    allow_reserved: true,
    ..SIMPLE
};

pub const FRAGMENT: OperatorRule = OperatorRule {
    op: Some('#'),
    first: Some('#'),
    allow_reserved: true,
    ..SIMPLE
};

pub const LABEL: OperatorRule = OperatorRule {
    op: Some('.'),
    first: Some('.'),
    separator: '.',
    ..SIMPLE
};

pub const PATH_SEGMENT: OperatorRule = OperatorRule {
    op: Some('/'),
    first: Some('/'),
    separator: '/',
    ..SIMPLE
};

pub const PATH_PARAMETER: OperatorRule = OperatorRule {
    op: Some(';'),
    first: Some(';'),
    separator: ';',
    named: true,
    ..SIMPLE
};

pub const QUERY: OperatorRule = OperatorRule {
    op: Some('?'),
    first: Some('?'),
    separator: '&',
    named: true,
    if_empty_equals: true,
    ..SIMPLE
};

pub const QUERY_CONTINUATION: OperatorRule = OperatorRule {
    op: Some('&'),
    first: Some('&'),
    separator: '&',
    named: true,
    if_empty_equals: true,
    ..SIMPLE
};

/// The operators of RFC 6570 levels 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    /// Operator for a leading expression character, if it is one
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    pub fn rule(self) -> &'static OperatorRule {
        match self {
            Operator::Simple => &SIMPLE,
            Operator::Reserved => &RESERVED,
            Operator::Fragment => &FRAGMENT,
            Operator::Label => &LABEL,
            Operator::PathSegment => &PATH_SEGMENT,
            Operator::PathParameter => &PATH_PARAMETER,
            Operator::Query => &QUERY,
            Operator::QueryContinuation => &QUERY_CONTINUATION,
        }
    }
}

/// Value modifier attached to a varspec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    None,
    /// `*`
    Explode,
    /// `:N`, 1..=9999 characters
    Prefix(u16),
}

/// One variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub modifier: Modifier,
}

impl VarSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifier: Modifier::None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn explode(&self) -> bool {
        self.modifier == Modifier::Explode
    }

    /// Prefix length for `encode`, 0 meaning unlimited
    pub fn max_chars(&self) -> usize {
        match self.modifier {
            Modifier::Prefix(len) => usize::from(len),
            _ => 0,
        }
    }
}
