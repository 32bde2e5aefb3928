use std::fmt;
use std::str::SplitWhitespace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    Pow,
    Mul,
    Div,
    Add,
    Sub,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Pow,
        Operator::Mul,
        Operator::Div,
        Operator::Add,
        Operator::Sub,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Pow => "^",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Add => "+",
            Operator::Sub => "-",
        }
    }

    pub fn from_symbol(sym: &str) -> Option<Operator> {
        match sym {
            "^" => Some(Operator::Pow),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            _ => None,
        }
    }

    /// Plain float arithmetic, `l op r`. Division by zero follows IEEE-754,
    /// callers decide beforehand whether that is acceptable.
    pub fn apply(self, l: f64, r: f64) -> f64 {
        match self {
            Operator::Pow => l.powf(r),
            Operator::Mul => l * r,
            Operator::Div => l / r,
            Operator::Add => l + r,
            Operator::Sub => l - r,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OpInfo {
    pub op: Operator,
    pub rank: usize,
    pub assoc: Assoc,
}

/// Maps each operator to its precedence rank and associativity.
///
/// Tables are immutable values: variants are derived with the `with_*`
/// builders and handed to the parser/evaluator by reference. An operator
/// missing from a table is not recognised by anything using that table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OperatorTable {
    entries: [Option<OpInfo>; 5],
}

/// `^` binds tightest, then `* /`, then `+ -`. Everything is left-associative.
pub static STANDARD_TABLE: OperatorTable = OperatorTable::standard();

impl OperatorTable {
    pub const fn standard() -> Self {
        const fn left(op: Operator, rank: usize) -> Option<OpInfo> {
            Some(OpInfo { op, rank, assoc: Assoc::Left })
        }
        OperatorTable {
            entries: [
                left(Operator::Pow, 3),
                left(Operator::Mul, 2),
                left(Operator::Div, 2),
                left(Operator::Add, 1),
                left(Operator::Sub, 1),
            ],
        }
    }

    pub fn with_rank(mut self, op: Operator, rank: usize) -> Self {
        let assoc = self.entries[op.index()].map_or(Assoc::Left, |info| info.assoc);
        self.entries[op.index()] = Some(OpInfo { op, rank, assoc });
        self
    }

    /// Has no effect on operators absent from the table.
    pub fn with_assoc(mut self, op: Operator, assoc: Assoc) -> Self {
        if let Some(info) = self.entries[op.index()].as_mut() {
            info.assoc = assoc;
        }
        self
    }

    pub fn without(mut self, op: Operator) -> Self {
        self.entries[op.index()] = None;
        self
    }

    pub fn info(&self, op: Operator) -> Option<&OpInfo> {
        self.entries[op.index()].as_ref()
    }

    pub fn lookup(&self, sym: &str) -> Option<&OpInfo> {
        Operator::from_symbol(sym).and_then(|op| self.info(op))
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Token {
    Operand(f64),
    Operator(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Token::Operand(n) => write!(f, "{}", n),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

// An optional sign followed by a digit or '.', the rest is up to f64 parsing.
// Only finite values: no "inf", "NaN" or out of range exponents like "1e400".
fn scan_number(word: &str) -> Option<f64> {
    let unsigned = word.strip_prefix(['+', '-']).unwrap_or(word);
    match unsigned.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => {
            word.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Splits an expression on whitespace and classifies each word.
///
/// Yields `(position, token)` where position is the word index. Words that
/// are neither an operator of the table nor a number come back as `Err(word)`.
pub struct Tokenizer<'a, 't> {
    words: std::iter::Enumerate<SplitWhitespace<'a>>,
    table: &'t OperatorTable,
}

impl<'a, 't> Tokenizer<'a, 't> {
    pub fn new(src: &'a str, table: &'t OperatorTable) -> Self {
        Tokenizer { words: src.split_whitespace().enumerate(), table }
    }
}

impl<'a, 't> Iterator for Tokenizer<'a, 't> {
    type Item = (usize, Result<Token, &'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        let (pos, word) = self.words.next()?;
        let token = if let Some(info) = self.table.lookup(word) {
            Ok(Token::Operator(info.op))
        } else if let Some(num) = scan_number(word) {
            Ok(Token::Operand(num))
        } else {
            Err(word)
        };
        Some((pos, token))
    }
}

///////////////////////////////////////////////////////////////////////////////
