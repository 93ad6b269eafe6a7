//! Expression evaluator: a small recursive-descent parser for formulas in `x`.
//!
//! The accepted language is deliberately tiny. Besides numbers, the variable `x`
//! and the arithmetic operators `+ - * / %` and `^` / `**` (power), only the
//! symbols of [`SYMBOLS`] may be referenced:
//!
//! * constants: `PI`, `E`
//! * functions: `sin cos tan abs floor ceil sign pow sqrt max min`
//!
//! There is no access to anything else, so a formula cannot reach program state,
//! perform I/O or mutate anything.
//!
//! Two layers are exposed:
//! * [`Expression`] parses once and reports failures as [`ExprError`], which the UI
//!   uses for diagnostics.
//! * [`evaluate`] is the contract used by the numeric code: it re-parses the text on
//!   every call and never fails. Any parse or evaluation error, and any infinite
//!   result, yields `0.0`. `NaN` results (e.g. `sqrt(-1)`) are passed through.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Failure while lexing, parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),
    #[error("'{name}' is a function and must be called")]
    BareFunction { name: &'static str },
    #[error("'{name}' expects {expected} argument(s), got {found}")]
    Arity {
        name: &'static str,
        expected: &'static str,
        found: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
}

/// The functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Abs,
    Floor,
    Ceil,
    Sign,
    Pow,
    Sqrt,
    Max,
    Min,
}

impl Func {
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Abs => "abs",
            Func::Floor => "floor",
            Func::Ceil => "ceil",
            Func::Sign => "sign",
            Func::Pow => "pow",
            Func::Sqrt => "sqrt",
            Func::Max => "max",
            Func::Min => "min",
        }
    }

    fn check_arity(&self, found: usize) -> Result<(), ExprError> {
        let (ok, expected) = match self {
            Func::Pow => (found == 2, "2"),
            Func::Max | Func::Min => (found >= 1, "at least 1"),
            _ => (found == 1, "1"),
        };
        if ok {
            Ok(())
        } else {
            Err(ExprError::Arity {
                name: self.name(),
                expected,
                found,
            })
        }
    }

    fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Func::Sin => args[0].sin(),
            Func::Cos => args[0].cos(),
            Func::Tan => args[0].tan(),
            Func::Abs => args[0].abs(),
            Func::Floor => args[0].floor(),
            Func::Ceil => args[0].ceil(),
            Func::Sign => sign(args[0]),
            Func::Pow => args[0].powf(args[1]),
            Func::Sqrt => args[0].sqrt(),
            Func::Max => args.iter().copied().fold(f64::NEG_INFINITY, nan_max),
            Func::Min => args.iter().copied().fold(f64::INFINITY, nan_min),
        }
    }
}

/// Entry of the fixed symbol table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol {
    Const(f64),
    Func(Func),
}

/// Every identifier an expression may reference (besides `x`).
pub static SYMBOLS: Lazy<HashMap<&'static str, Symbol>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("PI", Symbol::Const(std::f64::consts::PI));
    m.insert("E", Symbol::Const(std::f64::consts::E));
    for f in [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Abs,
        Func::Floor,
        Func::Ceil,
        Func::Sign,
        Func::Pow,
        Func::Sqrt,
        Func::Max,
        Func::Min,
    ] {
        m.insert(f.name(), Symbol::Func(f));
    }
    m
});

// Sign with sign(0) == 0, propagating NaN.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        v
    }
}

fn nan_max(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.max(v)
    }
}

fn nan_min(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.min(v)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lexer
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{}", v),
            Tok::Ident(s) => write!(f, "{}", s),
            Tok::Plus => write!(f, "+"),
            Tok::Minus => write!(f, "-"),
            Tok::Star => write!(f, "*"),
            Tok::Slash => write!(f, "/"),
            Tok::Percent => write!(f, "%"),
            Tok::Caret => write!(f, "^"),
            Tok::LParen => write!(f, "("),
            Tok::RParen => write!(f, ")"),
            Tok::Comma => write!(f, ","),
        }
    }
}

fn lex(src: &str) -> Result<Vec<(Tok, usize)>, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit())) {
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // Exponent only when digits follow, so `2E` stays `2` followed by the constant.
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let text: String = chars[start..i].iter().collect();
            let v: f64 = text
                .parse()
                .map_err(|_| ExprError::InvalidNumber(text.clone()))?;
            out.push((Tok::Num(v), start));
            continue;
        }
        if c.is_ascii_alphabetic() || c == '_' {
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            out.push((Tok::Ident(chars[start..i].iter().collect()), start));
            continue;
        }
        let tok = match c {
            '+' => Tok::Plus,
            '-' => Tok::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Tok::Caret
            }
            '*' => Tok::Star,
            '/' => Tok::Slash,
            '%' => Tok::Percent,
            '^' => Tok::Caret,
            '(' => Tok::LParen,
            ')' => Tok::RParen,
            ',' => Tok::Comma,
            other => return Err(ExprError::UnexpectedChar { ch: other, pos: start }),
        };
        i += 1;
        out.push((tok, start));
    }
    Ok(out)
}

// ─────────────────────────────────────────────────────────────────────────────
// Parser
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Num(f64),
    X,
    Neg(Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
    Call(Func, Vec<Node>),
}

/// Deepest operator/parenthesis nesting accepted by the parser. Bounds the
/// recursion of both parsing and evaluation.
pub const MAX_NESTING: usize = 256;

struct Parser {
    toks: Vec<(Tok, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ExprError::TooDeep(MAX_NESTING));
        }
        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Tok, usize)> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn unexpected(&self) -> ExprError {
        match self.toks.get(self.pos) {
            Some((t, p)) => ExprError::UnexpectedToken {
                found: t.to_string(),
                pos: *p,
            },
            None => ExprError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, tok: Tok) -> Result<(), ExprError> {
        if self.peek() == Some(&tok) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    // Each chained operator nests the left operand one level deeper.
    fn expr(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.term()?;
        let mut levels = 0;
        loop {
            let op = match self.peek() {
                Some(Tok::Plus) => BinOp::Add,
                Some(Tok::Minus) => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            levels += 1;
            let rhs = self.term()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.leave(levels);
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Node, ExprError> {
        let mut lhs = self.unary()?;
        let mut levels = 0;
        loop {
            let op = match self.peek() {
                Some(Tok::Star) => BinOp::Mul,
                Some(Tok::Slash) => BinOp::Div,
                Some(Tok::Percent) => BinOp::Rem,
                _ => break,
            };
            self.pos += 1;
            self.enter()?;
            levels += 1;
            let rhs = self.unary()?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.leave(levels);
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Node, ExprError> {
        match self.peek() {
            Some(Tok::Minus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.leave(1);
                Ok(Node::Neg(Box::new(inner)))
            }
            Some(Tok::Plus) => {
                self.pos += 1;
                self.enter()?;
                let inner = self.unary()?;
                self.leave(1);
                Ok(inner)
            }
            _ => self.power(),
        }
    }

    // Right-associative; the exponent may carry its own sign (`2^-1`).
    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.peek() == Some(&Tok::Caret) {
            self.pos += 1;
            self.enter()?;
            let exp = self.unary()?;
            self.leave(1);
            return Ok(Node::Binary(BinOp::Pow, Box::new(base), Box::new(exp)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let (tok, pos) = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match tok {
            Tok::Num(v) => Ok(Node::Num(v)),
            Tok::LParen => {
                self.enter()?;
                let inner = self.expr()?;
                self.expect(Tok::RParen)?;
                self.leave(1);
                Ok(inner)
            }
            Tok::Ident(name) if name == "x" => Ok(Node::X),
            Tok::Ident(name) => match SYMBOLS.get(name.as_str()) {
                Some(Symbol::Const(v)) => Ok(Node::Num(*v)),
                Some(Symbol::Func(f)) => {
                    if self.peek() != Some(&Tok::LParen) {
                        return Err(ExprError::BareFunction { name: f.name() });
                    }
                    self.pos += 1;
                    self.enter()?;
                    let args = self.args()?;
                    self.leave(1);
                    f.check_arity(args.len())?;
                    Ok(Node::Call(*f, args))
                }
                None => Err(ExprError::UnknownIdentifier(name)),
            },
            other => Err(ExprError::UnexpectedToken {
                found: other.to_string(),
                pos,
            }),
        }
    }

    // Called after the opening parenthesis has been consumed.
    fn args(&mut self) -> Result<Vec<Node>, ExprError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Tok::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.next() {
                Some((Tok::Comma, _)) => continue,
                Some((Tok::RParen, _)) => return Ok(args),
                Some((t, p)) => {
                    return Err(ExprError::UnexpectedToken {
                        found: t.to_string(),
                        pos: p,
                    })
                }
                None => return Err(ExprError::UnexpectedEnd),
            }
        }
    }
}

fn eval_node(node: &Node, x: f64) -> Result<f64, ExprError> {
    Ok(match node {
        Node::Num(v) => *v,
        Node::X => x,
        Node::Neg(inner) => -eval_node(inner, x)?,
        Node::Binary(op, a, b) => {
            let a = eval_node(a, x)?;
            let b = eval_node(b, x)?;
            match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div | BinOp::Rem if b == 0.0 => return Err(ExprError::DivisionByZero),
                BinOp::Div => a / b,
                BinOp::Rem => a % b,
                BinOp::Pow => a.powf(b),
            }
        }
        Node::Call(f, args) => {
            let vals = args
                .iter()
                .map(|a| eval_node(a, x))
                .collect::<Result<Vec<f64>, _>>()?;
            f.apply(&vals)
        }
    })
}

/// A parsed formula in `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
}

impl Expression {
    /// Parse `source`, reporting the first error encountered.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let toks = lex(source)?;
        let mut p = Parser {
            toks,
            pos: 0,
            depth: 0,
        };
        let root = p.expr()?;
        if p.pos < p.toks.len() {
            return Err(p.unexpected());
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluate at `x`, surfacing runtime errors.
    pub fn eval(&self, x: f64) -> Result<f64, ExprError> {
        eval_node(&self.root, x)
    }

    /// Evaluate at `x` under the fallback policy of [`evaluate`].
    pub fn value_at(&self, x: f64) -> f64 {
        settle(self.eval(x))
    }
}

fn settle(r: Result<f64, ExprError>) -> f64 {
    match r {
        Ok(v) if v.is_infinite() => 0.0,
        Ok(v) => v,
        Err(_) => 0.0,
    }
}

/// Evaluate `expression` at `x`. Never fails: errors and infinities become `0.0`.
///
/// ```
/// # use fourierplot::data::expression::evaluate;
/// assert_eq!(evaluate("2*x + 1", 3.0), 7.0);
/// assert_eq!(evaluate("1/0", 3.0), 0.0);
/// assert_eq!(evaluate("undefinedSymbol(x)", 3.0), 0.0);
/// ```
pub fn evaluate(expression: &str, x: f64) -> f64 {
    settle(Expression::parse(expression).and_then(|e| e.eval(x)))
}
