//! Tokenization and evaluation of substituted expressions, driven by the operator registry.
//!
//! Parsing and evaluation happen in a single precedence-climbing pass: operands are evaluated as
//! soon as they are parsed, so trace lines come out in left-to-right evaluation order. Any
//! failure aborts the whole evaluation - the caller never sees a partial value or trace.

use crate::{
	ops::{self, ArithmeticError, DomainError, Registry},
	roller::Roller,
	trace::Trace,
};

/// Outcome of one evaluation: the final value and the ordered trace of every draw that
/// contributed to it. Produced fresh per call and never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	/// Final value of the expression
	pub value: i64,

	/// Ordered record of the draws and summary lines behind the value
	pub trace: Trace,
}

/// A malformed expression
#[derive(thiserror::Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum SyntaxError {
	/// A stretch of input matched no operator symbol - including names that substitution left
	/// unresolved.
	#[error("unknown symbol at offset {0}")]
	UnknownSymbol(usize),

	/// An operand was missing where a value was required.
	#[error("expected a value at offset {0}")]
	ExpectedValue(usize),

	/// An opened parenthesis was never closed.
	#[error("expected ')' at offset {0}")]
	UnclosedParen(usize),

	/// Leftover input after a complete expression, such as an unmatched `)`.
	#[error("unexpected trailing input at offset {0}")]
	TrailingInput(usize),

	/// An integer literal too large to represent.
	#[error("integer literal out of range at offset {0}")]
	IntOutOfRange(usize),
}

impl SyntaxError {
	/// Byte offset into the substituted expression where the problem was found.
	#[must_use]
	pub const fn offset(&self) -> usize {
		match self {
			Self::UnknownSymbol(pos)
			| Self::ExpectedValue(pos)
			| Self::UnclosedParen(pos)
			| Self::TrailingInput(pos)
			| Self::IntOutOfRange(pos) => *pos,
		}
	}
}

/// Any failure while resolving an expression
#[derive(thiserror::Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Error {
	/// The expression was malformed.
	#[error("syntax error: {0}")]
	Syntax(#[from] SyntaxError),

	/// An operand was outside an operator's domain.
	#[error("domain error: {0}")]
	Domain(#[from] DomainError),

	/// Illegal arithmetic, such as division by zero.
	#[error("arithmetic error: {0}")]
	Arithmetic(#[from] ArithmeticError),
}

impl From<ops::Error> for Error {
	fn from(err: ops::Error) -> Self {
		match err {
			ops::Error::Domain(err) => Self::Domain(err),
			ops::Error::Arithmetic(err) => Self::Arithmetic(err),
		}
	}
}

/// Evaluates a substituted expression using the given registry and roller.
///
/// The trace is wrapped in a leading `Rolling: {expression}` line and a trailing
/// `I rolled {value}` line, with the per-operator lines in evaluation order between them.
///
/// # Errors
/// If the expression is malformed, an operand is out of domain, or the arithmetic is illegal, an
/// error variant is returned and no trace is produced.
///
/// # Examples
/// ```
/// use fortuna::{roller::Iter, Registry, RollMode};
///
/// let registry = Registry::new(RollMode::Normal);
/// let mut roller = Iter::new([1, 5, 5]);
///
/// let result = fortuna::evaluate("2gwf6+5", &registry, &mut roller)?;
/// assert_eq!(result.value, 15);
/// assert_eq!(
/// 	result.trace.lines(),
/// 	[
/// 		"Rolling: 2gwf6+5",
/// 		"1d6: 1, rerolling, 1d6: 5",
/// 		"1d6: 5",
/// 		"I rolled 15",
/// 	],
/// );
/// # Ok::<(), fortuna::eval::Error>(())
/// ```
pub fn evaluate<R: Roller>(substituted: &str, registry: &Registry, roller: &mut R) -> Result<Resolution, Error> {
	let mut trace = Trace::new();
	trace.line(format!("Rolling: {substituted}"));

	let tokens = tokenize(substituted, registry)?;
	let mut evaluator = Evaluator {
		tokens,
		pos: 0,
		end: substituted.len(),
		registry,
		roller,
		trace: &mut trace,
	};
	let value = evaluator.run()?;

	trace.line(format!("I rolled {value}"));
	Ok(Resolution { value, trace })
}

/// A lexical token, carrying its byte offset for diagnostics
#[derive(Debug, Clone, Copy)]
enum Token {
	/// Integer literal
	Int { value: i64, offset: usize },
	/// `(`
	Open { offset: usize },
	/// `)`
	Close { offset: usize },
	/// Operator symbol, exactly as found in the registry
	Op { symbol: &'static str, offset: usize },
}

impl Token {
	const fn offset(&self) -> usize {
		match self {
			Self::Int { offset, .. } | Self::Open { offset } | Self::Close { offset } | Self::Op { offset, .. } => {
				*offset
			}
		}
	}
}

/// Splits the input into literals, parentheses, and operator symbols. Whitespace is skipped;
/// operator symbols are matched longest-first per the registry's tokenizer contract, so `2dd6`
/// reads as a disadvantage roll and never as two `d`s.
fn tokenize(input: &str, registry: &Registry) -> Result<Vec<Token>, SyntaxError> {
	let symbols = registry.symbols();
	let mut tokens = Vec::new();
	let mut offset = 0;

	while let Some(c) = input[offset..].chars().next() {
		if c.is_whitespace() {
			offset += c.len_utf8();
		} else if c == '(' {
			tokens.push(Token::Open { offset });
			offset += 1;
		} else if c == ')' {
			tokens.push(Token::Close { offset });
			offset += 1;
		} else if c.is_ascii_digit() {
			let rest = &input[offset..];
			let len = rest
				.find(|ch: char| !ch.is_ascii_digit())
				.unwrap_or(rest.len());
			let value = rest[..len]
				.parse::<i64>()
				.map_err(|_| SyntaxError::IntOutOfRange(offset))?;
			tokens.push(Token::Int { value, offset });
			offset += len;
		} else {
			let rest = &input[offset..];
			match symbols.iter().copied().find(|symbol| rest.starts_with(*symbol)) {
				Some(symbol) => {
					tokens.push(Token::Op { symbol, offset });
					offset += symbol.len();
				}
				None => return Err(SyntaxError::UnknownSymbol(offset)),
			}
		}
	}

	Ok(tokens)
}

/// Single-pass precedence climber over the token stream. Tier indices come straight from the
/// registry: operands of tier 0 are atoms, unary minus sits between the dice tier and `^`, and
/// every looser tier takes the next-tighter tier whole.
struct Evaluator<'a> {
	tokens: Vec<Token>,
	pos: usize,
	/// Input length, used as the offset of end-of-input diagnostics
	end: usize,
	registry: &'a Registry,
	roller: &'a mut dyn Roller,
	trace: &'a mut Trace,
}

impl Evaluator<'_> {
	fn run(&mut self) -> Result<i64, Error> {
		let value = self.tier(self.top_tier())?;
		if let Some(token) = self.peek() {
			return Err(SyntaxError::TrailingInput(token.offset()).into());
		}
		Ok(value)
	}

	fn top_tier(&self) -> usize {
		self.registry.tiers().len() - 1
	}

	fn peek(&self) -> Option<Token> {
		self.tokens.get(self.pos).copied()
	}

	fn bump(&mut self) -> Option<Token> {
		let token = self.peek();
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	/// Parses and evaluates one tier, folding left-associatively.
	fn tier(&mut self, tier: usize) -> Result<i64, Error> {
		let mut lhs = self.operand(tier)?;
		loop {
			let Some(Token::Op { symbol, .. }) = self.peek() else {
				break;
			};
			match self.registry.find(symbol) {
				Some((t, op)) if t == tier => {
					self.pos += 1;
					let rhs = self.operand(tier)?;
					lhs = op.apply(lhs, rhs, self.roller, self.trace, false)?;
				}
				_ => break,
			}
		}
		Ok(lhs)
	}

	fn operand(&mut self, tier: usize) -> Result<i64, Error> {
		match tier {
			0 => self.atom(),
			1 => self.unary(),
			_ => self.tier(tier - 1),
		}
	}

	/// Zero or more leading minus signs applied to a dice-tier operand.
	fn unary(&mut self) -> Result<i64, Error> {
		let mut negations = 0_u32;
		while let Some(Token::Op { symbol: "-", .. }) = self.peek() {
			self.pos += 1;
			negations += 1;
		}
		let mut value = self.tier(0)?;
		for _ in 0..negations {
			value = value.checked_neg().ok_or(ArithmeticError::Overflow)?;
		}
		Ok(value)
	}

	fn atom(&mut self) -> Result<i64, Error> {
		match self.bump() {
			Some(Token::Int { value, .. }) => Ok(value),
			Some(Token::Open { .. }) => {
				let value = self.tier(self.top_tier())?;
				match self.bump() {
					Some(Token::Close { .. }) => Ok(value),
					Some(token) => Err(SyntaxError::UnclosedParen(token.offset()).into()),
					None => Err(SyntaxError::UnclosedParen(self.end).into()),
				}
			}
			Some(token) => Err(SyntaxError::ExpectedValue(token.offset()).into()),
			None => Err(SyntaxError::ExpectedValue(self.end).into()),
		}
	}
}
