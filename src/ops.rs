//! Operator definitions and the tiered registry that drives tokenization and evaluation.
//!
//! The registry layers the stochastic dice operators and the pick operators around the
//! conventional arithmetic operators. Tier 0 binds tightest (dice), then `^`, then `* /`, then
//! `+ -`, then the pick operators `> <` loosest - so dice resolve first, arithmetic combines
//! their sums, and a pick compares two fully-resolved sub-results.

use crate::{roller::Roller, trace::Trace};

/// Selects how the `d`/`D` operator resolves while a roll is made with advantage or disadvantage.
///
/// Under [`Advantage`]/[`Disadvantage`], a single-d20 roll (`1d20`) is drawn twice and the
/// larger/smaller sum kept; any other operands roll plainly. The explicit `ad`/`dd` operators are
/// unaffected by the mode and apply their pick-two rule to any operands.
///
/// [`Advantage`]: Self::Advantage
/// [`Disadvantage`]: Self::Disadvantage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RollMode {
	/// `d` sums independent draws
	#[default]
	Normal,

	/// `1d20` is drawn twice, keeping the larger sum
	Advantage,

	/// `1d20` is drawn twice, keeping the smaller sum
	Disadvantage,
}

impl RollMode {
	/// Splits a trailing `adv` or `disadv` word off a raw roll request, returning the mode it
	/// selects and the expression without it. Trailing whitespace is trimmed either way; a name
	/// that merely ends in `adv` is left alone.
	///
	/// # Examples
	/// ```
	/// use fortuna::RollMode;
	///
	/// assert_eq!(RollMode::from_suffix("1d20+3 adv"), (RollMode::Advantage, "1d20+3"));
	/// assert_eq!(RollMode::from_suffix("1d20+3 disadv"), (RollMode::Disadvantage, "1d20+3"));
	/// assert_eq!(RollMode::from_suffix("2d6+myadv"), (RollMode::Normal, "2d6+myadv"));
	/// ```
	#[must_use]
	pub fn from_suffix(input: &str) -> (Self, &str) {
		let trimmed = input.trim_end();
		for (word, mode) in [("disadv", Self::Disadvantage), ("adv", Self::Advantage)] {
			if let Some(rest) = trimmed.strip_suffix(word) {
				if rest.is_empty() || rest.ends_with(char::is_whitespace) {
					return (mode, rest.trim_end());
				}
			}
		}
		(Self::Normal, trimmed)
	}
}

/// Evaluation rule shared by every operator: both operands are already-evaluated integers, draws
/// come from the injected roller, and trace lines go to the shared trace unless `silent` is set
/// (composite operators pass `silent = true` for their internal draws).
type EvalFn = fn(i64, i64, &mut dyn Roller, &mut Trace, bool) -> Result<i64, Error>;

/// A single binary operator: its symbol as written in expressions and its evaluation rule.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
	/// Symbol as it appears in expressions
	pub symbol: &'static str,

	/// Evaluation rule for the operator
	eval: EvalFn,
}

impl Operator {
	/// Applies the operator to two evaluated operands.
	///
	/// # Errors
	/// If an operand is outside the operator's domain or the arithmetic fails, an error variant
	/// is returned and nothing is traced.
	pub fn apply(
		&self,
		a: i64,
		b: i64,
		roller: &mut dyn Roller,
		trace: &mut Trace,
		silent: bool,
	) -> Result<i64, Error> {
		(self.eval)(a, b, roller, trace, silent)
	}
}

/// Shorthand for the static operator tables below.
const fn op(symbol: &'static str, eval: EvalFn) -> Operator {
	Operator { symbol, eval }
}

static DICE_NORMAL: [Operator; 7] = [
	op("d", eval_roll),
	op("D", eval_roll),
	op("ad", eval_advantage),
	op("dd", eval_disadvantage),
	op("gwf", eval_gwf),
	op("g", eval_gwf),
	op("G", eval_gwf),
];

static DICE_ADVANTAGE: [Operator; 7] = [
	op("d", eval_d_advantage),
	op("D", eval_d_advantage),
	op("ad", eval_advantage),
	op("dd", eval_disadvantage),
	op("gwf", eval_gwf),
	op("g", eval_gwf),
	op("G", eval_gwf),
];

static DICE_DISADVANTAGE: [Operator; 7] = [
	op("d", eval_d_disadvantage),
	op("D", eval_d_disadvantage),
	op("ad", eval_advantage),
	op("dd", eval_disadvantage),
	op("gwf", eval_gwf),
	op("g", eval_gwf),
	op("G", eval_gwf),
];

static POWER: [Operator; 1] = [op("^", eval_pow)];

static MULTIPLICATIVE: [Operator; 2] = [op("*", eval_mul), op("/", eval_div)];

static ADDITIVE: [Operator; 2] = [op("+", eval_add), op("-", eval_sub)];

static PICK: [Operator; 2] = [op(">", eval_max), op("<", eval_min)];

/// Immutable, statically constructed table of operator tiers, parameterized only by the
/// [`RollMode`] in effect for the evaluation.
///
/// # Examples
/// ```
/// use fortuna::{Registry, RollMode};
///
/// let registry = Registry::new(RollMode::Normal);
/// assert_eq!(registry.symbols()[0], "gwf");
/// assert!(registry.find("dd").is_some());
/// assert!(registry.find("&").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
	/// Operator tiers, tightest-binding first
	tiers: [&'static [Operator]; 5],
}

impl Registry {
	/// Creates the registry for a given roll mode.
	#[must_use]
	pub fn new(mode: RollMode) -> Self {
		let dice: &'static [Operator] = match mode {
			RollMode::Normal => &DICE_NORMAL,
			RollMode::Advantage => &DICE_ADVANTAGE,
			RollMode::Disadvantage => &DICE_DISADVANTAGE,
		};
		Self {
			tiers: [dice, &POWER, &MULTIPLICATIVE, &ADDITIVE, &PICK],
		}
	}

	/// The operator tiers, tightest-binding (dice) first, loosest (pick) last. Operators within
	/// a tier are left-associative.
	#[must_use]
	#[inline]
	pub fn tiers(&self) -> &[&'static [Operator]] {
		&self.tiers
	}

	/// Looks up an operator by its symbol, returning the tier it belongs to and its definition.
	#[must_use]
	pub fn find(&self, symbol: &str) -> Option<(usize, Operator)> {
		self.tiers.iter().enumerate().find_map(|(tier, ops)| {
			ops.iter().find(|op| op.symbol == symbol).map(|op| (tier, *op))
		})
	}

	/// Every operator symbol, longest first, so a tokenizer trying them in order naturally reads
	/// `dd` as one disadvantage operator rather than two `d`s.
	#[must_use]
	pub fn symbols(&self) -> Vec<&'static str> {
		let mut symbols = self
			.tiers
			.iter()
			.flat_map(|ops| ops.iter().map(|op| op.symbol))
			.collect::<Vec<_>>();
		symbols.sort_by(|a, b| b.len().cmp(&a.len()));
		symbols
	}
}

impl Default for Registry {
	/// Creates the registry for [`RollMode::Normal`].
	#[inline]
	fn default() -> Self {
		Self::new(RollMode::Normal)
	}
}

/// An operand outside an operator's valid domain
#[derive(thiserror::Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum DomainError {
	/// The die count operand was negative.
	#[error("cannot roll a negative number of dice ({0})")]
	NegativeCount(i64),

	/// The face count operand was zero or negative.
	#[error("dice must have at least 1 face, got {0}")]
	NonPositiveFaces(i64),
}

/// Illegal arithmetic encountered while combining operands
#[derive(thiserror::Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum ArithmeticError {
	/// An intermediate value no longer fits in an `i64`.
	#[error("integer overflow")]
	Overflow,

	/// The right operand of `/` was zero.
	#[error("division by zero")]
	DivisionByZero,

	/// The right operand of `^` was negative.
	#[error("negative exponent")]
	NegativeExponent,
}

/// Failure applying a single operator
#[derive(thiserror::Error, Debug, Clone, Copy)]
#[non_exhaustive]
pub enum Error {
	/// An operand was outside the operator's domain.
	#[error(transparent)]
	Domain(#[from] DomainError),

	/// The arithmetic itself was illegal.
	#[error(transparent)]
	Arithmetic(#[from] ArithmeticError),
}

/// Validates the operands of a dice operator.
fn check_dice(count: i64, faces: i64) -> Result<(), DomainError> {
	if count < 0 {
		return Err(DomainError::NegativeCount(count));
	}
	if faces < 1 {
		return Err(DomainError::NonPositiveFaces(faces));
	}
	Ok(())
}

/// Sums `count` independent draws of a `faces`-sided die.
fn draw_sum(count: i64, faces: i64, roller: &mut dyn Roller) -> Result<i64, Error> {
	let mut sum: i64 = 0;
	for _ in 0..count {
		sum = sum.checked_add(roller.draw(faces)).ok_or(ArithmeticError::Overflow)?;
	}
	Ok(sum)
}

/// `d`/`D`: sum of `a` draws in `[1, b]`. A count of zero yields 0 and traces nothing.
fn eval_roll(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	check_dice(a, b)?;
	if a == 0 {
		return Ok(0);
	}
	let sum = draw_sum(a, b, roller)?;
	if !silent {
		trace.line(format!("{a}d{b}: {sum}"));
	}
	Ok(sum)
}

/// Shared pick-two rule behind advantage and disadvantage: the `a d b` roll is made twice
/// silently and one of the two sums is kept. `label` is the operator spelling used in the trace.
fn pick_two(
	a: i64,
	b: i64,
	roller: &mut dyn Roller,
	trace: &mut Trace,
	silent: bool,
	label: &str,
	larger: bool,
) -> Result<i64, Error> {
	check_dice(a, b)?;
	if a == 0 {
		return Ok(0);
	}
	let first = eval_roll(a, b, roller, trace, true)?;
	let second = eval_roll(a, b, roller, trace, true)?;
	let out = if larger { first.max(second) } else { first.min(second) };
	if !silent {
		let word = if larger { "larger" } else { "smaller" };
		trace.line(format!("{a}{label}{b}, picking {word} of {first} and {second}: {out}"));
	}
	Ok(out)
}

/// `ad`: roll twice, keep the larger sum.
fn eval_advantage(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	pick_two(a, b, roller, trace, silent, "ad", true)
}

/// `dd`: roll twice, keep the smaller sum.
fn eval_disadvantage(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	pick_two(a, b, roller, trace, silent, "dd", false)
}

/// `d` under [`RollMode::Advantage`]: single-d20 rolls use the pick-two rule, anything else
/// rolls plainly.
fn eval_d_advantage(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	if a == 1 && b == 20 {
		pick_two(a, b, roller, trace, silent, "d", true)
	} else {
		eval_roll(a, b, roller, trace, silent)
	}
}

/// `d` under [`RollMode::Disadvantage`]: the mirror of [`eval_d_advantage`].
fn eval_d_disadvantage(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	if a == 1 && b == 20 {
		pick_two(a, b, roller, trace, silent, "d", false)
	} else {
		eval_roll(a, b, roller, trace, silent)
	}
}

/// `gwf`: per die, a draw of 1 or 2 is rerolled exactly once and the second draw kept, even if it
/// is also low.
fn eval_gwf(a: i64, b: i64, roller: &mut dyn Roller, trace: &mut Trace, silent: bool) -> Result<i64, Error> {
	check_dice(a, b)?;
	let mut sum: i64 = 0;
	for _ in 0..a {
		let mut n = eval_roll(1, b, roller, trace, true)?;
		if n <= 2 {
			let rerolled = roller.draw(b);
			if !silent {
				trace.line(format!("1d{b}: {n}, rerolling, 1d{b}: {rerolled}"));
			}
			n = rerolled;
		} else if !silent {
			trace.line(format!("1d{b}: {n}"));
		}
		sum = sum.checked_add(n).ok_or(ArithmeticError::Overflow)?;
	}
	Ok(sum)
}

fn eval_add(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	Ok(a.checked_add(b).ok_or(ArithmeticError::Overflow)?)
}

fn eval_sub(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	Ok(a.checked_sub(b).ok_or(ArithmeticError::Overflow)?)
}

fn eval_mul(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	Ok(a.checked_mul(b).ok_or(ArithmeticError::Overflow)?)
}

/// Truncating integer division.
fn eval_div(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	if b == 0 {
		return Err(ArithmeticError::DivisionByZero.into());
	}
	Ok(a.checked_div(b).ok_or(ArithmeticError::Overflow)?)
}

/// Integer exponentiation; the exponent must be non-negative.
fn eval_pow(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	if b < 0 {
		return Err(ArithmeticError::NegativeExponent.into());
	}
	let exp = u32::try_from(b).map_err(|_| ArithmeticError::Overflow)?;
	Ok(a.checked_pow(exp).ok_or(ArithmeticError::Overflow)?)
}

/// `>`: the larger of two already-evaluated sub-results. Traces nothing of its own.
fn eval_max(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	Ok(a.max(b))
}

/// `<`: the smaller of two already-evaluated sub-results.
fn eval_min(a: i64, b: i64, _roller: &mut dyn Roller, _trace: &mut Trace, _silent: bool) -> Result<i64, Error> {
	Ok(a.min(b))
}
