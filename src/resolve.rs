//! Textual substitution of named constants and stored rolls into raw expressions.
//!
//! Substitution is a literal, non-recursive rewrite and happens exactly once, before
//! tokenization. A name that matches nothing simply stays in the string and later fails
//! tokenization as an unknown symbol - there is no separate "unresolved name" error.

/// A named integer belonging to one character, substituted at every occurrence of its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant {
	/// Name as it appears in expressions
	pub name: String,

	/// Value substituted for the name
	pub value: i64,
}

impl Constant {
	/// Creates a named constant.
	#[must_use]
	pub fn new(name: impl Into<String>, value: i64) -> Self {
		Self {
			name: name.into(),
			value,
		}
	}
}

/// A named expression belonging to one character, substituted at most once per evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredRoll {
	/// Name as it appears in expressions
	pub name: String,

	/// Expression substituted for the name
	pub expression: String,
}

impl StoredRoll {
	/// Creates a named stored roll.
	#[must_use]
	pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			expression: expression.into(),
		}
	}
}

/// Rewrites an expression by substituting the caller's stored rolls and constants, leaving a
/// string ready for tokenization.
///
/// Of the stored rolls whose name occurs in the expression, only the one with the longest name
/// (ties: first in the slice) is substituted, only at its first occurrence, and only once - the
/// substituted body is never expanded further even if it mentions another roll's name. Constants
/// are then substituted at every occurrence, longest name first so that one constant's name being
/// a prefix of another's cannot corrupt the rewrite. Both kinds are wrapped in parentheses.
///
/// # Examples
/// ```
/// use fortuna::{substitute, Constant, StoredRoll};
///
/// let constants = [Constant::new("STR", 3)];
/// let rolls = [StoredRoll::new("smite", "2d8+STR")];
///
/// assert_eq!(substitute("1d20+STR", &constants, &[]), "1d20+(3)");
/// assert_eq!(substitute("smite+smite", &constants, &rolls), "(2d8+(3))+smite");
/// ```
#[must_use]
pub fn substitute(expression: &str, constants: &[Constant], rolls: &[StoredRoll]) -> String {
	let mut expression = expression.to_owned();

	// Substitute only 1 stored roll
	let mut chosen: Option<&StoredRoll> = None;
	for roll in rolls {
		if roll.name.is_empty() || !expression.contains(&roll.name) {
			continue;
		}
		if chosen.map_or(true, |best| roll.name.len() > best.name.len()) {
			chosen = Some(roll);
		}
	}
	if let Some(roll) = chosen {
		expression = expression.replacen(&roll.name, &format!("({})", roll.expression), 1);
	}

	// Substitute every constant, longest name first
	let mut constants = constants.iter().collect::<Vec<_>>();
	constants.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
	for constant in constants {
		if constant.name.is_empty() {
			continue;
		}
		expression = expression.replace(&constant.name, &format!("({})", constant.value));
	}

	expression
}
