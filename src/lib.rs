//! Dice-notation rolling and expression resolution for tabletop RPG assistants.
//!
//! fortuna resolves a player's roll request in two passes: [`substitute`] rewrites named
//! constants and at most one stored roll into the raw expression, then [`evaluate`] tokenizes and
//! evaluates the result with precedence climbing over the operator tiers in a [`Registry`] -
//! dice operators bind tightest, arithmetic combines their sums, and the pick operators `>`/`<`
//! compare two finished sub-results. Every random draw is recorded in an ordered [`Trace`] whose
//! lines read the way a chat bot would post them.
//!
//! Randomness is injected per evaluation through the [`Roller`] trait, so tests (and reproducible
//! replays) swap the [fastrand]-backed production roller for a deterministic one without touching
//! any evaluation logic.
//!
//! # Examples
//!
//! ## Rolling with a character's constants
//! ```
//! use fortuna::{roller::Max, Constant, RollMode, StoredRoll};
//!
//! let constants = [Constant::new("STR", 3)];
//! let rolls = [StoredRoll::new("smite", "2d8")];
//!
//! let result = fortuna::roll("1d20+STR", &constants, &rolls, RollMode::Normal, &mut Max)?;
//! assert_eq!(result.value, 23);
//! assert_eq!(result.trace.lines(), ["Rolling: 1d20+(3)", "1d20: 20", "I rolled 23"]);
//! # Ok::<(), fortuna::eval::Error>(())
//! ```
//!
//! ## Expanding a stored roll
//! ```
//! use fortuna::{roller::Max, RollMode, StoredRoll};
//!
//! let rolls = [StoredRoll::new("smite", "2d8")];
//!
//! let result = fortuna::roll("smite+1", &[], &rolls, RollMode::Normal, &mut Max)?;
//! assert_eq!(result.value, 17);
//! assert_eq!(result.trace.lines(), ["Rolling: (2d8)+1", "2d8: 16", "I rolled 17"]);
//! # Ok::<(), fortuna::eval::Error>(())
//! ```

#![warn(
	missing_docs,
	missing_debug_implementations,
	unreachable_pub,
	unused_qualifications,
	clippy::pedantic
)]

pub mod eval;
pub mod ops;
pub mod resolve;
pub mod roller;
pub mod trace;

pub use eval::{evaluate, Error, Resolution};
pub use ops::{Registry, RollMode};
pub use resolve::{substitute, Constant, StoredRoll};
pub use roller::Roller;
pub use trace::Trace;

#[cfg(test)]
mod tests;

/// Resolves one roll request end to end: substitutes the caller's constants and stored rolls,
/// then evaluates the substituted expression under the given mode with the given roller.
///
/// This is exactly [`substitute`] followed by [`evaluate`] with a fresh [`Registry`]; the
/// constants and stored rolls are a read-only snapshot for this one call.
///
/// # Errors
/// Any syntax, domain, or arithmetic failure aborts the whole roll; no partial value or trace is
/// returned.
pub fn roll<R: Roller>(
	expression: &str,
	constants: &[Constant],
	rolls: &[StoredRoll],
	mode: RollMode,
	roller: &mut R,
) -> Result<Resolution, Error> {
	let substituted = substitute(expression, constants, rolls);
	evaluate(&substituted, &Registry::new(mode), roller)
}
