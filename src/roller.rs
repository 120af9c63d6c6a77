//! Abstractions for drawing die faces from various sources of randomness.

use std::iter::Peekable;

use fastrand::Rng;

/// Draws individual die faces - the single capability every stochastic operator is built on.
///
/// Implementations are injected into each evaluation, so swapping the production RNG for a
/// deterministic source ([`Max`], [`Val`], [`Iter`]) changes nothing about evaluation logic.
/// No implementation in this crate touches global generator state.
pub trait Roller {
	/// Draws a single value uniformly distributed in `[1, faces]`.
	///
	/// Callers are expected to validate `faces >= 1` beforehand; the dice operators do so and
	/// report a domain error rather than calling this with a degenerate die.
	#[must_use]
	fn draw(&mut self, faces: i64) -> i64;
}

/// Draws uniformly random faces using [fastrand].
///
/// # Examples
///
/// ## Default roller
/// ```
/// use fortuna::roller::{FastRand, Roller};
///
/// let mut roller = FastRand::default();
/// let face = roller.draw(20);
/// assert!((1..=20).contains(&face));
/// ```
///
/// ## Manually seeded roller
/// ```
/// use fortuna::roller::{FastRand, Roller};
///
/// let mut first = FastRand::with_seed(0x750c38d574400);
/// let mut second = FastRand::with_seed(0x750c38d574400);
/// assert_eq!(first.draw(20), second.draw(20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

impl FastRand {
	/// Creates a roller that draws from the given RNG instance.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a roller with a pre-seeded RNG instance.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

impl Roller for FastRand {
	/// Draws a face from the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn draw(&mut self, faces: i64) -> i64 {
		if faces > 0 {
			self.0.i64(1..=faces)
		} else {
			0
		}
	}
}

/// Always draws the highest face.
///
/// # Examples
/// ```
/// use fortuna::roller::{Max, Roller};
///
/// assert_eq!(Max.draw(6), 6);
/// assert_eq!(Max.draw(20), 20);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Max;

impl Roller for Max {
	/// Draws the max value (same as the number of faces).
	#[inline]
	fn draw(&mut self, faces: i64) -> i64 {
		faces
	}
}

/// Always draws one specific value, regardless of the die.
///
/// # Examples
/// ```
/// use fortuna::roller::{Roller, Val};
///
/// let mut roller = Val(3);
/// assert_eq!(roller.draw(6), 3);
/// assert_eq!(roller.draw(20), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Val(pub i64);

impl Roller for Val {
	/// Draws the fixed value the roller was created with.
	#[inline]
	fn draw(&mut self, _faces: i64) -> i64 {
		self.0
	}
}

/// Draws scripted values from an iterator. Mainly useful for testing exact traces.
///
/// # Examples
/// ```
/// use fortuna::roller::{Iter, Roller};
///
/// let mut roller = Iter::new([1, 5, 5]);
/// assert_eq!(roller.draw(6), 1);
/// assert_eq!(roller.draw(6), 5);
/// assert!(roller.can_draw());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = i64>>(Peekable<I>);

impl<I: Iterator<Item = i64>> Iter<I> {
	/// Creates a roller that draws values from the given iterator.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}

	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_draw(&mut self) -> bool {
		self.0.peek().is_some()
	}
}

impl<I: Iterator<Item = i64>> Roller for Iter<I> {
	/// Draws the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	fn draw(&mut self, _faces: i64) -> i64 {
		self.0.next().expect("iterator is finished")
	}
}
