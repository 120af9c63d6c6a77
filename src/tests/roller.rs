use crate::roller::{FastRand, Iter, Max, Roller, Val};

#[test]
fn fastrand_draws_in_range() {
	let mut roller = FastRand::default();
	for _ in 0..1000 {
		let face = roller.draw(20);
		assert!((1..=20).contains(&face));
	}
}

#[test]
fn fastrand_hits_every_face() {
	let mut roller = FastRand::with_seed(0x5eed);
	let mut seen = [false; 6];
	for _ in 0..1000 {
		seen[usize::try_from(roller.draw(6)).unwrap() - 1] = true;
	}
	assert!(seen.into_iter().all(|face| face));
}

#[test]
fn seeded_rollers_are_reproducible() {
	let mut first = FastRand::with_seed(42);
	let mut second = FastRand::with_seed(42);
	for _ in 0..100 {
		assert_eq!(first.draw(20), second.draw(20));
	}
}

#[test]
fn max_draws_the_highest_face() {
	assert_eq!(Max.draw(1), 1);
	assert_eq!(Max.draw(6), 6);
	assert_eq!(Max.draw(20), 20);
}

#[test]
fn val_ignores_the_die() {
	let mut roller = Val(3);
	assert_eq!(roller.draw(4), 3);
	assert_eq!(roller.draw(100), 3);
}

#[test]
fn iter_draws_scripted_values_in_order() {
	let mut roller = Iter::new([4, 2, 19]);
	assert_eq!(roller.draw(6), 4);
	assert_eq!(roller.draw(6), 2);
	assert!(roller.can_draw());
	assert_eq!(roller.draw(20), 19);
	assert!(!roller.can_draw());
}

#[test]
#[should_panic = "iterator is finished"]
fn iter_panics_when_exhausted() {
	let mut roller = Iter::new([1]);
	roller.draw(6);
	roller.draw(6);
}
