use crate::ops::{ArithmeticError, DomainError, Error, Operator, Registry, RollMode};
use crate::roller::{Iter, Max, Val};
use crate::trace::Trace;

#[test]
fn suffix_selects_advantage() {
	assert_eq!(RollMode::from_suffix("1d20+3 adv"), (RollMode::Advantage, "1d20+3"));
}

#[test]
fn suffix_selects_disadvantage() {
	assert_eq!(RollMode::from_suffix("1d20+3 disadv"), (RollMode::Disadvantage, "1d20+3"));
}

#[test]
fn bare_suffix_leaves_an_empty_expression() {
	assert_eq!(RollMode::from_suffix("adv"), (RollMode::Advantage, ""));
}

#[test]
fn name_ending_in_adv_is_not_a_suffix() {
	assert_eq!(RollMode::from_suffix("2d6+myadv"), (RollMode::Normal, "2d6+myadv"));
}

#[test]
fn missing_suffix_only_trims_whitespace() {
	assert_eq!(RollMode::from_suffix("1d20+3  "), (RollMode::Normal, "1d20+3"));
}

#[test]
fn symbols_are_listed_longest_first() {
	let symbols = Registry::default().symbols();
	assert_eq!(symbols[0], "gwf");
	for pair in symbols.windows(2) {
		assert!(pair[0].len() >= pair[1].len());
	}
}

#[test]
fn every_tier_is_findable() {
	let registry = Registry::default();
	for (symbol, tier) in [
		("d", 0),
		("D", 0),
		("ad", 0),
		("dd", 0),
		("gwf", 0),
		("g", 0),
		("G", 0),
		("^", 1),
		("*", 2),
		("/", 2),
		("+", 3),
		("-", 3),
		(">", 4),
		("<", 4),
	] {
		assert_eq!(registry.find(symbol).map(|(tier, _)| tier), Some(tier), "{symbol}");
	}
	assert!(registry.find("%").is_none());
	assert!(registry.find("&").is_none());
}

#[test]
fn roll_sums_independent_draws() {
	let mut trace = Trace::new();
	let out = find("d").apply(2, 6, &mut Max, &mut trace, false).unwrap();
	assert_eq!(out, 12);
	assert_eq!(trace.lines(), ["2d6: 12"]);
}

#[test]
fn uppercase_roll_traces_with_lowercase_label() {
	let mut trace = Trace::new();
	let out = find("D").apply(3, 4, &mut Val(2), &mut trace, false).unwrap();
	assert_eq!(out, 6);
	assert_eq!(trace.lines(), ["3d4: 6"]);
}

#[test]
fn silent_roll_traces_nothing() {
	let mut trace = Trace::new();
	let out = find("d").apply(2, 6, &mut Max, &mut trace, true).unwrap();
	assert_eq!(out, 12);
	assert!(trace.is_empty());
}

#[test]
fn zero_dice_yield_zero_and_no_trace() {
	let mut trace = Trace::new();
	let out = find("d").apply(0, 6, &mut Max, &mut trace, false).unwrap();
	assert_eq!(out, 0);
	assert!(trace.is_empty());
}

#[test]
fn negative_dice_are_a_domain_error() {
	let mut trace = Trace::new();
	let result = find("d").apply(-1, 6, &mut Max, &mut trace, false);
	assert!(matches!(result, Err(Error::Domain(DomainError::NegativeCount(-1)))));
	assert!(trace.is_empty());
}

#[test]
fn faceless_dice_are_a_domain_error() {
	let mut trace = Trace::new();
	let result = find("d").apply(1, 0, &mut Max, &mut trace, false);
	assert!(matches!(result, Err(Error::Domain(DomainError::NonPositiveFaces(0)))));

	let result = find("d").apply(1, -4, &mut Max, &mut trace, false);
	assert!(matches!(result, Err(Error::Domain(DomainError::NonPositiveFaces(-4)))));
}

#[test]
fn advantage_keeps_the_larger_sum() {
	let mut trace = Trace::new();
	let mut roller = Iter::new([3, 5]);
	let out = find("ad").apply(1, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 5);
	assert_eq!(trace.lines(), ["1ad6, picking larger of 3 and 5: 5"]);
}

#[test]
fn disadvantage_keeps_the_smaller_sum() {
	let mut trace = Trace::new();
	let mut roller = Iter::new([3, 5]);
	let out = find("dd").apply(1, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 3);
	assert_eq!(trace.lines(), ["1dd6, picking smaller of 3 and 5: 3"]);
}

#[test]
fn advantage_applies_to_multiple_dice() {
	let mut trace = Trace::new();
	let mut roller = Iter::new([1, 2, 6, 6]);
	let out = find("ad").apply(2, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 12);
	assert_eq!(trace.lines(), ["2ad6, picking larger of 3 and 12: 12"]);
}

#[test]
fn gwf_rerolls_low_draws_once() {
	let mut trace = Trace::new();
	let mut roller = Iter::new([1, 5, 5]);
	let out = find("gwf").apply(2, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 10);
	assert_eq!(trace.lines(), ["1d6: 1, rerolling, 1d6: 5", "1d6: 5"]);
}

#[test]
fn gwf_keeps_a_low_reroll() {
	let mut trace = Trace::new();
	let mut roller = Iter::new([2, 1]);
	let out = find("gwf").apply(1, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 1);
	assert_eq!(trace.lines(), ["1d6: 2, rerolling, 1d6: 1"]);
}

#[test]
fn gwf_leaves_high_draws_alone() {
	let mut trace = Trace::new();
	let out = find("gwf").apply(3, 6, &mut Val(5), &mut trace, false).unwrap();
	assert_eq!(out, 15);
	assert_eq!(trace.lines(), ["1d6: 5", "1d6: 5", "1d6: 5"]);
}

#[test]
fn gwf_aliases_share_the_rule() {
	for symbol in ["g", "G"] {
		let mut trace = Trace::new();
		let mut roller = Iter::new([1, 5, 5]);
		let out = find(symbol).apply(2, 6, &mut roller, &mut trace, false).unwrap();
		assert_eq!(out, 10);
		assert_eq!(trace.lines(), ["1d6: 1, rerolling, 1d6: 5", "1d6: 5"]);
	}
}

#[test]
fn advantage_mode_swaps_single_d20_rolls() {
	let (tier, d) = Registry::new(RollMode::Advantage).find("d").unwrap();
	assert_eq!(tier, 0);

	let mut trace = Trace::new();
	let mut roller = Iter::new([5, 12]);
	let out = d.apply(1, 20, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 12);
	assert_eq!(trace.lines(), ["1d20, picking larger of 5 and 12: 12"]);
}

#[test]
fn advantage_mode_leaves_other_rolls_plain() {
	let (_, d) = Registry::new(RollMode::Advantage).find("d").unwrap();

	let mut trace = Trace::new();
	let mut roller = Iter::new([3, 4]);
	let out = d.apply(2, 6, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 7);
	assert_eq!(trace.lines(), ["2d6: 7"]);
}

#[test]
fn disadvantage_mode_swaps_single_d20_rolls() {
	let (_, d) = Registry::new(RollMode::Disadvantage).find("d").unwrap();

	let mut trace = Trace::new();
	let mut roller = Iter::new([5, 12]);
	let out = d.apply(1, 20, &mut roller, &mut trace, false).unwrap();
	assert_eq!(out, 5);
	assert_eq!(trace.lines(), ["1d20, picking smaller of 5 and 12: 5"]);
}

#[test]
fn addition_checks_for_overflow() {
	let result = apply_arith("+", i64::MAX, 1);
	assert!(matches!(result, Err(Error::Arithmetic(ArithmeticError::Overflow))));
}

#[test]
fn subtraction_checks_for_overflow() {
	let result = apply_arith("-", i64::MIN, 1);
	assert!(matches!(result, Err(Error::Arithmetic(ArithmeticError::Overflow))));
}

#[test]
fn division_truncates() {
	assert_eq!(apply_arith("/", 7, 2).unwrap(), 3);
	assert_eq!(apply_arith("/", -7, 2).unwrap(), -3);
}

#[test]
fn division_by_zero_is_an_arithmetic_error() {
	let result = apply_arith("/", 1, 0);
	assert!(matches!(result, Err(Error::Arithmetic(ArithmeticError::DivisionByZero))));
}

#[test]
fn exponentiation_requires_a_non_negative_exponent() {
	assert_eq!(apply_arith("^", 2, 10).unwrap(), 1024);
	let result = apply_arith("^", 2, -1);
	assert!(matches!(result, Err(Error::Arithmetic(ArithmeticError::NegativeExponent))));
}

#[test]
fn picks_compare_finished_results_without_tracing() {
	let mut trace = Trace::new();
	assert_eq!(find(">").apply(3, 7, &mut Max, &mut trace, false).unwrap(), 7);
	assert_eq!(find("<").apply(3, 7, &mut Max, &mut trace, false).unwrap(), 3);
	assert!(trace.is_empty());
}

fn find(symbol: &str) -> Operator {
	Registry::default().find(symbol).unwrap().1
}

fn apply_arith(symbol: &str, a: i64, b: i64) -> Result<i64, Error> {
	find(symbol).apply(a, b, &mut Max, &mut Trace::new(), false)
}
