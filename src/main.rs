#[cfg(feature = "build-binary")]
fn main() {
	use std::io::{self, Write};
	use std::{env, process};

	use ariadne::{Color, Label, Report, ReportKind, Source};
	use fortuna::{roller::FastRand, Constant, Error, Registry, RollMode, StoredRoll};

	let mut constants = Vec::new();
	let mut rolls = Vec::new();
	let mut flag_mode = None;
	let mut seed = None;
	let mut words = Vec::new();

	// Hand-rolled flag parsing; anything that isn't a flag is part of the expression, so it can
	// be left unquoted even with spaces.
	let mut args = env::args().skip(1);
	while let Some(arg) = args.next() {
		match arg.as_str() {
			"--adv" => flag_mode = Some(RollMode::Advantage),
			"--disadv" => flag_mode = Some(RollMode::Disadvantage),
			"--seed" => match args.next().and_then(|value| value.parse().ok()) {
				Some(value) => seed = Some(value),
				None => {
					eprintln!("--seed expects an integer");
					process::exit(2);
				}
			},
			"--const" => match args.next().as_deref().and_then(parse_assignment) {
				Some((name, value)) => match value.parse() {
					Ok(value) => constants.push(Constant::new(name, value)),
					Err(_) => {
						eprintln!("--const expects NAME=INTEGER");
						process::exit(2);
					}
				},
				None => {
					eprintln!("--const expects NAME=INTEGER");
					process::exit(2);
				}
			},
			"--roll" => match args.next().as_deref().and_then(parse_assignment) {
				Some((name, expression)) => rolls.push(StoredRoll::new(name, expression)),
				None => {
					eprintln!("--roll expects NAME=EXPRESSION");
					process::exit(2);
				}
			},
			_ => words.push(arg),
		}
	}

	let input = if words.is_empty() {
		let mut lines = io::stdin().lines();

		// If there isn't already input available in stdin, display a prompt for it
		if lines.size_hint().1.is_none() {
			print!("Enter dice expression: ");
			io::stdout().flush().unwrap();
		}

		lines.next().unwrap().unwrap()
	} else {
		words.join(" ")
	};

	// A trailing "adv"/"disadv" word works like the explicit flags
	let (suffix_mode, expression) = RollMode::from_suffix(&input);
	let mode = flag_mode.unwrap_or(suffix_mode);

	let mut roller = seed.map_or_else(FastRand::default, FastRand::with_seed);
	let substituted = fortuna::substitute(expression, &constants, &rolls);

	match fortuna::evaluate(&substituted, &Registry::new(mode), &mut roller) {
		Ok(result) => {
			for line in &result.trace {
				println!("{line}");
			}
		}
		Err(Error::Syntax(err)) => {
			let offset = err.offset().min(substituted.len());
			let span = offset..(offset + 1).min(substituted.len()).max(offset);
			Report::build(ReportKind::Error, ("expression", span.clone()))
				.with_message(err.to_string())
				.with_label(
					Label::new(("expression", span))
						.with_message("here")
						.with_color(Color::Red),
				)
				.finish()
				.eprint(("expression", Source::from(substituted.as_str())))
				.ok();
			process::exit(1);
		}
		Err(err) => {
			eprintln!("{err}");
			process::exit(1);
		}
	}
}

/// Splits a `NAME=VALUE` argument.
#[cfg(feature = "build-binary")]
fn parse_assignment(arg: &str) -> Option<(&str, &str)> {
	arg.split_once('=').filter(|(name, _)| !name.is_empty())
}

#[cfg(not(feature = "build-binary"))]
fn main() {
	println!("Nothing to do since the build-binary feature is disabled.");
}
