
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use console::style;
use howlong::SteadyTimer;

use relwrite::derivation::{DeriveConfig, Observer, derive};
use relwrite::generation::{MatchCap, WorkingSet};
use relwrite::strategy::{BeamSearch, Scoring, SearchPolicy, Switch};
use relwrite::symbols::Utterance;
use relwrite::{Error, Result, goal, storage};

/// Derive utterances from a grammar by rewriting them one generation at a time
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
  /// JSON file containing the grammar to use
  #[arg(value_name = "FILENAME")]
  grammar: PathBuf,

  /// Process rules from right to left
  #[arg(long)]
  parse: bool,

  /// Display some vital statistics while processing
  #[arg(long)]
  verbose: bool,

  /// Each time this many generations have passed, save the working set to a JSON file
  #[arg(long, value_name = "COUNT")]
  save_snapshots_every: Option<NonZeroUsize>,

  /// Where snapshot files go
  #[arg(long, value_name = "DIR", default_value = ".")]
  snapshot_dir: PathBuf,

  /// A single utterance to use as the starting point of the derivation
  #[arg(long, value_name = "UTTERANCE")]
  start: Option<String>,

  /// Use the set of utterances in this JSON file as the starting point of the derivation
  #[arg(long, value_name = "FILENAME")]
  start_set_file: Option<PathBuf>,

  /// The maximum number of derivations to produce (default: no limit)
  #[arg(long, value_name = "COUNT")]
  max_derivations: Option<NonZeroUsize>,

  /// Limits how many times a pattern can rewrite any particular utterance during a single
  /// sweep (default: no limit, unless a strategy is given, in which case 10)
  #[arg(long, value_name = "COUNT")]
  max_rewrites_per_utterance: Option<NonZeroUsize>,

  /// Share the rewrite limit across all rules instead of giving each rule its own
  #[arg(long, requires = "max_rewrites_per_utterance")]
  cap_across_rules: bool,

  /// Beam search with this strategy: expand, contract or minimize-nonterminals
  #[arg(long, value_name = "STRATEGY")]
  strategy: Option<Scoring>,

  /// Beam width when traversing with a strategy
  #[arg(long, value_name = "SIZE", default_value_t = 10)]
  beam_width: usize,

  /// With the expand strategy, expand until every working utterance is at least this long
  #[arg(long, value_name = "SIZE")]
  expand_until: Option<usize>,

  /// The strategy to switch to once --expand-until is reached
  #[arg(long, value_name = "STRATEGY", default_value = "minimize-nonterminals")]
  switch_to: Scoring,

  /// Fail unless the result is exactly this one symbol
  #[arg(long, value_name = "SYMBOL")]
  goal: Option<String>,

  /// Where to write the derivations as JSON
  #[arg(long, value_name = "FILENAME", default_value = "out.json")]
  output: PathBuf,
}

impl Args {
  fn config(&self) -> DeriveConfig {
    let search = match self.strategy {
      None => SearchPolicy::Complete,
      Some(scoring) => {
        let mut beam = BeamSearch::new(scoring, self.beam_width).switch_to(self.switch_to);
        if let Some(threshold) = self.expand_until {
          beam = beam.expand_until(threshold);
        }
        SearchPolicy::Beam(beam)
      }
    };

    let max_matches = match (self.max_rewrites_per_utterance, &search) {
      (Some(n), _) => Some(n),
      (None, SearchPolicy::Beam(_)) => NonZeroUsize::new(10),
      (None, SearchPolicy::Complete) => None
    };
    let match_cap = max_matches.map(|n| {
      if self.cap_across_rules { MatchCap::PerUtterance(n) } else { MatchCap::PerRule(n) }
    });

    DeriveConfig {
      max_derivations: self.max_derivations,
      match_cap,
      snapshot_every: self.save_snapshots_every,
      search
    }
  }
}

struct Reporter {
  verbose: bool,
  snapshot_dir: PathBuf,
  timer: SteadyTimer,
  last_lap: Duration
}

impl Reporter {
  fn new(verbose: bool, snapshot_dir: PathBuf) -> Reporter {
    Reporter { verbose, snapshot_dir, timer: SteadyTimer::new(), last_lap: Duration::ZERO }
  }

  /// Time since the previous call, i.e. how long the last generation took.
  fn lap(&mut self) -> Duration {
    let now = self.timer.elapsed();
    let lap = now.saturating_sub(self.last_lap);
    self.last_lap = now;
    lap
  }
}

fn switch_report(switch: &Switch) -> String {
  format!("Reached {} threshold (min length {}), switching to {}", switch.threshold, switch.min_length, switch.to)
}

impl Observer for Reporter {
  fn generation_started(&mut self, generation: usize, working: &WorkingSet) {
    let lap = self.lap();
    if self.verbose {
      let min_length = working.iter().map(|u| u.len()).min().unwrap_or(0);
      eprintln!("{} {} working utterances, min length = {} {}",
        style(format!("[{}]", generation)).dim(),
        working.len(),
        min_length,
        style(format!("(+{} ms)", lap.as_millis())).dim()
      );
    }
  }

  fn strategy_switched(&mut self, _generation: usize, switch: &Switch) {
    if self.verbose {
      eprintln!("{}", style(switch_report(switch)).cyan());
    }
  }

  fn snapshot(&mut self, generation: usize, working: &WorkingSet) -> Result<()> {
    let path = storage::save_snapshot(&self.snapshot_dir, generation, working)?;
    if self.verbose {
      eprintln!("Saving snapshot to {}", style(path.display()).cyan());
    }
    Ok(())
  }

  fn derived(&mut self, utterance: &Utterance) {
    println!("{}", utterance);
  }
}

fn run(args: Args) -> Result<()> {
  let rules = storage::load_grammar(&args.grammar, args.parse)?;
  if args.verbose {
    eprintln!("{} rules from {}", rules.len(), args.grammar.display());
    for rule in &rules {
      eprintln!("  {}", style(rule.encode()).dim());
    }
  }

  let start = match storage::start_set(args.start.as_deref(), args.start_set_file.as_deref()) {
    Ok(start) => start,
    Err(Error::EmptyStartSet) => {
      eprintln!("{}", style(Error::EmptyStartSet).yellow());
      WorkingSet::new()
    }
    Err(e) => return Err(e)
  };

  let config = args.config();
  let mut reporter = Reporter::new(args.verbose, args.snapshot_dir.clone());

  let result = derive(&rules, start, &config, &mut reporter)?;
  if args.verbose {
    eprintln!("{} derivations in {} generations ({:?})",
      result.utterances.len(), result.generations, result.termination);
  }

  storage::save_derivations(&args.output, &result.utterances)?;

  if let Some(symbol) = &args.goal {
    goal::check_goal(&result.utterances, symbol)?;
  }

  Ok(())
}

fn main() {
  let args = Args::parse();
  if let Err(e) = run(args) {
    eprintln!("{}", style(e).red());
    std::process::exit(1);
  }
}

#[cfg(test)]
mod args_tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn config(cmd: &[&str]) -> DeriveConfig {
    Args::parse_from(std::iter::once("relwrite").chain(cmd.iter().copied())).config()
  }

  #[test]
  fn test_complete_by_default() {
    let c = config(&["g.json"]);
    assert_eq!(c.search, SearchPolicy::Complete);
    assert_eq!(c.match_cap, None);
    assert_eq!(c.max_derivations, None);
  }

  #[test]
  fn test_strategy_defaults_cap() {
    let c = config(&["g.json", "--strategy", "expand", "--expand-until", "5"]);
    assert_eq!(c.search, SearchPolicy::Beam(BeamSearch::new(Scoring::Expand, 10).expand_until(5)));
    assert_eq!(c.match_cap, Some(MatchCap::PerRule(NonZeroUsize::new(10).unwrap())));
  }

  #[test]
  fn test_explicit_cap() {
    let c = config(&["g.json", "--max-rewrites-per-utterance", "1", "--cap-across-rules"]);
    assert_eq!(c.match_cap, Some(MatchCap::PerUtterance(NonZeroUsize::new(1).unwrap())));
    let c = config(&["g.json", "--strategy", "contract", "--beam-width", "3", "--max-rewrites-per-utterance", "2"]);
    assert_eq!(c.search, SearchPolicy::Beam(BeamSearch::new(Scoring::Contract, 3)));
    assert_eq!(c.match_cap, Some(MatchCap::PerRule(NonZeroUsize::new(2).unwrap())));
  }

  #[test]
  fn test_rejects_bad_values() {
    assert!(Args::try_parse_from(["relwrite", "g.json", "--strategy", "sideways"]).is_err());
    assert!(Args::try_parse_from(["relwrite", "g.json", "--max-derivations", "0"]).is_err());
    assert!(Args::try_parse_from(["relwrite", "g.json", "--cap-across-rules"]).is_err());
  }

  #[test]
  fn test_switch_report_names_threshold() {
    let switch = Switch { threshold: 3, min_length: 5, to: Scoring::Contract };
    assert_eq!(switch_report(&switch), "Reached 3 threshold (min length 5), switching to contract");
  }

  #[test]
  fn test_laps_are_per_generation() {
    let mut reporter = Reporter::new(false, PathBuf::from("."));
    let first = reporter.lap();
    std::thread::sleep(Duration::from_millis(5));
    let second = reporter.lap();
    assert!(second >= Duration::from_millis(5));
    assert!(first + second <= reporter.timer.elapsed());
  }

  #[test]
  fn test_parse_to_goal() {
    let dir = tempdir().unwrap();
    let grammar = dir.path().join("grammar.json");
    fs::write(&grammar, r#"[
      [["<S>"], ["<NP>", "<VP>"]],
      [["<NP>"], ["cats"]],
      [["<VP>"], ["sleep"]]
    ]"#).unwrap();
    let output = dir.path().join("out.json");

    let args = Args::parse_from([
      "relwrite", grammar.to_str().unwrap(), "--parse", "--start", "cats sleep",
      "--goal", "<S>", "--output", output.to_str().unwrap()
    ]);
    run(args).unwrap();
    assert_eq!(storage::load_derivations(&output).unwrap(), vec![relwrite::symbols::decode("<S>")]);

    let args = Args::parse_from([
      "relwrite", grammar.to_str().unwrap(), "--parse", "--start", "sleep cats",
      "--goal", "<S>", "--output", output.to_str().unwrap()
    ]);
    assert!(matches!(run(args), Err(Error::GoalMismatch { .. })));
  }
}

// vim: shiftwidth=2
