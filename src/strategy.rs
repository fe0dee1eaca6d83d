
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::generation::WorkingSet;
use crate::symbols::Utterance;

/// Ranks utterances for beam trimming. Lower scores are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scoring {
  /// Longer first.
  Expand,
  /// Shorter first.
  Contract,
  /// Fewest `<nonterminal>` symbols first.
  MinimizeNonterminals
}

impl Scoring {
  pub fn score(&self, utterance: &Utterance) -> i64 {
    match self {
      Scoring::Expand => -(utterance.len() as i64),
      Scoring::Contract => utterance.len() as i64,
      Scoring::MinimizeNonterminals => utterance.num_nonterminals() as i64
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Scoring::Expand => "expand",
      Scoring::Contract => "contract",
      Scoring::MinimizeNonterminals => "minimize-nonterminals"
    }
  }
}

impl fmt::Display for Scoring {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Scoring {
  type Err = Error;

  fn from_str(s: &str) -> Result<Scoring> {
    match s {
      "expand" => Ok(Scoring::Expand),
      "contract" => Ok(Scoring::Contract),
      "minimize-nonterminals" => Ok(Scoring::MinimizeNonterminals),
      _ => Err(Error::InvalidConfig(format!("Unknown strategy `{}`", s)))
    }
  }
}

/// Beam search parameters, fixed for a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeamSearch {
  pub scoring: Scoring,
  pub beam_width: usize,
  /// Under `Expand`, once the shortest working utterance is at least this
  /// long, scoring switches to `switch_to`.
  pub expand_until: Option<usize>,
  pub switch_to: Scoring
}

impl BeamSearch {
  pub fn new(scoring: Scoring, beam_width: usize) -> BeamSearch {
    BeamSearch { scoring, beam_width, expand_until: None, switch_to: Scoring::MinimizeNonterminals }
  }

  pub fn expand_until(self, threshold: usize) -> BeamSearch {
    BeamSearch { expand_until: Some(threshold), ..self }
  }

  pub fn switch_to(self, scoring: Scoring) -> BeamSearch {
    BeamSearch { switch_to: scoring, ..self }
  }

  pub fn validate(&self) -> Result<()> {
    if self.beam_width == 0 {
      return Err(Error::InvalidConfig("beam width must be at least 1".to_owned()));
    }
    Ok(())
  }

  pub fn start(&self) -> BeamState {
    BeamState { search: *self, active: self.scoring, switched: false }
  }
}

/// How the working set is kept in check between generations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchPolicy {
  /// No trimming at all: every reachable utterance is explored. Memory and
  /// time grow with the grammar's branching factor, and a grammar with an
  /// infinite nonterminal frontier never finishes unless `max_derivations`
  /// stops it.
  #[default]
  Complete,
  Beam(BeamSearch)
}

/// A one-time change of scoring, reported when `expand_until` is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Switch {
  pub threshold: usize,
  /// Shortest utterance in the working set that triggered the switch.
  pub min_length: usize,
  pub to: Scoring
}

/// The mutable half of a beam search: which scoring is active and whether the
/// one-time switch already happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BeamState {
  search: BeamSearch,
  active: Scoring,
  switched: bool
}

impl BeamState {
  pub fn active(&self) -> Scoring {
    self.active
  }

  pub fn switched(&self) -> bool {
    self.switched
  }

  /// Applies the expansion threshold against the shortest utterance about to
  /// be stepped. Returns the switch when one happens.
  pub fn observe(&mut self, min_length: usize) -> Option<Switch> {
    if self.switched || self.active != Scoring::Expand {
      return None;
    }
    let threshold = self.search.expand_until?;
    if min_length < threshold {
      return None;
    }
    self.active = self.search.switch_to;
    self.switched = true;
    Some(Switch { threshold, min_length, to: self.active })
  }

  /// Keeps the `beam_width` best utterances. Ties keep lexicographic order.
  pub fn trim(&self, working: WorkingSet) -> WorkingSet {
    trim(working, self.active, self.search.beam_width)
  }
}

pub fn trim(working: WorkingSet, scoring: Scoring, beam_width: usize) -> WorkingSet {
  if working.len() <= beam_width {
    return working;
  }
  let mut ranked: Vec<Utterance> = working.into_iter().collect();
  ranked.sort_by_key(|u| scoring.score(u));
  ranked.truncate(beam_width);
  ranked.into_iter().collect()
}

#[cfg(test)]
mod scoring_tests {
  use super::*;
  use crate::symbols::decode;

  #[test]
  fn test_scores() {
    let u = decode("a <B> c <D>");
    assert_eq!(Scoring::Expand.score(&u), -4);
    assert_eq!(Scoring::Contract.score(&u), 4);
    assert_eq!(Scoring::MinimizeNonterminals.score(&u), 2);
  }

  #[test]
  fn test_names() {
    for s in [Scoring::Expand, Scoring::Contract, Scoring::MinimizeNonterminals] {
      assert_eq!(s.name().parse::<Scoring>().unwrap(), s);
    }
    assert!("complete".parse::<Scoring>().is_err());
  }
}

#[cfg(test)]
mod trim_tests {
  use super::*;
  use crate::symbols::decode;

  fn set(items: &[&str]) -> WorkingSet {
    items.iter().map(|s| decode(s)).collect()
  }

  #[test]
  fn test_1() {
    let working = set(&["a", "a a", "a a a", "b b b b"]);
    assert_eq!(trim(working.clone(), Scoring::Expand, 2), set(&["a a a", "b b b b"]));
    assert_eq!(trim(working.clone(), Scoring::Contract, 2), set(&["a", "a a"]));
    assert_eq!(trim(working, Scoring::Contract, 10).len(), 4);
  }

  #[test]
  fn test_ties_break_lexicographically() {
    let working = set(&["c", "b", "a", "d d"]);
    assert_eq!(trim(working.clone(), Scoring::Contract, 2), set(&["a", "b"]));
    assert_eq!(trim(working, Scoring::Expand, 2), set(&["a", "d d"]));
  }

  #[test]
  fn test_idempotent() {
    let working = set(&["<S> a", "b <S> <S>", "a b", "<S>", "x y z", "<S> <S> <S>"]);
    for scoring in [Scoring::Expand, Scoring::Contract, Scoring::MinimizeNonterminals] {
      let once = trim(working.clone(), scoring, 3);
      assert_eq!(once.len(), 3);
      assert_eq!(trim(once.clone(), scoring, 3), once);
    }
  }

  #[test]
  fn test_minimize_nonterminals() {
    let working = set(&["<S> <S>", "a <S>", "a b c d"]);
    assert_eq!(trim(working, Scoring::MinimizeNonterminals, 1), set(&["a b c d"]));
  }
}
