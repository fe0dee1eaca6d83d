
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::error::Result;
use crate::generation::{MatchCap, WorkingSet, step};
use crate::rules::RuleSet;
use crate::strategy::{BeamState, SearchPolicy, Switch};
use crate::symbols::Utterance;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeriveConfig {
  /// Stop once this many final utterances have been collected.
  pub max_derivations: Option<NonZeroUsize>,
  pub match_cap: Option<MatchCap>,
  /// Hand the working set to `Observer::snapshot` every this many
  /// generations.
  pub snapshot_every: Option<NonZeroUsize>,
  pub search: SearchPolicy
}

impl DeriveConfig {
  pub fn validate(&self) -> Result<()> {
    if let SearchPolicy::Beam(beam) = &self.search {
      beam.validate()?;
    }
    Ok(())
  }
}

/// Hooks for watching a derivation. Everything defaults to doing nothing.
pub trait Observer {
  fn generation_started(&mut self, _generation: usize, _working: &WorkingSet) { }

  fn strategy_switched(&mut self, _generation: usize, _switch: &Switch) { }

  fn snapshot(&mut self, _generation: usize, _working: &WorkingSet) -> Result<()> {
    Ok(())
  }

  fn derived(&mut self, _utterance: &Utterance) { }
}

impl Observer for () { }

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
  /// Every surviving utterance became final.
  Exhausted,
  /// `max_derivations` was hit.
  LimitReached
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derivation {
  /// Final utterances in the order they were found.
  pub utterances: Vec<Utterance>,
  pub generations: usize,
  pub termination: Termination
}

/// Rewrites `start` generation by generation until the working set runs out
/// or `max_derivations` final utterances have been collected.
pub fn derive<O: Observer>(rules: &RuleSet, start: WorkingSet, config: &DeriveConfig, observer: &mut O) -> Result<Derivation> {
  config.validate()?;

  let mut beam: Option<BeamState> = match &config.search {
    SearchPolicy::Complete => None,
    SearchPolicy::Beam(search) => Some(search.start())
  };

  let mut working = start;
  let mut collected: Vec<Utterance> = vec![];
  let mut seen_final: BTreeSet<Utterance> = BTreeSet::new();
  let mut generation: usize = 0;
  let mut termination = Termination::Exhausted;

  while !working.is_empty() {
    generation += 1;

    if let Some(every) = config.snapshot_every {
      if generation % every.get() == 0 {
        observer.snapshot(generation, &working)?;
      }
    }

    observer.generation_started(generation, &working);

    if let Some(beam) = beam.as_mut() {
      let min_length = working.iter().map(|u| u.len()).min().unwrap_or(0);
      if let Some(switch) = beam.observe(min_length) {
        observer.strategy_switched(generation, &switch);
      }
    }

    let swept = step(rules, &working, config.match_cap);
    let mut next = swept.next;

    for utterance in swept.finals {
      observer.derived(&utterance);
      seen_final.insert(utterance.clone());
      collected.push(utterance);
      if config.max_derivations.is_some_and(|max| collected.len() >= max.get()) {
        termination = Termination::LimitReached;
        next.clear();
        break;
      }
    }

    // a final utterance has nothing left to rewrite; seeing it again would
    // only emit it twice
    next.retain(|u| !seen_final.contains(u));
    if let Some(beam) = &beam {
      next = beam.trim(next);
    }

    working = next;
  }

  Ok(Derivation { utterances: collected, generations: generation, termination })
}
