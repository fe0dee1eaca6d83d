
use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::matching::{apply, find_match_offsets};
use crate::rules::RuleSet;
use crate::symbols::Utterance;

/// Utterances still being rewritten. Iterates in lexicographic order, so
/// everything downstream (trimming ties, emission, snapshots) is reproducible.
pub type WorkingSet = BTreeSet<Utterance>;

/// Bounds how many match offsets a single sweep visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchCap {
  /// Each (utterance, rule) pair gets its own budget.
  PerRule(NonZeroUsize),
  /// One budget per utterance, spent across rules in rule order.
  PerUtterance(NonZeroUsize)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
  /// Every rewrite of every input utterance.
  pub next: WorkingSet,
  /// Inputs no rule could rewrite.
  pub finals: WorkingSet
}

/// One sweep: every rule at every permitted offset of every utterance.
pub fn step(rules: &RuleSet, working: &WorkingSet, cap: Option<MatchCap>) -> Generation {
  let mut generation = Generation::default();

  for utterance in working {
    let mut num_rewrites: usize = 0;

    for rule in rules {
      let max_matches = match cap {
        None => None,
        Some(MatchCap::PerRule(n)) => Some(n.get()),
        Some(MatchCap::PerUtterance(n)) => {
          let remaining = n.get() - num_rewrites;
          if remaining == 0 { break; }
          Some(remaining)
        }
      };

      for offset in find_match_offsets(utterance, rule.pattern(), max_matches) {
        generation.next.insert(apply(utterance, rule.pattern(), rule.replacement(), offset));
        num_rewrites += 1;
      }
    }

    if num_rewrites == 0 {
      generation.finals.insert(utterance.clone());
    }
  }

  generation
}
