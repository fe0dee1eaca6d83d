
use std::fmt;
use std::ops::Deref;

use itertools::Itertools;
use serde::{Serialize, Deserialize};

pub type Symbol = String;

/// True for symbols written as `<name>`. Only the scoring heuristics care.
pub fn is_nonterminal(symbol: &str) -> bool {
  symbol.len() >= 2 && symbol.starts_with('<') && symbol.ends_with('>')
}

/// An immutable sequence of symbols. Ordered lexicographically symbol by
/// symbol, which is the order working sets iterate in.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Utterance(Vec<Symbol>);

impl Utterance {
  pub fn new(symbols: Vec<Symbol>) -> Utterance {
    Utterance(symbols)
  }

  pub fn symbols(&self) -> &[Symbol] {
    &self.0
  }

  pub fn num_nonterminals(&self) -> usize {
    self.0.iter().filter(|s| is_nonterminal(s)).count()
  }
}

impl Deref for Utterance {
  type Target = [Symbol];

  fn deref(&self) -> &[Symbol] {
    &self.0
  }
}

impl From<Vec<Symbol>> for Utterance {
  fn from(symbols: Vec<Symbol>) -> Utterance {
    Utterance(symbols)
  }
}

impl fmt::Display for Utterance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.iter().join(" "))
  }
}

/// Splits on whitespace: `"<S> a"` is two symbols.
pub fn decode(text: &str) -> Utterance {
  Utterance(text.split_whitespace().map(|s| s.to_owned()).collect())
}
