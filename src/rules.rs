
use crate::error::{Error, Result};
use crate::symbols::Utterance;

/// A single production: every occurrence of `pattern` may be rewritten to
/// `replacement`. The pattern is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
  pattern: Utterance,
  replacement: Utterance
}

impl Rule {
  pub fn new(pattern: Utterance, replacement: Utterance) -> Result<Rule> {
    if pattern.is_empty() {
      return Err(Error::InvalidRule { index: 0 });
    }
    Ok(Rule { pattern, replacement })
  }

  pub fn pattern(&self) -> &Utterance {
    &self.pattern
  }

  pub fn replacement(&self) -> &Utterance {
    &self.replacement
  }

  /// Swaps the two sides, turning a generator into a recognizer. `None` when
  /// the replacement is empty and so cannot serve as a pattern.
  pub fn reversed(&self) -> Option<Rule> {
    if self.replacement.is_empty() {
      None
    }
    else {
      Some(Rule { pattern: self.replacement.clone(), replacement: self.pattern.clone() })
    }
  }

  /// `"<S> -> a <S>"`, as shown in verbose output.
  pub fn encode(&self) -> String {
    format!("{} -> {}", self.pattern, self.replacement)
  }
}

/// Rules in grammar order. The order only decides which offsets are visited
/// first when a match cap is in effect.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RuleSet {
  pub rules: Vec<Rule>
}

impl RuleSet {
  pub fn from_pairs(pairs: Vec<(Utterance, Utterance)>) -> Result<RuleSet> {
    let rules = pairs.into_iter().enumerate().map(|(index, (pattern, replacement))| {
      Rule::new(pattern, replacement).map_err(|_| Error::InvalidRule { index })
    }).collect::<Result<Vec<Rule>>>()?;

    Ok(RuleSet { rules })
  }

  /// Reverses every rule. A rule with an empty replacement would become a
  /// rule with an empty pattern, so it is rejected with its index.
  pub fn reversed(&self) -> Result<RuleSet> {
    let rules = self.rules.iter().enumerate().map(|(index, rule)| {
      rule.reversed().ok_or(Error::InvalidRule { index })
    }).collect::<Result<Vec<Rule>>>()?;

    Ok(RuleSet { rules })
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
    self.rules.iter()
  }
}

impl<'a> IntoIterator for &'a RuleSet {
  type Item = &'a Rule;
  type IntoIter = std::slice::Iter<'a, Rule>;

  fn into_iter(self) -> Self::IntoIter {
    self.rules.iter()
  }
}

#[cfg(test)]
mod rule_tests {
  use super::*;
  use crate::symbols::decode;

  fn parse_rule(text: &str) -> Result<Rule> {
    let (lhs, rhs) = text.split_once("->")
      .ok_or_else(|| Error::InvalidConfig(format!("Rule `{}` has no `->`", text)))?;
    Rule::new(decode(lhs), decode(rhs))
  }

  #[test]
  fn test_empty_pattern_rejected() {
    assert!(matches!(Rule::new(decode(""), decode("a")), Err(Error::InvalidRule { .. })));
    assert!(Rule::new(decode("a"), decode("")).is_ok());
  }

  #[test]
  fn test_index_of_bad_rule() {
    let res = RuleSet::from_pairs(vec![
      (decode("<S>"), decode("a <S>")),
      (decode("<S>"), decode("b")),
      (decode(""), decode("c")),
    ]);
    assert!(matches!(res, Err(Error::InvalidRule { index: 2 })));
  }

  #[test]
  fn test_reversed() {
    let rules = RuleSet::from_pairs(vec![
      (decode("<S>"), decode("a <S>")),
      (decode("<S>"), decode("b")),
    ]).unwrap();
    let rev = rules.reversed().unwrap();
    assert_eq!(rev.rules[0].encode(), "a <S> -> <S>");
    assert_eq!(rev.rules[1].encode(), "b -> <S>");
    assert_eq!(rev.reversed().unwrap(), rules);
  }

  #[test]
  fn test_reversing_erasing_rule() {
    let rules = RuleSet::from_pairs(vec![
      (decode("a"), decode("b")),
      (decode("<E>"), decode("")),
    ]).unwrap();
    assert!(matches!(rules.reversed(), Err(Error::InvalidRule { index: 1 })));
  }

  #[test]
  fn test_encode() {
    let rule = parse_rule("<S> -> a <S>").unwrap();
    assert_eq!(rule.pattern(), &decode("<S>"));
    assert_eq!(rule.replacement(), &decode("a <S>"));
    assert_eq!(rule.encode(), "<S> -> a <S>");
    assert_eq!(parse_rule("<E> ->").unwrap().encode(), "<E> -> ");
    assert!(parse_rule("<S> a").is_err());
    assert!(parse_rule(" -> a").is_err());
  }
}
