
use crate::symbols::{Symbol, Utterance};

/// Offsets where `pattern` occurs contiguously in `utterance`, ascending.
/// With a cap, scanning stops as soon as `max_matches` offsets are found;
/// later occurrences are not reported.
pub fn find_match_offsets(utterance: &[Symbol], pattern: &[Symbol], max_matches: Option<usize>) -> Vec<usize> {
  assert!(pattern.len() > 0);

  let mut offsets = vec![];
  if max_matches == Some(0) {
    return offsets;
  }

  for (offset, window) in utterance.windows(pattern.len()).enumerate() {
    if window == pattern {
      offsets.push(offset);
      if max_matches.is_some_and(|max| offsets.len() >= max) {
        break;
      }
    }
  }

  offsets
}

/// Copy of `utterance` with `pattern.len()` symbols at `offset` replaced by
/// `replacement`.
pub fn apply(utterance: &Utterance, pattern: &[Symbol], replacement: &[Symbol], offset: usize) -> Utterance {
  // x x x x x x x x
  //     ^-----^
  //     offset + pattern.len()
  assert!(offset + pattern.len() <= utterance.len());

  let mut working: Vec<Symbol> = Vec::with_capacity(utterance.len() - pattern.len() + replacement.len());
  working.extend_from_slice(&utterance[.. offset]);
  working.extend_from_slice(replacement);
  working.extend_from_slice(&utterance[offset + pattern.len() ..]);
  Utterance::new(working)
}
