
use crate::error::{Error, Result};
use crate::symbols::Utterance;

/// Passes only when the run produced exactly one utterance, and that
/// utterance is the single symbol `goal`. Used after parsing (reversed
/// grammar) to confirm the input reduced to the start symbol.
pub fn check_goal(found: &[Utterance], goal: &str) -> Result<()> {
  match found {
    [only] if only.len() == 1 && only[0] == goal => Ok(()),
    _ => Err(Error::GoalMismatch { goal: goal.to_owned(), found: found.to_vec() })
  }
}
