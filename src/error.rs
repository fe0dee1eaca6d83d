
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::symbols::Utterance;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Rule {index} has an empty pattern")]
  InvalidRule { index: usize },

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("No start set given, please supply --start or --start-set-file")]
  EmptyStartSet,

  #[error("Expected exactly one derivation `{goal}`, got {} derivations", found.len())]
  GoalMismatch { goal: String, found: Vec<Utterance> },

  #[error("I/O error on {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },

  #[error("Malformed JSON in {}: {source}", path.display())]
  Json { path: PathBuf, source: serde_json::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
