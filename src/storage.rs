
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::generation::WorkingSet;
use crate::rules::RuleSet;
use crate::symbols::{Utterance, decode};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let file = File::open(path).map_err(|source| Error::Io { path: path.to_owned(), source })?;
  serde_json::from_reader(BufReader::new(file)).map_err(|source| Error::Json { path: path.to_owned(), source })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
  let file = File::create(path).map_err(|source| Error::Io { path: path.to_owned(), source })?;
  let mut writer = BufWriter::new(file);
  serde_json::to_writer_pretty(&mut writer, value).map_err(|source| Error::Json { path: path.to_owned(), source })?;
  writer.flush().map_err(|source| Error::Io { path: path.to_owned(), source })
}

/// A grammar file is `[[pattern, replacement], ...]`, each side a list of
/// symbols. With `reverse` every rule is flipped before use.
pub fn load_grammar(path: &Path, reverse: bool) -> Result<RuleSet> {
  let pairs: Vec<(Utterance, Utterance)> = read_json(path)?;
  let rules = RuleSet::from_pairs(pairs)?;
  if reverse { rules.reversed() } else { Ok(rules) }
}

pub fn load_start_set(path: &Path) -> Result<WorkingSet> {
  let utterances: Vec<Utterance> = read_json(path)?;
  Ok(utterances.into_iter().collect())
}

/// Either a single whitespace-separated utterance, or a JSON start set file.
pub fn start_set(start: Option<&str>, start_set_file: Option<&Path>) -> Result<WorkingSet> {
  // a blank --start has no symbols and counts as not given
  let start = start.filter(|text| !text.trim().is_empty());
  match (start, start_set_file) {
    (Some(text), _) => Ok([decode(text)].into_iter().collect()),
    (None, Some(path)) => load_start_set(path),
    (None, None) => Err(Error::EmptyStartSet)
  }
}

pub fn save_derivations(path: &Path, utterances: &[Utterance]) -> Result<()> {
  write_json(path, utterances)
}

pub fn load_derivations(path: &Path) -> Result<Vec<Utterance>> {
  read_json(path)
}

pub fn snapshot_path(dir: &Path, generation: usize) -> PathBuf {
  dir.join(format!("snapshot-{}.json", generation))
}

/// Writes the working set as a JSON list in iteration order. Load it back
/// with `load_start_set` to resume from it.
pub fn save_snapshot(dir: &Path, generation: usize, working: &WorkingSet) -> Result<PathBuf> {
  let path = snapshot_path(dir, generation);
  write_json(&path, working)?;
  Ok(path)
}
