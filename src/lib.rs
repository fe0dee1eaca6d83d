//! Generation-by-generation string rewriting over a production grammar.
//!
//! Every rule is applied at every match in every working utterance at once;
//! utterances no rule can touch are collected as derivations. Beam search
//! keeps the working set small when the grammar branches too much to explore
//! exhaustively.

pub mod error;
pub mod symbols;
pub mod rules;
pub mod matching;
pub mod generation;
pub mod strategy;
pub mod derivation;
pub mod storage;
pub mod goal;

pub use error::{Error, Result};
pub use symbols::{Symbol, Utterance};
pub use rules::{Rule, RuleSet};
pub use generation::{Generation, MatchCap, WorkingSet, step};
pub use strategy::{BeamSearch, Scoring, SearchPolicy, Switch};
pub use derivation::{DeriveConfig, Derivation, Observer, Termination, derive};
