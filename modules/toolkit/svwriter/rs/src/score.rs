use std::fmt::Display;

use derive_more::Constructor;
use eyre::Result;

use crate::candidate::{Junction, SvCandidate};
use crate::model::GenotypeModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genotype {
    HomRef,
    Het,
    HomAlt,
    #[default]
    NoCall,
}

impl Genotype {
    pub fn symbol(&self) -> &'static str {
        match self {
            Genotype::HomRef => "0/0",
            Genotype::Het => "0/1",
            Genotype::HomAlt => "1/1",
            Genotype::NoCall => "./.",
        }
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Model-specific score of a junction.
#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct Call {
    pub quality: f64,
    pub genotype: Genotype,
}

/// Junction handed to the scorer, together with the candidate it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub candidate: &'a SvCandidate,
    pub index: usize,
    pub junction: &'a Junction,
}

/// Scores junctions under a genotype model.
///
/// An error marks the junction as unscored for that model; it never aborts the candidate.
pub trait Scorer {
    fn score(&mut self, input: &ScoringInput, model: GenotypeModel) -> Result<Call>;
}
