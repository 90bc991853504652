use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::Constructor;
use eyre::{ensure, Result};
use svbit_io_rs::compression::encode;

use crate::model::{GenotypeModel, Mode, OutputKind, PerModel};

/// Run configuration of the SV writer.
#[derive(Clone, PartialEq, Debug, Getters)]
pub struct Config {
    mode: Mode,
    report_candidates: bool,
    /// Minimum number of supporting reads (split + pair, all samples) to report a candidate.
    min_candidate_support: u64,
    /// Scored junctions below the model threshold are marked as low quality.
    min_quality: PerModel<f64>,
    id_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            report_candidates: false,
            min_candidate_support: 3,
            min_quality: PerModel::new(20.0, 30.0, 20.0, 20.0),
            id_prefix: "Svbit".to_string(),
        }
    }
}

impl Config {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn set_report_candidates(&mut self, report: bool) -> &mut Self {
        self.report_candidates = report;
        self
    }

    pub fn set_min_candidate_support(&mut self, support: u64) -> &mut Self {
        self.min_candidate_support = support;
        self
    }

    pub fn set_min_quality(&mut self, model: GenotypeModel, quality: f64) -> Result<&mut Self> {
        ensure!(
            quality.is_finite() && quality >= 0.0,
            "Minimum {model} quality must be a non-negative number, got {quality}"
        );

        *self.min_quality.get_mut(model) = quality;
        Ok(self)
    }

    pub fn set_id_prefix(&mut self, prefix: impl Into<String>) -> Result<&mut Self> {
        let prefix = prefix.into();
        ensure!(!prefix.is_empty(), "Identifier prefix must not be empty");
        ensure!(
            !prefix.chars().any(|c| c.is_whitespace() || c == ':'),
            "Identifier prefix must not contain whitespace or ':', got {prefix:?}"
        );

        self.id_prefix = prefix;
        Ok(self)
    }

    /// Streams that receive records in this run, the candidate stream first.
    pub fn active_outputs(&self) -> Vec<OutputKind> {
        let mut kinds = Vec::with_capacity(1 + self.mode.models().len());
        if self.report_candidates {
            kinds.push(OutputKind::Candidates);
        }
        kinds.extend(self.mode.models().iter().copied().map(OutputKind::Model));
        kinds
    }
}

#[derive(Clone, PartialEq, Debug, Getters, Constructor)]
pub struct Destination {
    path: PathBuf,
    compression: encode::Config,
}

impl Destination {
    /// Destination with the compression inferred from the file extension.
    pub fn infer(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let compression = encode::Config::infer_from_path(&path);
        Self { path, compression }
    }
}

/// Output destinations of every stream the writer may open.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Outputs {
    candidates: Option<Destination>,
    models: PerModel<Option<Destination>>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: OutputKind, path: impl AsRef<Path>) -> &mut Self {
        self.set_destination(kind, Destination::infer(path.as_ref()))
    }

    pub fn set_destination(&mut self, kind: OutputKind, destination: Destination) -> &mut Self {
        *self.slot_mut(kind) = Some(destination);
        self
    }

    pub fn get(&self, kind: OutputKind) -> Option<&Destination> {
        match kind {
            OutputKind::Candidates => self.candidates.as_ref(),
            OutputKind::Model(model) => self.models.get(model).as_ref(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OutputKind, &Destination)> {
        let models = self
            .models
            .iter()
            .filter_map(|(model, dst)| dst.as_ref().map(|dst| (OutputKind::Model(model), dst)));
        self.candidates
            .as_ref()
            .map(|dst| (OutputKind::Candidates, dst))
            .into_iter()
            .chain(models)
    }

    fn slot_mut(&mut self, kind: OutputKind) -> &mut Option<Destination> {
        match kind {
            OutputKind::Candidates => &mut self.candidates,
            OutputKind::Model(model) => self.models.get_mut(model),
        }
    }
}
