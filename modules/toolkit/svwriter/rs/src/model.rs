use std::fmt::Display;

use derive_more::Constructor;

/// Genotyping model used to score a junction. Each model owns a dedicated output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GenotypeModel {
    Diploid,
    Somatic,
    TumorOnly,
    Rna,
}

impl GenotypeModel {
    pub const ALL: [GenotypeModel; 4] = [
        GenotypeModel::Diploid,
        GenotypeModel::Somatic,
        GenotypeModel::TumorOnly,
        GenotypeModel::Rna,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GenotypeModel::Diploid => "diploid",
            GenotypeModel::Somatic => "somatic",
            GenotypeModel::TumorOnly => "tumor-only",
            GenotypeModel::Rna => "rna",
        }
    }
}

impl Display for GenotypeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Analysis mode of a run. The mode fixes the set of active genotype models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Germline,
    /// Tumor/normal run; germline calls are reported next to the somatic ones.
    Somatic,
    TumorOnly,
    Rna,
}

impl Mode {
    pub fn models(&self) -> &'static [GenotypeModel] {
        match self {
            Mode::Germline => &[GenotypeModel::Diploid],
            Mode::Somatic => &[GenotypeModel::Diploid, GenotypeModel::Somatic],
            Mode::TumorOnly => &[GenotypeModel::TumorOnly],
            Mode::Rna => &[GenotypeModel::Rna],
        }
    }

    pub fn is_active(&self, model: GenotypeModel) -> bool {
        self.models().contains(&model)
    }
}

/// Destination of a record: the unscored candidates or one of the model streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputKind {
    Candidates,
    Model(GenotypeModel),
}

impl OutputKind {
    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::Candidates => "candidates",
            OutputKind::Model(model) => model.label(),
        }
    }
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<GenotypeModel> for OutputKind {
    fn from(model: GenotypeModel) -> Self {
        OutputKind::Model(model)
    }
}

/// A value for each genotype model.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Constructor)]
pub struct PerModel<T> {
    pub diploid: T,
    pub somatic: T,
    pub tumor_only: T,
    pub rna: T,
}

impl<T> PerModel<T> {
    pub fn get(&self, model: GenotypeModel) -> &T {
        match model {
            GenotypeModel::Diploid => &self.diploid,
            GenotypeModel::Somatic => &self.somatic,
            GenotypeModel::TumorOnly => &self.tumor_only,
            GenotypeModel::Rna => &self.rna,
        }
    }

    pub fn get_mut(&mut self, model: GenotypeModel) -> &mut T {
        match model {
            GenotypeModel::Diploid => &mut self.diploid,
            GenotypeModel::Somatic => &mut self.somatic,
            GenotypeModel::TumorOnly => &mut self.tumor_only,
            GenotypeModel::Rna => &mut self.rna,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (GenotypeModel, &T)> {
        GenotypeModel::ALL.into_iter().map(move |model| (model, self.get(model)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GenotypeModel, &mut T)> {
        [
            (GenotypeModel::Diploid, &mut self.diploid),
            (GenotypeModel::Somatic, &mut self.somatic),
            (GenotypeModel::TumorOnly, &mut self.tumor_only),
            (GenotypeModel::Rna, &mut self.rna),
        ]
        .into_iter()
    }
}
