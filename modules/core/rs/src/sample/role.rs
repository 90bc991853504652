use std::fmt::Display;

use bitcode::{Decode, Encode};

/// Biological role of a sample within an analysis run.
#[derive(Encode, Decode, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum SampleRole {
    /// Matched normal sample, or the only sample of a germline run.
    #[default]
    Normal,
    /// Tumor sample of a tumor/normal or tumor-only run.
    Tumor,
}

impl SampleRole {
    pub const ALL: [SampleRole; 2] = [SampleRole::Normal, SampleRole::Tumor];

    /// Role encoded by the legacy "is tumor" flag of alignment inputs.
    pub fn from_tumor_flag(is_tumor: bool) -> Self {
        if is_tumor {
            SampleRole::Tumor
        } else {
            SampleRole::Normal
        }
    }

    pub fn is_tumor(&self) -> bool {
        matches!(self, SampleRole::Tumor)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SampleRole::Normal => "normal",
            SampleRole::Tumor => "tumor",
        }
    }
}

impl Display for SampleRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
