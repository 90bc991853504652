use bitcode::{Decode, Encode};
use derive_getters::Dissolve;
use derive_more::{Constructor, From};

use super::role::SampleRole;

/// A struct that holds data for each sample role of a run.
#[derive(
    Encode,
    Decode,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Debug,
    Default,
    From,
    Dissolve,
    Constructor,
)]
pub struct PerSample<T> {
    pub normal: T,
    pub tumor: T,
}

impl<T> PerSample<T> {
    /// Gets a reference to the data for the specified role.
    pub fn get(&self, role: SampleRole) -> &T {
        match role {
            SampleRole::Normal => &self.normal,
            SampleRole::Tumor => &self.tumor,
        }
    }

    /// Gets a mutable reference to the data for the specified role.
    pub fn get_mut(&mut self, role: SampleRole) -> &mut T {
        match role {
            SampleRole::Normal => &mut self.normal,
            SampleRole::Tumor => &mut self.tumor,
        }
    }

    /// Gets an iterator over the data for each role. Order is normal, tumor.
    pub fn iter(&self) -> impl Iterator<Item = (SampleRole, &T)> {
        [
            (SampleRole::Normal, &self.normal),
            (SampleRole::Tumor, &self.tumor),
        ]
        .into_iter()
    }

    /// Applies a function to each role.
    pub fn apply(&mut self, mut f: impl FnMut(SampleRole, &mut T)) -> &mut Self {
        f(SampleRole::Normal, &mut self.normal);
        f(SampleRole::Tumor, &mut self.tumor);
        self
    }

    /// Combines the data of two containers role by role.
    pub fn zip_apply<U>(&mut self, other: &PerSample<U>, mut f: impl FnMut(&mut T, &U)) -> &mut Self {
        f(&mut self.normal, &other.normal);
        f(&mut self.tumor, &other.tumor);
        self
    }

    /// Maps each role to a new value.
    pub fn map<U>(self, mut f: impl FnMut(SampleRole, T) -> U) -> PerSample<U> {
        PerSample {
            normal: f(SampleRole::Normal, self.normal),
            tumor: f(SampleRole::Tumor, self.tumor),
        }
    }
}

impl<T> IntoIterator for PerSample<T> {
    type Item = (SampleRole, T);
    type IntoIter = std::array::IntoIter<(SampleRole, T), 2>;

    fn into_iter(self) -> Self::IntoIter {
        [
            (SampleRole::Normal, self.normal),
            (SampleRole::Tumor, self.tumor),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_sample_get() {
        let mut data = PerSample::new(1, 2);
        assert_eq!(*data.get(SampleRole::Normal), 1);
        assert_eq!(*data.get(SampleRole::Tumor), 2);

        *data.get_mut(SampleRole::Tumor) += 10;
        assert_eq!(data, PerSample::new(1, 12));
    }

    #[test]
    fn test_per_sample_apply_and_map() {
        let mut data = PerSample::new(1, 2);
        data.apply(|role, x| {
            if role.is_tumor() {
                *x *= 3
            }
        });
        assert_eq!(data, PerSample::new(1, 6));

        data.zip_apply(&PerSample::new(10, 20), |x, y| *x += y);
        assert_eq!(data, PerSample::new(11, 26));

        let labels = data.map(|role, x| format!("{role}={x}"));
        assert_eq!(labels.normal, "normal=11");
        assert_eq!(labels.tumor, "tumor=26");
    }

    #[test]
    fn test_per_sample_iter_order() {
        let data = PerSample::new('n', 't');
        let roles: Vec<_> = data.iter().map(|(role, _)| role).collect();
        assert_eq!(roles, SampleRole::ALL);
        let values: Vec<_> = data.into_iter().map(|(_, x)| x).collect();
        assert_eq!(values, vec!['n', 't']);
    }
}
