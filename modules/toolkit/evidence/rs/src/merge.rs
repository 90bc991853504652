/// Statistics gathered independently per partition and combined afterwards.
///
/// `merge` must be associative and commutative, and a default (cleared) value must be its
/// identity element: partial results are reduced in whatever order the workers finish.
pub trait Merge: Default {
    /// Add every statistic of `other` to `self`.
    fn merge(&mut self, other: &Self);

    /// Reset to the zero state, indistinguishable from a freshly constructed value.
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn merged(mut self, other: &Self) -> Self
    where
        Self: Sized,
    {
        self.merge(other);
        self
    }
}
