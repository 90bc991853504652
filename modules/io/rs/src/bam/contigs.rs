use ahash::HashMap;
use derive_getters::{Dissolve, Getters};
use eyre::{ensure, Result};
use noodles::sam;

/// Reference sequence as declared in an alignment header.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Dissolve, Getters)]
pub struct Contig {
    name: String,
    length: u64,
}

/// Ordered reference contigs of an alignment header. Contig index == position in the header.
#[derive(Clone, Debug, Default)]
pub struct ContigTable {
    contigs: Vec<Contig>,
    index: HashMap<String, usize>,
}

impl ContigTable {
    pub fn new(contigs: impl IntoIterator<Item = (impl Into<String>, u64)>) -> Result<Self> {
        let mut table = Self::default();
        for (name, length) in contigs {
            let name = name.into();
            ensure!(!name.is_empty(), "Contig name cannot be empty");
            ensure!(
                !table.index.contains_key(&name),
                "Duplicated contig name in the header: {name}"
            );

            table.index.insert(name.clone(), table.contigs.len());
            table.contigs.push(Contig { name, length });
        }
        Ok(table)
    }

    pub fn from_sam(header: &sam::Header) -> Result<Self> {
        Self::new(
            header
                .reference_sequences()
                .iter()
                .map(|(name, rs)| (name.to_string(), rs.length().get() as u64)),
        )
    }

    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contig> {
        self.contigs.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contig> {
        self.contigs.iter()
    }

    /// Same number of contigs, and identical name and length at every index.
    pub fn compatible(&self, other: &Self) -> bool {
        self.contigs == other.contigs
    }
}

impl PartialEq for ContigTable {
    fn eq(&self, other: &Self) -> bool {
        self.compatible(other)
    }
}

impl Eq for ContigTable {}

/// Check that evidence gathered against two headers can be combined.
pub fn headers_compatible(a: &ContigTable, b: &ContigTable) -> bool {
    a.compatible(b)
}
