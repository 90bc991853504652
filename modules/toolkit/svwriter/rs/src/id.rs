use std::fmt::Display;

use crate::candidate::SvType;

/// Identifier shared by every record that describes the same junction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(String);

impl JunctionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for JunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues `{prefix}{SVTYPE}:{serial}` identifiers. Serials are never reused within a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunctionIdGenerator {
    prefix: String,
    next: u64,
}

impl JunctionIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn next(&mut self, sv_type: SvType) -> JunctionId {
        let id = JunctionId(format!("{}{}:{}", self.prefix, sv_type, self.next));
        self.next += 1;
        id
    }

    pub fn issued(&self) -> u64 {
        self.next
    }
}
