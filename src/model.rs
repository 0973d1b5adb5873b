/// A primary-assembly chromosome: a name and its length in base pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    pub name: String,
    pub len: u64,
}

impl Chromosome {
    pub fn new(name: impl Into<String>, len: u64) -> Self {
        Chromosome {
            name: name.into(),
            len,
        }
    }
}

/// An alt-scaffold placement: scaffold `name` attaches to `chrom` over the
/// half-open interval `[start_pos, end_pos)`.
///
/// `len` is the scaffold's own sequence length. It is unknown at placement
/// parse time and filled in by the chromosome-sizes cross-reference pass;
/// a locus without a resolved length cannot become a graph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltLocus {
    pub name: String,
    pub chrom: String,
    pub start_pos: u64,
    pub end_pos: u64,
    pub len: Option<u64>,
}

impl AltLocus {
    pub fn new(
        name: impl Into<String>,
        chrom: impl Into<String>,
        start_pos: u64,
        end_pos: u64,
    ) -> Self {
        AltLocus {
            name: name.into(),
            chrom: chrom.into(),
            start_pos,
            end_pos,
            len: None,
        }
    }

    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }
}
