use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const RESIDUE_LETTERS: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Suffix that marks a wild-type reference key (`{gene}_WT`).
pub const WILD_TYPE_SUFFIX: &str = "WT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("invalid mutation code '{0}' (expected e.g. 'E1932K')")]
    InvalidFormat(String),
    #[error("unknown residue letter '{letter}' in mutation code '{code}'")]
    UnknownResidue { code: String, letter: char },
    #[error("invalid mutation key '{0}' (expected 'GENE_CODE' or 'GENE_WT')")]
    InvalidKey(String),
}

/// Returns whether `letter` is one of the 20 canonical one-letter amino-acid codes.
pub fn is_canonical_residue(letter: char) -> bool {
    RESIDUE_LETTERS.contains(letter)
}

/// A single point mutation parsed from a code such as `E1932K`.
///
/// The position is kept as the original digit string: residue numbers are
/// labels copied from the source table into request files, never operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Mutation {
    wild_type: char,
    position: String,
    mutant: char,
}

impl Mutation {
    /// Builds a mutation from its three components, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::InvalidFormat`] when the position is empty or
    /// not all digits, and [`MutationError::UnknownResidue`] when either
    /// residue letter is not a canonical amino-acid code.
    pub fn new(wild_type: char, position: &str, mutant: char) -> Result<Self, MutationError> {
        let code = format!("{wild_type}{position}{mutant}");
        if position.is_empty() || !position.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MutationError::InvalidFormat(code));
        }
        for letter in [wild_type, mutant] {
            if !is_canonical_residue(letter) {
                return Err(MutationError::UnknownResidue { code, letter });
            }
        }
        Ok(Self {
            wild_type,
            position: position.to_string(),
            mutant,
        })
    }

    pub fn wild_type(&self) -> char {
        self.wild_type
    }

    /// 1-based residue position, as the original digit string.
    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn mutant(&self) -> char {
        self.mutant
    }

    /// True when the mutation is a no-op (`wt == mut`). Such records only
    /// ever feed the accumulating wild-type reference file, never a mutant
    /// request file.
    pub fn is_wild_type(&self) -> bool {
        self.wild_type == self.mutant
    }

    /// The compact code form, e.g. `E1932K`.
    pub fn code(&self) -> String {
        format!("{}{}{}", self.wild_type, self.position, self.mutant)
    }
}

impl FromStr for Mutation {
    type Err = MutationError;

    /// Parses the fixed grammar `letter digits letter`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        // Byte indexing below is only sound for ASCII input.
        if !code.is_ascii() || code.len() < 3 {
            return Err(MutationError::InvalidFormat(code.to_string()));
        }
        let bytes = code.as_bytes();
        let wild_type = bytes[0] as char;
        let mutant = bytes[code.len() - 1] as char;
        let position = &code[1..code.len() - 1];
        if !wild_type.is_ascii_uppercase() || !mutant.is_ascii_uppercase() {
            return Err(MutationError::InvalidFormat(code.to_string()));
        }
        Self::new(wild_type, position, mutant)
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.wild_type, self.position, self.mutant)
    }
}

/// The join key between request files and extracted energies.
///
/// Renders as `{gene}_{code}` for mutants and `{gene}_WT` for the wild-type
/// baseline; FoldX run directories are named with the same scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationKey {
    WildType { gene: String },
    Mutant { gene: String, mutation: Mutation },
}

impl MutationKey {
    pub fn wild_type(gene: &str) -> Self {
        Self::WildType {
            gene: gene.to_string(),
        }
    }

    pub fn mutant(gene: &str, mutation: Mutation) -> Self {
        Self::Mutant {
            gene: gene.to_string(),
            mutation,
        }
    }

    pub fn gene(&self) -> &str {
        match self {
            Self::WildType { gene } | Self::Mutant { gene, .. } => gene,
        }
    }
}

fn is_gene_symbol(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl FromStr for MutationKey {
    type Err = MutationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (gene, suffix) = s
            .rsplit_once('_')
            .ok_or_else(|| MutationError::InvalidKey(s.to_string()))?;
        if !is_gene_symbol(gene) {
            return Err(MutationError::InvalidKey(s.to_string()));
        }
        if suffix == WILD_TYPE_SUFFIX {
            return Ok(Self::wild_type(gene));
        }
        let mutation = suffix
            .parse::<Mutation>()
            .map_err(|_| MutationError::InvalidKey(s.to_string()))?;
        Ok(Self::mutant(gene, mutation))
    }
}

impl fmt::Display for MutationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WildType { gene } => write!(f, "{gene}_{WILD_TYPE_SUFFIX}"),
            Self::Mutant { gene, mutation } => write!(f, "{gene}_{mutation}"),
        }
    }
}
