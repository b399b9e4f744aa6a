use crate::core::models::mutation::{Mutation, MutationKey, WILD_TYPE_SUFFIX};
use phf::phf_set;
use regex::Regex;

/// Gene symbols recognized by the last-resort free-text scan. Covers the
/// genes that show up in the stability-scan panels this tool is run against.
static KNOWN_GENES: phf::Set<&'static str> = phf_set! {
    "TP53", "EGFR", "BRCA1", "BRCA2", "KRAS", "NRAS", "HRAS", "BRAF",
    "PTEN", "PIK3CA", "APC", "MYC", "RB1", "VHL", "ATM", "ATR", "CFTR",
    "MLH1", "MSH2", "MSH6", "PMS2", "CDKN2A", "CDH1", "STK11", "SMAD4",
    "NOTCH1", "JAK2", "ALK", "RET", "KIT", "ERBB2", "NF1", "NF2", "FBN1",
    "LDLR", "SOD1", "MECP2", "PALB2", "CHEK2", "TSC1", "TSC2",
};

/// Ordered filename-to-key inference for FoldX output files whose
/// surrounding directory does not carry the expected `GENE_CODE` name.
///
/// Tiers, most specific first; the first tier that matches wins outright,
/// with no scoring or ambiguity resolution between tiers:
///
/// 1. `Dif_GENE_CODE_GENE_CODE`, the doubled form some pipelines emit;
/// 2. `Dif_GENE_CODE` prefix;
/// 3. any adjacent `GENE_CODE` pair among underscore-separated tokens;
/// 4. an independent scan for a known gene symbol and a mutation-code token
///    anywhere in the name.
pub struct KeyPatterns {
    dif_pair: Regex,
    dif_single: Regex,
    code: Regex,
}

impl KeyPatterns {
    pub fn new() -> Self {
        // The regex crate has no backreferences; the doubled form captures
        // both pairs and the equality check happens in `infer`.
        let dif_pair = Regex::new(
            r"^Dif_([A-Za-z][A-Za-z0-9-]*)_([A-Z]\d+[A-Z]|WT)_([A-Za-z][A-Za-z0-9-]*)_([A-Z]\d+[A-Z]|WT)$",
        )
        .unwrap();
        let dif_single =
            Regex::new(r"^Dif_([A-Za-z][A-Za-z0-9-]*)_([A-Z]\d+[A-Z]|WT)").unwrap();
        let code = Regex::new(r"^[A-Z]\d+[A-Z]$").unwrap();
        Self {
            dif_pair,
            dif_single,
            code,
        }
    }

    /// Infers the mutation key from an output file name, trying each tier in
    /// order. Returns `None` when no tier matches.
    pub fn infer(&self, file_name: &str) -> Option<MutationKey> {
        let stem = file_name.strip_suffix(".fxout").unwrap_or(file_name);

        if let Some(caps) = self.dif_pair.captures(stem) {
            if caps[1] == caps[3] && caps[2] == caps[4] {
                if let Some(key) = build_key(&caps[1], &caps[2]) {
                    return Some(key);
                }
            }
        }

        if let Some(caps) = self.dif_single.captures(stem) {
            if let Some(key) = build_key(&caps[1], &caps[2]) {
                return Some(key);
            }
        }

        let pairs: Vec<&str> = stem.split('_').filter(|t| !t.is_empty()).collect();
        for pair in pairs.windows(2) {
            let (gene, suffix) = (pair[0], pair[1]);
            if self.looks_like_gene(gene)
                && (suffix == WILD_TYPE_SUFFIX || self.code.is_match(suffix))
            {
                if let Some(key) = build_key(gene, suffix) {
                    return Some(key);
                }
            }
        }

        // Last resort: the gene and the code need not be adjacent, or even
        // underscore-delimited, so scan the alphanumeric words independently.
        let words: Vec<&str> = stem
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        let gene = words.iter().find(|t| KNOWN_GENES.contains(**t))?;
        let suffix = words
            .iter()
            .find(|t| **t == WILD_TYPE_SUFFIX || self.code.is_match(t))?;
        build_key(gene, suffix)
    }

    fn looks_like_gene(&self, token: &str) -> bool {
        token.len() >= 2
            && token != "Dif"
            && token != WILD_TYPE_SUFFIX
            && token.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !self.code.is_match(token)
    }
}

impl Default for KeyPatterns {
    fn default() -> Self {
        Self::new()
    }
}

fn build_key(gene: &str, suffix: &str) -> Option<MutationKey> {
    if suffix == WILD_TYPE_SUFFIX {
        return Some(MutationKey::wild_type(gene));
    }
    let mutation = suffix.parse::<Mutation>().ok()?;
    Some(MutationKey::mutant(gene, mutation))
}
