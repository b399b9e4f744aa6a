use super::mutation::MutationKey;
use std::collections::HashMap;
use tracing::warn;

/// Total energies extracted from a FoldX results tree, keyed by mutation.
///
/// An entry may be present with no value: the run directory was found but its
/// output could not be parsed. Lookups flatten both cases to "energy unknown"
/// since the distinction only matters for diagnostics at scan time.
#[derive(Debug, Clone, Default)]
pub struct EnergyTable {
    entries: HashMap<MutationKey, Option<f64>>,
}

impl EnergyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an extracted energy. The first discovery of a key wins;
    /// later insertions under the same key are dropped with a warning.
    pub fn insert(&mut self, key: MutationKey, energy: Option<f64>) {
        if let Some(existing) = self.entries.get(&key) {
            warn!(
                key = %key,
                kept = ?existing,
                ignored = ?energy,
                "duplicate energy source for key; keeping first discovery"
            );
            return;
        }
        self.entries.insert(key, energy);
    }

    /// The extracted energy for `key`, or `None` when the key was never
    /// discovered or its output file was unparseable.
    pub fn energy(&self, key: &MutationKey) -> Option<f64> {
        self.entries.get(key).copied().flatten()
    }

    pub fn contains(&self, key: &MutationKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MutationKey, &Option<f64>)> {
        self.entries.iter()
    }
}

/// One output row of the ddG calculation: the original input cells plus the
/// two looked-up energies and their difference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Original input cells, in input column order.
    pub fields: Vec<String>,
    pub wild_type_energy: Option<f64>,
    pub mutant_energy: Option<f64>,
    pub ddg: Option<f64>,
}

impl ResultRow {
    /// ddG is defined only when both energies are present.
    pub fn compute(
        fields: Vec<String>,
        wild_type_energy: Option<f64>,
        mutant_energy: Option<f64>,
    ) -> Self {
        let ddg = match (mutant_energy, wild_type_energy) {
            (Some(mutant), Some(wild_type)) => Some(mutant - wild_type),
            _ => None,
        };
        Self {
            fields,
            wild_type_energy,
            mutant_energy,
            ddg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> MutationKey {
        s.parse().unwrap()
    }

    #[test]
    fn first_insertion_wins_over_duplicates() {
        let mut table = EnergyTable::new();
        table.insert(key("TP53_R175H"), Some(-12.3));
        table.insert(key("TP53_R175H"), Some(-99.0));
        assert_eq!(table.energy(&key("TP53_R175H")), Some(-12.3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn unparseable_entry_reads_as_unknown() {
        let mut table = EnergyTable::new();
        table.insert(key("EGFR_WT"), None);
        assert!(table.contains(&key("EGFR_WT")));
        assert_eq!(table.energy(&key("EGFR_WT")), None);
        assert_eq!(table.energy(&key("EGFR_L858R")), None);
    }

    #[test]
    fn ddg_is_difference_when_both_energies_present() {
        let row = ResultRow::compute(vec!["TP53".into(), "R175H".into()], Some(-10.0), Some(-12.3));
        assert!((row.ddg.unwrap() - (-2.3)).abs() < 1e-9);
    }

    #[test]
    fn ddg_is_null_when_either_energy_missing() {
        assert_eq!(ResultRow::compute(vec![], None, Some(-12.3)).ddg, None);
        assert_eq!(ResultRow::compute(vec![], Some(-10.0), None).ddg, None);
        assert_eq!(ResultRow::compute(vec![], None, None).ddg, None);
    }
}
