//! Defines the core data models for mutation scans.
//!
//! A scan is described by point mutations (`Mutation`) on named genes; the
//! join between generated request files and extracted energies is the
//! `MutationKey`, and the extracted energies themselves live in an
//! `EnergyTable` keyed by it.

pub mod energy;
pub mod mutation;
