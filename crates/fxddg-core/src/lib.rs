//! # foldxddg Core Library
//!
//! A library for driving FoldX BuildModel mutation scans: generating the
//! per-mutation "individual list" request files the tool consumes, and
//! scraping the semi-structured `.fxout` files it produces to recover
//! folding-stability changes (ddG = mutant energy − wild-type energy).
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction,
//! keeping the fragile text-scraping concerns isolated and testable.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Mutation`,
//!   `MutationKey`, `EnergyTable`) and I/O primitives: the mutation-table
//!   reader, the request-file writer, the `.fxout` energy extractor, and the
//!   filename-to-key inference patterns.
//!
//! - **[`workflows`]: The Public API.** Complete batch procedures built from
//!   the core primitives: request generation, results scanning with ddG
//!   computation, `.fxout` conversion, and output-tree inspection. Each
//!   workflow is a single-pass transformation with no state shared between
//!   invocations.

pub mod core;
pub mod workflows;
