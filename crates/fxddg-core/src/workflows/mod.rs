//! Provides the public, user-facing batch procedures.
//!
//! Each workflow ties the `core` primitives together into one complete
//! single-pass transformation: generating FoldX request files from a scan
//! table, scanning a results tree and computing ddG, converting a raw
//! `.fxout` into a clean CSV, and inspecting an output tree when extraction
//! comes back empty. Workflows hold no state between invocations; apart from
//! the files they write, re-running one is idempotent.

pub mod convert;
pub mod ddg;
pub mod generate;
pub mod inspect;
