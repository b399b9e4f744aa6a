//! Provides the foundational layer of the library.
//!
//! This module contains the stateless building blocks the workflows are
//! assembled from: the mutation and energy data models, readers and writers
//! for the external text formats (mutation-scan CSV, individual-list request
//! files, FoldX `.fxout` output), and the results-tree scanner that joins
//! FoldX output files back to the mutations that produced them.

pub mod io;
pub mod models;
pub mod scan;
