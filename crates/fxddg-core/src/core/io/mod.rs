//! Provides input/output functionality for the external text formats.
//!
//! This module contains the readers and writers at the boundary with the
//! external tool: the mutation-scan CSV reader, the individual-list request
//! writer, the tolerant `.fxout` energy extractor, and the ordered
//! filename-to-key inference used when an output tree does not follow the
//! expected directory naming.

pub mod fxout;
pub mod keys;
pub mod request;
pub mod table;
