//! Flowseq Core Types
//!
//! This crate provides the foundational types shared by the flowseq tools.
//! It includes:
//!
//! - **Model**: Records returned by the landscape API ([`model`] module)
//! - **Sequence**: The sequence diagram aggregate and its text form ([`sequence`] module)

pub mod model;
pub mod sequence;
