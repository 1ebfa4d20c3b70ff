//! Heterogeneous trace-log parsers.
//!
//! Both parsers normalize their input into the common [`Event`](crate::Event)
//! model. Parsing is tolerant and line-local: a line that does not match the
//! expected commit-record shape is skipped, and only whole-file IO failures
//! are fatal.

pub mod rtl;
pub mod spike;
