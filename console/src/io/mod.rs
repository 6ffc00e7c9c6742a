//! # IO Module
//!
//! Interfaces that expose the backend to an operator.

pub mod console;
