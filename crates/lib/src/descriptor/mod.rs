//! Build descriptor handling.
//!
//! A build descriptor is a `CMakeLists.txt`-style text file. Three directives
//! are understood:
//!
//! ```text
//! cmake_minimum_required(VERSION 3.0)
//! include_directories(
//!   /project/include
//! )
//! set(SOURCES
//!   /project/src/main.c
//! )
//! ```
//!
//! # Submodules
//!
//! - [`parse`] - line scanner producing a [`RawDescriptor`]
//! - [`emit`] - rendering of the rewritten descriptor
//!
//! Validation (`RawDescriptor` → [`BuildDescriptor`]) lives in the types module.

pub mod emit;
pub mod parse;
mod types;

pub use parse::{ParseError, parse_descriptor, parse_file};
pub use types::*;
