//! cmkproj-lib: materialize standalone projects from build descriptors.
//!
//! This crate provides the pieces behind the `cmkproj` command:
//! - `descriptor`: parsing, validating and emitting `CMakeLists.txt`-style descriptors
//! - `size`: advisory size guard for entries about to be copied
//! - `copy`: replace-not-merge copying of directories and files
//! - `materialize`: plan/apply orchestration of the whole run
//! - `config`: environment overrides for defaults

pub mod config;
pub mod consts;
pub mod copy;
pub mod descriptor;
pub mod materialize;
pub mod paths;
pub mod size;
pub mod util;
