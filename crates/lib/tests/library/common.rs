//! Shared helpers for library integration tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cmkproj_lib::materialize::MaterializeOptions;
use tempfile::TempDir;
use walkdir::WalkDir;

/// A source project on disk plus a descriptor pointing into it.
///
/// Entries are written relative to the temp directory, which doubles as the
/// base directory of the run.
pub struct Workspace {
  pub temp: TempDir,
  pub descriptor_path: PathBuf,
}

impl Workspace {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let descriptor_path = temp.path().join("CMakeLists.txt");
    Self { temp, descriptor_path }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn write_descriptor(&self, content: &str) {
    fs::write(&self.descriptor_path, content).unwrap();
  }

  pub fn target(&self) -> PathBuf {
    self.temp.path().join("cmake_project")
  }

  pub fn options(&self) -> MaterializeOptions {
    MaterializeOptions::new(self.target(), self.temp.path().to_path_buf())
  }
}

/// Relative path → file content (`None` for directories) for every entry
/// below `root`.
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Option<Vec<u8>>> {
  WalkDir::new(root)
    .min_depth(1)
    .into_iter()
    .map(|entry| {
      let entry = entry.unwrap();
      let rel = entry
        .path()
        .strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/");
      let content = entry.file_type().is_file().then(|| fs::read(entry.path()).unwrap());
      (rel, content)
    })
    .collect()
}
