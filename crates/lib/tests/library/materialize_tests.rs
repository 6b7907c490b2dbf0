use std::fs;

use cmkproj_lib::descriptor::{Layout, parse_file};
use cmkproj_lib::materialize::{EntryKind, MaterializeError, load_descriptor, materialize, plan};

use super::common::{Workspace, snapshot_tree};

const SCENARIO: &str = r#"cmake_minimum_required(VERSION 3.0)
include_directories(
  project/include
)
set(SOURCES
  project/src/main.c
)
"#;

fn scenario() -> Workspace {
  let ws = Workspace::new();
  ws.write_file("project/include/api.h", "#pragma once\n");
  ws.write_file("project/src/main.c", "#include \"api.h\"\nint main(void) { return 0; }\n");
  ws.write_descriptor(SCENARIO);
  ws
}

#[test]
fn scenario_places_entries_without_first_segment() {
  let ws = scenario();
  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();

  assert_eq!(descriptor.minimum_version(), "VERSION 3.0");
  assert_eq!(descriptor.include_directories(), ["project/include"]);
  assert_eq!(descriptor.sources(), ["project/src/main.c"]);

  materialize(&descriptor, &ws.options(), |_| {}).unwrap();

  let target = ws.target();
  assert!(target.join("include/include/api.h").is_file());
  assert!(target.join("src/src/main.c").is_file());

  let emitted = fs::read_to_string(target.join("CMakeLists.txt")).unwrap();
  assert!(emitted.starts_with("cmake_minimum_required(VERSION 3.0)\nproject(simulink_generated_code)\n"));
  assert!(emitted.contains("\n  src/src/main.c\n"));
  assert!(emitted.contains("\n  include/include\n"));
}

#[test]
fn emitted_paths_resolve_inside_target() {
  let ws = scenario();
  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();
  materialize(&descriptor, &ws.options(), |_| {}).unwrap();

  let target = ws.target();
  let reparsed = parse_file(&target.join("CMakeLists.txt")).unwrap();

  for dir in reparsed.include_directories.unwrap() {
    assert!(target.join(&dir).is_dir(), "{dir} should be a copied directory");
  }
  for file in reparsed.sources.unwrap() {
    assert!(target.join(&file).is_file(), "{file} should be a copied file");
  }
}

#[test]
fn entry_counts_survive_round_trip() {
  let ws = Workspace::new();
  let includes = ["vendor/a/include", "vendor/b/include", "lib/common"];
  let sources = ["app/main.c", "app/util.c", "lib/common.c", "gen/model.cpp"];

  for dir in includes {
    ws.write_file(&format!("{dir}/header.h"), dir);
  }
  for file in sources {
    ws.write_file(file, file);
  }

  let mut text = String::from("cmake_minimum_required(VERSION 3.16)\ninclude_directories(\n");
  for dir in includes {
    text.push_str(&format!("    {dir}\\\n"));
  }
  text.push_str(")\nset(SOURCES\n");
  for file in sources {
    text.push_str(&format!("  {file}\n"));
  }
  text.push_str(")\n");
  ws.write_descriptor(&text);

  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();
  assert_eq!(descriptor.include_directories().len(), includes.len());
  assert_eq!(descriptor.sources(), sources);

  let result = materialize(&descriptor, &ws.options(), |_| {}).unwrap();
  assert_eq!(result.directories_copied, 3);

  let reparsed = load_descriptor(&result.descriptor_path, Layout::Executable).unwrap();
  assert_eq!(reparsed.minimum_version(), "VERSION 3.16");
  assert_eq!(reparsed.include_directories().len(), includes.len());
  assert_eq!(reparsed.sources().len(), sources.len());
}

#[test]
fn materializing_twice_matches_once() {
  let ws = scenario();
  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();

  materialize(&descriptor, &ws.options(), |_| {}).unwrap();
  let first = snapshot_tree(&ws.target());

  // A stray file in a copied directory must not survive the second run.
  ws.write_file("cmake_project/include/include/stray.h", "stray");
  materialize(&descriptor, &ws.options(), |_| {}).unwrap();
  let second = snapshot_tree(&ws.target());

  assert_eq!(first, second);
}

#[test]
fn missing_source_list_fails_before_any_copy() {
  let ws = Workspace::new();
  ws.write_file("project/include/api.h", "");
  ws.write_descriptor("cmake_minimum_required(VERSION 3.0)\ninclude_directories(\n  project/include\n)\n");

  let err = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap_err();
  assert!(matches!(err, MaterializeError::Invalid { .. }));
  assert!(!ws.target().exists());
}

#[test]
fn unclosed_block_is_a_parse_error() {
  let ws = Workspace::new();
  ws.write_descriptor("cmake_minimum_required(VERSION 3.0)\ninclude_directories(\n  project/include\n");

  let err = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap_err();
  let chain = format!("{err}: {}", std::error::Error::source(&err).unwrap());
  assert!(chain.contains("'include_directories' block opened on line 2 is never closed"));
}

#[test]
fn copy_failure_names_entry_and_keeps_earlier_copies() {
  let ws = scenario();
  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();
  let plan = plan(&descriptor, &ws.options()).unwrap();

  // Vanishes between planning and copying.
  fs::remove_file(ws.temp.path().join("project/src/main.c")).unwrap();

  let err = cmkproj_lib::materialize::apply(&plan, |_| {}).unwrap_err();
  match err {
    MaterializeError::Copy { kind, entry, .. } => {
      assert_eq!(kind, EntryKind::SourceFile);
      assert_eq!(entry, "project/src/main.c");
    }
    other => panic!("expected copy failure, got {other:?}"),
  }
  assert!(ws.target().join("include/include/api.h").is_file());
  assert!(!ws.target().join("CMakeLists.txt").exists());
}

#[test]
fn includes_only_ignores_sources() {
  let ws = scenario();
  let descriptor = load_descriptor(&ws.descriptor_path, Layout::IncludesOnly).unwrap();
  let mut options = ws.options();
  options.layout = Layout::IncludesOnly;

  let result = materialize(&descriptor, &options, |_| {}).unwrap();

  assert_eq!(result.files_copied, 1);
  assert!(!ws.target().join("src").exists());
  let reparsed = parse_file(&result.descriptor_path).unwrap();
  assert_eq!(reparsed.include_directories.unwrap(), ["include/include"]);
  assert_eq!(reparsed.sources, None);
}

#[test]
#[cfg(unix)]
fn read_only_sources_materialize_twice() {
  use std::os::unix::fs::PermissionsExt;

  let ws = scenario();
  let read_only = fs::Permissions::from_mode(0o444);
  fs::set_permissions(ws.temp.path().join("project/src/main.c"), read_only.clone()).unwrap();
  fs::set_permissions(ws.temp.path().join("project/include/api.h"), read_only).unwrap();

  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();
  materialize(&descriptor, &ws.options(), |_| {}).unwrap();
  let first = snapshot_tree(&ws.target());

  materialize(&descriptor, &ws.options(), |_| {}).unwrap();
  let second = snapshot_tree(&ws.target());

  assert_eq!(first, second);
  let copied = fs::metadata(ws.target().join("src/src/main.c")).unwrap();
  assert_eq!(copied.permissions().mode() & 0o777, 0o444);
}

#[test]
fn source_entry_naming_a_directory_fails_before_any_copy() {
  let ws = Workspace::new();
  ws.write_file("project/include/api.h", "");
  ws.write_file("project/src/nested/main.c", "");
  ws.write_descriptor(
    "cmake_minimum_required(VERSION 3.0)\ninclude_directories(\n  project/include\n)\nset(SOURCES\n  project/src/nested\n)\n",
  );

  let descriptor = load_descriptor(&ws.descriptor_path, Layout::Executable).unwrap();
  let err = materialize(&descriptor, &ws.options(), |_| {}).unwrap_err();

  assert!(matches!(
    err,
    MaterializeError::KindMismatch {
      kind: EntryKind::SourceFile,
      ..
    }
  ));
  assert!(!ws.target().exists());
}
