use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plan_lists_destinations_without_copying() {
  let env = TestEnv::from_fixture("scenario.cmake").with_scenario_sources();

  env
    .cmkproj_cmd()
    .arg("plan")
    .arg(&env.descriptor_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("project/include → include/include"))
    .stdout(predicate::str::contains("project/src/main.c → src/src/main.c"))
    .stdout(predicate::str::contains("Include directories: 1"))
    .stdout(predicate::str::contains("Source files: 1"))
    .stdout(predicate::str::contains("Dry run"));

  assert!(!env.target().exists());
}

#[test]
fn plan_flags_oversized_entries() {
  let env = TestEnv::from_fixture("scenario.cmake").with_scenario_sources();

  env
    .cmkproj_cmd()
    .arg("plan")
    .arg(&env.descriptor_path)
    .args(["--threshold", "1"])
    .assert()
    .success()
    .stderr(predicate::str::contains("project/include exceeds 1 bytes"));
}

#[test]
fn plan_json_output_is_valid() {
  let env = TestEnv::from_fixture("scenario.cmake").with_scenario_sources();

  let assert = env
    .cmkproj_cmd()
    .arg("plan")
    .arg(&env.descriptor_path)
    .args(["-o", "json"])
    .assert()
    .success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(plan["minimum_version"], "VERSION 3.0");
  assert_eq!(plan["layout"], "executable");
  assert_eq!(plan["entries"][0]["kind"], "include_directory");
  assert_eq!(plan["entries"][1]["emitted_path"], "src/src/main.c");
  assert_eq!(plan["entries"][1]["size"]["exceeds_threshold"], false);
}

#[test]
fn plan_missing_source_fails() {
  let env = TestEnv::from_fixture("scenario.cmake");
  env.write_file("project/include/api.h", "");

  env
    .cmkproj_cmd()
    .arg("plan")
    .arg(&env.descriptor_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("cannot measure source file 'project/src/main.c'"));
}
