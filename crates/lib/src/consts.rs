/// Directory created under the working directory when no target is given.
pub const DEFAULT_TARGET_DIR_NAME: &str = "cmake_project";

/// File name of the emitted build descriptor.
pub const DESCRIPTOR_FILENAME: &str = "CMakeLists.txt";

/// Subdirectory of the target root receiving copied include directories.
pub const INCLUDE_SUBDIR: &str = "include";

/// Subdirectory of the target root receiving copied source files.
pub const SOURCE_SUBDIR: &str = "src";

pub const DEFAULT_PROJECT_NAME: &str = "simulink_generated_code";

pub const EXECUTABLE_TARGET: &str = "main";

/// Version token written when an includes-only descriptor declares none.
pub const DEFAULT_MINIMUM_VERSION: &str = "VERSION 3.0";

/// Advisory size threshold in bytes (20 MB). Exceeding it only warns.
pub const DEFAULT_SIZE_THRESHOLD: u64 = 20_000_000;
