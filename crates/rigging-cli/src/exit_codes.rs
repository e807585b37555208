//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

#![allow(dead_code)]

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Config error - Rig.yaml missing, malformed, or naming unknown kinds
pub const CONFIG_ERROR: i32 = 2;

/// Synthesis error - a workload violates a build-time rule
pub const SYNTHESIS_ERROR: i32 = 3;

/// IO error - output could not be written
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
