// Copyright 2024 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Common scaffolding for the command-line programs in this repository.

use std::ffi::OsStr;
use std::fmt::Debug;
use std::process::{ExitCode, Termination};

use itertools::Itertools;

mod logging;

pub use crate::logging::{LoggingConfig, CONSOLE_LOG_ENV, LOG_DIR_ENV, LOG_FILE_ENV};

/// Runs a program's entry function with logging configured from the
/// environment, and turns its result into the process exit code.
///
/// The invoked command line is logged first, so failing invocations can be
/// reproduced from the logs alone. On failure the error is printed to stderr
/// as a `FATAL:` line prefixed with the process name, and the process exits
/// with a failure status.
pub fn cli_main<F, T, E>(main: F) -> ExitCode
where
    F: FnOnce() -> Result<T, E>,
    T: Termination,
    E: Debug,
{
    LoggingConfig::from_env()
        .and_then(|config| config.setup())
        .unwrap();

    let command_line = std::env::args()
        .map(|arg| shell_escape::escape(arg.into()))
        .join(" ");
    tracing::info!("COMMAND: {command_line}");

    match main() {
        Ok(value) => value.report(),
        Err(error) => {
            eprintln!("FATAL: {}: {:?}", process_name(), error);
            ExitCode::FAILURE
        }
    }
}

/// Returns the current executable's file name, or `__unknown__` if it failed
/// to get one.
pub(crate) fn process_name() -> String {
    let current_exe = std::env::current_exe().unwrap_or_default();
    current_exe
        .file_name()
        .unwrap_or(OsStr::new("__unknown__"))
        .to_string_lossy()
        .into_owned()
}
