// Copyright 2024 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Logging configuration for CLI programs.
//!
//! Log records go to stderr so that stdout stays reserved for program output.
//! `SYSPROP_LOG_CONSOLE=0` silences the console writer; `SYSPROP_LOG_FILE`
//! or `SYSPROP_LOG_DIR` add a file writer. Filtering follows `RUST_LOG`,
//! defaulting to INFO.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;

/// Names a file to write logs to. Mutually exclusive with [`LOG_DIR_ENV`].
pub const LOG_FILE_ENV: &str = "SYSPROP_LOG_FILE";

/// Names a directory to write logs to; the file name is derived from the
/// process name and a timestamp, so concurrent invocations don't collide.
pub const LOG_DIR_ENV: &str = "SYSPROP_LOG_DIR";

/// If set to "0", nothing is logged to the console.
pub const CONSOLE_LOG_ENV: &str = "SYSPROP_LOG_CONSOLE";

/// Where log records are written. Built from the environment with
/// [`LoggingConfig::from_env`], then installed with [`LoggingConfig::setup`].
pub struct LoggingConfig {
    console: Option<EnvFilter>,
    file: Option<(PathBuf, EnvFilter)>,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self> {
        let file_path = match (
            std::env::var_os(LOG_FILE_ENV),
            std::env::var_os(LOG_DIR_ENV),
        ) {
            (Some(_), Some(_)) => {
                bail!("You can't have both {LOG_FILE_ENV} and {LOG_DIR_ENV} set")
            }
            (Some(file), None) => Some(PathBuf::from(file)),
            (None, Some(dir)) => Some(Path::new(&dir).join(unique_log_name())),
            (None, None) => None,
        };

        let console = match std::env::var(CONSOLE_LOG_ENV).ok().as_deref() {
            Some("0") => None,
            _ => Some(default_filter()?),
        };

        let file = match file_path {
            Some(path) => Some((path, default_filter()?)),
            None => None,
        };

        Ok(Self { console, file })
    }

    /// Installs the global tracing subscriber. Call at most once per process.
    pub fn setup(self) -> Result<()> {
        let mut layers = Vec::new();

        if let Some(filter) = self.console {
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr)
                    .with_filter(filter)
                    .boxed(),
            );
        }

        if let Some((path, filter)) = self.file {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to open log file {path:?}"))?;
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(filter)
                    .boxed(),
            );
        }

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .context("Failed to start tracing; another subscriber is already running")?;

        Ok(())
    }
}

fn default_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?)
}

fn unique_log_name() -> String {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}.{nanos}.log", crate::process_name())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A single test covers both the conflict check and the file writer: the
    // tracing library only allows one global subscriber per process, and
    // parallel tests mutating the same environment variables would race.
    #[test]
    fn setup_logging_works() -> Result<()> {
        const INFO_MESSAGE: &str = "log at level info";
        const WARN_MESSAGE: &str = "log at level warn";
        const DEBUG_MESSAGE: &str = "log at level debug";

        let dir = tempfile::TempDir::new()?;
        let log_file = dir.path().join("out.log");
        std::env::set_var("RUST_LOG", "INFO");
        std::env::set_var(LOG_FILE_ENV, &log_file);
        std::env::set_var(LOG_DIR_ENV, dir.path());
        // Checking console output would just pollute stderr.
        std::env::set_var(CONSOLE_LOG_ENV, "0");

        assert!(LoggingConfig::from_env().is_err());
        std::env::remove_var(LOG_DIR_ENV);

        LoggingConfig::from_env()?.setup()?;

        tracing::warn!("{}", WARN_MESSAGE);
        tracing::info!("{}", INFO_MESSAGE);
        tracing::debug!("{}", DEBUG_MESSAGE);

        let log_content = std::fs::read_to_string(&log_file)?;
        assert!(
            !log_content.contains(DEBUG_MESSAGE),
            "Found unexpected debug message in {}",
            log_content
        );
        assert!(
            log_content.contains(INFO_MESSAGE),
            "Unable to find info message in {}",
            log_content
        );
        assert!(
            log_content.contains(WARN_MESSAGE),
            "Unable to find warn message in {}",
            log_content
        );

        Ok(())
    }
}
