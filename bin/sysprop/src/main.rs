// Copyright 2024 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Prints runtime environment properties.
//!
//! With no arguments, every property is printed as a `KEY : VALUE` line.
//! With arguments, each named property's value is printed on its own line in
//! the given order; an unset property prints a blank line.

use std::io::{BufWriter, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cliutil::cli_main;

mod properties;

use crate::properties::PropertyStore;

#[derive(Parser, Debug)]
#[clap(about = "Prints runtime environment properties", version, long_about = None)]
struct Cli {
    /// Names of the properties to print, one value per line in the given
    /// order. With no names, every property is printed as a `KEY : VALUE`
    /// line instead.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,
}

fn do_main() -> Result<()> {
    let args = Cli::try_parse()?;

    let store = PropertyStore::from_env();
    tracing::debug!("Captured {} properties", store.len());

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    properties::run(&store, &args.keys, &mut out)?;
    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    cli_main(do_main)
}
