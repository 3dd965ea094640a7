// Copyright 2024 The ChromiumOS Authors
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

//! Snapshot of the runtime environment properties, and the two print modes
//! operating on it.

use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;

/// An immutable snapshot of the properties the host platform exposes to this
/// process, taken at construction time.
pub struct PropertyStore {
    entries: HashMap<String, String>,
}

impl PropertyStore {
    /// Captures the current process environment. Keys and values that are not
    /// valid UTF-8 are converted lossily rather than rejected.
    pub fn from_env() -> Self {
        std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|value| value.as_str())
    }

    /// Writes every property as a `KEY : VALUE` line. Iteration order is
    /// whatever the underlying map provides; callers must not rely on it.
    fn dump(&self, out: &mut impl Write) -> Result<()> {
        for (key, value) in &self.entries {
            writeln!(out, "{} : {}", key, value)?;
        }
        Ok(())
    }

    /// Writes the value bound to each requested key, one line per key in the
    /// given order. A key with no binding produces a blank line, not an error.
    fn lookup(&self, keys: &[String], out: &mut impl Write) -> Result<()> {
        for key in keys {
            writeln!(out, "{}", self.get(key).unwrap_or_default())?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Prints all properties when `keys` is empty, or the values bound to the
/// named keys otherwise. Supplying any key switches to lookup mode; the two
/// modes are never mixed within one invocation.
pub fn run(store: &PropertyStore, keys: &[String], out: &mut impl Write) -> Result<()> {
    if keys.is_empty() {
        store.dump(out)
    } else {
        store.lookup(keys, out)
    }
}
