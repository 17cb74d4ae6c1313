/* Copyright (C) 2022 Antmicro
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     https://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Deserialize;
use thiserror::Error;

#[allow(unused)]
use crate::log::*;

#[cfg(test)]
mod tests;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Couldn't open pin table {path}: {source}")]
    CantOpenFile {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed JSON pin table: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed YAML pin table: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Unrecognized pin table format of {0} (expected .json, .yaml or .yml, optionally followed by .gz)")]
    UnknownFormat(String),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TableFormat {
    Json,
    Yaml,
}

pub struct OpenOpts {
    /// Format of the table. Guessed from the file extension if `None`.
    pub format: Option<TableFormat>,
    /// Whether the file is gzip-compressed. Guessed from a `.gz` extension if `None`.
    pub gzip: Option<bool>,
}

impl Default for OpenOpts {
    fn default() -> Self {
        Self {
            format: None,
            gzip: None,
        }
    }
}

/* `board.json.gz` -> (Some(Json), true) */
fn guess_format(path: &Path) -> (Option<TableFormat>, bool) {
    let name = path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let gzip = name.ends_with(".gz");
    let stem = if gzip { &name[.. name.len() - 3] } else { &name[..] };

    let format = if stem.ends_with(".json") {
        Some(TableFormat::Json)
    } else if stem.ends_with(".yaml") || stem.ends_with(".yml") {
        Some(TableFormat::Yaml)
    } else {
        None
    };

    (format, gzip)
}

/// Maps fully-qualified signal names (`SW[0]`, `CLOCK_50`) to physical pin
/// locations. Names are case-insensitive.
#[derive(Clone, Default, PartialEq, Eq, Debug, Deserialize)]
#[serde(from = "HashMap<String, String>")]
pub struct PinTable {
    pins: HashMap<String, String>,
}

impl From<HashMap<String, String>> for PinTable {
    fn from(pins: HashMap<String, String>) -> Self {
        pins.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for PinTable where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let pins = iter.into_iter()
            .map(|(name, location)| (name.as_ref().to_uppercase(), location.into()))
            .collect();
        Self { pins }
    }
}

impl PinTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K, V>(&mut self, name: K, location: V) -> Option<String> where
        K: AsRef<str>,
        V: Into<String>,
    {
        self.pins.insert(name.as_ref().to_uppercase(), location.into())
    }

    /// Location of the pin bound to `name`, looked up case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.pins.get(&name.to_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn from_reader<R>(reader: R, format: TableFormat) -> Result<Self, LoadError> where
        R: Read
    {
        let reader = BufReader::new(reader);
        let table: Self = match format {
            TableFormat::Json => serde_json::from_reader(reader)?,
            TableFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        Ok(table)
    }

    pub fn open<P>(path: P, opts: OpenOpts) -> Result<Self, LoadError> where
        P: AsRef<Path>
    {
        let path = path.as_ref();
        let (guessed_format, guessed_gzip) = guess_format(path);
        let format = opts.format.or(guessed_format)
            .ok_or_else(|| LoadError::UnknownFormat(path.display().to_string()))?;
        let gzip = opts.gzip.unwrap_or(guessed_gzip);

        let file = File::open(path).map_err(|source| LoadError::CantOpenFile {
            path: path.display().to_string(),
            source,
        })?;

        let table = if gzip {
            Self::from_reader(GzDecoder::new(file), format)?
        } else {
            Self::from_reader(file, format)?
        };

        dbg_log!(
            DBG_INFO,
            "Loaded {} pins from {} ({:?}, gzip: {})",
            table.len(), path.display(), format, gzip
        );
        Ok(table)
    }

    /// Same as `Self::open` with everything guessed from the file name.
    pub fn load<P>(path: P) -> Result<Self, LoadError> where
        P: AsRef<Path>
    {
        Self::open(path, OpenOpts::default())
    }
}
