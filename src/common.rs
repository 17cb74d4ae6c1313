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

use regex::Regex;

#[allow(unused)]
use crate::log::*;

/* Line-level grammars shared by the expansion and replacement stages.
 * `[[:word:]]` is used instead of `\w` to keep names ASCII-only. */
lazy_static! {
    /* NAME0[SPEC0], NAME1[SPEC1] */
    pub static ref BINDING_LINE: Regex = Regex::new(
        r"([[:word:]]+)\[([^\]]+)\]\s*,\s*([[:word:]]+)\[([^\]]+)\]"
    ).unwrap();

    /* NAME0, NAME1 */
    pub static ref BASIC_LINE: Regex =
        Regex::new(r"([[:word:]]+)\s*,\s*([[:word:]]+)").unwrap();

    pub static ref BLANK_LINE: Regex = Regex::new(r"^\s*$").unwrap();

    pub static ref HEADER_LINE: Regex =
        Regex::new(r"(?i)\s*TO\s*,\s*LOCATION\s*").unwrap();

    /* Shape of every row produced by the expansion stage */
    pub static ref EXPANDED_LINE: Regex = Regex::new(r"([^,]+),(.*)$").unwrap();
}

/// Header row written at the top of every expanded pinfile.
pub const OUTPUT_HEADER: &str = "To, Location";

/// Name found on the right-hand side of the header row.
pub const HEADER_LOCATION: &str = "LOCATION";

pub fn is_blank(line: &str) -> bool {
    BLANK_LINE.is_match(line)
}

/// Trims the whole pinfile text, splits it into lines and drops a leading
/// `TO, LOCATION` header if there is one.
pub fn split_pinfile(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.trim().lines().collect();
    if lines.first().map_or(false, |first| HEADER_LINE.is_match(first)) {
        lines.remove(0);
        dbg_log!(DBG_EXTRA, "Dropped pinfile header");
    }
    lines
}

/// What to do after a line fails to process.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ErrorPolicy {
    /// Stop at the first failing line.
    Halt,
    /// Record the error and carry on with the next line.
    Continue,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self::Halt
    }
}

/// Output of a line-oriented stage together with the errors it ran into.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Report<E> {
    pub lines: Vec<String>,
    pub errors: Vec<E>,
}

impl<E> Report<E> {
    pub fn new() -> Self {
        Self { lines: Vec::new(), errors: Vec::new() }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /* Returns whether processing should go on */
    pub fn record_error(&mut self, error: E, policy: ErrorPolicy) -> bool
    where
        E: std::fmt::Display
    {
        dbg_log!(DBG_WARN, "{}", error);
        self.errors.push(error);
        policy == ErrorPolicy::Continue
    }

    /// Successful output, or every recorded error.
    pub fn into_result(self) -> Result<Vec<String>, Vec<E>> {
        if self.errors.is_empty() {
            Ok(self.lines)
        } else {
            Err(self.errors)
        }
    }

    /// Successful output, or the first recorded error.
    pub fn into_first_error(self) -> Result<Vec<String>, E> {
        match self.errors.into_iter().next() {
            None => Ok(self.lines),
            Some(error) => Err(error),
        }
    }
}

impl<E> Default for Report<E> {
    fn default() -> Self {
        Self::new()
    }
}
