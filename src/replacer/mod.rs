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

/* Second stage of the pipeline: swaps the right-hand name of every expanded
 * row (`LEDR[0], SW[0]`) for the physical location it is bound to. */

use thiserror::Error;

use crate::common::*;
use crate::pin_table::PinTable;
#[allow(unused)]
use crate::log::*;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("Error({line}). Cannot parse expanded line '{text}'.")]
    UnparsableLine {
        line: usize,
        text: String,
    },
    #[error("Error({line}). No pin associated with name '{name}'.")]
    UnknownPinName {
        line: usize,
        name: String,
    },
}

impl ReplaceError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnparsableLine { line, .. } | Self::UnknownPinName { line, .. } => *line,
        }
    }
}

/// Replaces the pin name of a single line. `line_no` is only used for error
/// reporting.
pub fn replace_line(line: &str, line_no: usize, table: &PinTable)
    -> Result<String, ReplaceError>
{
    if is_blank(line) {
        return Ok(line.to_string());
    }

    let name_match = EXPANDED_LINE.captures(line)
        .and_then(|caps| caps.get(2))
        .ok_or_else(|| ReplaceError::UnparsableLine {
            line: line_no,
            text: line.to_string(),
        })?;

    let raw_name = name_match.as_str();
    let name = raw_name.trim().to_uppercase();
    if name == HEADER_LOCATION {
        return Ok(line.to_string());
    }

    let location = table.lookup(&name).ok_or_else(|| ReplaceError::UnknownPinName {
        line: line_no,
        name: name.clone(),
    })?;

    let indent = raw_name.len() - raw_name.trim_start().len();
    let replaced = format!(
        "{}{}{}",
        &line[.. name_match.start()],
        &raw_name[.. indent],
        location
    );
    dbg_log!(DBG_EXTRA, "{} -> {}", name, location);

    Ok(replaced)
}

pub fn replace_pins<I, S>(lines: I, table: &PinTable, policy: ErrorPolicy)
    -> Report<ReplaceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = Report::new();

    for (idx, line) in lines.into_iter().enumerate() {
        match replace_line(line.as_ref(), idx + 1, table) {
            Ok(replaced) => report.lines.push(replaced),
            Err(error) => {
                if !report.record_error(error, policy) {
                    break;
                }
            },
        }
    }

    dbg_log!(
        DBG_INFO,
        "Replaced pins in {} lines with {} errors",
        report.lines.len(), report.errors.len()
    );
    report
}

/// Replaces every pin name, stopping at the first unknown one.
pub fn replace_all<I, S>(lines: I, table: &PinTable) -> Result<Vec<String>, ReplaceError> where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    replace_pins(lines, table, ErrorPolicy::Halt).into_first_error()
}
