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

use thiserror::Error;

use crate::common::*;
use crate::pin_table::PinTable;
use crate::pinfile::{process_pinfile, LineError};
use crate::replacer::{replace_pins, ReplaceError};
#[allow(unused)]
use crate::log::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Expansion failed. {0}")]
    Expand(#[from] LineError),
    #[error("Pin replacement failed. {0}")]
    Replace(#[from] ReplaceError),
}

/// Runs the whole pipeline over the text of a pinfile: header stripping,
/// expansion and pin replacement.
///
/// With `ErrorPolicy::Halt` a failing expansion stops the pipeline before the
/// replacer runs, so the report carries that single error and no rows. With
/// `ErrorPolicy::Continue` the replacer works on whatever was expanded and
/// expansion errors are listed before replacement errors.
pub fn build_pinfile(content: &str, table: &PinTable, policy: ErrorPolicy)
    -> Report<BuildError>
{
    let expanded = process_pinfile(split_pinfile(content), policy);

    if policy == ErrorPolicy::Halt && !expanded.is_clean() {
        dbg_log!(DBG_INFO, "Expansion halted, skipping pin replacement");
        return Report {
            lines: Vec::new(),
            errors: expanded.errors.into_iter().map(BuildError::from).collect(),
        };
    }

    let replaced = replace_pins(&expanded.lines, table, policy);

    dbg_log!(
        DBG_INFO,
        "Built pinfile: {} expansion errors, {} replacement errors",
        expanded.errors.len(), replaced.errors.len()
    );

    Report {
        lines: replaced.lines,
        errors: expanded.errors.into_iter()
            .map(BuildError::from)
            .chain(replaced.errors.into_iter().map(BuildError::from))
            .collect(),
    }
}
