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
use crate::specifier::{self, Family, ResolveError, Specifier};
#[allow(unused)]
use crate::log::*;


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineErrorKind {
    #[error("Cannot parse line.\n{0}")]
    UnparsableLine(String),
    #[error("{source}\nCulprit: {culprit}")]
    Specifier {
        culprit: String,
        source: ResolveError,
    },
    #[error("Cannot have two implicit specifiers!\nCulprits: '{left}' '{right}'")]
    TwoImplicitSpecifiers {
        left: String,
        right: String,
    },
    #[error(
        "Cannot have two specifiers with different index lengths.\n\
        Culprits: '{left}' ({left_len} indices), '{right}' ({right_len} indices)"
    )]
    LengthMismatch {
        left: String,
        left_len: usize,
        right: String,
        right_len: usize,
    },
}

/// A failure annotated with the 1-based number of the offending line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error at Line Number: {line}\n{kind}")]
pub struct LineError {
    pub line: usize,
    pub kind: LineErrorKind,
}

/// Shape of a single pinfile line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Line<'l> {
    /// `NAME0[SPEC0], NAME1[SPEC1]`
    Binding(Binding<'l>),
    /// `NAME0, NAME1`, copied to the output as is.
    Basic(&'l str),
    /// Whitespace only, copied to the output as is.
    Blank(&'l str),
}

/// Trimmed parts of a dual-specifier line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Binding<'l> {
    pub names: [&'l str; 2],
    pub specifiers: [&'l str; 2],
}

impl<'l> Line<'l> {
    pub fn classify(line: &'l str) -> Result<Self, LineErrorKind> {
        if let Some(caps) = BINDING_LINE.captures(line) {
            let part = |i: usize| caps.get(i).map_or("", |m| m.as_str().trim());
            return Ok(Self::Binding(Binding {
                names: [part(1), part(3)],
                specifiers: [part(2), part(4)],
            }));
        }
        if BASIC_LINE.is_match(line) {
            return Ok(Self::Basic(line));
        }
        if is_blank(line) {
            return Ok(Self::Blank(line));
        }
        Err(LineErrorKind::UnparsableLine(line.to_string()))
    }

    /// Output rows produced by this line.
    pub fn expand(&self) -> Result<Vec<String>, LineErrorKind> {
        match self {
            Self::Binding(binding) => binding.expand(),
            Self::Basic(line) | Self::Blank(line) => Ok(vec![line.to_string()]),
        }
    }
}

fn resolve_side(text: &str) -> Result<Specifier, LineErrorKind> {
    specifier::resolve(text).map_err(|source| blame(text, source))
}

fn blame(culprit: &str, source: ResolveError) -> LineErrorKind {
    LineErrorKind::Specifier { culprit: culprit.to_string(), source }
}

impl<'l> Binding<'l> {
    /// Resolves both sides against each other.
    pub fn resolve(&self) -> Result<[Specifier; 2], LineErrorKind> {
        let mut left = resolve_side(self.specifiers[0])?;
        let mut right = resolve_side(self.specifiers[1])?;

        match (left.family(), right.family()) {
            (Family::Implicit, Family::Implicit) => {
                return Err(LineErrorKind::TwoImplicitSpecifiers {
                    left: left.text().to_string(),
                    right: right.text().to_string(),
                });
            },
            (Family::Implicit, Family::Explicit) => {
                left.resolve_against(&right).map_err(|e| blame(left.text(), e))?;
            },
            (Family::Explicit, Family::Implicit) => {
                right.resolve_against(&left).map_err(|e| blame(right.text(), e))?;
            },
            (Family::Explicit, Family::Explicit) => (),
        }

        Ok([left, right])
    }

    pub fn expand(&self) -> Result<Vec<String>, LineErrorKind> {
        let [left, right] = self.resolve()?;
        let left_content = left.resolved().map_err(|e| blame(left.text(), e))?;
        let right_content = right.resolved().map_err(|e| blame(right.text(), e))?;

        if left_content.len() != right_content.len() {
            return Err(LineErrorKind::LengthMismatch {
                left: left.text().to_string(),
                left_len: left_content.len(),
                right: right.text().to_string(),
                right_len: right_content.len(),
            });
        }

        let [left_name, right_name] = self.names;
        Ok(left_content.iter()
            .zip(right_content)
            .map(|(l, r)| format!("{}[{}], {}[{}]", left_name, l, right_name, r))
            .collect())
    }
}

pub fn process_line(line: &str) -> Result<Vec<String>, LineErrorKind> {
    Line::classify(line)?.expand()
}

/// Expands the body of a pinfile (header already stripped, see
/// `common::split_pinfile`). The output starts with the `To, Location` header.
pub fn process_pinfile<I, S>(lines: I, policy: ErrorPolicy) -> Report<LineError> where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = Report::new();
    report.lines.push(OUTPUT_HEADER.to_string());

    for (idx, line) in lines.into_iter().enumerate() {
        match process_line(line.as_ref()) {
            Ok(rows) => {
                dbg_log!(DBG_EXTRA, "Line {} expanded into {} rows", idx + 1, rows.len());
                report.lines.extend(rows);
            },
            Err(kind) => {
                let error = LineError { line: idx + 1, kind };
                if !report.record_error(error, policy) {
                    break;
                }
            },
        }
    }

    dbg_log!(
        DBG_INFO,
        "Expanded pinfile into {} lines with {} errors",
        report.lines.len(), report.errors.len()
    );
    report
}

/// Expands the body of a pinfile, stopping at the first error.
pub fn expand_pinfile<I, S>(lines: I) -> Result<Vec<String>, LineError> where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    process_pinfile(lines, ErrorPolicy::Halt).into_first_error()
}
