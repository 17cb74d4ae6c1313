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

/* Index specifiers are the compact things between brackets in a pinfile, eg.
 * `0..7` in `LEDR[0..7]`. Every specifier belongs to one of two families:
 *   * explicit specifiers describe their indices on their own,
 *   * implicit specifiers borrow the content or the length of an explicit
 *     specifier found on the other side of the same line.
 */

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

#[allow(unused)]
use crate::log::*;

#[cfg(test)]
mod tests;

pub type Index = u64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Specifier '{0}' matched no known formats.")]
    UnrecognizedSpecifier(String),
    #[error("Number '{0}' is too large to be used as an index.")]
    NumberOutOfRange(String),
    #[error("Step of a {0} specifier cannot be zero.")]
    ZeroStep(&'static str),
    #[error("Expanding a {0} specifier produces an index outside of the valid range.")]
    IndexOutOfRange(&'static str),
    #[error("Specifier '{0}' has not been resolved.")]
    Unresolved(String),
    #[error("Implicit specifier '{0}' can only be resolved against an explicit specifier, got '{1}'.")]
    SiblingNotExplicit(String, String),
    #[error("Specifier '{0}' is explicit and cannot be resolved against a sibling.")]
    AlreadyExplicit(String),
    #[error("A {0} specifier needs the content of an explicit sibling.")]
    MissingSibling(&'static str),
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Family {
    Explicit,
    Implicit,
}

/// Closed set of specifier grammars.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Grammar {
    /* Explicit */
    SimpleExplicit,       /* n1,n2,...,nk */
    SimpleRange,          /* a..b */
    StepToEnd,            /* start:step..end */
    StepRange,            /* start:step:length */
    /* Implicit */
    RangeReuse,           /* .. */
    OffsetRangeReuse,     /* offset.. */
    LengthForward,        /* start..# */
    LengthBackward,       /* #..end */
    StepRangeLengthReuse, /* start:step:# */
}

lazy_static! {
    static ref SIMPLE_EXPLICIT: Regex = Regex::new(r"^[0-9]+(?:,[0-9]+)*$").unwrap();
    static ref SIMPLE_RANGE: Regex = Regex::new(r"^([0-9]+)\.\.([0-9]+)$").unwrap();
    static ref STEP_TO_END: Regex =
        Regex::new(r"^([0-9]+):([0-9]+)\.\.([0-9]+)$").unwrap();
    static ref STEP_RANGE: Regex = Regex::new(r"^([0-9]+):([0-9]+):([0-9]+)$").unwrap();
    static ref RANGE_REUSE: Regex = Regex::new(r"^\.\.$").unwrap();
    static ref OFFSET_RANGE_REUSE: Regex = Regex::new(r"^([0-9]+)\.\.$").unwrap();
    static ref LENGTH_FORWARD: Regex = Regex::new(r"^([0-9]+)\.\.#$").unwrap();
    static ref LENGTH_BACKWARD: Regex = Regex::new(r"^#\.\.([0-9]+)$").unwrap();
    static ref STEP_RANGE_LENGTH_REUSE: Regex =
        Regex::new(r"^([0-9]+):([0-9]+):#$").unwrap();
}

impl Grammar {
    /// All grammars in the order they are tried. Explicit grammars go first.
    pub const ALL: [Grammar; 9] = [
        Grammar::SimpleExplicit,
        Grammar::SimpleRange,
        Grammar::StepToEnd,
        Grammar::StepRange,
        Grammar::RangeReuse,
        Grammar::OffsetRangeReuse,
        Grammar::LengthForward,
        Grammar::LengthBackward,
        Grammar::StepRangeLengthReuse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SimpleExplicit => "simpleExplicit",
            Self::SimpleRange => "simpleRange",
            Self::StepToEnd => "stepToEnd",
            Self::StepRange => "stepRange",
            Self::RangeReuse => "rangeReuse",
            Self::OffsetRangeReuse => "offsetRangeReuse",
            Self::LengthForward => "lengthForward",
            Self::LengthBackward => "lengthBackward",
            Self::StepRangeLengthReuse => "stepRangeLengthReuse",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Self::SimpleExplicit | Self::SimpleRange | Self::StepToEnd | Self::StepRange =>
                Family::Explicit,
            Self::RangeReuse
                | Self::OffsetRangeReuse
                | Self::LengthForward
                | Self::LengthBackward
                | Self::StepRangeLengthReuse => Family::Implicit,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::SimpleExplicit => &*SIMPLE_EXPLICIT,
            Self::SimpleRange => &*SIMPLE_RANGE,
            Self::StepToEnd => &*STEP_TO_END,
            Self::StepRange => &*STEP_RANGE,
            Self::RangeReuse => &*RANGE_REUSE,
            Self::OffsetRangeReuse => &*OFFSET_RANGE_REUSE,
            Self::LengthForward => &*LENGTH_FORWARD,
            Self::LengthBackward => &*LENGTH_BACKWARD,
            Self::StepRangeLengthReuse => &*STEP_RANGE_LENGTH_REUSE,
        }
    }

    /// Matches `text` against this grammar. On success returns the trimmed
    /// capture groups. The list elements are the captures of `simpleExplicit`.
    pub fn capture(self, text: &str) -> Option<Vec<String>> {
        let caps = self.pattern().captures(text)?;
        let captures = match self {
            Self::SimpleExplicit => caps[0]
                .split(',')
                .map(|n| n.trim().to_string())
                .collect(),
            _ => caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().trim().to_string())
                .collect(),
        };
        Some(captures)
    }

    /// Expands captures produced by `Self::capture` into indices. Implicit
    /// grammars need the `sibling` content, explicit ones ignore it.
    pub fn expand(self, captures: &[String], sibling: Option<&[Index]>)
        -> Result<Vec<Index>, ResolveError>
    {
        let nums = parse_captures(captures)?;
        let mut args: [Index; 3] = [0; 3];
        for (slot, num) in args.iter_mut().zip(&nums) {
            *slot = *num;
        }
        let arg = |i: usize| args[i];

        match (self, sibling) {
            (Self::SimpleExplicit, _) => Ok(nums),
            (Self::SimpleRange, _) => {
                let (first, second) = (arg(0), arg(1));
                if first <= second {
                    Ok((first ..= second).collect())
                } else {
                    Ok((second ..= first).rev().collect())
                }
            },
            (Self::StepToEnd, _) => step_to_end(arg(0), arg(1), arg(2)),
            (Self::StepRange, _) => {
                /* `length` is the index of the last term, hence `length + 1` terms */
                let terms = arg(2).checked_add(1)
                    .ok_or(ResolveError::IndexOutOfRange(self.name()))?;
                progression(self, arg(0), arg(1), terms, false)
            },
            (Self::RangeReuse, Some(base)) => Ok(base.to_vec()),
            (Self::OffsetRangeReuse, Some(base)) => {
                let offset = arg(0);
                base.iter()
                    .map(|idx| idx.checked_add(offset)
                        .ok_or(ResolveError::IndexOutOfRange(self.name())))
                    .collect()
            },
            (Self::LengthForward, Some(base)) =>
                progression(self, arg(0), 1, base.len() as u64, false),
            (Self::LengthBackward, Some(base)) =>
                progression(self, arg(0), 1, base.len() as u64, true),
            (Self::StepRangeLengthReuse, Some(base)) =>
                progression(self, arg(0), arg(1), base.len() as u64, false),
            (_, None) => Err(ResolveError::MissingSibling(self.name())),
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_captures(captures: &[String]) -> Result<Vec<Index>, ResolveError> {
    captures.iter()
        .map(|c| c.parse::<Index>()
            .map_err(|_| ResolveError::NumberOutOfRange(c.clone())))
        .collect()
}

/* start, start + step, ... while <= end */
fn step_to_end(start: Index, step: Index, end: Index) -> Result<Vec<Index>, ResolveError> {
    if start > end {
        return Ok(Vec::new());
    }
    if step == 0 {
        return Err(ResolveError::ZeroStep(Grammar::StepToEnd.name()));
    }

    let mut content = Vec::new();
    let mut idx = start;
    loop {
        content.push(idx);
        match idx.checked_add(step) {
            Some(next) if next <= end => idx = next,
            _ => break,
        }
    }
    Ok(content)
}

/* Exactly `terms` terms of an arithmetic progression starting at `start`.
 * Goes downwards if `descending` is set. */
fn progression(
    grammar: Grammar,
    start: Index,
    step: Index,
    terms: u64,
    descending: bool
)
    -> Result<Vec<Index>, ResolveError>
{
    (0 .. terms)
        .map(|k| {
            let delta = step.checked_mul(k)?;
            if descending {
                start.checked_sub(delta)
            } else {
                start.checked_add(delta)
            }
        })
        .map(|idx| idx.ok_or(ResolveError::IndexOutOfRange(grammar.name())))
        .collect()
}

/// One side of a pinfile binding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Specifier {
    text: String,
    grammar: Grammar,
    captures: Vec<String>,
    content: Option<Vec<Index>>,
}

impl Specifier {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn grammar(&self) -> Grammar {
        self.grammar
    }

    pub fn family(&self) -> Family {
        self.grammar.family()
    }

    pub fn is_implicit(&self) -> bool {
        self.family() == Family::Implicit
    }

    pub fn captures(&self) -> &[String] {
        &self.captures
    }

    /// Resolved indices. `None` for an implicit specifier that hasn't been
    /// resolved against its sibling yet.
    pub fn content(&self) -> Option<&[Index]> {
        self.content.as_deref()
    }

    pub fn len(&self) -> Option<usize> {
        self.content.as_ref().map(Vec::len)
    }

    pub fn is_resolved(&self) -> bool {
        self.content.is_some()
    }

    /// Same as `Self::content`, but treats missing content as an error.
    pub fn resolved(&self) -> Result<&[Index], ResolveError> {
        self.content()
            .ok_or_else(|| ResolveError::Unresolved(self.text.clone()))
    }

    /// Resolves an implicit specifier using the content of an explicit one.
    /// Explicit specifiers have no use for a sibling and are rejected.
    pub fn resolve_against(&mut self, sibling: &Specifier) -> Result<(), ResolveError> {
        if !self.is_implicit() {
            return Err(ResolveError::AlreadyExplicit(self.text.clone()));
        }
        if self.is_resolved() {
            return Ok(());
        }
        if sibling.is_implicit() {
            return Err(ResolveError::SiblingNotExplicit(
                self.text.clone(),
                sibling.text.clone()
            ));
        }

        let base = sibling.resolved()?;
        let content = self.grammar.expand(&self.captures, Some(base))?;
        dbg_log!(
            DBG_EXTRA,
            "Resolved {} specifier '{}' against '{}': {:?}",
            self.grammar, self.text, sibling.text, content
        );
        self.content = Some(content);
        Ok(())
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Specifier {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

/// Classifies `text` and, for explicit specifiers, expands it right away.
pub fn resolve(text: &str) -> Result<Specifier, ResolveError> {
    let text = text.trim();

    let (grammar, captures) = Grammar::ALL.iter()
        .find_map(|grammar| grammar.capture(text).map(|caps| (*grammar, caps)))
        .ok_or_else(|| ResolveError::UnrecognizedSpecifier(text.to_string()))?;

    let content = match grammar.family() {
        Family::Explicit => Some(grammar.expand(&captures, None)?),
        Family::Implicit => None,
    };

    dbg_log!(
        DBG_EXTRA,
        "Specifier '{}' matched {} with captures {:?}",
        text, grammar, captures
    );

    Ok(Specifier {
        text: text.to_string(),
        grammar,
        captures,
        content,
    })
}
