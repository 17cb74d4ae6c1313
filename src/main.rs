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

use clap::{Parser, Subcommand};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

use pex::pin_table::LoadError;
use pex::stream::{self, StreamError};
use pex::{build_pinfile, process_pinfile, replace_pins, split_pinfile};
use pex::{ErrorPolicy, PinTable, Report};

#[derive(Parser, Debug)]
#[clap(
    author = "Antmicro",
    version = "0.0.1",
    about = "PEX - Pinfile EXpander",
    long_about = None
)]
struct Args {
    #[clap(subcommand)]
    command: SubCommands,
}

#[derive(Parser, Debug)]
struct ExpandCmd {
    #[clap(help = "Pinfile to expand (stdin if omitted)")]
    input: Option<PathBuf>,
    #[clap(help = "Output file (stdout if omitted)")]
    output: Option<PathBuf>,
    #[clap(long, help = "Report every failing line instead of stopping at the first one")]
    keep_going: bool,
}

#[derive(Parser, Debug)]
struct ReplaceCmd {
    #[clap(long, help = "Pin table (.json/.yaml/.yml, optionally .gz)")]
    pins: PathBuf,
    #[clap(help = "Expanded pinfile (stdin if omitted)")]
    input: Option<PathBuf>,
    #[clap(help = "Output file (stdout if omitted)")]
    output: Option<PathBuf>,
    #[clap(long, help = "Report every unknown pin instead of stopping at the first one")]
    keep_going: bool,
}

#[derive(Parser, Debug)]
struct BuildCmd {
    #[clap(long, help = "Pin table (.json/.yaml/.yml, optionally .gz)")]
    pins: PathBuf,
    #[clap(help = "Pinfile to expand (stdin if omitted)")]
    input: Option<PathBuf>,
    #[clap(help = "Output file (stdout if omitted)")]
    output: Option<PathBuf>,
    #[clap(long, help = "Report every failing line instead of stopping at the first one")]
    keep_going: bool,
}

#[derive(Subcommand, Debug)]
enum SubCommands {
    /// Expand index specifiers into one line per index pair
    Expand(ExpandCmd),
    /// Substitute pin locations in an already expanded pinfile
    Replace(ReplaceCmd),
    /// Expand a pinfile and substitute pin locations
    Build(BuildCmd),
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error(transparent)]
    PinTable(#[from] LoadError),
    #[error("{}", .0.join("\n"))]
    Failed(Vec<String>),
}

fn policy(keep_going: bool) -> ErrorPolicy {
    if keep_going {
        ErrorPolicy::Continue
    } else {
        ErrorPolicy::Halt
    }
}

/* Lines processed before a failure are written out as well */
fn finish<E>(report: Report<E>, output: Option<&Path>) -> Result<(), CliError> where
    E: Display
{
    let mut writer = stream::open_output(output)?;
    stream::write_lines(&mut *writer, &report.lines)?;

    if report.is_clean() {
        Ok(())
    } else {
        Err(CliError::Failed(report.errors.iter().map(ToString::to_string).collect()))
    }
}

fn expand(args: ExpandCmd) -> Result<(), CliError> {
    let content = stream::read_input(args.input.as_deref())?;
    let report = process_pinfile(split_pinfile(&content), policy(args.keep_going));
    finish(report, args.output.as_deref())
}

fn replace(args: ReplaceCmd) -> Result<(), CliError> {
    let table = PinTable::load(&args.pins)?;
    let content = stream::read_input(args.input.as_deref())?;
    let report = replace_pins(content.trim().lines(), &table, policy(args.keep_going));
    finish(report, args.output.as_deref())
}

fn build(args: BuildCmd) -> Result<(), CliError> {
    let table = PinTable::load(&args.pins)?;
    let content = stream::read_input(args.input.as_deref())?;
    let report = build_pinfile(&content, &table, policy(args.keep_going));
    finish(report, args.output.as_deref())
}

fn main() {
    let args = Args::parse();

    let result = match args.command {
        SubCommands::Expand(sargs) => expand(sargs),
        SubCommands::Replace(sargs) => replace(sargs),
        SubCommands::Build(sargs) => build(sargs),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
