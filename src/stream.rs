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

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Couldn't open {path}: {source}")]
    CantOpenFile {
        path: String,
        source: io::Error,
    },
    #[error("Couldn't read input: {0}")]
    Read(io::Error),
    #[error("Couldn't write output: {0}")]
    Write(io::Error),
}

/// Reads the whole input. `None` means standard input.
pub fn read_input(path: Option<&Path>) -> Result<String, StreamError> {
    let mut content = String::new();
    match path {
        Some(path) => {
            let mut file = File::open(path).map_err(|source| StreamError::CantOpenFile {
                path: path.display().to_string(),
                source,
            })?;
            file.read_to_string(&mut content).map_err(StreamError::Read)?;
        },
        None => {
            io::stdin().read_to_string(&mut content).map_err(StreamError::Read)?;
        },
    }
    Ok(content)
}

/// Opens the output for writing. `None` means standard output.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, StreamError> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path).map_err(|source| StreamError::CantOpenFile {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        },
        None => Box::new(BufWriter::new(io::stdout())),
    };
    Ok(writer)
}

/// Writes newline-terminated lines and flushes the writer.
pub fn write_lines<W, I, S>(writer: &mut W, lines: I) -> Result<(), StreamError> where
    W: Write + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(StreamError::Write)?;
    }
    writer.flush().map_err(StreamError::Write)
}
