use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::color::ImageResult;
use crate::error::Error;
use crate::Result;

pub const CSV_HEADER: &str = "File or Folder,Red,Green,Blue";
const HEADER_MARKERS: &[&str] = &["File", "Folder", "File or Folder"];
const FIELD_DELIMITER: char = ',';
const LINE_DELIMITER: u8 = b'\n';
const NUMBER_OF_FIELDS: usize = 4;

pub trait ResultsReader {
    fn read_results(&mut self) -> Result<Vec<ImageResult>>;
}

pub trait ResultsWriter {
    fn write_results(&mut self, results: &[ImageResult]) -> Result<()>;
}

pub struct CsvResultsReader<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CsvResultsReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> ResultsReader for CsvResultsReader<R> {
    fn read_results(&mut self) -> Result<Vec<ImageResult>> {
        let mut results = Vec::new();
        let mut buffer = Vec::new();
        let mut line_number = 0;
        loop {
            buffer.clear();
            let bytes_read = self
                .reader
                .read_until(LINE_DELIMITER, &mut buffer)
                .map_err(Error::FailedToReadResults)?;
            if bytes_read == 0 {
                break;
            }
            line_number += 1;
            let parsed = match std::str::from_utf8(&buffer) {
                Ok(line) => parse_line(line.strip_suffix('\n').unwrap_or(line)),
                Err(_) => ParsedLine::Invalid("line is not valid UTF-8"),
            };
            match parsed {
                ParsedLine::Result(result) => results.push(result),
                ParsedLine::Header => log::info!("Skipping header in line {}", line_number),
                ParsedLine::Blank => {}
                ParsedLine::Invalid(reason) => log::warn!(
                    "Skipping line {} '{}': {}",
                    line_number,
                    String::from_utf8_lossy(&buffer).trim_end(),
                    reason
                ),
            }
        }
        if results.is_empty() {
            return Err(Error::EmptyResultSet);
        }
        Ok(results)
    }
}

enum ParsedLine {
    Result(ImageResult),
    Header,
    Blank,
    Invalid(&'static str),
}

fn parse_line(line: &str) -> ParsedLine {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if HEADER_MARKERS.contains(&fields[0]) {
        return ParsedLine::Header;
    }
    if fields.len() != NUMBER_OF_FIELDS {
        return ParsedLine::Invalid("expected name, red, green and blue");
    }
    match (
        parse_channel(fields[1]),
        parse_channel(fields[2]),
        parse_channel(fields[3]),
    ) {
        (Some(red), Some(green), Some(blue)) => {
            ParsedLine::Result(ImageResult::new(fields[0], red, green, blue))
        }
        _ => ParsedLine::Invalid("color values must be integers between 0 and 255"),
    }
}

fn parse_channel(field: &str) -> Option<u8> {
    field.trim().parse().ok()
}

pub struct CsvResultsWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvResultsWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_row(&mut self, result: &ImageResult) -> std::io::Result<()> {
        writeln!(self.writer, "{}", result)
    }
}

impl<W: Write> ResultsWriter for CsvResultsWriter<W> {
    fn write_results(&mut self, results: &[ImageResult]) -> Result<()> {
        if results.is_empty() {
            return Err(Error::EmptyResultSet);
        }
        writeln!(self.writer, "{}", CSV_HEADER).map_err(Error::FailedToWriteResults)?;
        for result in results {
            self.write_row(result).map_err(Error::FailedToWriteResults)?;
        }
        self.writer.flush().map_err(Error::FailedToWriteResults)
    }
}

/// Loads results from the CSV file at `path`.
pub fn read_csv(path: &Path) -> Result<Vec<ImageResult>> {
    log::info!("Opening CSV file {} for reading", path.display());
    let file = File::open(path).map_err(|e| {
        Error::UnableToOpenInputFileForReading(path.to_string_lossy().into_owned(), e)
    })?;
    CsvResultsReader::new(BufReader::new(file)).read_results()
}

/// Saves `results` as a CSV file at `path`. Nothing is created for an empty set.
pub fn write_csv(results: &[ImageResult], path: &Path) -> Result<()> {
    if results.is_empty() {
        return Err(Error::EmptyResultSet);
    }
    log::info!("Opening CSV file {} for writing", path.display());
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            Error::UnableToOpenOutputFileForWriting(path.to_string_lossy().into_owned(), e)
        })?;
    CsvResultsWriter::new(BufWriter::new(file)).write_results(results)
}
