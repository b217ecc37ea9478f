/*
Reader for the plain text road map format:

    # comment
    .locations
    <key>, <location name>, <latitude>, <longitude>
    .roads
    <from key>, <to key>, <kilometers>

Fields are trimmed, blank lines and comment lines are skipped. A line that cannot be
turned into a location or road is logged and skipped; only I/O failures abort.
*/

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use fnv::FnvHashMap;
use log::{debug, error};
use thiserror::Error;

use crate::roadmap::RoadMap;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("could not read road map: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read road map: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
    None,
    Locations,
    Roads,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReadReport {
    pub lines: usize,
    pub locations: usize,
    pub roads: usize,
    pub skipped: usize,
    /// Skip reasons and how often each occurred.
    pub problems: FnvHashMap<&'static str, usize>,
}

pub fn read_map_file(path: impl AsRef<Path>) -> Result<(RoadMap, ReadReport), ReadError> {
    let file = std::fs::File::open(path)?;
    read_map(file)
}

pub fn read_map(input: impl Read) -> Result<(RoadMap, ReadReport), ReadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let mut map = RoadMap::new();
    let mut report = ReadReport::default();
    let mut section = Section::None;
    let mut record = StringRecord::new();

    loop {
        match rdr.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {}
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                report.lines += 1;
                skip(&mut report, "unreadable line", &err.to_string());
                continue;
            }
        }
        // whitespace-only line
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        report.lines += 1;
        let line_number = record.position().map_or(0, |p| p.line());

        match record.get(0) {
            Some(".locations") if record.len() == 1 => section = Section::Locations,
            Some(".roads") if record.len() == 1 => section = Section::Roads,
            _ => {
                let outcome = match section {
                    Section::Locations => parse_location(&record, &mut map),
                    Section::Roads => parse_road(&record, &mut map),
                    Section::None => Err(("outside of section", String::new())),
                };
                match outcome {
                    Ok(()) if section == Section::Locations => report.locations += 1,
                    Ok(()) => report.roads += 1,
                    Err((reason, detail)) => {
                        let line = record.iter().collect::<Vec<_>>().join(", ");
                        skip(
                            &mut report,
                            reason,
                            &format!("Line {}: '{}': {} {}", line_number, line, reason, detail),
                        );
                    }
                }
            }
        }
    }

    debug!(
        "Read {} lines: {} locations, {} roads, {} skipped",
        report.lines, report.locations, report.roads, report.skipped
    );
    Ok((map, report))
}

fn skip(report: &mut ReadReport, reason: &'static str, message: &str) {
    error!("{}", message);
    report.skipped += 1;
    *report.problems.entry(reason).or_insert(0) += 1;
}

type LineResult = Result<(), (&'static str, String)>;

fn parse_number(field: &str, what: &'static str) -> Result<f64, (&'static str, String)> {
    field.parse::<f64>().map_err(|_| (what, format!("'{}'", field)))
}

fn parse_location(record: &StringRecord, map: &mut RoadMap) -> LineResult {
    if record.len() != 4 {
        return Err(("invalid location line", format!("({} fields)", record.len())));
    }
    let latitude = parse_number(&record[2], "invalid latitude")?;
    let longitude = parse_number(&record[3], "invalid longitude")?;
    map.create_location(&record[0], &record[1], latitude, longitude)
        .map(|_| ())
        .map_err(|err| ("could not create location", err.to_string()))
}

fn parse_road(record: &StringRecord, map: &mut RoadMap) -> LineResult {
    if record.len() != 3 {
        return Err(("invalid road line", format!("({} fields)", record.len())));
    }
    let km = parse_number(&record[2], "invalid distance")?;
    map.connect(&record[0], &record[1], km)
        .map_err(|err| ("could not create road", err.to_string()))
}
