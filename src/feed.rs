use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::{BaconError, Result};
use crate::record::Record;

/// How the lines of a feed are split and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOptions {
    pub separator: char,
    /// Skip (and log) malformed lines, instead of failing on the first one.
    pub lenient: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            separator: '|',
            lenient: false,
        }
    }
}

/// The validated records of a feed, and how many lines were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub records: Vec<Record>,
    pub skipped: usize,
}

pub fn read_feed<R: BufRead>(reader: R, options: &FeedOptions) -> Result<Feed> {
    let mut feed = Feed::default();
    for (i, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        match decode(bytes, i + 1)
            .and_then(|line| Record::parse(&line, options.separator, i + 1))
        {
            Ok(record) => feed.records.push(record),
            Err(err) if options.lenient => {
                warn!("Skipping: {}", err);
                feed.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }
    debug!(
        "Read {} records ({} skipped)",
        feed.records.len(),
        feed.skipped
    );
    Ok(feed)
}

/// Lines that are not UTF-8 are malformed, like any other bad line.
fn decode(bytes: Vec<u8>, line: usize) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| BaconError::MalformedRecord {
        line,
        text: String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// Read a feed from a file, or from standard input if `path` is "-".
pub fn load_feed(path: &Path, options: &FeedOptions) -> Result<Feed> {
    if path == Path::new("-") {
        debug!("Reading feed from stdin");
        return read_feed(io::stdin().lock(), options);
    }
    debug!("Reading feed from: {}", path.display());
    let file = File::open(path).map_err(|e| BaconError::at_path(e, path))?;
    read_feed(BufReader::new(file), options).map_err(|err| match err {
        BaconError::Io { source, .. } => BaconError::at_path(source, path),
        other => other,
    })
}
