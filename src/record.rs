use crate::error::{BaconError, Result};

/// One line of the input feed: a performer credited in a production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub performer: String,
    pub production: String,
}

impl Record {
    /// Builds a record, rejecting empty fields. `line` is only used for the
    /// error report.
    pub fn new(
        performer: impl Into<String>,
        production: impl Into<String>,
        line: usize,
    ) -> Result<Self> {
        let performer = performer.into();
        let production = production.into();
        if performer.is_empty() || production.is_empty() {
            return Err(BaconError::MalformedRecord {
                line,
                text: format!("{}|{}", performer, production),
            });
        }
        Ok(Self {
            performer,
            production,
        })
    }

    /**
     *  Parse `PERFORMER<sep>PRODUCTION`.
     *
     *  Exactly two non-empty fields are required; a trailing '\r' is dropped
     *  so that CRLF feeds parse the same as LF ones.
     */
    pub fn parse(text: &str, separator: char, line: usize) -> Result<Self> {
        let text = text.strip_suffix('\r').unwrap_or(text);
        let malformed = || BaconError::MalformedRecord {
            line,
            text: text.to_string(),
        };

        let mut fields = text.split(separator);
        let performer = fields.next().ok_or_else(malformed)?;
        let production = fields.next().ok_or_else(malformed)?;
        if fields.next().is_some() {
            return Err(malformed());
        }
        Record::new(performer, production, line).map_err(|_| malformed())
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Record {
    fn from((performer, production): (A, B)) -> Self {
        Self {
            performer: performer.into(),
            production: production.into(),
        }
    }
}
