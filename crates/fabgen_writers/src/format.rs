//! Output format selection.

use crate::error::WriterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A file format the generator can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Placed design (DEF 5.8).
    Def,
    /// Abstract macro view (LEF 5.8).
    Lef,
    /// Machine-readable summary report.
    Json,
}

impl OutputFormat {
    /// Every format, in the order they are written.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Def, OutputFormat::Lef, OutputFormat::Json];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Def => "def",
            OutputFormat::Lef => "lef",
            OutputFormat::Json => "json",
        }
    }

    /// Parses a list of format names. `"all"` expands to [`OutputFormat::ALL`].
    ///
    /// The result is sorted and free of duplicates.
    pub fn parse_list<I, S>(names: I) -> Result<Vec<OutputFormat>, WriterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut formats = Vec::new();
        for name in names {
            let name = name.as_ref();
            if name.eq_ignore_ascii_case("all") {
                formats.extend(OutputFormat::ALL);
            } else {
                formats.push(name.parse()?);
            }
        }
        formats.sort();
        formats.dedup();
        Ok(formats)
    }
}

impl FromStr for OutputFormat {
    type Err = WriterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "def" => Ok(OutputFormat::Def),
            "lef" => Ok(OutputFormat::Lef),
            "json" => Ok(OutputFormat::Json),
            _ => Err(WriterError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Def => "DEF",
            OutputFormat::Lef => "LEF",
            OutputFormat::Json => "JSON",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_names() {
        assert_eq!("DEF".parse::<OutputFormat>().unwrap(), OutputFormat::Def);
        assert!(matches!(
            "svg".parse::<OutputFormat>(),
            Err(WriterError::UnknownFormat(_))
        ));
    }

    #[test]
    fn list_expands_all_and_dedups() {
        assert_eq!(
            OutputFormat::parse_list(["json", "all", "def"]).unwrap(),
            OutputFormat::ALL.to_vec()
        );
        assert_eq!(
            OutputFormat::parse_list(["lef", "lef"]).unwrap(),
            vec![OutputFormat::Lef]
        );
    }

    #[test]
    fn extension_and_display() {
        assert_eq!(OutputFormat::Lef.extension(), "lef");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
    }
}
