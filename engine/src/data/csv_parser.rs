use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use shared::models::Candle;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::data::Frame;

// Cell formats accepted by the OHLCV reader
pub mod value_format {
    use anyhow::{anyhow, Result};
    use chrono::{DateTime, Utc};

    /// RFC 3339 (`2024-01-02T09:30:00Z`) or integer epoch milliseconds.
    pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| anyhow!("Epoch milliseconds out of range: {}", millis));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| anyhow!("Failed to parse timestamp '{}': {}", s, e))
    }

    /// A plain decimal number; an empty cell is a missing value (NaN).
    pub fn parse_number(s: &str) -> Result<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(f64::NAN);
        }
        trimmed
            .parse::<f64>()
            .map_err(|e| anyhow!("Failed to parse number '{}': {}", s, e))
    }

}

pub struct OhlcvCsvParser;

impl OhlcvCsvParser {
    // CSV Header: timestamp,open,high,low,close,volume
    // Example Row: 2024-01-02T09:30:00Z,100.5,101.0,99.8,100.9,12500
    /// Reads every column: `timestamp` becomes the index, all other columns
    /// (header names lowercased) are parsed as numbers.
    pub fn load_frame_from_csv(file_path: impl AsRef<Path>) -> Result<Frame> {
        let path = file_path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open CSV file '{}'", path.display()))?;
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_ascii_lowercase()).collect();
        let timestamp_pos = headers
            .iter()
            .position(|h| h == "timestamp")
            .ok_or_else(|| anyhow!("Missing 'timestamp' column in '{}'", path.display()))?;

        let mut index = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;
            let ts = Self::get_field(&record, timestamp_pos, "timestamp", line)?;
            index.push(
                value_format::parse_timestamp(ts)
                    .with_context(|| format!("Error parsing 'timestamp' at line {}", line))?,
            );
            for (pos, name) in headers.iter().enumerate() {
                if pos == timestamp_pos {
                    continue;
                }
                let cell = Self::get_field(&record, pos, name, line)?;
                let value = value_format::parse_number(cell)
                    .with_context(|| format!("Error parsing '{}' at line {}", name, line))?;
                columns[pos].push(value);
            }
        }

        let mut frame = Frame::new(index).context("Timestamps are not strictly increasing")?;
        for (pos, (name, values)) in headers.iter().zip(columns).enumerate() {
            if pos == timestamp_pos {
                continue;
            }
            frame.set_column(name, values)?;
        }
        tracing::debug!(path = %path.display(), rows = frame.len(), "Loaded OHLCV frame");
        Ok(frame)
    }

    /// Strict variant: all five OHLCV columns must be present.
    pub fn load_candles_from_csv(file_path: impl AsRef<Path>) -> Result<Vec<Candle>> {
        let frame = Self::load_frame_from_csv(file_path)?;
        let column = |name: &str| {
            frame
                .column(name)
                .ok_or_else(|| anyhow!("Missing '{}' column", name))
        };
        let (open, high, low, close, volume) = (
            column("open")?,
            column("high")?,
            column("low")?,
            column("close")?,
            column("volume")?,
        );
        Ok(frame
            .index()
            .iter()
            .enumerate()
            .map(|(i, timestamp)| Candle {
                timestamp: *timestamp,
                open: open[i],
                high: high[i],
                low: low[i],
                close: close[i],
                volume: volume[i],
            })
            .collect())
    }

    fn get_field<'a>(record: &'a StringRecord, pos: usize, name: &str, line: usize) -> Result<&'a str> {
        record
            .get(pos)
            .ok_or_else(|| anyhow!("Missing '{}' field in CSV record at line {}", name, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_frame_valid_data() {
        let csv_content = "\
timestamp,open,high,low,close,volume
2024-01-02T09:30:00Z,100.5,101.0,99.8,100.9,12500
2024-01-02T09:31:00Z,100.9,101.4,100.7,101.2,9800";
        let tmp_file = create_test_csv(csv_content);
        let frame = OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(
            frame.column_names().collect::<Vec<_>>(),
            vec!["open", "high", "low", "close", "volume"]
        );
        assert_eq!(frame.column("close").unwrap(), &[100.9, 101.2]);
        assert_eq!(frame.index()[0], value_format::parse_timestamp("2024-01-02T09:30:00Z").unwrap());
    }

    #[test]
    fn test_headers_are_case_insensitive_and_epoch_accepted() {
        let csv_content = "\
Timestamp,Close
1700000000000,10
1700000060000,";
        let tmp_file = create_test_csv(csv_content);
        let frame = OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).unwrap();
        let close = frame.column("close").unwrap();
        assert_eq!(close[0], 10.0);
        assert!(close[1].is_nan());
    }

    #[test]
    fn test_header_only_file_is_empty_frame() {
        let tmp_file = create_test_csv("timestamp,open,high,low,close,volume");
        let frame = OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_missing_timestamp_column() {
        let tmp_file = create_test_csv("date,close\n2024-01-02,1.0");
        let err = OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing 'timestamp' column"));
    }

    #[test]
    fn test_invalid_number_reports_column_and_line() {
        let csv_content = "\
timestamp,open,close
2024-01-02T09:30:00Z,abc,1.0";
        let tmp_file = create_test_csv(csv_content);
        let err = OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Error parsing 'open' at line 2"));
    }

    #[test]
    fn test_unordered_timestamps_rejected() {
        let csv_content = "\
timestamp,close
2024-01-02T09:31:00Z,1.0
2024-01-02T09:30:00Z,2.0";
        let tmp_file = create_test_csv(csv_content);
        assert!(OhlcvCsvParser::load_frame_from_csv(tmp_file.path()).is_err());
    }

    #[test]
    fn test_load_candles_requires_all_fields() {
        let tmp_file = create_test_csv("timestamp,close\n2024-01-02T09:30:00Z,1.0");
        let err = OhlcvCsvParser::load_candles_from_csv(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Missing 'open' column"));

        let tmp_file = create_test_csv(
            "timestamp,open,high,low,close,volume\n2024-01-02T09:30:00Z,1,2,0.5,1.5,10",
        );
        let candles = OhlcvCsvParser::load_candles_from_csv(tmp_file.path()).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].high, 2.0);
        assert_eq!(candles[0].volume, 10.0);
    }
}
