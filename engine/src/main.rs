// ta-engine: runs the indicator batch over an OHLCV CSV file and prints the
// augmented table as CSV on stdout.
use std::io;
use std::path::PathBuf;

use shared::{parameters_from_json, IndicatorId};
use ta_engine::config::EngineSettings;
use ta_engine::data::csv_parser::OhlcvCsvParser;
use ta_engine::error::EngineError;
use ta_engine::{Frame, IndicatorService, OverridesByIndicator};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: ta-engine [--params <overrides.json>] <ohlcv.csv> [ID ...]\n       ta-engine --catalog | --list";

enum Command {
    Catalog,
    List,
    Run {
        csv_path: PathBuf,
        params_path: Option<PathBuf>,
        ids: Vec<String>,
    },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, EngineError> {
    let mut csv_path = None;
    let mut params_path = None;
    let mut ids = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => return Ok(Command::Catalog),
            "--list" => return Ok(Command::List),
            "--params" => {
                let path = args
                    .next()
                    .ok_or_else(|| EngineError::ConfigError("--params needs a file path".to_string()))?;
                params_path = Some(PathBuf::from(path));
            }
            _ if csv_path.is_none() => csv_path = Some(PathBuf::from(arg)),
            _ => ids.push(arg),
        }
    }
    let csv_path = csv_path.ok_or_else(|| EngineError::ConfigError(USAGE.to_string()))?;
    Ok(Command::Run {
        csv_path,
        params_path,
        ids,
    })
}

// {"SMA": {"period": 20}, "BBANDS": {"nbdevup": 2.5}}
fn load_overrides(path: &PathBuf) -> Result<OverridesByIndicator, EngineError> {
    let contents = std::fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| EngineError::ConfigError(format!("Invalid overrides JSON: {}", e)))?;
    let object = json
        .as_object()
        .ok_or_else(|| EngineError::ConfigError("Overrides must be a JSON object keyed by indicator".to_string()))?;
    let mut overrides = OverridesByIndicator::new();
    for (indicator, parameters) in object {
        let parameters = parameters_from_json(parameters)
            .map_err(|e| EngineError::ConfigError(format!("Overrides for {}: {}", indicator, e)))?;
        overrides.insert(indicator.clone(), parameters);
    }
    Ok(overrides)
}

// One line per indicator, grouped under its category heading
fn catalog_listing() -> String {
    let mut listing = String::new();
    let mut current = None;
    for info in shared::catalog() {
        let id = info.value;
        if current != Some(id.category()) {
            current = Some(id.category());
            listing.push_str(&format!("{}\n", id.category().label()));
        }
        listing.push_str(&format!("  {:<28} {}\n", id.as_str(), id.label()));
    }
    listing
}

fn write_frame(frame: &Frame, out: impl io::Write) -> Result<(), EngineError> {
    let mut wtr = csv::Writer::from_writer(out);
    let mut header = vec!["timestamp".to_string()];
    header.extend(frame.column_names().map(str::to_string));
    wtr.write_record(&header)?;
    for (row, timestamp) in frame.index().iter().enumerate() {
        let mut record = vec![timestamp.to_rfc3339()];
        for (_, values) in frame.columns() {
            let value = values[row];
            record.push(if value.is_nan() { String::new() } else { value.to_string() });
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn run(settings: EngineSettings, command: Command) -> Result<(), EngineError> {
    let (csv_path, params_path, ids) = match command {
        Command::Catalog => {
            let json = serde_json::to_string_pretty(shared::catalog())
                .map_err(|e| EngineError::ConfigError(format!("Failed to serialise catalog: {}", e)))?;
            println!("{}", json);
            return Ok(());
        }
        Command::List => {
            print!("{}", catalog_listing());
            return Ok(());
        }
        Command::Run {
            csv_path,
            params_path,
            ids,
        } => (csv_path, params_path, ids),
    };

    let ids = ids
        .iter()
        .map(|id| id.parse::<IndicatorId>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| EngineError::ConfigError(e.to_string()))?;
    let overrides = match &params_path {
        Some(path) => load_overrides(path)?,
        None => OverridesByIndicator::new(),
    };

    let frame = OhlcvCsvParser::load_frame_from_csv(&csv_path)?;
    info!(path = %csv_path.display(), rows = frame.len(), "Loaded input");

    let service = IndicatorService::new(settings);
    let report = if ids.is_empty() {
        service.compute_all(&frame, &overrides)
    } else {
        service.compute_subset(&frame, &ids, &overrides)
    };
    for (indicator, e) in &report.errors {
        warn!(indicator = %indicator, error = %e, "Indicator failed");
    }

    write_frame(&report.table, io::stdout().lock())
}

// Filter for the subscriber; settings that failed to load fall back to the default
fn log_filter_for<E>(loaded: &Result<EngineSettings, E>) -> String {
    match loaded {
        Ok(settings) => settings.log_filter.clone(),
        Err(_) => EngineSettings::default().log_filter,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = EngineSettings::load();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_filter_for(&loaded)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Could not load engine settings");
            return Err(e.into());
        }
    };
    info!(
        max_window = settings.max_window,
        parallel_batch = settings.parallel_batch,
        log_filter = %settings.log_filter,
        "Engine settings loaded"
    );

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            error!(error = %e, "Invalid arguments");
            return Err(e.into());
        }
    };

    if let Err(e) = run(settings, command) {
        error!(error = %e, "ta-engine failed");
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args_run() {
        match parse_args(args(&["--params", "p.json", "data.csv", "SMA", "rsi"])).unwrap() {
            Command::Run {
                csv_path,
                params_path,
                ids,
            } => {
                assert_eq!(csv_path, PathBuf::from("data.csv"));
                assert_eq!(params_path, Some(PathBuf::from("p.json")));
                assert_eq!(ids, vec!["SMA", "rsi"]);
            }
            _ => panic!("expected a run command"),
        }
    }

    #[test]
    fn test_parse_args_requires_csv() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["--params"])).is_err());
        assert!(matches!(parse_args(args(&["--catalog"])).unwrap(), Command::Catalog));
        assert!(matches!(parse_args(args(&["--list"])).unwrap(), Command::List));
    }

    #[test]
    fn test_log_filter_falls_back_when_settings_fail() {
        let custom = EngineSettings {
            log_filter: "ta_engine=debug".to_string(),
            ..EngineSettings::default()
        };
        assert_eq!(log_filter_for::<EngineError>(&Ok(custom)), "ta_engine=debug");
        let failed: Result<EngineSettings, EngineError> = Err(EngineError::ConfigError("bad".to_string()));
        assert_eq!(log_filter_for(&failed), "info");
    }

    #[test]
    fn test_catalog_listing_groups_by_category() {
        let listing = catalog_listing();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "Moving Averages");
        assert!(lines[1].trim_start().starts_with("SMA"));
        assert!(lines[1].ends_with("Simple Moving Average (SMA)"));
        assert!(lines.contains(&"Pivot Points"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("  ")).count(), shared::catalog().len());
    }

    #[test]
    fn test_load_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"SMA": {{"period": 5}}, "bbands": {{"nbdevup": 2.5}}}}"#).unwrap();
        let overrides = load_overrides(&file.path().to_path_buf()).unwrap();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides["SMA"]["period"], shared::ParamValue::Int(5));

        let mut bad = NamedTempFile::new().unwrap();
        writeln!(bad, "[1, 2]").unwrap();
        assert!(load_overrides(&bad.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_write_frame_leaves_nan_cells_empty() {
        let index = vec![
            chrono::DateTime::from_timestamp(0, 0).unwrap(),
            chrono::DateTime::from_timestamp(60, 0).unwrap(),
        ];
        let frame = Frame::new(index)
            .unwrap()
            .with_column("close", vec![1.5, 2.0])
            .unwrap()
            .with_column("SMA", vec![f64::NAN, 1.75])
            .unwrap();
        let mut out = Vec::new();
        write_frame(&frame, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "timestamp,close,SMA");
        assert_eq!(lines[1], "1970-01-01T00:00:00+00:00,1.5,");
        assert_eq!(lines[2], "1970-01-01T00:01:00+00:00,2,1.75");
    }
}
