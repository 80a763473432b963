// Handler for batch evaluation: each indicator is computed independently and
// its failure is recorded instead of aborting the run.
use std::collections::BTreeMap;

use rayon::prelude::*;
use shared::{IndicatorId, ParameterSet};

use super::{BatchReport, OverridesByIndicator};
use crate::config::EngineSettings;
use crate::data::{Frame, OhlcvSeries};
use crate::error::{IndicatorError, IndicatorResult};
use crate::indicators::{registry, IndicatorOutput, IndicatorSpec};

struct Outcome {
    spec: &'static IndicatorSpec,
    result: IndicatorResult<IndicatorOutput>,
}

fn evaluate(
    settings: &EngineSettings,
    frame: &Frame,
    spec: &'static IndicatorSpec,
    overrides: Option<&ParameterSet>,
) -> Outcome {
    let empty = ParameterSet::new();
    let result = registry()
        .resolve(spec.id.as_str(), overrides.unwrap_or(&empty), settings.max_window)
        .and_then(|resolved| {
            let series = OhlcvSeries::new(frame)?;
            resolved.calculator.calculate(&series)
        });
    Outcome { spec, result }
}

fn merge_output(table: &mut Frame, spec: &IndicatorSpec, output: IndicatorOutput) -> IndicatorResult<()> {
    for (index, (_, values)) in output.into_lines().into_iter().enumerate() {
        let column = spec.column_name(index);
        if table.set_column(&column, values)? {
            tracing::warn!(indicator = %spec.id, column = %column, "Overwrote existing column");
        }
    }
    Ok(())
}

fn fill_failed(table: &mut Frame, spec: &IndicatorSpec) -> IndicatorResult<()> {
    for column in spec.column_names() {
        table.set_column(&column, vec![f64::NAN; table.len()])?;
    }
    Ok(())
}

pub fn handle_compute_all(
    settings: &EngineSettings,
    frame: &Frame,
    subset: Option<&[IndicatorId]>,
    overrides: &OverridesByIndicator,
) -> BatchReport {
    let mut errors: Vec<(String, IndicatorError)> = Vec::new();

    // Override keys are identifiers as the caller spelled them
    let mut overrides_by_id: BTreeMap<IndicatorId, &ParameterSet> = BTreeMap::new();
    for (key, parameters) in overrides {
        match key.parse::<IndicatorId>() {
            Ok(id) => {
                overrides_by_id.insert(id, parameters);
            }
            Err(_) => {
                tracing::warn!(indicator = %key, "Overrides given for unknown indicator");
                errors.push((key.clone(), IndicatorError::UnknownIndicator(key.clone())));
            }
        }
    }

    let specs: Vec<&'static IndicatorSpec> = match subset {
        Some(ids) => ids.iter().filter_map(|id| registry().get(*id)).collect(),
        None => registry().specs().collect(),
    };

    tracing::info!(
        rows = frame.len(),
        indicators = specs.len(),
        parallel = settings.parallel_batch,
        "Starting batch evaluation"
    );

    let run = |spec: &&'static IndicatorSpec| {
        evaluate(settings, frame, spec, overrides_by_id.get(&spec.id).copied())
    };
    let outcomes: Vec<Outcome> = if settings.parallel_batch {
        specs.par_iter().map(run).collect()
    } else {
        specs.iter().map(run).collect()
    };

    let mut table = frame.clone();
    for Outcome { spec, result } in outcomes {
        let merged = result.and_then(|output| merge_output(&mut table, spec, output));
        if let Err(e) = merged {
            tracing::warn!(indicator = %spec.id, error = %e, "Indicator failed; filling its columns with NaN");
            if let Err(fill_error) = fill_failed(&mut table, spec) {
                tracing::error!(indicator = %spec.id, error = %fill_error, "Could not fill failed indicator columns");
                errors.push((spec.id.as_str().to_string(), fill_error));
            }
            errors.push((spec.id.as_str().to_string(), e));
        }
    }

    tracing::info!(
        rows = table.len(),
        columns = table.columns().len(),
        failures = errors.len(),
        "Batch evaluation finished"
    );
    BatchReport { table, errors }
}
