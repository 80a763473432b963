// engine/src/services/indicator_service/mod.rs
// IndicatorService: the public entry point for single-indicator dispatch and
// batch evaluation. The work is done by the sibling handler modules.

use std::collections::BTreeMap;

use shared::{IndicatorId, ParameterSet};

use crate::config::EngineSettings;
use crate::data::Frame;
use crate::error::{IndicatorError, IndicatorResult};
use crate::indicators::{registry, IndicatorOutput, Resolved};

pub mod compute_all;
pub mod compute_indicator;

/// Per-indicator parameter overrides, keyed by identifier as the caller wrote it.
pub type OverridesByIndicator = BTreeMap<String, ParameterSet>;

/// The augmented table of a batch run plus the failures it isolated.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub table: Frame,
    pub errors: Vec<(String, IndicatorError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IndicatorService {
    settings: EngineSettings,
}

impl IndicatorService {
    pub fn new(settings: EngineSettings) -> Self {
        IndicatorService { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Resolves an identifier and overrides to a computation and its complete parameter set.
    pub fn resolve(&self, identifier: &str, overrides: &ParameterSet) -> IndicatorResult<Resolved<'static>> {
        registry().resolve(identifier, overrides, self.settings.max_window)
    }

    /// The primary line of one indicator, aligned with `frame`.
    pub fn compute_indicator(
        &self,
        frame: &Frame,
        identifier: &str,
        overrides: &ParameterSet,
    ) -> IndicatorResult<Vec<f64>> {
        compute_indicator::handle_compute_indicator(&self.settings, frame, identifier, overrides)
            .map(IndicatorOutput::into_primary)
    }

    /// Every output line of one indicator.
    pub fn compute_indicator_lines(
        &self,
        frame: &Frame,
        identifier: &str,
        overrides: &ParameterSet,
    ) -> IndicatorResult<IndicatorOutput> {
        compute_indicator::handle_compute_indicator(&self.settings, frame, identifier, overrides)
    }

    /// Runs every registered indicator.
    pub fn compute_all(&self, frame: &Frame, overrides: &OverridesByIndicator) -> BatchReport {
        compute_all::handle_compute_all(&self.settings, frame, None, overrides)
    }

    /// Runs the given indicators, in the given order.
    pub fn compute_subset(
        &self,
        frame: &Frame,
        ids: &[IndicatorId],
        overrides: &OverridesByIndicator,
    ) -> BatchReport {
        compute_all::handle_compute_all(&self.settings, frame, Some(ids), overrides)
    }
}
