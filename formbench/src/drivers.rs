//! Comparison Drivers
//!
//! The entry points callers actually use. Each driver runs candidates in
//! one or more execution contexts and aggregates the measurements into a
//! sorted comparison table; the `_raw` variants return the measurements
//! unaggregated.

use crate::error::Error;
use formbench_core::{
    run_candidates, Binding, Candidate, ConfigError, Environment, Equivalence, Measurement,
    Options, SourceForm,
};
use formbench_isolate::run_isolated;
use formbench_report::{aggregate, Table};

/// Run every candidate in-process and aggregate the results.
pub fn benchmark<T: Equivalence>(
    candidates: Vec<Candidate<T>>,
    options: &Options,
) -> Result<Table, Error> {
    Ok(aggregate(benchmark_raw(candidates, options)?))
}

/// Run every candidate in-process and return the raw measurements in
/// declaration order.
pub fn benchmark_raw<T: Equivalence>(
    candidates: Vec<Candidate<T>>,
    options: &Options,
) -> Result<Vec<Measurement>, Error> {
    Ok(run_candidates(candidates, options)?)
}

/// Compile and run every form in a single isolated process and aggregate
/// the results.
pub fn benchmark_isolated(
    forms: &[SourceForm],
    bindings: &[Binding],
    options: &Options,
) -> Result<Table, Error> {
    Ok(aggregate(benchmark_isolated_raw(forms, bindings, options)?))
}

/// Compile and run every form in a single isolated process and return the
/// raw measurements in form order.
pub fn benchmark_isolated_raw(
    forms: &[SourceForm],
    bindings: &[Binding],
    options: &Options,
) -> Result<Vec<Measurement>, Error> {
    Ok(run_isolated(forms, bindings, options)?)
}

/// Run the same candidates both in-process and isolated, merging both
/// contexts into one table. Rows are prefixed with their context.
///
/// Every candidate must carry source text; `bindings` apply only to the
/// isolated half, where the forms cannot close over caller state.
pub fn benchmark_dual_context<T: Equivalence>(
    candidates: Vec<Candidate<T>>,
    bindings: &[Binding],
    options: &Options,
) -> Result<Table, Error> {
    let forms: Vec<SourceForm> = candidates
        .iter()
        .map(|c| c.source_form())
        .collect::<Result<_, _>>()?;

    tracing::debug!(candidates = forms.len(), "starting dual-context run");

    let mut merged = run_candidates(candidates, options)?;
    prefix_labels(&mut merged, "native: ");

    let mut isolated = run_isolated(&forms, bindings, options)?;
    prefix_labels(&mut isolated, "isolated: ");
    merged.extend(isolated);

    Ok(aggregate(merged))
}

/// Run the same forms once per environment, isolated, merging every
/// environment into one table. Rows are prefixed with their environment's
/// name.
pub fn benchmark_multi_environment(
    forms: &[SourceForm],
    environments: &[Environment],
    options: &Options,
) -> Result<Table, Error> {
    if environments.is_empty() {
        return Err(ConfigError::EmptyEnvironmentSet.into());
    }

    tracing::debug!(
        forms = forms.len(),
        environments = environments.len(),
        "starting multi-environment run"
    );

    let mut merged = Vec::with_capacity(forms.len() * environments.len());
    for environment in environments {
        let mut measurements = run_isolated(forms, &environment.bindings, options)?;
        prefix_labels(&mut measurements, &format!("{}: ", environment.name));
        merged.extend(measurements);
    }
    Ok(aggregate(merged))
}

fn prefix_labels(measurements: &mut [Measurement], prefix: &str) {
    for measurement in measurements {
        measurement.label = format!("{prefix}{}", measurement.label);
    }
}
