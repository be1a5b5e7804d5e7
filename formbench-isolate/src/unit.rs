//! Isolation Units
//!
//! An `IsolationUnit` owns one generated driver and its build artifacts,
//! all inside a temporary directory that is removed on drop. The
//! materialize, compile and execute stages are separate so callers can
//! observe each one; `run_isolated` chains them for the common case.

use crate::codegen::generate_driver;
use crate::error::IsolateError;
use crate::protocol::{parse_mismatch, parse_records, MISMATCH_EXIT_CODE};
use formbench_core::{resolve_labels, validate_bindings, Binding, Measurement, OptLevel, Options, SourceForm};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// One generated driver and its build artifacts.
#[derive(Debug)]
pub struct IsolationUnit {
    #[allow(dead_code)] // held for its Drop, which removes the artifacts
    dir: TempDir,
    source_path: PathBuf,
    binary_path: PathBuf,
    labels: Vec<String>,
    opt_level: OptLevel,
}

impl IsolationUnit {
    /// Validate the request, generate the driver source and write it into
    /// a fresh temporary directory.
    pub fn materialize(
        forms: &[SourceForm],
        bindings: &[Binding],
        options: &Options,
    ) -> Result<Self, IsolateError> {
        options.validate()?;
        let labels = resolve_labels(forms.iter().map(|f| f.label.as_deref()))?;
        validate_bindings(bindings)?;

        let dir = TempDir::with_prefix("formbench-")?;
        let source_path = dir.path().join("driver.rs");
        let binary_path = dir.path().join("driver");
        std::fs::write(&source_path, generate_driver(forms, bindings, options))?;

        tracing::debug!(
            dir = %dir.path().display(),
            forms = labels.len(),
            "materialized isolation unit"
        );

        Ok(Self {
            dir,
            source_path,
            binary_path,
            labels,
            opt_level: options.opt_level,
        })
    }

    /// Path of the generated driver source.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Path the compiled driver binary is written to.
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Effective form labels, in form order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Compile the driver with `rustc`.
    pub fn compile(&self) -> Result<(), IsolateError> {
        let output = Command::new("rustc")
            .arg("--edition=2021")
            .arg("-C")
            .arg(format!("opt-level={}", self.opt_level.as_flag()))
            .arg("-o")
            .arg(&self.binary_path)
            .arg(&self.source_path)
            .output()
            .map_err(IsolateError::Compiler)?;

        if !output.status.success() {
            return Err(IsolateError::Build {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        tracing::debug!(binary = %self.binary_path.display(), "compiled isolated driver");
        Ok(())
    }

    /// Run the compiled driver once and parse its measurements.
    ///
    /// The driver's mismatch exit code becomes an
    /// [`IsolateError::Equivalence`]; any other failure exit becomes an
    /// [`IsolateError::Candidate`].
    pub fn execute(&self) -> Result<Vec<Measurement>, IsolateError> {
        let output = Command::new(&self.binary_path).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if output.status.success() {
            return parse_records(&stdout, &self.labels);
        }
        if output.status.code() == Some(MISMATCH_EXIT_CODE) {
            return Err(IsolateError::Equivalence(parse_mismatch(
                &stdout,
                &self.labels,
            )?));
        }
        Err(IsolateError::Candidate {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Materialize, compile and execute in one call. Build artifacts are
/// removed before this returns.
pub fn run_isolated(
    forms: &[SourceForm],
    bindings: &[Binding],
    options: &Options,
) -> Result<Vec<Measurement>, IsolateError> {
    let unit = IsolationUnit::materialize(forms, bindings, options)?;
    unit.compile()?;
    unit.execute()
}
