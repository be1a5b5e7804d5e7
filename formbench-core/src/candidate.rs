//! Candidates, Source Forms and Environments
//!
//! A `Candidate` is a runnable alternative implementation under comparison.
//! It always carries a thunk for in-process execution; it may additionally
//! carry the expression text it was built from, which is what the isolated
//! execution context compiles. `SourceForm` is the text-only projection
//! used by contexts that never run the thunk.

use crate::error::ConfigError;
use std::collections::HashSet;
use std::fmt;

/// One alternative implementation under comparison.
pub struct Candidate<T> {
    /// Optional caller-supplied label. Unlabeled candidates are named by
    /// their zero-based position at run time.
    pub label: Option<String>,
    thunk: Box<dyn FnMut() -> T>,
    source: Option<String>,
}

impl<T> Candidate<T> {
    /// A candidate from a bare closure. It can run in-process but not in
    /// an isolated context, which needs source text.
    pub fn new(thunk: impl FnMut() -> T + 'static) -> Self {
        Self {
            label: None,
            thunk: Box::new(thunk),
            source: None,
        }
    }

    /// Attach a label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Attach the expression text this candidate was built from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The expression text, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The text-only projection of this candidate, for execution contexts
    /// that compile rather than call.
    pub fn source_form(&self) -> Result<SourceForm, ConfigError> {
        match &self.source {
            Some(expr) => Ok(SourceForm {
                label: self.label.clone(),
                expr: expr.clone(),
            }),
            None => Err(ConfigError::MissingSource(
                self.label.clone().unwrap_or_else(|| "<unlabeled>".into()),
            )),
        }
    }

    pub(crate) fn thunk_mut(&mut self) -> &mut dyn FnMut() -> T {
        &mut self.thunk
    }
}

impl<T> fmt::Debug for Candidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("label", &self.label)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// An expression to compile and run in an isolated context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceForm {
    /// Optional caller-supplied label.
    pub label: Option<String>,
    /// Rust expression text. Compiled verbatim into the isolated driver.
    pub expr: String,
}

impl SourceForm {
    /// An unlabeled source form.
    pub fn new(expr: impl Into<String>) -> Self {
        Self {
            label: None,
            expr: expr.into(),
        }
    }

    /// A labeled source form.
    pub fn labeled(label: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            expr: expr.into(),
        }
    }
}

/// A name bound to an expression, visible to every form in an isolated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Identifier the forms refer to.
    pub name: String,
    /// Expression producing the bound value.
    pub expr: String,
}

impl Binding {
    /// A new binding.
    pub fn new(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expr: expr.into(),
        }
    }
}

/// A named set of bindings. Multi-environment runs execute the same forms
/// once per environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Environment name, used as a label prefix in the merged report.
    pub name: String,
    /// Bindings established before any form runs.
    pub bindings: Vec<Binding>,
}

impl Environment {
    /// An environment with no bindings yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: Vec::new(),
        }
    }

    /// Add a binding.
    pub fn bind(mut self, name: impl Into<String>, expr: impl Into<String>) -> Self {
        self.bindings.push(Binding::new(name, expr));
        self
    }
}

/// Resolve the effective label of every candidate: the caller-supplied one,
/// or the zero-based position rendered as text. Rejects empty sets and
/// duplicate labels up front.
pub fn resolve_labels<'a>(
    labels: impl Iterator<Item = Option<&'a str>>,
) -> Result<Vec<String>, ConfigError> {
    let resolved: Vec<String> = labels
        .enumerate()
        .map(|(index, label)| match label {
            Some(label) => label.to_string(),
            None => index.to_string(),
        })
        .collect();

    if resolved.is_empty() {
        return Err(ConfigError::EmptyCandidateSet);
    }

    let mut seen = HashSet::new();
    for label in &resolved {
        if !seen.insert(label.as_str()) {
            return Err(ConfigError::DuplicateLabel(label.clone()));
        }
    }
    Ok(resolved)
}

/// Reject binding names that are not plain identifiers. The names are
/// spliced into generated source, so anything else would change the
/// meaning of the driver.
pub fn validate_bindings(bindings: &[Binding]) -> Result<(), ConfigError> {
    for binding in bindings {
        let mut chars = binding.name.chars();
        let valid = match chars.next() {
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {
                chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
            }
            _ => false,
        };
        if !valid {
            return Err(ConfigError::InvalidBinding(binding.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlabeled_candidates_get_ordinal_labels() {
        let labels =
            resolve_labels([None, Some("fast"), None].into_iter()).unwrap();
        assert_eq!(labels, vec!["0", "fast", "2"]);
    }

    #[test]
    fn empty_candidate_set_rejected() {
        let result = resolve_labels(std::iter::empty());
        assert_eq!(result, Err(ConfigError::EmptyCandidateSet));
    }

    #[test]
    fn duplicate_labels_rejected() {
        let result = resolve_labels([Some("a"), Some("b"), Some("a")].into_iter());
        assert_eq!(result, Err(ConfigError::DuplicateLabel("a".into())));
    }

    #[test]
    fn ordinal_label_colliding_with_explicit_one_rejected() {
        // The second candidate is unlabeled at position 1.
        let result = resolve_labels([Some("1"), None].into_iter());
        assert_eq!(result, Err(ConfigError::DuplicateLabel("1".into())));
    }

    #[test]
    fn source_form_requires_source_text() {
        let with = Candidate::new(|| 1).labeled("f").with_source("1");
        assert_eq!(with.source_form().unwrap(), SourceForm::labeled("f", "1"));

        let without = Candidate::new(|| 1).labeled("g");
        assert_eq!(
            without.source_form(),
            Err(ConfigError::MissingSource("g".into()))
        );
    }

    #[test]
    fn binding_names_must_be_identifiers() {
        assert!(validate_bindings(&[Binding::new("n", "10"), Binding::new("_x2", "0")]).is_ok());
        assert_eq!(
            validate_bindings(&[Binding::new("2n", "10")]),
            Err(ConfigError::InvalidBinding("2n".into()))
        );
        assert_eq!(
            validate_bindings(&[Binding::new("a; drop", "10")]),
            Err(ConfigError::InvalidBinding("a; drop".into()))
        );
    }
}
