//! Candidates: input-output mappings with violation profiles.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constraint::{Constraint, ConstraintSet};

/// A candidate output for an input, with its constraint violations.
///
/// Violation counts are filled in after construction, either one by one
/// with [`Candidate::set_viols`] or all at once with [`Candidate::evaluate`].
/// Once a candidate is shared (`Arc<Candidate>`) it is effectively frozen.
///
/// Two candidates are equal when input and output are equal; violation
/// counts do not take part in equality.
///
/// # Example
///
/// ```
/// use otforge_core::{Candidate, Constraint, ConstraintSet, ConstraintType};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("NoCoda", ConstraintType::Markedness)
///         .with_eval(|_, out| out.ends_with('t') as u32),
///     Constraint::new("Max", ConstraintType::Faithfulness)
///         .with_eval(|inp, out| (inp.len() - out.len()) as u32),
/// ]);
///
/// let cand = Candidate::new("pat", "pa", set.clone()).evaluate();
/// assert_eq!(cand.viols("NoCoda"), Some(0));
/// assert_eq!(cand.viols("Max"), Some(1));
/// assert!(cand.is_fully_evaluated());
/// ```
#[derive(Clone)]
pub struct Candidate {
    input: String,
    output: String,
    constraints: ConstraintSet,
    violations: HashMap<String, u32>,
    label: Option<String>,
}

impl Candidate {
    /// Creates a candidate with no violation counts assigned.
    pub fn new(
        input: impl Into<String>,
        output: impl Into<String>,
        constraints: ConstraintSet,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            violations: HashMap::with_capacity(constraints.len()),
            constraints,
            label: None,
        }
    }

    /// Sets a display label (e.g. a winner's morpheme gloss).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Assigns the violation count for a named constraint.
    ///
    /// Names outside the candidate's constraint set are ignored.
    pub fn set_viols(&mut self, constraint: &str, count: u32) -> &mut Self {
        if self.constraints.index_of(constraint).is_some() {
            self.violations.insert(constraint.to_string(), count);
        }
        self
    }

    /// Builder form of [`Candidate::set_viols`].
    pub fn with_viols(mut self, constraint: &str, count: u32) -> Self {
        self.set_viols(constraint, count);
        self
    }

    /// Scores the candidate against every constraint of its set.
    pub fn evaluate(mut self) -> Self {
        let constraints = self.constraints.clone();
        for constraint in &constraints {
            let count = constraint.eval(&self.input, &self.output);
            self.violations.insert(constraint.name().to_string(), count);
        }
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Returns the violation count for a named constraint, if assigned.
    pub fn viols(&self, constraint: &str) -> Option<u32> {
        self.violations.get(constraint).copied()
    }

    /// Returns the violation count of a constraint, if assigned.
    pub fn get_viols(&self, constraint: &Constraint) -> Option<u32> {
        self.viols(constraint.name())
    }

    /// Returns true once every constraint of the set has a count.
    pub fn is_fully_evaluated(&self) -> bool {
        self.constraints
            .iter()
            .all(|c| self.violations.contains_key(c.name()))
    }

    /// Returns true if both candidates have the same count on every constraint.
    ///
    /// An unassigned count only matches another unassigned count.
    pub fn ident_viols(&self, other: &Candidate) -> bool {
        self.constraints
            .iter()
            .all(|c| self.get_viols(c) == other.get_viols(c))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.input == other.input && self.output == other.output
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.input.hash(state);
        self.output.hash(state);
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let viols: Vec<_> = self
            .constraints
            .iter()
            .map(|c| (c.name(), self.get_viols(c)))
            .collect();
        f.debug_struct("Candidate")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("violations", &viols)
            .finish()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} {} --> {}", label, self.input, self.output),
            None => write!(f, "{} --> {}", self.input, self.output),
        }
    }
}
