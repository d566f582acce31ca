//! Elementary ranking conditions.
//!
//! An [`Erc`] records, for each constraint of a set, whether that constraint
//! prefers the winner (`W`), the loser (`L`), or neither (`e`).
//! A [`WinLosePair`] is the ERC obtained by comparing two candidates.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::candidate::Candidate;
use crate::constraint::{Constraint, ConstraintSet};
use crate::error::{OtForgeError, Result};

/// Preference of a single constraint within an ERC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErcLabel {
    /// The constraint prefers the winner.
    W,
    /// The constraint prefers the loser.
    L,
    /// The constraint has no preference.
    #[default]
    E,
}

impl ErcLabel {
    /// Label for a winner/loser violation comparison.
    pub fn compare(winner_viols: u32, loser_viols: u32) -> Self {
        match winner_viols.cmp(&loser_viols) {
            std::cmp::Ordering::Less => Self::W,
            std::cmp::Ordering::Greater => Self::L,
            std::cmp::Ordering::Equal => Self::E,
        }
    }

    /// The label with winner and loser swapped.
    pub fn reversed(self) -> Self {
        match self {
            Self::W => Self::L,
            Self::L => Self::W,
            Self::E => Self::E,
        }
    }
}

impl fmt::Display for ErcLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::W => f.write_str("W"),
            Self::L => f.write_str("L"),
            Self::E => f.write_str("e"),
        }
    }
}

/// An elementary ranking condition over a fixed constraint set.
///
/// Equality compares labels constraint by constraint (by name), so two
/// ERCs over the same constraints listed in a different order can be equal.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType, Erc, ErcLabel};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("C1", ConstraintType::Markedness),
///     Constraint::new("C2", ConstraintType::Markedness),
/// ]);
/// let erc = Erc::new(set).with("C1", ErcLabel::W).with("C2", ErcLabel::L);
///
/// assert_eq!(erc.label_of("C1"), ErcLabel::W);
/// assert_eq!(erc.to_string(), "W L");
/// assert!(!erc.is_trivially_valid());
/// ```
#[derive(Clone)]
pub struct Erc {
    constraints: ConstraintSet,
    labels: Vec<ErcLabel>,
    label: Option<String>,
}

impl Erc {
    /// Creates an ERC with every constraint labelled `e`.
    pub fn new(constraints: ConstraintSet) -> Self {
        let labels = vec![ErcLabel::E; constraints.len()];
        Self {
            constraints,
            labels,
            label: None,
        }
    }

    /// Sets the label of a named constraint. Unknown names are ignored.
    pub fn set(&mut self, constraint: &str, value: ErcLabel) -> &mut Self {
        if let Some(i) = self.constraints.index_of(constraint) {
            self.labels[i] = value;
        }
        self
    }

    /// Builder form of [`Erc::set`].
    pub fn with(mut self, constraint: &str, value: ErcLabel) -> Self {
        self.set(constraint, value);
        self
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label of a named constraint; `e` for names outside the set.
    pub fn label_of(&self, constraint: &str) -> ErcLabel {
        self.constraints
            .index_of(constraint)
            .map_or(ErcLabel::E, |i| self.labels[i])
    }

    pub fn get(&self, constraint: &Constraint) -> ErcLabel {
        self.label_of(constraint.name())
    }

    pub fn prefers_winner(&self, constraint: &Constraint) -> bool {
        self.get(constraint) == ErcLabel::W
    }

    pub fn prefers_loser(&self, constraint: &Constraint) -> bool {
        self.get(constraint) == ErcLabel::L
    }

    /// Labels in constraint-set order.
    pub fn labels(&self) -> &[ErcLabel] {
        &self.labels
    }

    pub fn w_count(&self) -> usize {
        self.labels.iter().filter(|l| **l == ErcLabel::W).count()
    }

    pub fn l_count(&self) -> usize {
        self.labels.iter().filter(|l| **l == ErcLabel::L).count()
    }

    /// No constraint prefers the loser: satisfied by every ranking.
    pub fn is_trivially_valid(&self) -> bool {
        self.l_count() == 0
    }

    /// Some constraint prefers the loser and none prefers the winner:
    /// satisfied by no ranking.
    pub fn is_trivially_invalid(&self) -> bool {
        self.l_count() > 0 && self.w_count() == 0
    }
}

impl PartialEq for Erc {
    fn eq(&self, other: &Self) -> bool {
        self.constraints == other.constraints
            && self
                .constraints
                .iter()
                .all(|c| self.get(c) == other.get(c))
    }
}

impl Eq for Erc {}

impl Hash for Erc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent, consistent with name-wise equality.
        self.constraints.len().hash(state);
        self.w_count().hash(state);
        self.l_count().hash(state);
    }
}

impl fmt::Debug for Erc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self
            .constraints
            .iter()
            .zip(&self.labels)
            .map(|(c, l)| format!("{}:{}", c, l))
            .collect();
        f.debug_struct("Erc")
            .field("label", &self.label)
            .field("labels", &labels)
            .finish()
    }
}

impl fmt::Display for Erc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row: Vec<String> = self.labels.iter().map(|l| l.to_string()).collect();
        f.write_str(&row.join(" "))
    }
}

/// The ERC derived from a winner and a loser for the same input.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use otforge_core::{Candidate, Constraint, ConstraintSet, ConstraintType, ErcLabel, WinLosePair};
///
/// let set = ConstraintSet::new(vec![
///     Constraint::new("C1", ConstraintType::Markedness),
///     Constraint::new("C2", ConstraintType::Markedness),
/// ]);
/// let winner = Arc::new(Candidate::new("x", "a", set.clone()).with_viols("C1", 0).with_viols("C2", 3));
/// let loser = Arc::new(Candidate::new("x", "b", set).with_viols("C1", 1).with_viols("C2", 2));
///
/// let pair = WinLosePair::new(winner, loser).unwrap();
/// assert_eq!(pair.erc().label_of("C1"), ErcLabel::W);
/// assert_eq!(pair.erc().label_of("C2"), ErcLabel::L);
/// ```
#[derive(Clone)]
pub struct WinLosePair {
    winner: Arc<Candidate>,
    loser: Arc<Candidate>,
    erc: Arc<Erc>,
}

impl WinLosePair {
    /// Compares winner and loser on every constraint of the winner's set.
    ///
    /// # Errors
    ///
    /// - [`OtForgeError::InputMismatch`] if the inputs differ
    /// - [`OtForgeError::MissingViolation`] if either candidate lacks a count
    pub fn new(winner: Arc<Candidate>, loser: Arc<Candidate>) -> Result<Self> {
        if winner.input() != loser.input() {
            return Err(OtForgeError::InputMismatch {
                winner: winner.input().to_string(),
                loser: loser.input().to_string(),
            });
        }

        let constraints = winner.constraints().clone();
        let mut erc = Erc::new(constraints.clone());
        for constraint in &constraints {
            let win = required_viols(&winner, constraint)?;
            let lose = required_viols(&loser, constraint)?;
            erc.set(constraint.name(), ErcLabel::compare(win, lose));
        }
        if let Some(label) = winner.label() {
            erc = erc.with_label(label);
        }

        Ok(Self {
            winner,
            loser,
            erc: Arc::new(erc),
        })
    }

    /// Sets the display label of the underlying ERC.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.erc = Arc::new((*self.erc).clone().with_label(label));
        self
    }

    pub fn winner(&self) -> &Arc<Candidate> {
        &self.winner
    }

    pub fn loser(&self) -> &Arc<Candidate> {
        &self.loser
    }

    pub fn erc(&self) -> &Arc<Erc> {
        &self.erc
    }
}

fn required_viols(candidate: &Candidate, constraint: &Constraint) -> Result<u32> {
    candidate
        .get_viols(constraint)
        .ok_or_else(|| OtForgeError::MissingViolation {
            candidate: candidate.to_string(),
            constraint: constraint.name().to_string(),
        })
}

impl From<&WinLosePair> for Arc<Erc> {
    fn from(pair: &WinLosePair) -> Self {
        Arc::clone(&pair.erc)
    }
}

impl PartialEq for WinLosePair {
    fn eq(&self, other: &Self) -> bool {
        self.winner == other.winner && self.loser == other.loser && self.erc == other.erc
    }
}

impl Eq for WinLosePair {}

impl fmt::Debug for WinLosePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WinLosePair")
            .field("winner", &self.winner.to_string())
            .field("loser", &self.loser.to_string())
            .field("erc", &self.erc.to_string())
            .finish()
    }
}

impl fmt::Display for WinLosePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ≻ {}: {}", self.winner.output(), self.loser.output(), self.erc)
    }
}
