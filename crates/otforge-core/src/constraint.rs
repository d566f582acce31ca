//! Constraints and the shared constraint set.
//!
//! A [`Constraint`] is identified by its name. Constraints are shared by
//! reference (`Arc<Constraint>`) between every candidate, ERC and ERC list
//! of one grammar, and a [`ConstraintSet`] fixes which constraints take part.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{OtForgeError, Result};

/// Violation evaluation function: `(input, output) -> violation count`.
pub type EvalFn = Arc<dyn Fn(&str, &str) -> u32 + Send + Sync>;

/// The two constraint classes of Optimality Theory.
///
/// # Example
///
/// ```
/// use otforge_core::ConstraintType;
///
/// let kind: ConstraintType = "faith".parse().unwrap();
/// assert_eq!(kind, ConstraintType::Faithfulness);
/// assert!("prosodic".parse::<ConstraintType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConstraintType {
    /// Evaluates outputs only.
    Markedness,
    /// Evaluates input-output correspondence.
    Faithfulness,
}

impl FromStr for ConstraintType {
    type Err = OtForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markedness" | "mark" => Ok(Self::Markedness),
            "faithfulness" | "faith" => Ok(Self::Faithfulness),
            other => Err(OtForgeError::InvalidConstraintType(other.to_string())),
        }
    }
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markedness => write!(f, "markedness"),
            Self::Faithfulness => write!(f, "faithfulness"),
        }
    }
}

/// A violable well-formedness constraint.
///
/// Equality and hashing use the name only.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintType};
///
/// let nocoda = Constraint::new("NoCoda", ConstraintType::Markedness)
///     .with_id("NC")
///     .with_eval(|_, output| output.ends_with('t') as u32);
///
/// assert_eq!(nocoda.to_string(), "NC");
/// assert_eq!(nocoda.eval("pat", "pat"), 1);
/// assert_eq!(nocoda.eval("pat", "pa"), 0);
/// ```
#[derive(Clone)]
pub struct Constraint {
    name: String,
    id: Option<String>,
    kind: ConstraintType,
    eval: Option<EvalFn>,
}

impl Constraint {
    /// Creates a constraint with no evaluation function.
    pub fn new(name: impl Into<String>, kind: ConstraintType) -> Self {
        Self {
            name: name.into(),
            id: None,
            kind,
            eval: None,
        }
    }

    /// Creates a constraint from a textual type tag.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::InvalidConstraintType`] for any tag other than
    /// markedness or faithfulness.
    pub fn parse_typed(name: impl Into<String>, kind: &str) -> Result<Self> {
        Ok(Self::new(name, kind.parse()?))
    }

    /// Sets the short display id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the violation evaluation function.
    pub fn with_eval<F>(mut self, eval: F) -> Self
    where
        F: Fn(&str, &str) -> u32 + Send + Sync + 'static,
    {
        self.eval = Some(Arc::new(eval));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn kind(&self) -> ConstraintType {
        self.kind
    }

    pub fn is_markedness(&self) -> bool {
        self.kind == ConstraintType::Markedness
    }

    pub fn is_faithfulness(&self) -> bool {
        self.kind == ConstraintType::Faithfulness
    }

    /// Counts the violations of an input-output mapping.
    ///
    /// A constraint without an evaluation function assigns no violations.
    pub fn eval(&self, input: &str, output: &str) -> u32 {
        self.eval.as_ref().map_or(0, |f| f(input, output))
    }

    /// Returns true if this constraint carries an evaluation function.
    pub fn has_eval(&self) -> bool {
        self.eval.is_some()
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Constraint {}

impl Hash for Constraint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.as_deref().unwrap_or(&self.name))
    }
}

struct ConstraintSetInner {
    constraints: Vec<Arc<Constraint>>,
    index: HashMap<String, usize>,
}

/// An ordered, cheaply cloneable set of shared constraints.
///
/// Two sets are equal when they hold the same constraints by name,
/// regardless of order.
///
/// # Example
///
/// ```
/// use otforge_core::{Constraint, ConstraintSet, ConstraintType};
///
/// let a = Constraint::new("Onset", ConstraintType::Markedness);
/// let b = Constraint::new("Max", ConstraintType::Faithfulness);
/// let forward = ConstraintSet::new(vec![a.clone(), b.clone()]);
/// let backward = ConstraintSet::new(vec![b, a]);
///
/// assert_eq!(forward.len(), 2);
/// assert_eq!(forward, backward);
/// assert_eq!(forward.index_of("Max"), Some(1));
/// ```
#[derive(Clone)]
pub struct ConstraintSet {
    inner: Arc<ConstraintSetInner>,
}

impl ConstraintSet {
    /// Creates a set from owned constraints.
    ///
    /// The first constraint with a given name wins; later constraints that
    /// repeat the name are dropped whatever their type. Use
    /// [`ConstraintSet::try_new`] to reject repeated names instead.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self::from_shared(constraints.into_iter().map(Arc::new).collect())
    }

    /// Creates a set from owned constraints, rejecting repeated names.
    ///
    /// # Errors
    ///
    /// Returns [`OtForgeError::DuplicateConstraint`] naming the first
    /// repeated constraint.
    pub fn try_new(constraints: Vec<Constraint>) -> Result<Self> {
        Self::try_from_shared(constraints.into_iter().map(Arc::new).collect())
    }

    /// Creates a set from already shared constraints, rejecting repeated names.
    pub fn try_from_shared(constraints: Vec<Arc<Constraint>>) -> Result<Self> {
        let set = Self::from_shared(constraints.clone());
        if set.len() != constraints.len() {
            let mut seen = HashSet::with_capacity(constraints.len());
            for constraint in &constraints {
                if !seen.insert(constraint.name()) {
                    return Err(OtForgeError::DuplicateConstraint(
                        constraint.name().to_string(),
                    ));
                }
            }
        }
        Ok(set)
    }

    /// Creates a set from already shared constraints.
    ///
    /// Repeated names follow the first-wins rule of [`ConstraintSet::new`].
    pub fn from_shared(constraints: Vec<Arc<Constraint>>) -> Self {
        let mut kept = Vec::with_capacity(constraints.len());
        let mut index = HashMap::with_capacity(constraints.len());
        for constraint in constraints {
            if index.contains_key(constraint.name()) {
                continue;
            }
            index.insert(constraint.name().to_string(), kept.len());
            kept.push(constraint);
        }
        Self {
            inner: Arc::new(ConstraintSetInner {
                constraints: kept,
                index,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.constraints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Constraint>> {
        self.inner.constraints.iter()
    }

    /// Returns the constraint at a position.
    pub fn get(&self, index: usize) -> Option<&Arc<Constraint>> {
        self.inner.constraints.get(index)
    }

    /// Looks up a constraint by name.
    pub fn by_name(&self, name: &str) -> Option<&Arc<Constraint>> {
        self.index_of(name).map(|i| &self.inner.constraints[i])
    }

    /// Returns the position of the named constraint.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.inner.index.get(name).copied()
    }

    pub fn contains(&self, constraint: &Constraint) -> bool {
        self.inner.index.contains_key(constraint.name())
    }

    /// Returns true if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Space-separated display names, in set order.
    pub fn names(&self) -> String {
        self.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for ConstraintSet {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl Eq for ConstraintSet {}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|c| c.name()))
            .finish()
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Arc<Constraint>;
    type IntoIter = std::slice::Iter<'a, Arc<Constraint>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.constraints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_name() {
        let a = Constraint::new("Onset", ConstraintType::Markedness);
        let b = Constraint::new("Onset", ConstraintType::Faithfulness).with_id("O");
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_type_tag() {
        let err = Constraint::parse_typed("Weird", "prosodic").unwrap_err();
        assert_eq!(err, OtForgeError::InvalidConstraintType("prosodic".into()));
    }

    #[test]
    fn test_parse_typed() {
        let c = Constraint::parse_typed("Ident", "Faithfulness").unwrap();
        assert!(c.is_faithfulness());
        assert!(!c.is_markedness());
    }

    #[test]
    fn test_eval_default_zero() {
        let c = Constraint::new("Dep", ConstraintType::Faithfulness);
        assert!(!c.has_eval());
        assert_eq!(c.eval("a", "ab"), 0);
    }

    #[test]
    fn test_set_drops_duplicate_names() {
        let set = ConstraintSet::new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("A", ConstraintType::Faithfulness),
            Constraint::new("B", ConstraintType::Markedness),
        ]);
        assert_eq!(set.len(), 2);
        assert!(set.by_name("A").unwrap().is_markedness());
        assert_eq!(set.names(), "A B");
    }

    #[test]
    fn test_try_new_rejects_duplicate_names() {
        let err = ConstraintSet::try_new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("B", ConstraintType::Markedness),
            Constraint::new("A", ConstraintType::Faithfulness),
        ])
        .unwrap_err();
        assert_eq!(err, OtForgeError::DuplicateConstraint("A".into()));

        let set = ConstraintSet::try_new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("B", ConstraintType::Faithfulness),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_iter_is_double_ended() {
        let set = ConstraintSet::new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("B", ConstraintType::Markedness),
        ]);
        let reversed = ConstraintSet::from_shared(set.iter().rev().cloned().collect());
        assert_eq!(reversed.names(), "B A");
        assert_eq!(reversed, set);
    }

    #[test]
    fn test_set_membership_inequality() {
        let ab = ConstraintSet::new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("B", ConstraintType::Markedness),
        ]);
        let ac = ConstraintSet::new(vec![
            Constraint::new("A", ConstraintType::Markedness),
            Constraint::new("C", ConstraintType::Markedness),
        ]);
        let a = ConstraintSet::new(vec![Constraint::new("A", ConstraintType::Markedness)]);
        assert_ne!(ab, ac);
        assert_ne!(ab, a);
        assert_eq!(ab.names(), "A B");
    }
}
