//! A CV syllable-structure system.
//!
//! Segments are letters; `aeiou` are vowels. Uppercase `T` and `A` are
//! epenthetic consonant and vowel. Syllabification is greedy CV: a
//! consonant followed by a vowel is an onset, any other consonant is a
//! coda, and a vowel not preceded by a consonant lacks an onset.
//!
//! GEN deletes any subset of input segments and may add an epenthetic
//! onset `T` at the start and an epenthetic vowel `A` at the end.

use std::sync::Arc;

use otforge_core::{Candidate, CandidateGenerator, Constraint, ConstraintSet, ConstraintType};

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_epenthetic(c: char) -> bool {
    c.is_ascii_uppercase()
}

fn no_coda(_input: &str, output: &str) -> u32 {
    let segs: Vec<char> = output.chars().collect();
    (0..segs.len())
        .filter(|&i| !is_vowel(segs[i]) && segs.get(i + 1).map_or(true, |n| !is_vowel(*n)))
        .count() as u32
}

fn onset(_input: &str, output: &str) -> u32 {
    let segs: Vec<char> = output.chars().collect();
    (0..segs.len())
        .filter(|&i| is_vowel(segs[i]) && (i == 0 || is_vowel(segs[i - 1])))
        .count() as u32
}

fn dep(_input: &str, output: &str) -> u32 {
    output.chars().filter(|c| is_epenthetic(*c)).count() as u32
}

fn max(input: &str, output: &str) -> u32 {
    let kept = output.chars().filter(|c| !is_epenthetic(*c)).count();
    input.chars().count().saturating_sub(kept) as u32
}

/// The CV system: constraints `NoCoda`, `Onset` (markedness) and
/// `Max`, `Dep` (faithfulness), with a deterministic GEN.
///
/// # Example
///
/// ```
/// use otforge_core::CandidateGenerator;
/// use otforge_test::CvSystem;
///
/// let system = CvSystem::new();
/// let pa = system.candidate("pat", "pa");
/// assert_eq!(pa.viols("NoCoda"), Some(0));
/// assert_eq!(pa.viols("Max"), Some(1));
///
/// let competition = system.gen("pat");
/// assert_eq!(competition[0].output(), "pat");
/// ```
#[derive(Clone)]
pub struct CvSystem {
    constraints: ConstraintSet,
}

impl CvSystem {
    pub fn new() -> Self {
        Self {
            constraints: ConstraintSet::new(vec![
                Constraint::new("NoCoda", ConstraintType::Markedness)
                    .with_id("NoC")
                    .with_eval(no_coda),
                Constraint::new("Onset", ConstraintType::Markedness)
                    .with_id("Ons")
                    .with_eval(onset),
                Constraint::new("Max", ConstraintType::Faithfulness).with_eval(max),
                Constraint::new("Dep", ConstraintType::Faithfulness).with_eval(dep),
            ]),
        }
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// A fully evaluated candidate.
    pub fn candidate(&self, input: &str, output: &str) -> Arc<Candidate> {
        Arc::new(Candidate::new(input, output, self.constraints.clone()).evaluate())
    }
}

impl Default for CvSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateGenerator for CvSystem {
    fn gen(&self, input: &str) -> Vec<Arc<Candidate>> {
        let segs: Vec<char> = input.chars().collect();
        let n = segs.len();
        let mut outputs: Vec<String> = Vec::new();

        // Fewest deletions first: the faithful candidate leads.
        for mask in (0..(1usize << n)).rev() {
            let kept: String = segs
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << (n - 1 - i)) != 0)
                .map(|(_, c)| *c)
                .collect();
            for out in [
                kept.clone(),
                format!("{}A", kept),
                format!("T{}", kept),
                format!("T{}A", kept),
            ] {
                if !outputs.contains(&out) {
                    outputs.push(out);
                }
            }
        }

        outputs
            .into_iter()
            .map(|out| self.candidate(input, &out))
            .collect()
    }
}
