//! Fixed-length action sequences.

use super::action::{Action, ActionSpace};
use rand::Rng;
use std::fmt;

/// An ordered sequence of [`Action`]s representing one candidate path.
///
/// The length is fixed when the solution is built; the operators in
/// [`crate::operators`] never change it. `Clone` copies the whole sequence,
/// so a copy can be mutated without touching its source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    actions: Vec<Action>,
}

impl Solution {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Builds a solution of `len` independent uniform draws from `space`.
    pub fn random<R: Rng>(len: usize, space: &ActionSpace, rng: &mut R) -> Self {
        Self {
            actions: (0..len).map(|_| space.sample(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn get(&self, index: usize) -> Option<Action> {
        self.actions.get(index).copied()
    }

    /// Replaces the action at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, action: Action) {
        self.actions[index] = action;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }

    /// Number of positions at which `self` and `other` differ.
    ///
    /// Returns `None` when the lengths differ.
    pub fn hamming_distance(&self, other: &Solution) -> Option<usize> {
        if self.len() != other.len() {
            return None;
        }
        Some(
            self.actions
                .iter()
                .zip(other.actions.iter())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}

impl From<Vec<Action>> for Solution {
    fn from(actions: Vec<Action>) -> Self {
        Self::new(actions)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, action) in self.actions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{action}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let sol = Solution::random(42, &ActionSpace::cardinal(), &mut rng);
        assert_eq!(sol.len(), 42);
    }

    #[test]
    fn test_clone_does_not_alias() {
        let original = Solution::new(vec![Action::UP, Action::RIGHT]);
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set(0, Action::DOWN);
        assert_eq!(original.get(0), Some(Action::UP));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_hamming_distance() {
        let a = Solution::new(vec![Action::UP, Action::RIGHT, Action::LEFT]);
        let b = Solution::new(vec![Action::UP, Action::DOWN, Action::LEFT]);
        assert_eq!(a.hamming_distance(&b), Some(1));
        assert_eq!(a.hamming_distance(&a), Some(0));

        let short = Solution::new(vec![Action::UP]);
        assert_eq!(a.hamming_distance(&short), None);
    }

    #[test]
    fn test_display() {
        let sol = Solution::new(vec![Action::new(1, 0), Action::new(0, 1)]);
        assert_eq!(sol.to_string(), "[(1, 0), (0, 1)]");
    }
}
