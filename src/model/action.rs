//! Actions and the alphabet they are sampled from.

use crate::error::{Result, SearchError};
use rand::Rng;
use std::fmt;

/// A single discrete displacement applied by the agent.
///
/// Movement is planar: `dx` moves along the grid columns, `dy` along the rows.
/// Equality and hashing are component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub dx: i32,
    pub dy: i32,
}

impl Action {
    pub const UP: Action = Action::new(0, 1);
    pub const DOWN: Action = Action::new(0, -1);
    pub const LEFT: Action = Action::new(-1, 0);
    pub const RIGHT: Action = Action::new(1, 0);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Manhattan length of the displacement.
    pub fn length(&self) -> u32 {
        self.dx.unsigned_abs() + self.dy.unsigned_abs()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// The set of actions a random draw can produce.
///
/// Every mutation replaces a gene with a uniform draw from this set, so
/// its size also bounds how many distinct genes a crossover child can hold.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpace {
    actions: Vec<Action>,
}

impl ActionSpace {
    /// The four unit moves of a 4-connected grid.
    pub fn cardinal() -> Self {
        Self {
            actions: vec![Action::UP, Action::DOWN, Action::LEFT, Action::RIGHT],
        }
    }

    /// The eight unit moves of an 8-connected grid.
    pub fn octile() -> Self {
        let mut actions = Self::cardinal().actions;
        actions.extend([
            Action::new(1, 1),
            Action::new(1, -1),
            Action::new(-1, 1),
            Action::new(-1, -1),
        ]);
        Self { actions }
    }

    /// A user-supplied alphabet. Duplicates are removed, order is kept.
    pub fn custom(actions: impl IntoIterator<Item = Action>) -> Result<Self> {
        let mut unique: Vec<Action> = Vec::new();
        for action in actions {
            if !unique.contains(&action) {
                unique.push(action);
            }
        }
        let space = Self { actions: unique };
        space.validate()?;
        Ok(space)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Draws one action uniformly at random.
    ///
    /// # Panics
    /// Panics if the space is empty; configs reject that in `validate()`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Action {
        self.actions[rng.random_range(0..self.actions.len())]
    }

    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(SearchError::InvalidConfig(
                "action space must contain at least one action".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::cardinal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_cardinal_space() {
        let space = ActionSpace::cardinal();
        assert_eq!(space.len(), 4);
        assert!(space.actions().iter().all(|a| a.length() == 1));
    }

    #[test]
    fn test_octile_space() {
        let space = ActionSpace::octile();
        assert_eq!(space.len(), 8);
        let set: HashSet<Action> = space.actions().iter().copied().collect();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_custom_deduplicates() {
        let space =
            ActionSpace::custom([Action::UP, Action::UP, Action::new(2, 0)]).unwrap();
        assert_eq!(space.actions(), &[Action::UP, Action::new(2, 0)]);
    }

    #[test]
    fn test_custom_rejects_empty() {
        assert!(ActionSpace::custom(Vec::<Action>::new()).is_err());
    }

    #[test]
    fn test_sample_stays_in_space() {
        let space = ActionSpace::cardinal();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let a = space.sample(&mut rng);
            assert!(space.actions().contains(&a));
            seen.insert(a);
        }
        assert_eq!(seen.len(), 4, "every cardinal move should be drawn");
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::new(-1, 3).to_string(), "(-1, 3)");
    }
}
