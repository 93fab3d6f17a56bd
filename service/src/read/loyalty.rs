//! Loyalty-related read definitions.

use derive_more::{From, Into};

use crate::domain::loyalty;
#[cfg(doc)]
use crate::domain::User;

/// Current loyalty [`Points`] balance of a [`User`]: the sum of their
/// ledger entry deltas.
///
/// [`Points`]: loyalty::Points
#[derive(
    Clone, Copy, Debug, Default, Eq, From, Hash, Into, Ord, PartialEq,
    PartialOrd,
)]
pub struct Balance(i64);

impl Balance {
    /// Indicates whether this [`Balance`] covers the provided `cost`.
    #[must_use]
    pub fn covers(self, cost: loyalty::Points) -> bool {
        self.0 >= cost.get()
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::loyalty;

    use super::Balance;

    #[test]
    fn covers_cost_up_to_balance() {
        assert!(Balance::from(100).covers(loyalty::Points::from(100)));
        assert!(Balance::from(100).covers(loyalty::Points::from(1)));

        assert!(!Balance::from(100).covers(loyalty::Points::from(101)));
        assert!(!Balance::default().covers(loyalty::Points::from(1)));
    }
}
