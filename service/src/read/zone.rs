//! [`Zone`]-related read definitions.
//!
//! [`Zone`]: crate::domain::Zone

use derive_more::{From, Into};

use crate::domain::venue;
#[cfg(doc)]
use crate::domain::{Venue, Zone};

/// Sum of [`Zone`] capacities already allocated within one [`Venue`].
///
/// Wide enough to hold any sum of `INT4` capacities without overflowing.
#[derive(Clone, Copy, Debug, Default, Eq, From, Hash, Into, PartialEq)]
pub struct CapacitySum(i64);

impl CapacitySum {
    /// Indicates whether a new [`Zone`] of the provided `capacity` keeps
    /// this [`CapacitySum`] within the [`Venue`]'s `total` capacity.
    #[must_use]
    pub fn admits(
        self,
        capacity: venue::Capacity,
        total: venue::Capacity,
    ) -> bool {
        self.0 + i64::from(capacity.get()) <= i64::from(total.get())
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::venue;

    use super::CapacitySum;

    #[test]
    fn admits_up_to_total_capacity() {
        let total = venue::Capacity::new(500).unwrap();

        assert!(CapacitySum::from(300)
            .admits(venue::Capacity::new(200).unwrap(), total));
        assert!(CapacitySum::default()
            .admits(venue::Capacity::new(500).unwrap(), total));

        assert!(!CapacitySum::from(300)
            .admits(venue::Capacity::new(201).unwrap(), total));
    }

    #[test]
    fn admits_near_i32_max_without_overflowing() {
        let total = venue::Capacity::new(i32::MAX).unwrap();
        let capacity = venue::Capacity::new(2_000_000_000).unwrap();

        assert!(!CapacitySum::from(2_000_000_000_i64)
            .admits(capacity, total));
        assert!(CapacitySum::from(i64::from(i32::MAX) - 2_000_000_000)
            .admits(capacity, total));
    }
}
