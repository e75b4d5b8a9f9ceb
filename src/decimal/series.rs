//! Closed-form geometric cost series, used by bulk purchases and by
//! "what level does this much reach" displays.

use super::Decimal;

/// Counts at or above this are not re-checked against the forward sum;
/// one unit no longer changes the total at that magnitude.
const BOUNDARY_CHECK_LIMIT: f64 = 1e15;

impl Decimal {
    /// Total price of the next `items` purchases when the `k`-th unit costs
    /// `price_start * price_ratio^k` and `current_owned` units are owned.
    pub fn sum_geometric_series(
        items: impl Into<Decimal>,
        price_start: impl Into<Decimal>,
        price_ratio: impl Into<Decimal>,
        current_owned: impl Into<Decimal>,
    ) -> Decimal {
        let items = items.into();
        let price_start = price_start.into();
        let price_ratio = price_ratio.into();
        let current_owned = current_owned.into();

        if price_ratio == Decimal::ONE {
            return price_start * items;
        }
        let actual_start = price_start * price_ratio.pow(current_owned);
        actual_start * ((price_ratio.pow(items) - 1.0) / (price_ratio - 1.0))
    }

    /// Largest whole number of further purchases whose
    /// [`sum_geometric_series`](Decimal::sum_geometric_series) fits in
    /// `resources_available`. Never negative; zero whenever the inputs are
    /// outside the curve's domain.
    pub fn afford_geometric_series(
        resources_available: impl Into<Decimal>,
        price_start: impl Into<Decimal>,
        price_ratio: impl Into<Decimal>,
        current_owned: impl Into<Decimal>,
    ) -> Decimal {
        let resources = resources_available.into();
        let price_start = price_start.into();
        let price_ratio = price_ratio.into();
        let current_owned = current_owned.into();

        if resources.is_nan() || !(price_start > Decimal::ZERO) || !(price_ratio > Decimal::ZERO)
        {
            return Decimal::ZERO;
        }
        if price_ratio == Decimal::ONE {
            return (resources / price_start).floor().max(Decimal::ZERO).or_zero();
        }

        let actual_start = price_start * price_ratio.pow(current_owned);
        let estimate = ((resources / actual_start * (price_ratio - 1.0) + 1.0).log10()
            / price_ratio.log10())
        .floor();
        if estimate.is_nan() {
            return Decimal::ZERO;
        }
        let mut count = estimate.max(Decimal::ZERO);

        // The logarithm can land one unit off at exact boundaries.
        if count.is_finite() && count < BOUNDARY_CHECK_LIMIT {
            let fits = |n: Decimal| {
                Decimal::sum_geometric_series(n, price_start, price_ratio, current_owned)
                    <= resources
            };
            if fits(count + 1.0) {
                count += 1.0;
            } else if count > Decimal::ZERO && !fits(count) {
                count -= 1.0;
            }
        }
        count
    }
}
