use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln};

use crate::entity::{DailyRentalRate, DateOut, DateReturned};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalFee(Decimal);

impl RentalFee {
    pub fn new(fee: impl Into<Decimal>) -> Self {
        Self(fee.into())
    }

    pub fn calculate(
        rate: &DailyRentalRate,
        date_out: &DateOut,
        date_returned: &DateReturned,
    ) -> Self {
        let out: &OffsetDateTime = date_out.as_ref();
        let returned: &OffsetDateTime = date_returned.as_ref();
        let rate: &Decimal = rate.as_ref();
        Self(*rate * Decimal::from(charged_days(*returned - *out)))
    }
}

fn charged_days(elapsed: Duration) -> i64 {
    if elapsed <= Duration::ZERO {
        return 0;
    }
    let whole = elapsed.whole_days();
    if elapsed > Duration::days(whole) {
        whole + 1
    } else {
        whole
    }
}

#[cfg(test)]
mod test {
    use super::charged_days;
    use time::Duration;

    #[test]
    fn rounds_partial_days_up() {
        assert_eq!(charged_days(Duration::days(7)), 7);
        assert_eq!(charged_days(Duration::days(7) + Duration::seconds(1)), 8);
        assert_eq!(charged_days(Duration::minutes(5)), 1);
    }

    #[test]
    fn clock_skew_charges_nothing() {
        assert_eq!(charged_days(Duration::ZERO), 0);
        assert_eq!(charged_days(Duration::hours(-3)), 0);
    }
}
