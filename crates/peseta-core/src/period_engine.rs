//! Period-boundary arithmetic and spend classification for budgets.
//!
//! Everything here is a pure function of its arguments: the reference date is
//! always passed in, never read from a clock.

use chrono::{Datelike, Days, Months, NaiveDate};
use peseta_domain::{
    BudgetPeriod, BudgetStatus, PeriodType, StatusLevel, DANGER_THRESHOLD_PERCENT,
    WARNING_THRESHOLD_PERCENT,
};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::{time::Clock, CoreError};

/// Decimal places kept on `percent_used` before it is compared against thresholds.
pub const PERCENT_SCALE: u32 = 2;

/// Stateless budget period utilities.
pub struct BudgetPeriodEngine;

impl BudgetPeriodEngine {
    /// Returns the last day of the period that begins on `start`.
    ///
    /// Weekly and biweekly periods are 7 and 14 day windows. Monthly periods
    /// always close on the last day of `start`'s calendar month.
    pub fn compute_period_end(
        start: NaiveDate,
        period_type: PeriodType,
    ) -> Result<NaiveDate, CoreError> {
        let end = match period_type.span_days() {
            Some(span) => start.checked_add_days(Days::new(span - 1)),
            None => last_day_of_month(start),
        };
        end.ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "{} period starting {} ends outside the supported calendar",
                period_type, start
            ))
        })
    }

    /// Finds the occurrence of a recurring period that contains `as_of`.
    pub fn compute_current_period(
        start: NaiveDate,
        period_type: PeriodType,
        as_of: NaiveDate,
    ) -> Result<BudgetPeriod, CoreError> {
        let period_start = match period_type.span_days() {
            Some(span) => cycle_start_linear(start, as_of, span)?,
            None => cycle_start_monthly(start, as_of)?,
        };
        let period_end = Self::compute_period_end(period_start, period_type)?;
        let period = BudgetPeriod::new(period_start, period_end)?;
        debug!(%start, %period_type, %as_of, %period, "resolved current budget period");
        Ok(period)
    }

    /// [`compute_current_period`](Self::compute_current_period) evaluated at the clock's date.
    pub fn current_period_today(
        start: NaiveDate,
        period_type: PeriodType,
        clock: &dyn Clock,
    ) -> Result<BudgetPeriod, CoreError> {
        Self::compute_current_period(start, period_type, clock.today())
    }

    /// Classifies `total_spent` against `limit_amount`.
    pub fn classify_status(
        total_spent: Decimal,
        limit_amount: Decimal,
    ) -> Result<BudgetStatus, CoreError> {
        if limit_amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "limit amount must be greater than 0 (got {})",
                limit_amount
            )));
        }
        if total_spent < Decimal::ZERO {
            return Err(CoreError::InvalidInput(format!(
                "total spent cannot be negative (got {})",
                total_spent
            )));
        }

        // The ratio is only taken below the limit, where it stays under 100.
        let percent_used = if total_spent >= limit_amount {
            Decimal::ONE_HUNDRED
        } else {
            total_spent
                .checked_div(limit_amount)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(|| {
                    CoreError::InvalidInput(format!(
                        "spend {} against limit {} is out of range",
                        total_spent, limit_amount
                    ))
                })?
                .round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
        };
        let remaining = limit_amount.saturating_sub(total_spent);

        let level = StatusLevel::from_percent(percent_used);
        Ok(BudgetStatus {
            percent_used,
            remaining,
            is_over_budget: total_spent > limit_amount,
            is_near_limit: percent_used >= WARNING_THRESHOLD_PERCENT
                && percent_used < DANGER_THRESHOLD_PERCENT,
            level,
        })
    }
}

fn first_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    first_day_of_month(date)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

fn cycle_start_linear(
    anchor: NaiveDate,
    reference: NaiveDate,
    interval_days: u64,
) -> Result<NaiveDate, CoreError> {
    if reference < anchor {
        return Err(before_anchor(anchor, reference));
    }
    let elapsed = (reference - anchor).num_days().unsigned_abs();
    let steps = elapsed / interval_days;
    anchor
        .checked_add_days(Days::new(steps * interval_days))
        .ok_or_else(|| before_anchor(anchor, reference))
}

fn cycle_start_monthly(anchor: NaiveDate, reference: NaiveDate) -> Result<NaiveDate, CoreError> {
    let anchor_month = first_day_of_month(anchor).ok_or_else(|| before_anchor(anchor, reference))?;
    let reference_month =
        first_day_of_month(reference).ok_or_else(|| before_anchor(anchor, reference))?;
    // A monthly budget covers its whole start month, even the days before the anchor.
    if reference_month < anchor_month {
        return Err(before_anchor(anchor, reference));
    }
    Ok(reference_month)
}

fn before_anchor(anchor: NaiveDate, reference: NaiveDate) -> CoreError {
    CoreError::InvalidInput(format!(
        "reference date {} precedes budget start {}",
        reference, anchor
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekly_and_biweekly_end_dates() {
        let start = date(2024, 12, 28);
        assert_eq!(
            BudgetPeriodEngine::compute_period_end(start, PeriodType::Weekly).unwrap(),
            date(2025, 1, 3)
        );
        assert_eq!(
            BudgetPeriodEngine::compute_period_end(start, PeriodType::Biweekly).unwrap(),
            date(2025, 1, 10)
        );
    }

    #[test]
    fn monthly_end_ignores_start_day() {
        for (start, expected) in [
            (date(2024, 2, 5), date(2024, 2, 29)),
            (date(2024, 2, 29), date(2024, 2, 29)),
            (date(2023, 2, 5), date(2023, 2, 28)),
            (date(2024, 12, 15), date(2024, 12, 31)),
            (date(2024, 4, 1), date(2024, 4, 30)),
        ] {
            assert_eq!(
                BudgetPeriodEngine::compute_period_end(start, PeriodType::Monthly).unwrap(),
                expected,
                "start {start}"
            );
        }
    }

    #[test]
    fn end_date_past_calendar_limit_is_invalid() {
        let err = BudgetPeriodEngine::compute_period_end(NaiveDate::MAX, PeriodType::Weekly)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn weekly_current_period_advances_whole_weeks() {
        let start = date(2024, 3, 4);
        let period =
            BudgetPeriodEngine::compute_current_period(start, PeriodType::Weekly, date(2024, 3, 20))
                .unwrap();
        assert_eq!(period.start, date(2024, 3, 18));
        assert_eq!(period.end, date(2024, 3, 24));
    }

    #[test]
    fn current_period_on_boundaries() {
        let start = date(2024, 3, 4);
        let first =
            BudgetPeriodEngine::compute_current_period(start, PeriodType::Biweekly, start).unwrap();
        assert_eq!(first.start, start);
        assert_eq!(first.end, date(2024, 3, 17));

        let last_day = BudgetPeriodEngine::compute_current_period(
            start,
            PeriodType::Biweekly,
            date(2024, 3, 17),
        )
        .unwrap();
        assert_eq!(last_day, first);

        let next = BudgetPeriodEngine::compute_current_period(
            start,
            PeriodType::Biweekly,
            date(2024, 3, 18),
        )
        .unwrap();
        assert_eq!(next.start, date(2024, 3, 18));
        assert_eq!(next.end, date(2024, 3, 31));
    }

    #[test]
    fn fixed_periods_reject_reference_before_anchor() {
        let err = BudgetPeriodEngine::compute_current_period(
            date(2024, 3, 4),
            PeriodType::Weekly,
            date(2024, 3, 3),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn monthly_current_period_uses_reference_month() {
        let period = BudgetPeriodEngine::compute_current_period(
            date(2024, 1, 31),
            PeriodType::Monthly,
            date(2024, 2, 15),
        )
        .unwrap();
        assert_eq!(period.start, date(2024, 2, 1));
        assert_eq!(period.end, date(2024, 2, 29));
    }

    #[test]
    fn monthly_reference_inside_start_month_before_anchor() {
        let period = BudgetPeriodEngine::compute_current_period(
            date(2024, 5, 20),
            PeriodType::Monthly,
            date(2024, 5, 3),
        )
        .unwrap();
        assert_eq!(period.start, date(2024, 5, 1));
        assert_eq!(period.end, date(2024, 5, 31));

        let err = BudgetPeriodEngine::compute_current_period(
            date(2024, 5, 20),
            PeriodType::Monthly,
            date(2024, 4, 30),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn current_period_today_reads_the_clock() {
        let clock = FixedClock::on(date(2024, 7, 9));
        let period =
            BudgetPeriodEngine::current_period_today(date(2024, 7, 1), PeriodType::Weekly, &clock)
                .unwrap();
        assert_eq!(period.start, date(2024, 7, 8));
    }

    #[test]
    fn classify_status_bands() {
        let ok = BudgetPeriodEngine::classify_status(dec!(69), dec!(100)).unwrap();
        assert_eq!(ok.level, StatusLevel::Ok);
        assert!(!ok.is_near_limit);

        let warning = BudgetPeriodEngine::classify_status(dec!(70), dec!(100)).unwrap();
        assert_eq!(warning.level, StatusLevel::Warning);
        assert!(warning.is_near_limit);

        let danger = BudgetPeriodEngine::classify_status(dec!(90), dec!(100)).unwrap();
        assert_eq!(danger.level, StatusLevel::Danger);
        assert!(!danger.is_near_limit);
        assert!(!danger.is_over_budget);
    }

    #[test]
    fn classify_status_caps_percent_and_reports_overshoot() {
        let status = BudgetPeriodEngine::classify_status(dec!(150), dec!(100)).unwrap();
        assert_eq!(status.percent_used, dec!(100));
        assert!(status.is_over_budget);
        assert_eq!(status.remaining, dec!(-50));
        assert_eq!(status.level, StatusLevel::Danger);
    }

    #[test]
    fn classify_status_zero_spend() {
        let status = BudgetPeriodEngine::classify_status(dec!(0), dec!(100)).unwrap();
        assert_eq!(status.percent_used, dec!(0));
        assert_eq!(status.level, StatusLevel::Ok);
        assert!(!status.is_over_budget);
        assert_eq!(status.remaining, dec!(100));
    }

    #[test]
    fn classify_status_rounds_before_comparing() {
        let just_under = BudgetPeriodEngine::classify_status(dec!(69.999999), dec!(100)).unwrap();
        assert_eq!(just_under.percent_used, dec!(70.00));
        assert_eq!(just_under.level, StatusLevel::Warning);

        let thirds = BudgetPeriodEngine::classify_status(dec!(200), dec!(300)).unwrap();
        assert_eq!(thirds.percent_used, dec!(66.67));
        assert_eq!(thirds.level, StatusLevel::Ok);
    }

    #[test]
    fn spend_equal_to_limit_is_not_over_budget() {
        let status = BudgetPeriodEngine::classify_status(dec!(100), dec!(100)).unwrap();
        assert!(!status.is_over_budget);
        assert_eq!(status.remaining, dec!(0));
        assert_eq!(status.level, StatusLevel::Danger);
    }

    #[test]
    fn classify_status_rejects_invalid_amounts() {
        for (spent, limit) in [(dec!(10), dec!(0)), (dec!(0), dec!(0)), (dec!(10), dec!(-5))] {
            assert!(matches!(
                BudgetPeriodEngine::classify_status(spent, limit),
                Err(CoreError::InvalidInput(_))
            ));
        }
        assert!(matches!(
            BudgetPeriodEngine::classify_status(dec!(-1), dec!(100)),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn classify_status_handles_spend_far_beyond_limit() {
        for (spent, limit) in [(dec!(1e28), dec!(0.01)), (Decimal::MAX, dec!(1))] {
            let status = BudgetPeriodEngine::classify_status(spent, limit).unwrap();
            assert_eq!(status.percent_used, dec!(100));
            assert!(status.is_over_budget);
            assert!(!status.is_near_limit);
            assert_eq!(status.level, StatusLevel::Danger);
            assert!(status.remaining < Decimal::ZERO);
        }
    }
}
