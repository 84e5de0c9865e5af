//! Income heuristic for users without enough history
//!
//! Assumes a fixed share of monthly income is spent and splits it across the
//! store's categories by configured weight. Every forecast month gets the same
//! value; there is no trend.

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::config::{FallbackLabels, ForecastConfig};
use crate::error::{Error, Result};
use crate::models::YearMonth;
use crate::store::TransactionStore;
use crate::table::MonthlyTable;

use super::{ForecastBasis, ForecastTable, ProjectionMethod};

/// Month labels for the heuristic, starting after `today`
///
/// With [`FallbackLabels::ThirtyDay`] the i-th label is the month containing
/// `today + 30·i` days. Months are not all 30 days long, so labels drift: a
/// label may repeat the current month or skip one.
pub fn fallback_months(
    today: NaiveDate,
    horizon: usize,
    labels: FallbackLabels,
) -> Option<Vec<YearMonth>> {
    (1..=horizon)
        .map(|i| match labels {
            FallbackLabels::ThirtyDay => today
                .checked_add_days(Days::new(30 * i as u64))
                .map(YearMonth::from_date),
            FallbackLabels::Calendar => {
                YearMonth::from_date(today).plus_months(u32::try_from(i).ok()?)
            }
        })
        .collect()
}

pub(super) fn income_forecast<S: TransactionStore + ?Sized>(
    store: &S,
    user_id: i64,
    horizon: u32,
    config: &ForecastConfig,
    today: NaiveDate,
) -> Result<ForecastTable> {
    let months = fallback_months(today, horizon as usize, config.fallback_labels)
        .ok_or(Error::InvalidHorizon(horizon))?;

    let Some(user) = store.get_user(user_id)? else {
        info!(user_id, "No user record; returning empty forecast");
        return Ok(ForecastTable {
            basis: ForecastBasis::UserNotFound,
            table: MonthlyTable::months_only(months),
            methods: Vec::new(),
        });
    };

    let budget = user.income * config.spend_ratio;
    let categories = store.list_category_names()?;

    let (columns, methods): (Vec<_>, Vec<_>) = categories
        .into_iter()
        .map(|category| {
            let weight = config.weight(&category);
            let values = vec![budget * weight; months.len()];
            let method = ProjectionMethod::IncomeWeighted { weight };
            ((category, values), method)
        })
        .unzip();

    info!(
        user_id,
        income = user.income,
        categories = columns.len(),
        "Forecasting from income heuristic"
    );

    let table =
        MonthlyTable::from_columns(months, columns).ok_or(Error::InvalidHorizon(horizon))?;

    Ok(ForecastTable {
        basis: ForecastBasis::IncomeHeuristic,
        table,
        methods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labels(months: &[YearMonth]) -> Vec<String> {
        months.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn test_thirty_day_labels_from_mid_month() {
        let months = fallback_months(date(2026, 3, 15), 3, FallbackLabels::ThirtyDay).unwrap();
        assert_eq!(labels(&months), vec!["2026-04", "2026-05", "2026-06"]);
    }

    #[test]
    fn test_thirty_day_labels_drift() {
        // Jan 1 + 30 days is still January; + 60 days skips February
        let months = fallback_months(date(2026, 1, 1), 2, FallbackLabels::ThirtyDay).unwrap();
        assert_eq!(labels(&months), vec!["2026-01", "2026-03"]);
    }

    #[test]
    fn test_calendar_labels() {
        let months = fallback_months(date(2026, 1, 1), 2, FallbackLabels::Calendar).unwrap();
        assert_eq!(labels(&months), vec!["2026-02", "2026-03"]);

        let months = fallback_months(date(2025, 12, 31), 2, FallbackLabels::Calendar).unwrap();
        assert_eq!(labels(&months), vec!["2026-01", "2026-02"]);
    }
}
