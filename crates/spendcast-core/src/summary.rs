//! Spending summary
//!
//! Condenses a user's history and forecast into the figures a report or an
//! assistant prompt needs. Structured data only; rendering is the caller's job.

use serde::Serialize;

use crate::forecast::{ForecastBasis, ForecastTable};
use crate::history::SpendingHistory;
use crate::models::{UserProfile, YearMonth};

/// Number of categories listed in `top_categories`
pub const TOP_CATEGORY_COUNT: usize = 3;

/// Number of trailing months listed in `recent_months`
pub const RECENT_MONTH_COUNT: usize = 3;

/// One category's share of total spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: f64,
    /// Fraction of all spending, 0.0 - 1.0
    pub share: f64,
}

/// Total spending for one observed month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: YearMonth,
    pub total: f64,
}

/// Headline figures for a user's spending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingSummary {
    pub user_id: Option<i64>,
    pub income: Option<f64>,
    /// Number of observed months
    pub months_observed: usize,
    /// Mean of monthly totals, `None` without history
    pub average_monthly_spending: Option<f64>,
    pub top_categories: Vec<CategoryShare>,
    /// Last three months, oldest first; empty with fewer than three
    pub recent_months: Vec<MonthTotal>,
    pub forecast_basis: ForecastBasis,
    pub next_month_forecast: Option<f64>,
    /// Income minus average spending
    pub estimated_monthly_savings: Option<f64>,
}

impl SpendingSummary {
    pub fn build(
        profile: Option<&UserProfile>,
        history: &SpendingHistory,
        forecast: &ForecastTable,
    ) -> Self {
        let table = history.table();
        let monthly_totals = table.monthly_totals();

        let average_monthly_spending = if monthly_totals.is_empty() {
            None
        } else {
            Some(monthly_totals.iter().sum::<f64>() / monthly_totals.len() as f64)
        };

        let mut totals = table.category_totals();
        let grand_total: f64 = totals.iter().map(|(_, t)| t).sum();
        // Stable sort keeps name order among equal totals
        totals.sort_by(|a, b| b.1.total_cmp(&a.1));
        let top_categories = totals
            .into_iter()
            .take(TOP_CATEGORY_COUNT)
            .map(|(category, total)| CategoryShare {
                share: if grand_total > 0.0 {
                    total / grand_total
                } else {
                    0.0
                },
                category,
                total,
            })
            .collect();

        let recent_months = if monthly_totals.len() >= RECENT_MONTH_COUNT {
            let start = monthly_totals.len() - RECENT_MONTH_COUNT;
            table.months()[start..]
                .iter()
                .zip(&monthly_totals[start..])
                .map(|(month, total)| MonthTotal {
                    month: *month,
                    total: *total,
                })
                .collect()
        } else {
            Vec::new()
        };

        let income = profile.map(|p| p.income);
        let estimated_monthly_savings = match (income, average_monthly_spending) {
            (Some(income), Some(avg)) => Some(income - avg),
            _ => None,
        };

        Self {
            user_id: profile.map(|p| p.id),
            income,
            months_observed: history.month_count(),
            average_monthly_spending,
            top_categories,
            recent_months,
            forecast_basis: forecast.basis(),
            next_month_forecast: forecast.next_month_total(),
            estimated_monthly_savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::forecast_from_history;
    use crate::models::TransactionRecord;
    use chrono::NaiveDate;

    fn record(year: i32, month: u32, category: &str, amount: f64) -> TransactionRecord {
        TransactionRecord {
            user_id: 1,
            category: category.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(year, month, 10).unwrap(),
        }
    }

    fn sample_history() -> SpendingHistory {
        let mut records = Vec::new();
        for (month, food) in [(1, 300.0), (2, 500.0), (3, 400.0), (4, 600.0)] {
            records.push(record(2024, month, "Housing", 1000.0));
            records.push(record(2024, month, "Food", food));
            records.push(record(2024, month, "Fun", 25.0));
            records.push(record(2024, month, "Gifts", 25.0));
        }
        SpendingHistory::from_records(&records)
    }

    #[test]
    fn test_summary_figures() {
        let history = sample_history();
        let forecast = forecast_from_history(&history, 2).unwrap();
        let profile = UserProfile {
            id: 1,
            name: "Alice".to_string(),
            income: 3000.0,
        };

        let summary = SpendingSummary::build(Some(&profile), &history, &forecast);

        assert_eq!(summary.months_observed, 4);
        // (1350 + 1550 + 1450 + 1650) / 4
        assert_eq!(summary.average_monthly_spending, Some(1500.0));
        assert_eq!(summary.estimated_monthly_savings, Some(1500.0));

        let top: Vec<&str> = summary
            .top_categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        // Fun and Gifts tie; name order decides
        assert_eq!(top, vec!["Housing", "Food", "Fun"]);
        assert!((summary.top_categories[0].share - 4000.0 / 6000.0).abs() < 1e-12);

        let recent: Vec<String> = summary
            .recent_months
            .iter()
            .map(|m| m.month.to_string())
            .collect();
        assert_eq!(recent, vec!["2024-02", "2024-03", "2024-04"]);
        assert_eq!(summary.recent_months[2].total, 1650.0);

        assert_eq!(summary.forecast_basis, ForecastBasis::History);
        assert_eq!(
            summary.next_month_forecast,
            forecast.table().monthly_totals().first().copied()
        );
    }

    #[test]
    fn test_summary_without_profile_or_history() {
        let history = SpendingHistory::from_records(&[
            record(2024, 1, "Food", 100.0),
            record(2024, 2, "Food", 200.0),
            record(2024, 3, "Food", 300.0),
        ]);
        let forecast = forecast_from_history(&history, 1).unwrap();

        let summary = SpendingSummary::build(None, &history, &forecast);
        assert_eq!(summary.user_id, None);
        assert_eq!(summary.estimated_monthly_savings, None);
        assert_eq!(summary.top_categories[0].share, 1.0);

        let short = SpendingHistory::from_records(&[record(2024, 1, "Food", 100.0)]);
        let summary = SpendingSummary::build(None, &short, &forecast);
        assert!(summary.recent_months.is_empty());
        assert_eq!(summary.average_monthly_spending, Some(100.0));
    }
}
