//! Month × category matrix shared by the history and forecast tables

use serde::Serialize;

use crate::models::YearMonth;

/// A dense table with one row per month and one column per category
///
/// Values are stored column-major: `columns[c][r]` is the amount for
/// category `c` in month `r`. Every column has exactly one value per month.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MonthlyTable {
    months: Vec<YearMonth>,
    categories: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl MonthlyTable {
    /// Build from month labels and `(category, values)` columns
    ///
    /// Returns `None` if any column's length differs from the month count.
    pub fn from_columns(months: Vec<YearMonth>, columns: Vec<(String, Vec<f64>)>) -> Option<Self> {
        if columns.iter().any(|(_, values)| values.len() != months.len()) {
            return None;
        }
        let (categories, columns) = columns.into_iter().unzip();
        Some(Self {
            months,
            categories,
            columns,
        })
    }

    /// Month labels with no category columns
    pub(crate) fn months_only(months: Vec<YearMonth>) -> Self {
        Self {
            months,
            categories: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// True when the table carries no category data
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn row_count(&self) -> usize {
        self.months.len()
    }

    /// Values for one category, oldest month first
    pub fn column(&self, category: &str) -> Option<&[f64]> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| self.columns[i].as_slice())
    }

    /// `(category, values)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// One month's values in column order
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.months.len() {
            return None;
        }
        Some(self.columns.iter().map(|col| col[index]).collect())
    }

    /// `(month, values)` pairs, oldest first
    pub fn rows(&self) -> impl Iterator<Item = (YearMonth, Vec<f64>)> + '_ {
        self.months
            .iter()
            .enumerate()
            .map(|(i, month)| (*month, self.columns.iter().map(|col| col[i]).collect()))
    }

    pub fn value(&self, month: YearMonth, category: &str) -> Option<f64> {
        let row = self.months.iter().position(|m| *m == month)?;
        self.column(category).map(|col| col[row])
    }

    /// Sum across categories for each month
    pub fn monthly_totals(&self) -> Vec<f64> {
        (0..self.months.len())
            .map(|i| self.columns.iter().map(|col| col[i]).sum())
            .collect()
    }

    /// Sum across months for each category, in column order
    pub fn category_totals(&self) -> Vec<(String, f64)> {
        self.columns()
            .map(|(cat, values)| (cat.to_string(), values.iter().sum()))
            .collect()
    }
}
