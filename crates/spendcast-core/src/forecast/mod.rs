//! Spending forecast engine
//!
//! Path selection, in order:
//! - horizon of zero months: rejected with [`Error::InvalidHorizon`]
//! - fewer than `min_history_months` observed months (including none): the
//!   income heuristic in [`fallback`]
//! - otherwise: an independent AR(1) model per category column, degrading to
//!   that column's historical mean when the model cannot be fitted
//!
//! One category's model failure never affects another category's forecast.

pub mod fallback;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::autoregressive::{running_mean, Ar1Model, ModelError};
use crate::config::ForecastConfig;
use crate::error::{Error, Result};
use crate::history::{get_spending_history, SpendingHistory};
use crate::models::YearMonth;
use crate::store::TransactionStore;
use crate::table::MonthlyTable;

pub use fallback::fallback_months;

/// Which path produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastBasis {
    /// Per-category models over the user's history
    History,
    /// Income share split by category weights
    IncomeHeuristic,
    /// No user record; the table has month labels but no categories
    UserNotFound,
}

/// How one category column was projected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ProjectionMethod {
    Autoregressive {
        phi: f64,
        mean: f64,
        sigma2: f64,
        aic: f64,
    },
    HistoricalMean {
        mean: f64,
        reason: String,
    },
    IncomeWeighted {
        weight: f64,
    },
}

/// Outcome of projecting a single category series
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryProjection {
    /// The AR(1) model fitted and projected cleanly
    Fitted { model: Ar1Model, values: Vec<f64> },
    /// The model failed; the historical mean is repeated instead
    MeanFallback {
        mean: f64,
        reason: ModelError,
        values: Vec<f64>,
    },
}

impl CategoryProjection {
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Fitted { values, .. } | Self::MeanFallback { values, .. } => values,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::MeanFallback { .. })
    }

    fn into_parts(self) -> (ProjectionMethod, Vec<f64>) {
        match self {
            Self::Fitted { model, values } => (
                ProjectionMethod::Autoregressive {
                    phi: model.phi(),
                    mean: model.mean(),
                    sigma2: model.sigma2(),
                    aic: model.aic(),
                },
                values,
            ),
            Self::MeanFallback {
                mean,
                reason,
                values,
            } => (
                ProjectionMethod::HistoricalMean {
                    mean,
                    reason: reason.to_string(),
                },
                values,
            ),
        }
    }
}

/// Project one category series `horizon` months ahead
pub fn project_category(series: &[f64], horizon: usize) -> CategoryProjection {
    let fitted = Ar1Model::fit(series).and_then(|model| {
        let values = model.forecast(horizon)?;
        Ok((model, values))
    });

    match fitted {
        Ok((model, values)) => CategoryProjection::Fitted { model, values },
        Err(reason) => {
            let mean = running_mean(series);
            CategoryProjection::MeanFallback {
                mean,
                reason,
                values: vec![mean; horizon],
            }
        }
    }
}

/// Forecast spending by category for future months
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastTable {
    basis: ForecastBasis,
    #[serde(flatten)]
    table: MonthlyTable,
    /// One entry per category column
    methods: Vec<ProjectionMethod>,
}

impl ForecastTable {
    pub fn basis(&self) -> ForecastBasis {
        self.basis
    }

    /// True when no category was forecast (unknown user, or no categories)
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    pub fn months(&self) -> &[YearMonth] {
        self.table.months()
    }

    pub fn categories(&self) -> &[String] {
        self.table.categories()
    }

    pub fn table(&self) -> &MonthlyTable {
        &self.table
    }

    pub fn methods(&self) -> &[ProjectionMethod] {
        &self.methods
    }

    /// Projection method for one category
    pub fn method(&self, category: &str) -> Option<&ProjectionMethod> {
        self.categories()
            .iter()
            .position(|c| c == category)
            .map(|i| &self.methods[i])
    }

    /// Total forecast spending for the first forecast month
    pub fn next_month_total(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        self.table.monthly_totals().first().copied()
    }
}

/// Computes spending history and forecasts from a transaction store
///
/// Holds no mutable state; every call re-reads the store.
pub struct SpendingForecaster<S> {
    store: S,
    config: ForecastConfig,
    reference_date: Option<NaiveDate>,
}

impl<S: TransactionStore> SpendingForecaster<S> {
    /// Create a forecaster with the default configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, ForecastConfig::default())
    }

    pub fn with_config(store: S, config: ForecastConfig) -> Self {
        Self {
            store,
            config,
            reference_date: None,
        }
    }

    /// Fix "today" for the income heuristic's month labels
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Settings this forecaster was built with
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Monthly spending by category for a user
    pub fn spending_history(&self, user_id: i64) -> Result<SpendingHistory> {
        get_spending_history(&self.store, user_id)
    }

    /// Forecast `horizon` months of spending by category for a user
    pub fn forecast_spending(&self, user_id: i64, horizon: u32) -> Result<ForecastTable> {
        self.forecast_with_history(user_id, horizon)
            .map(|(_, forecast)| forecast)
    }

    /// Like [`forecast_spending`](Self::forecast_spending), also returning the history used
    pub fn forecast_with_history(
        &self,
        user_id: i64,
        horizon: u32,
    ) -> Result<(SpendingHistory, ForecastTable)> {
        if horizon == 0 {
            return Err(Error::InvalidHorizon(horizon));
        }

        let history = self.spending_history(user_id)?;

        if history.month_count() < self.config.min_history_months {
            info!(
                user_id,
                months = history.month_count(),
                required = self.config.min_history_months,
                "Insufficient spending history"
            );
            let today = self
                .reference_date
                .unwrap_or_else(|| chrono::Local::now().date_naive());
            let forecast =
                fallback::income_forecast(&self.store, user_id, horizon, &self.config, today)?;
            return Ok((history, forecast));
        }

        let forecast = forecast_from_history(&history, horizon)?;
        Ok((history, forecast))
    }
}

/// Per-category model forecast over an existing history
///
/// Forecast months are the calendar months following the last observed month.
pub fn forecast_from_history(history: &SpendingHistory, horizon: u32) -> Result<ForecastTable> {
    if horizon == 0 {
        return Err(Error::InvalidHorizon(horizon));
    }
    let last = history
        .last_month()
        .ok_or_else(|| Error::NotFound("spending history is empty".to_string()))?;

    let months = (1..=horizon)
        .map(|i| last.plus_months(i))
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::InvalidHorizon(horizon))?;

    let (columns, methods): (Vec<_>, Vec<_>) = history
        .table()
        .columns()
        .map(|(category, series)| {
            let projection = project_category(series, horizon as usize);
            match &projection {
                CategoryProjection::Fitted { model, .. } => debug!(
                    category,
                    phi = model.phi(),
                    mean = model.mean(),
                    aic = model.aic(),
                    log_likelihood = model.log_likelihood(),
                    "Fitted AR(1) model"
                ),
                CategoryProjection::MeanFallback { reason, mean, .. } => warn!(
                    category,
                    error = %reason,
                    mean,
                    "AR(1) fit failed, using historical mean"
                ),
            }
            let (method, values) = projection.into_parts();
            ((category.to_string(), values), method)
        })
        .unzip();

    let table =
        MonthlyTable::from_columns(months, columns).ok_or(Error::InvalidHorizon(horizon))?;

    Ok(ForecastTable {
        basis: ForecastBasis::History,
        table,
        methods,
    })
}
