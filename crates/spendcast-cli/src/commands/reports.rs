//! Report command implementations
//!
//! History and forecast tables render as an aligned table, JSON, or CSV. The
//! summary is always JSON.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use spendcast_core::{
    db::Database, ForecastBasis, ForecastConfig, MonthlyTable, ProjectionMethod,
    SpendingForecaster, SpendingSummary,
};

use super::truncate;
use crate::cli::OutputFormat;

const COLUMN_WIDTH: usize = 14;

/// Write a month × category table as aligned text
fn write_text_table<W: Write>(out: &mut W, table: &MonthlyTable) -> Result<()> {
    write!(out, "{:8}", "Month")?;
    for category in table.categories() {
        write!(
            out,
            " │ {:>w$}",
            truncate(category, COLUMN_WIDTH),
            w = COLUMN_WIDTH
        )?;
    }
    writeln!(out, " │ {:>w$}", "Total", w = COLUMN_WIDTH)?;

    let separator = format!("─┼─{}", "─".repeat(COLUMN_WIDTH));
    writeln!(
        out,
        "{}{}",
        "─".repeat(8),
        separator.repeat(table.categories().len() + 1)
    )?;

    for (month, values) in table.rows() {
        write!(out, "{:8}", month.to_string())?;
        for value in &values {
            write!(out, " │ {:>w$.2}", value, w = COLUMN_WIDTH)?;
        }
        writeln!(
            out,
            " │ {:>w$.2}",
            values.iter().sum::<f64>(),
            w = COLUMN_WIDTH
        )?;
    }

    Ok(())
}

/// Write a month × category table as CSV with a `month` column first
fn write_csv_table<W: Write>(out: &mut W, table: &MonthlyTable) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["month".to_string()];
    header.extend(table.categories().iter().cloned());
    writer.write_record(&header)?;

    for (month, values) in table.rows() {
        let mut record = vec![month.to_string()];
        record.extend(values.iter().map(|v| format!("{:.2}", v)));
        writer.write_record(&record)?;
    }

    writer.flush().context("Failed to write CSV")?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
    writeln!(out, "{}", json)?;
    Ok(())
}

pub fn cmd_history<W: Write>(
    db: &Database,
    user_id: i64,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let history = SpendingForecaster::new(db).spending_history(user_id)?;

    match format {
        OutputFormat::Json => write_json(out, &history),
        OutputFormat::Csv => write_csv_table(out, history.table()),
        OutputFormat::Table => {
            if history.is_empty() {
                writeln!(out, "No spending recorded for user {}.", user_id)?;
                return Ok(());
            }
            writeln!(out, "📊 Monthly spending for user {}", user_id)?;
            writeln!(out)?;
            write_text_table(out, history.table())
        }
    }
}

fn describe_method(method: &ProjectionMethod) -> String {
    match method {
        ProjectionMethod::Autoregressive { phi, mean, aic, .. } => {
            format!("AR(1) φ={:.3} mean={:.2} AIC={:.1}", phi, mean, aic)
        }
        ProjectionMethod::HistoricalMean { mean, reason } => {
            format!("historical mean {:.2} ({})", mean, reason)
        }
        ProjectionMethod::IncomeWeighted { weight } => {
            format!("{:.0}% of spending budget", weight * 100.0)
        }
    }
}

pub fn cmd_forecast<W: Write>(
    db: &Database,
    config: ForecastConfig,
    user_id: i64,
    months: u32,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let forecaster = SpendingForecaster::with_config(db, config);
    let forecast = forecaster
        .forecast_spending(user_id, months)
        .with_context(|| format!("Failed to forecast spending for user {}", user_id))?;

    match format {
        OutputFormat::Json => write_json(out, &forecast),
        OutputFormat::Csv => write_csv_table(out, forecast.table()),
        OutputFormat::Table => {
            if forecast.basis() == ForecastBasis::UserNotFound {
                writeln!(out, "No user with ID {}; nothing to forecast.", user_id)?;
                return Ok(());
            }

            let basis = match forecast.basis() {
                ForecastBasis::History => "spending history".to_string(),
                _ => {
                    let threshold = forecaster.config().min_history_months;
                    format!("income (fewer than {} months of history)", threshold)
                }
            };
            writeln!(
                out,
                "🔮 {}-month forecast for user {}, based on {}",
                months, user_id, basis
            )?;
            writeln!(out)?;
            write_text_table(out, forecast.table())?;

            writeln!(out)?;
            for (category, method) in forecast.categories().iter().zip(forecast.methods()) {
                writeln!(
                    out,
                    "   {:20} {}",
                    truncate(category, 20),
                    describe_method(method)
                )?;
            }
            Ok(())
        }
    }
}

pub fn cmd_summary<W: Write>(
    db: &Database,
    config: ForecastConfig,
    user_id: i64,
    months: u32,
    out: &mut W,
) -> Result<()> {
    let forecaster = SpendingForecaster::with_config(db, config);
    let (history, forecast) = forecaster
        .forecast_with_history(user_id, months)
        .with_context(|| format!("Failed to forecast spending for user {}", user_id))?;
    let profile = db.get_user_profile(user_id)?;

    let summary = SpendingSummary::build(profile.as_ref(), &history, &forecast);
    write_json(out, &summary)
}
