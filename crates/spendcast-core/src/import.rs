//! Ledger CSV import
//!
//! Expected header: `date,category,amount` (column order is free, extra
//! columns are ignored).

use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NewTransaction;

/// Parse a ledger CSV into transactions
pub fn parse_ledger_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::Import(format!("Missing '{}' column", name)))
    };
    let date_col = column("date")?;
    let category_col = column("category")?;
    let amount_col = column("amount")?;

    let mut transactions = Vec::new();
    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = index + 2;
        let field = |col: usize, name: &str| {
            record
                .get(col)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| Error::Import(format!("Line {}: missing {}", line, name)))
        };

        let date = parse_date(field(date_col, "date")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;
        let category = field(category_col, "category")?.to_string();
        let amount = parse_amount(field(amount_col, "amount")?)
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        transactions.push(NewTransaction {
            date,
            category,
            amount,
        });
    }

    debug!(count = transactions.len(), "Parsed ledger CSV");
    Ok(transactions)
}

/// Parse a date in ISO or US format
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("unable to parse date: {}", s))
}

/// Parse an amount, ignoring currency symbols and thousands separators
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned = s.replace(['$', ',', ' '], "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("unable to parse amount: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("01/15/2024").unwrap(), expected);
        assert!(parse_date("15 Jan").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("42").unwrap(), 42.0);
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_parse_ledger_csv() {
        let csv = "date,category,amount\n2024-01-15,Food,12.50\n01/20/2024,Housing,\"$1,500.00\"\n";
        let txs = parse_ledger_csv(csv.as_bytes()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].category, "Food");
        assert_eq!(txs[0].amount, 12.5);
        assert_eq!(txs[1].amount, 1500.0);
        assert_eq!(txs[1].date, NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "Amount,Note,Date,Category\n10,lunch,2024-02-01,Food\n";
        let txs = parse_ledger_csv(csv.as_bytes()).unwrap();
        assert_eq!(txs[0].category, "Food");
        assert_eq!(txs[0].amount, 10.0);
    }

    #[test]
    fn test_errors_name_the_line() {
        let csv = "date,category,amount\n2024-01-15,Food,12.50\n2024-01-16,,3.00\n";
        let err = parse_ledger_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "{}", err);

        let missing = "date,amount\n2024-01-15,1\n";
        assert!(matches!(
            parse_ledger_csv(missing.as_bytes()),
            Err(Error::Import(_))
        ));
    }
}
