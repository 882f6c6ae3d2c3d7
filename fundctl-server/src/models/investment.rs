//! Investment input shapes and field rules
//!
//! Both creation paths (flat `POST /investments` and nested
//! `POST /funds/{id}/investments`) share one request type and the same
//! strict `YYYY-MM-DD` date rule. The nested path takes `fund_id` from the
//! URL and ignores any `fund_id` in the body.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::amount::deserialize_amount;
use super::validation::required;
use super::{record_ref, UsdAmount, ValidationError, ValidationErrors};

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid date regex"));

/// Calendar date with no time component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentDate(NaiveDate);

impl InvestmentDate {
    /// Parse a `YYYY-MM-DD` string that names a real calendar day.
    ///
    /// # Example
    /// ```
    /// use fundctl_server::models::InvestmentDate;
    ///
    /// assert!(InvestmentDate::parse("2024-01-15").is_ok());
    /// assert!(InvestmentDate::parse("2024-02-30").is_err());
    /// assert!(InvestmentDate::parse("Jan 15 2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !DATE_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "investment_date",
                reason: "must be a YYYY-MM-DD date",
            });
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "investment_date",
                reason: "not a valid calendar date",
            })
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }
}

/// Investment creation body
#[derive(Debug, Default, Deserialize)]
pub struct CreateInvestmentRequest {
    pub investor_id: Option<String>,
    pub fund_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub amount_usd: Option<Decimal>,
    pub investment_date: Option<String>,
}

/// Validated investment ready for insertion
#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub investor_id: Uuid,
    pub fund_id: Uuid,
    pub amount_usd: UsdAmount,
    pub investment_date: InvestmentDate,
}

impl CreateInvestmentRequest {
    /// Validate a flat create: the body must name the fund.
    pub fn validate(self) -> Result<NewInvestment, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let fund_id = errors.collect(
            required("fund_id", self.fund_id.clone()).and_then(|v| record_ref("fund_id", &v)),
        );
        self.validate_with(fund_id, errors)
    }

    /// Validate a nested create under a fund taken from the path.
    pub fn validate_for_fund(self, fund_id: Uuid) -> Result<NewInvestment, ValidationErrors> {
        self.validate_with(Some(fund_id), ValidationErrors::default())
    }

    fn validate_with(
        self,
        fund_id: Option<Uuid>,
        mut errors: ValidationErrors,
    ) -> Result<NewInvestment, ValidationErrors> {
        let investor_id = errors.collect(
            required("investor_id", self.investor_id)
                .and_then(|v| record_ref("investor_id", &v)),
        );
        let amount_usd = errors.collect(
            required("amount_usd", self.amount_usd).and_then(|v| UsdAmount::new("amount_usd", v)),
        );
        let investment_date = errors.collect(
            required("investment_date", self.investment_date)
                .and_then(|v| InvestmentDate::parse(&v)),
        );

        match (investor_id, fund_id, amount_usd, investment_date) {
            (Some(investor_id), Some(fund_id), Some(amount_usd), Some(investment_date)) => {
                Ok(NewInvestment {
                    investor_id,
                    fund_id,
                    amount_usd,
                    investment_date,
                })
            }
            _ => Err(errors),
        }
    }
}
