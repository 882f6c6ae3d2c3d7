//! Fund input shapes and field rules

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::deserialize_amount;
use super::validation::required;
use super::{RecordName, UsdAmount, ValidationError, ValidationErrors};

/// Earliest accepted vintage year
pub const MIN_VINTAGE_YEAR: i32 = 1900;

/// Fund lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fund_status")]
pub enum FundStatus {
    Fundraising,
    Investing,
    Closed,
}

impl FundStatus {
    pub const ALL: &'static [&'static str] = &["Fundraising", "Investing", "Closed"];

    /// Parse the wire/database spelling.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Fundraising" => Ok(Self::Fundraising),
            "Investing" => Ok(Self::Investing),
            "Closed" => Ok(Self::Closed),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_owned(),
                expected: Self::ALL,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fundraising => "Fundraising",
            Self::Investing => "Investing",
            Self::Closed => "Closed",
        }
    }
}

/// Vintage year between 1900 and the current calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VintageYear(i32);

impl VintageYear {
    pub fn new(year: i64) -> Result<Self, ValidationError> {
        Self::new_as_of(year, Utc::now().year())
    }

    /// Validate against an explicit "current" year.
    pub fn new_as_of(year: i64, current_year: i32) -> Result<Self, ValidationError> {
        if year < i64::from(MIN_VINTAGE_YEAR) || year > i64::from(current_year) {
            return Err(ValidationError::OutOfRange {
                field: "vintage_year",
                min: i64::from(MIN_VINTAGE_YEAR),
                max: i64::from(current_year),
            });
        }
        // Range check above keeps this in i32.
        Ok(Self(year as i32))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// POST /funds body
#[derive(Debug, Default, Deserialize)]
pub struct CreateFundRequest {
    pub name: Option<String>,
    pub vintage_year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub target_size_usd: Option<Decimal>,
    pub status: Option<String>,
}

/// Validated fund ready for insertion
#[derive(Debug, Clone)]
pub struct NewFund {
    pub name: RecordName,
    pub vintage_year: VintageYear,
    pub target_size_usd: UsdAmount,
    pub status: FundStatus,
}

impl CreateFundRequest {
    /// Check every field, reporting all failures at once.
    pub fn validate(self) -> Result<NewFund, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = errors.collect(required("name", self.name).and_then(|v| RecordName::new(&v)));
        let vintage_year = errors.collect(
            required("vintage_year", self.vintage_year).and_then(VintageYear::new),
        );
        let target_size_usd = errors.collect(
            required("target_size_usd", self.target_size_usd)
                .and_then(|v| UsdAmount::new("target_size_usd", v)),
        );
        let status =
            errors.collect(required("status", self.status).and_then(|v| FundStatus::parse(&v)));

        match (name, vintage_year, target_size_usd, status) {
            (Some(name), Some(vintage_year), Some(target_size_usd), Some(status)) => Ok(NewFund {
                name,
                vintage_year,
                target_size_usd,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// PUT /funds body: `id` plus any subset of the fund fields
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFundRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub vintage_year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub target_size_usd: Option<Decimal>,
    pub status: Option<String>,
}

/// Validated partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct FundChanges {
    pub name: Option<RecordName>,
    pub vintage_year: Option<VintageYear>,
    pub target_size_usd: Option<UsdAmount>,
    pub status: Option<FundStatus>,
}

impl UpdateFundRequest {
    /// Take the `id` out of the body; empty strings count as absent.
    pub fn take_id(&mut self) -> Option<String> {
        self.id.take().filter(|id| !id.trim().is_empty())
    }

    /// Validate only the fields that were supplied.
    pub fn validate(self) -> Result<FundChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let changes = FundChanges {
            name: errors.collect_optional(self.name, |v| RecordName::new(&v)),
            vintage_year: errors.collect_optional(self.vintage_year, VintageYear::new),
            target_size_usd: errors.collect_optional(self.target_size_usd, |v| {
                UsdAmount::new("target_size_usd", v)
            }),
            status: errors.collect_optional(self.status, |v| FundStatus::parse(&v)),
        };

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}
