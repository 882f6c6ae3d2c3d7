//! Investor input shapes and field rules

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::required;
use super::{RecordName, ValidationError, ValidationErrors};

/// Local part, `@`, domain with at least one dot; no whitespace anywhere.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("invalid email regex")
});

/// Kind of party committing capital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "investor_type")]
pub enum InvestorType {
    Individual,
    Institution,
    #[serde(rename = "Family Office")]
    #[sqlx(rename = "Family Office")]
    FamilyOffice,
}

impl InvestorType {
    pub const ALL: &'static [&'static str] = &["Individual", "Institution", "Family Office"];

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "Individual" => Ok(Self::Individual),
            "Institution" => Ok(Self::Institution),
            "Family Office" => Ok(Self::FamilyOffice),
            other => Err(ValidationError::InvalidVariant {
                field: "investor_type",
                value: other.to_owned(),
                expected: Self::ALL,
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Institution => "Institution",
            Self::FamilyOffice => "Family Office",
        }
    }
}

/// Well-formed email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// # Example
    /// ```
    /// use fundctl_server::models::Email;
    ///
    /// assert!(Email::new("a@x.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if !EMAIL_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must be a valid email address",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// POST /investors and PUT /investors body.
///
/// Updates replace the whole record, so both use the same rules;
/// `id` is only read on update.
#[derive(Debug, Default, Deserialize)]
pub struct InvestorRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub investor_type: Option<String>,
    pub email: Option<String>,
}

/// Validated investor fields
#[derive(Debug, Clone)]
pub struct NewInvestor {
    pub name: RecordName,
    pub investor_type: InvestorType,
    pub email: Email,
}

impl InvestorRequest {
    /// Take the `id` out of the body; empty strings count as absent.
    pub fn take_id(&mut self) -> Option<String> {
        self.id.take().filter(|id| !id.trim().is_empty())
    }

    pub fn validate(self) -> Result<NewInvestor, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = errors.collect(required("name", self.name).and_then(|v| RecordName::new(&v)));
        let investor_type = errors.collect(
            required("investor_type", self.investor_type).and_then(|v| InvestorType::parse(&v)),
        );
        let email = errors.collect(required("email", self.email).and_then(|v| Email::new(&v)));

        match (name, investor_type, email) {
            (Some(name), Some(investor_type), Some(email)) => Ok(NewInvestor {
                name,
                investor_type,
                email,
            }),
            _ => Err(errors),
        }
    }
}
