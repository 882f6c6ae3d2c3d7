//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod name;
pub mod amount;
pub mod record_ref;
pub mod fund;
pub mod investor;
pub mod investment;

pub use validation::{FieldIssue, ValidationError, ValidationErrors};
pub use name::RecordName;
pub use amount::UsdAmount;
pub use record_ref::record_ref;
pub use fund::{CreateFundRequest, FundChanges, FundStatus, NewFund, UpdateFundRequest, VintageYear};
pub use investor::{Email, InvestorRequest, InvestorType, NewInvestor};
pub use investment::{CreateInvestmentRequest, InvestmentDate, NewInvestment};
