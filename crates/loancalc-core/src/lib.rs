pub mod comparison;
pub mod emi;
pub mod error;
pub mod schedule;
pub mod types;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loancalc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
