use rust_decimal::Decimal;

/// Domain errors raised while resolving configuration or validating input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("invalid regime '{0}': expected OLD or NEW")]
    InvalidRegime(String),
    #[error("invalid slab definition for {regime} regime ({year}): {reason}")]
    InvalidSlabDefinition {
        regime: String,
        year: String,
        reason: String,
    },
    #[error("no {regime} regime configured for financial year {year}")]
    RegimeNotConfigured { regime: String, year: String },
    #[error("invalid financial year: {0}")]
    InvalidFinancialYear(String),
    #[error("{field} must not be negative (got {value})")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{field} is too large (got {value}, limit {})", crate::core::declaration::MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },
    #[error("invalid GST rate {0}%: must be between 0 and 28")]
    InvalidGstRate(Decimal),
    #[error("unknown GST category: {0}")]
    UnknownGstCategory(String),
}
