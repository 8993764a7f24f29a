pub mod declaration;
pub mod error;
pub mod gst;
pub mod regime;
pub mod result;
pub mod year;

// Flat public surface for domain types.
pub use declaration::{
    IncomeDeclaration, RegimeKind, MAX_AMOUNT, SENIOR_CITIZEN_AGE, SUPER_SENIOR_CITIZEN_AGE,
};
pub use error::TaxError;
pub use gst::{
    GstBreakdown, GstCategory, GstConfig, GstRateEntry, GstSchedule, DEFAULT_GST_RATE, MAX_GST_RATE,
};
pub use regime::{
    DeductionLimits, MedicalInsuranceLimits, Rebate, RegimeConfig, RegimeTable, Slab, SurchargeBand,
    TaxRegimeDefinition,
};
pub use result::{RegimeComparison, SectionDeductions, TaxResult};
pub use year::FinancialYear;
