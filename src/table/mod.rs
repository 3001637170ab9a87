//! Earnings table structures and CSV loading

mod data;
pub mod loader;

pub use data::{
    EarningsTable, YearRecord, BONUS_AND_PAYMENTS, BRS_PENSION, CALENDAR_YEAR, GOV_TSP_PAYOUT,
    MEMBER_TSP_PAYOUT, MILITARY_PAY, POST_ACTIVE_DUTY_PAY, POST_MIL_RETIREMENT_PAY,
    STANDARD_CATEGORIES,
};
pub use loader::{
    load_default_active, load_default_reserve, load_table, load_table_from_reader, DatasetSpec,
};
