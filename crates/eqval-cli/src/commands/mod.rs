pub mod data;
pub mod ma;
pub mod pe;
pub mod valuation;
