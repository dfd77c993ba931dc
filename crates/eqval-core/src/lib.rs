//! Equity valuation core: financial-statement normalization and the
//! valuation models built on top of it.
//!
//! The pipeline is a one-way flow. [`normalize`] turns a raw provider
//! payload (or an already-canonical demo dataset) into
//! [`NormalizedStatements`], the sole data source for everything
//! downstream; [`forecast`] projects it forward; the [`valuation`], [`pe`]
//! and [`ma`] engines price it. Every engine returns a
//! [`ComputationOutput`] envelope carrying its result, methodology,
//! resolved assumptions and accumulated warnings.
//!
//! All arithmetic is `rust_decimal`; "unknown" is always `Option::None`,
//! never a sentinel or a NaN. Data-quality problems degrade to `None` plus
//! a warning; only structural impossibilities (an empty forecast, WACC at
//! or below terminal growth) surface as errors.

pub mod assumptions;
pub mod error;
pub mod forecast;
pub mod ma;
pub mod normalize;
pub mod num;
pub mod pe;
pub mod types;
pub mod valuation;

pub use assumptions::{Assumptions, ResolvedAssumptions};
pub use error::EqvalError;
pub use normalize::{normalize, DataSource, NormalizedStatements};
pub use types::{ComputationOutput, Money, Multiple, Rate};

/// Result type used throughout the crate.
pub type EqvalResult<T> = Result<T, EqvalError>;
