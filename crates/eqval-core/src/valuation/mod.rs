//! Valuation engines: capital costs, DCF, trading comparables and ratios.

pub mod comps;
pub mod dcf;
pub mod ratios;
pub mod wacc;
