//! Private equity models.

pub mod lbo;
