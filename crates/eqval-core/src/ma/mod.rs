//! Mergers & acquisitions models.

pub mod merger_model;
