//! Data layer: core types, loading, and series arithmetic.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → SpectralTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ SpectralSeries │  wavelength-sorted samples, one per column
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   ops     │  merge-join, normalise, band averages
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod ops;
