use thiserror::Error;

/// Failures of the structural preconditions on spectral series and tables.
///
/// Pure arithmetic (companding, Planck's law, chromaticity) never returns these;
/// it follows IEEE semantics and yields NaN or infinity instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    #[error("wavelengths must be strictly increasing: sample {index} ({current}) follows {previous}")]
    NotIncreasing {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("sample {index} has a non-finite wavelength")]
    NonFiniteWavelength { index: usize },

    #[error("series is empty")]
    EmptySeries,

    #[error("no samples with wavelength in [{lo}, {hi}]")]
    EmptyRange { lo: f64, hi: f64 },

    #[error("values sum to zero")]
    ZeroSum,

    #[error("table has no column named '{0}'")]
    MissingColumn(String),

    #[error("table needs {needed} value columns but has {found}")]
    TooFewColumns { needed: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SpectralError>;
