//! Configuration for surface displacement runs.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfaceError};

/// Configuration for [`SurfaceDisplacement`](crate::SurfaceDisplacement).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Poisson's ratio of the elastic half-space.
    pub poisson_ratio: f64,

    /// Displacement component written to the raster.
    pub component: DisplacementComponent,

    /// Recompute and replace an existing output raster.
    pub overwrite: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            poisson_ratio: 0.25,
            component: DisplacementComponent::Up,
            overwrite: false,
        }
    }
}

impl SurfaceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SURFACE_POISSON_RATIO") {
            if let Ok(nu) = val.parse() {
                config.poisson_ratio = nu;
            }
        }

        if let Ok(val) = std::env::var("SURFACE_COMPONENT") {
            config.component = DisplacementComponent::from_str(&val);
        }

        if let Ok(val) = std::env::var("SURFACE_OVERWRITE") {
            config.overwrite = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Parse configuration from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| SurfaceError::Config(e.to_string()))?;
        config.validate().map_err(SurfaceError::Config)?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.poisson_ratio > -1.0 && self.poisson_ratio < 0.5) {
            return Err(format!(
                "poisson_ratio must be in (-1, 0.5), got {}",
                self.poisson_ratio
            ));
        }
        Ok(())
    }
}

/// Cartesian displacement component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplacementComponent {
    East,
    North,
    /// Vertical, positive up.
    #[default]
    Up,
}

impl DisplacementComponent {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "east" | "e" | "x" => Self::East,
            "north" | "n" | "y" => Self::North,
            _ => Self::Up,
        }
    }

    /// Index into an `[east, north, up]` vector.
    pub fn index(&self) -> usize {
        match self {
            Self::East => 0,
            Self::North => 1,
            Self::Up => 2,
        }
    }
}

impl std::fmt::Display for DisplacementComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::East => write!(f, "east"),
            Self::North => write!(f, "north"),
            Self::Up => write!(f, "up"),
        }
    }
}
