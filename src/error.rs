//! Error types for thoughtfield.
//!
//! Configuration problems are rejected at build time with [`ConfigError`];
//! presentation problems (window/surface setup) surface as [`PresentError`].
//! Once an engine is built, spawning, aging and drawing are total functions
//! and cannot fail.

use std::fmt;

/// Errors produced by [`crate::Simulation::build`] when a configuration
/// value would lead to silent no-op or unbounded behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Particle capacity must be at least 1.
    ZeroCapacity,
    /// Maximum lifetime must be positive, got the contained value.
    NonPositiveLifetime(f32),
    /// Per-frame age increment must be positive, got the contained value.
    NonPositiveAgeStep(f32),
    /// Spawn tick period must be non-zero.
    ZeroSpawnPeriod,
    /// Mirror sampling period must be non-zero.
    ZeroMirrorPeriod,
    /// A probability-like value fell outside [0, 1].
    ProbabilityOutOfRange {
        /// Which knob was out of range.
        what: &'static str,
        /// The offending value.
        value: f32,
    },
    /// Connection distance threshold must be positive, got the contained value.
    NonPositiveThreshold(f32),
    /// A drift jitter bound was negative.
    NegativeDriftBound {
        /// Which bound was negative.
        what: &'static str,
        /// The offending value.
        value: f32,
    },
    /// Intensity range must be non-empty and within 0..=100.
    InvalidIntensityRange {
        /// Lower bound supplied.
        min: f32,
        /// Upper bound supplied.
        max: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => {
                write!(f, "Particle capacity must be at least 1")
            }
            ConfigError::NonPositiveLifetime(v) => {
                write!(f, "Maximum lifetime must be positive, got {}", v)
            }
            ConfigError::NonPositiveAgeStep(v) => {
                write!(f, "Age step must be positive, got {}", v)
            }
            ConfigError::ZeroSpawnPeriod => {
                write!(f, "Spawn period must be non-zero")
            }
            ConfigError::ZeroMirrorPeriod => {
                write!(f, "Mirror period must be non-zero")
            }
            ConfigError::ProbabilityOutOfRange { what, value } => {
                write!(f, "{} must be within [0, 1], got {}", what, value)
            }
            ConfigError::NonPositiveThreshold(v) => {
                write!(f, "Connection threshold must be positive, got {}", v)
            }
            ConfigError::NegativeDriftBound { what, value } => {
                write!(f, "Drift {} bound must be non-negative, got {}", what, value)
            }
            ConfigError::InvalidIntensityRange { min, max } => {
                write!(
                    f,
                    "Intensity range must be non-empty and within 0..=100, got {}..{}",
                    min, max
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur while setting up frame presentation.
///
/// These are non-fatal from the engine's point of view: the render loop
/// simply does not start, and the caller may retry on the next mount.
#[derive(Debug)]
pub enum PresentError {
    /// Failed to create a surface for the window.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible adapter found for presenting frames.
    NoAdapter,
    /// Failed to create the presentation device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::SurfaceCreation(e) => {
                write!(f, "Failed to create presentation surface: {}", e)
            }
            PresentError::NoAdapter => {
                write!(f, "No compatible adapter found for frame presentation")
            }
            PresentError::DeviceCreation(e) => {
                write!(f, "Failed to create presentation device: {}", e)
            }
        }
    }
}

impl std::error::Error for PresentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PresentError::SurfaceCreation(e) => Some(e),
            PresentError::DeviceCreation(e) => Some(e),
            PresentError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for PresentError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        PresentError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for PresentError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        PresentError::DeviceCreation(e)
    }
}

/// Errors that can occur when running a windowed simulation.
#[derive(Debug)]
pub enum RunError {
    /// Configuration was rejected at build time.
    Config(ConfigError),
    /// Failed to create the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// Presentation setup failed.
    Present(PresentError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "Invalid configuration: {}", e),
            RunError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            RunError::Window(e) => write!(f, "Failed to create window: {}", e),
            RunError::Present(e) => write!(f, "Presentation error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::EventLoop(e) => Some(e),
            RunError::Window(e) => Some(e),
            RunError::Present(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        RunError::Config(e)
    }
}

impl From<winit::error::EventLoopError> for RunError {
    fn from(e: winit::error::EventLoopError) -> Self {
        RunError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for RunError {
    fn from(e: winit::error::OsError) -> Self {
        RunError::Window(e)
    }
}

impl From<PresentError> for RunError {
    fn from(e: PresentError) -> Self {
        RunError::Present(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        let e = ConfigError::NonPositiveLifetime(-3.0);
        assert!(e.to_string().contains("-3"));

        let e = ConfigError::ProbabilityOutOfRange {
            what: "spawn probability",
            value: 1.5,
        };
        assert!(e.to_string().contains("spawn probability"));
        assert!(e.to_string().contains("1.5"));
    }
}
