//! Build context passed explicitly to graph resolution
//!
//! Target platform and configuration are parameters, not ambient globals;
//! every resolution call states the context it resolves for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target platform a build is produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPlatform {
    Win64,
    Linux,
    Mac,
}

impl TargetPlatform {
    /// All platforms the tool recognizes
    pub const ALL: [TargetPlatform; 3] =
        [TargetPlatform::Win64, TargetPlatform::Linux, TargetPlatform::Mac];
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetPlatform::Win64 => write!(f, "Win64"),
            TargetPlatform::Linux => write!(f, "Linux"),
            TargetPlatform::Mac => write!(f, "Mac"),
        }
    }
}

impl FromStr for TargetPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win64" | "windows" => Ok(TargetPlatform::Win64),
            "linux" => Ok(TargetPlatform::Linux),
            "mac" | "macos" => Ok(TargetPlatform::Mac),
            other => Err(format!(
                "unknown platform '{}' (expected win64, linux, or mac)",
                other
            )),
        }
    }
}

/// Build configuration a module set is compiled under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildConfiguration {
    Debug,
    Development,
    Shipping,
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildConfiguration::Debug => write!(f, "Debug"),
            BuildConfiguration::Development => write!(f, "Development"),
            BuildConfiguration::Shipping => write!(f, "Shipping"),
        }
    }
}

impl FromStr for BuildConfiguration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildConfiguration::Debug),
            "development" | "dev" => Ok(BuildConfiguration::Development),
            "shipping" | "release" => Ok(BuildConfiguration::Shipping),
            other => Err(format!(
                "unknown configuration '{}' (expected debug, development, or shipping)",
                other
            )),
        }
    }
}

/// Explicit build context for one resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    /// Platform the orchestrator is building for
    pub platform: TargetPlatform,
    /// Configuration (optimization/diagnostics profile)
    pub configuration: BuildConfiguration,
}

impl BuildContext {
    /// Create a new build context
    pub fn new(platform: TargetPlatform, configuration: BuildConfiguration) -> Self {
        Self {
            platform,
            configuration,
        }
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            platform: TargetPlatform::Linux,
            configuration: BuildConfiguration::Development,
        }
    }
}
