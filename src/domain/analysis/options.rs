//! Analysis request options.

use serde::{Deserialize, Serialize};

/// Options chosen by the caller when requesting an analysis.
///
/// The dispatcher snapshots these onto the job at dispatch time; a later
/// change never affects an in-flight job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Registry identifier of the provider to use.
    pub provider: String,

    /// Provider-specific model override; provider default when absent.
    #[serde(default)]
    pub model: Option<String>,

    /// Whether to add the hardware considerations section to the prompt.
    #[serde(default = "default_include_hardware")]
    pub include_hardware_analysis: bool,

    /// Free-text requirements appended to the prompt.
    #[serde(default)]
    pub custom_requirements: Option<String>,
}

impl AnalysisOptions {
    /// Creates options for the given provider with defaults otherwise.
    pub fn for_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
            include_hardware_analysis: default_include_hardware(),
            custom_requirements: None,
        }
    }

    /// Sets the model override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets whether the hardware section is included.
    pub fn with_hardware_analysis(mut self, include: bool) -> Self {
        self.include_hardware_analysis = include;
        self
    }

    /// Sets the custom requirements text.
    pub fn with_custom_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.custom_requirements = Some(requirements.into());
        self
    }
}

fn default_include_hardware() -> bool {
    true
}
