//! Tunables shared by the DOM helpers

use serde::Deserialize;

use crate::error::{DomError, Result};

/// Suffix appended to a colliding generated id when none is configured
pub const DEFAULT_COLLISION_SUFFIX: &str = "-2";

/// Configuration for overscroll handling and id generation
///
/// Every field has a default, so a partial JSON object is enough:
///
/// ```
/// use uikit_dom::MixinConfig;
///
/// let config = MixinConfig::from_json(r#"{ "collision_suffix": "-alt" }"#)?;
/// assert_eq!(config.collision_suffix, "-alt");
/// assert_eq!(config.overscroll_containment, "contain");
/// # Ok::<(), uikit_dom::DomError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MixinConfig {
    /// Computed `overflow` keywords that mark an element as scrollable
    pub scrollable_overflow: Vec<String>,
    /// Value written to `overscroll-behavior` when the platform supports it
    pub overscroll_containment: String,
    /// Appended to a generated id each time it collides
    pub collision_suffix: String,
}

impl Default for MixinConfig {
    fn default() -> Self {
        Self {
            scrollable_overflow: vec!["auto".to_string(), "scroll".to_string()],
            overscroll_containment: "contain".to_string(),
            collision_suffix: DEFAULT_COLLISION_SUFFIX.to_string(),
        }
    }
}

impl MixinConfig {
    /// Parse and validate a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns `DomError::Config` if the JSON is malformed or fails
    /// [`MixinConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DomError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive the helpers
    ///
    /// # Errors
    ///
    /// Returns `DomError::Config` if there are no scrollable keywords, a
    /// keyword is blank, the containment value is blank, or the collision
    /// suffix is empty (id generation would never terminate).
    pub fn validate(&self) -> Result<()> {
        if self.scrollable_overflow.is_empty() {
            return Err(DomError::Config(
                "scrollable_overflow must name at least one keyword".to_string(),
            ));
        }
        if self.scrollable_overflow.iter().any(|k| k.trim().is_empty()) {
            return Err(DomError::Config(
                "scrollable_overflow keywords must not be blank".to_string(),
            ));
        }
        if self.overscroll_containment.trim().is_empty() {
            return Err(DomError::Config(
                "overscroll_containment must not be blank".to_string(),
            ));
        }
        if self.collision_suffix.is_empty() {
            return Err(DomError::Config(
                "collision_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a computed `overflow` value marks a scroll container
    #[must_use]
    pub fn is_scrollable_overflow(&self, overflow: &str) -> bool {
        self.scrollable_overflow
            .iter()
            .any(|keyword| overflow.contains(keyword.as_str()))
    }
}
