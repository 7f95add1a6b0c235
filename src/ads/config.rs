//! Placement configuration - one immutable ad request description.

use std::fmt;
use std::str::FromStr;

use super::AdError;

// =============================================================================
// Ad Format
// =============================================================================

/// Sizing behavior requested from the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdFormat {
    /// Network picks the size.
    Auto,
    /// Fills the container width, height follows content.
    #[default]
    Fluid,
    /// Fixed rectangle.
    Rectangle,
}

impl AdFormat {
    /// Wire name used in the `data-ad-format` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            AdFormat::Auto => "auto",
            AdFormat::Fluid => "fluid",
            AdFormat::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for AdFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdFormat {
    type Err = AdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(AdFormat::Auto),
            "fluid" => Ok(AdFormat::Fluid),
            "rectangle" => Ok(AdFormat::Rectangle),
            _ => Err(AdError::UnknownFormat(s.to_string())),
        }
    }
}

// =============================================================================
// Placement Config
// =============================================================================

/// Everything the network needs to fill one placement.
///
/// Two configs are the same placement iff all fields are equal; a
/// controller restarts whenever it is handed a config that differs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlacementConfig {
    pub publisher_id: String,
    pub slot_id: String,
    pub layout: String,
    pub format: AdFormat,
    pub responsive: bool,
}

impl PlacementConfig {
    pub const DEFAULT_LAYOUT: &'static str = "in-article";

    /// Create a config with default layout, format and responsiveness.
    pub fn new(publisher_id: impl Into<String>, slot_id: impl Into<String>) -> Self {
        Self {
            publisher_id: publisher_id.into(),
            slot_id: slot_id.into(),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_format(mut self, format: AdFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_responsive(mut self, responsive: bool) -> Self {
        self.responsive = responsive;
        self
    }

    /// Check that both identifiers are present.
    pub fn validate(&self) -> Result<(), AdError> {
        if self.publisher_id.trim().is_empty() {
            return Err(AdError::ConfigIncomplete { missing: "publisher_id" });
        }
        if self.slot_id.trim().is_empty() {
            return Err(AdError::ConfigIncomplete { missing: "slot_id" });
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Request attributes for the placeholder element, in emission order.
    ///
    /// `data-full-width-responsive` is only present when `responsive` is set.
    pub fn request_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("data-ad-client", self.publisher_id.clone()),
            ("data-ad-slot", self.slot_id.clone()),
            ("data-ad-layout", self.layout.clone()),
            ("data-ad-format", self.format.as_str().to_string()),
        ];
        if self.responsive {
            attrs.push(("data-full-width-responsive", "true".to_string()));
        }
        attrs
    }
}

/// An unpopulated config: empty identifiers, default everything else.
impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            publisher_id: String::new(),
            slot_id: String::new(),
            layout: Self::DEFAULT_LAYOUT.to_string(),
            format: AdFormat::default(),
            responsive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlacementConfig::new("ca-pub-4546141241525552", "1122334455");
        assert_eq!(config.layout, "in-article");
        assert_eq!(config.format, AdFormat::Fluid);
        assert!(config.responsive);
        assert!(config.is_complete());
    }

    #[test]
    fn test_validate_missing_fields() {
        assert_eq!(
            PlacementConfig::default().validate(),
            Err(AdError::ConfigIncomplete { missing: "publisher_id" })
        );
        assert_eq!(
            PlacementConfig::new("ca-pub-1", "  ").validate(),
            Err(AdError::ConfigIncomplete { missing: "slot_id" })
        );
    }

    #[test]
    fn test_request_attributes() {
        let config = PlacementConfig::new("ca-pub-4546141241525552", "1122334455")
            .with_format(AdFormat::Auto);

        let attrs = config.request_attributes();
        assert_eq!(attrs.len(), 5);
        assert_eq!(attrs[0], ("data-ad-client", "ca-pub-4546141241525552".to_string()));
        assert_eq!(attrs[3], ("data-ad-format", "auto".to_string()));
        assert_eq!(attrs[4], ("data-full-width-responsive", "true".to_string()));

        let fixed = config.with_responsive(false).request_attributes();
        assert!(fixed.iter().all(|(name, _)| *name != "data-full-width-responsive"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("auto".parse::<AdFormat>(), Ok(AdFormat::Auto));
        assert_eq!(" Rectangle ".parse::<AdFormat>(), Ok(AdFormat::Rectangle));
        assert_eq!(
            "banner".parse::<AdFormat>(),
            Err(AdError::UnknownFormat("banner".to_string()))
        );
        assert_eq!(AdFormat::Fluid.to_string(), "fluid");
    }

    #[test]
    fn test_config_identity() {
        let a = PlacementConfig::new("p", "s");
        let b = PlacementConfig::new("p", "s");
        assert_eq!(a, b);
        assert_ne!(a, b.clone().with_layout("in-feed"));
    }
}
