use serde::Deserialize;

/// Knobs for the reconciler.
///
/// `Default` gives the corrected behaviour; [`DiffConfig::baseline`] reproduces the
/// minimal presence-only, retain-surplus behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiffConfig {
    pub attribute_values: AttributeValues,
    pub child_count: ChildCountPolicy,
    pub child_shrink: ChildShrink,
}

impl DiffConfig {
    pub const fn baseline() -> Self {
        Self {
            attribute_values: AttributeValues::PresenceOnly,
            child_count: ChildCountPolicy::Strict,
            child_shrink: ChildShrink::Retain,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            attribute_values: AttributeValues::Compare,
            child_count: ChildCountPolicy::Strict,
            child_shrink: ChildShrink::Truncate,
        }
    }
}

/// How attributes present on both sides are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeValues {
    /// A changed value is written to the live node.
    #[default]
    Compare,
    /// Only added and removed keys produce operations.
    PresenceOnly,
}

/// What to do when a live parent's child count differs from the old description.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildCountPolicy {
    /// Fail with [`crate::PatchError::ChildCountMismatch`].
    #[default]
    Strict,
    /// Patch the common prefix only and log a warning.
    Bounded,
}

/// What happens to old children past the end of a shorter, non-empty new list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildShrink {
    #[default]
    Truncate,
    Retain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: DiffConfig =
            serde_json::from_str(r#"{"attribute-values":"presence-only"}"#).expect("config");
        assert_eq!(config.attribute_values, AttributeValues::PresenceOnly);
        assert_eq!(config.child_count, ChildCountPolicy::Strict);
        assert_eq!(config.child_shrink, ChildShrink::Truncate);
    }
}
