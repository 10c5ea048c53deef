use serde::{Deserialize, Serialize};

/// Process-wide render configuration.
///
/// Read-only for a single render pass; every toggle here only seeds the
/// root scope and can be overridden per-scope inside the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Displace parts away from their modeled position ("parting out").
    pub expand: bool,
    /// Distance each part-number segment contributes to the displacement.
    pub expand_step: f64,
    /// Assembly animation factor in [0, 1]; 0 is fully exploded,
    /// 1 is fully assembled. Out-of-range values are clamped at use.
    pub expand_time: f64,
    /// When set, only the part whose serialized number matches exactly
    /// is rendered.
    pub highlight: Option<String>,
    /// Emit a `PART:` line for every visible part.
    pub list_parts: bool,
    /// Mechanism identifier prefixed to every serialized part number.
    pub mech_id: Option<String>,
    /// When non-empty, a shape must carry at least one of these tags.
    pub show_tags: Vec<String>,
    /// A shape carrying any of these tags is never rendered.
    pub hide_tags: Vec<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            expand: false,
            expand_step: 30.0,
            expand_time: 0.0,
            highlight: None,
            list_parts: false,
            mech_id: None,
            show_tags: Vec::new(),
            hide_tags: Vec::new(),
        }
    }
}
