use annotate_engine::types::ModelNode;
use redline_types::RenderConfig;
use serde::Serialize;

use crate::metadata::SceneMetadata;

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level file structure.
#[derive(Debug, Clone, Serialize)]
pub struct SceneFile {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Scene metadata.
    pub scene: SceneMetadata,
    /// Render configuration the scene was authored against.
    pub config: RenderConfig,
    /// The annotated model tree.
    pub root: ModelNode,
}

/// Serialize a scene to a pretty-printed JSON string.
pub fn save_scene(root: &ModelNode, config: &RenderConfig, metadata: &SceneMetadata) -> String {
    let file = SceneFile {
        format: "redline".to_string(),
        version: FORMAT_VERSION,
        scene: metadata.clone(),
        config: config.clone(),
        root: root.clone(),
    };
    serde_json::to_string_pretty(&file).expect("ModelNode serialization should never fail")
}
