use annotate_engine::types::ModelNode;
use redline_types::RenderConfig;
use serde::Deserialize;

use crate::errors::LoadError;
use crate::metadata::SceneMetadata;
use crate::save::FORMAT_VERSION;

/// The top-level file structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneFileRaw {
    pub format: String,
    pub version: u32,
    pub scene: SceneMetadata,
    pub config: RenderConfig,
    pub root: ModelNode,
}

/// Deserialize a scene from a JSON string.
///
/// Validates the format identifier and version.
/// Returns the model tree, its render configuration, and the metadata.
pub fn load_scene(json: &str) -> Result<(ModelNode, RenderConfig, SceneMetadata), LoadError> {
    let raw: SceneFileRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != "redline" {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    // Apply migrations if needed (version < current)
    let root = if raw.version < FORMAT_VERSION {
        crate::migrate::migrate(raw.root, raw.version, FORMAT_VERSION)?
    } else {
        raw.root
    };

    Ok((root, raw.config, raw.scene))
}
