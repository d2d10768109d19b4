//! Shader stage table
//!
//! Maps a (lowercased) file extension to the information needed to document a
//! shader of that stage: a human-readable description for the brief line, the
//! sub-namespace the pseudo-class lives in, and the qualifier prepended to the
//! members of an interface block.
//!
//! The table is plain data. Adding a stage means adding an entry, either to
//! [`ShaderKind`] for built-ins or through the `[[stages]]` configuration array.

use hashbrown::HashMap;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::ShaderDocError;

/// Built-in shader stages, identified by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
    /// Shared snippets pulled in through `#include`
    Common,
    TessControl,
    TessEval,
}

impl ShaderKind {
    /// Every built-in stage, in table order
    pub const ALL: [ShaderKind; 6] = [
        ShaderKind::Vertex,
        ShaderKind::Fragment,
        ShaderKind::Geometry,
        ShaderKind::Common,
        ShaderKind::TessControl,
        ShaderKind::TessEval,
    ];

    /// File extension (without the dot)
    pub fn extension(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vert",
            ShaderKind::Fragment => "frag",
            ShaderKind::Geometry => "geom",
            ShaderKind::Common => "glsl",
            ShaderKind::TessControl => "tessc",
            ShaderKind::TessEval => "tesse",
        }
    }

    /// Description used in the `\brief` line
    pub fn description(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
            ShaderKind::Geometry => "geometry",
            ShaderKind::Common => "general",
            ShaderKind::TessControl => "tesselation control",
            ShaderKind::TessEval => "tesselation evaluation",
        }
    }

    /// Sub-namespace under the product namespace
    pub fn namespace(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "Vert",
            ShaderKind::Fragment => "Frag",
            ShaderKind::Geometry => "Geom",
            ShaderKind::Common => "Common",
            ShaderKind::TessControl => "TessControl",
            ShaderKind::TessEval => "TessEval",
        }
    }

    /// Qualifier prepended to interface block members
    ///
    /// Vertex and tessellation evaluation stages document their block as outputs,
    /// the consuming stages as inputs. Shared snippets have no qualifier.
    pub fn qualifier(self) -> &'static str {
        match self {
            ShaderKind::Vertex | ShaderKind::TessEval => "out",
            ShaderKind::Fragment | ShaderKind::Geometry | ShaderKind::TessControl => "in",
            ShaderKind::Common => "",
        }
    }

    /// Look up a built-in stage by extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Table entry for this stage
    pub fn info(self) -> StageInfo {
        StageInfo {
            extension: self.extension().to_string(),
            description: self.description().to_string(),
            namespace: self.namespace().to_string(),
            qualifier: self.qualifier().to_string(),
        }
    }
}

/// One row of the stage table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StageInfo {
    pub extension: String,
    pub description: String,
    pub namespace: String,
    #[serde(default)]
    pub qualifier: String,
}

/// Immutable extension -> stage mapping handed to the transformer
#[derive(Debug, Clone)]
pub struct StageTable {
    stages: HashMap<String, StageInfo>,
}

impl Default for StageTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StageTable {
    /// Table with every built-in stage
    pub fn builtin() -> Self {
        Self::from_kinds(&ShaderKind::ALL)
    }

    /// Table restricted to the given built-in stages
    pub fn from_kinds(kinds: &[ShaderKind]) -> Self {
        Self::from_entries(kinds.iter().map(|kind| kind.info()))
    }

    /// Build a table from arbitrary entries; later entries win on duplicate extensions
    pub fn from_entries(entries: impl IntoIterator<Item = StageInfo>) -> Self {
        let mut table = Self {
            stages: HashMap::new(),
        };
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Copy of this table with `overrides` applied on top
    pub fn with_overrides(&self, overrides: &[StageInfo]) -> Self {
        let mut table = self.clone();
        for entry in overrides {
            table.insert(entry.clone());
        }
        table
    }

    fn insert(&mut self, mut info: StageInfo) {
        info.extension = info.extension.trim_start_matches('.').to_lowercase();
        self.stages.insert(info.extension.clone(), info);
    }

    /// Stage registered for `extension` (case-insensitive, no leading dot)
    pub fn get(&self, extension: &str) -> Option<&StageInfo> {
        self.stages.get(extension.to_lowercase().as_str())
    }

    /// Resolve the stage of a shader file from its extension
    pub fn resolve(&self, path: &Path) -> Result<&StageInfo, ShaderDocError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .ok_or_else(|| ShaderDocError::MissingExtension(path.to_path_buf()))?;

        let info = self
            .stages
            .get(extension.as_str())
            .ok_or_else(|| ShaderDocError::UnknownExtension {
                extension: extension.clone(),
                path: path.to_path_buf(),
            })?;

        debug!(
            "{} resolved to {} stage ({})",
            path.display(),
            info.description,
            info.namespace
        );
        Ok(info)
    }

    /// Registered extensions, sorted for stable listings
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.stages.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
