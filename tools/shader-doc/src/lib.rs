//! shader-doc library
//!
//! Turns GLSL stage files (`.vert`, `.frag`, `.geom`, `.tessc`, `.tesse`, shared
//! `.glsl` snippets) into pseudo C++ class declarations so Doxygen can document and
//! cross-reference them. The binary is meant to be registered as a Doxygen input
//! filter, one invocation per shader file.
//!
//! The transform is a pure function of the file path and its content:
//!
//! ```
//! use shader_doc::{ShaderDocConfig, Transformer};
//! use std::path::Path;
//!
//! let transformer = Transformer::new(&ShaderDocConfig::default());
//! let doc = transformer
//!     .transform(Path::new("shaders/screen-quad.vert"), "void main(){}\n")
//!     .unwrap();
//!
//! assert!(doc.header.contains("\\class Screen_quad"));
//! assert!(doc.body.contains("public class Screen_quad {"));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod naming;
pub mod scanner;
pub mod stage;

use std::path::Path;

use tracing::debug;

pub use config::{Profile, ShaderDocConfig};
pub use document::OutputDocument;
pub use error::ShaderDocError;
pub use scanner::{BlockState, RewriteRules, ScannedBody, Scanner};
pub use stage::{ShaderKind, StageInfo, StageTable};

use document::DocContext;

/// Configured shader-to-documentation transformer
#[derive(Debug, Clone)]
pub struct Transformer {
    stages: StageTable,
    rules: RewriteRules,
    namespace: String,
    group: String,
    shared_extension: String,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(&ShaderDocConfig::default())
    }
}

impl Transformer {
    pub fn new(config: &ShaderDocConfig) -> Self {
        Self {
            stages: config.stage_table(),
            rules: config.rules(),
            namespace: config.namespace.clone(),
            group: config.group.clone(),
            shared_extension: config.shared_extension.clone(),
        }
    }

    /// Transformer with an explicit stage table and rule set, default names
    pub fn with_table(stages: StageTable, rules: RewriteRules) -> Self {
        let config = ShaderDocConfig::default();
        Self {
            stages,
            rules,
            namespace: config.namespace,
            group: config.group,
            shared_extension: config.shared_extension,
        }
    }

    pub fn stages(&self) -> &StageTable {
        &self.stages
    }

    pub fn rules(&self) -> RewriteRules {
        self.rules
    }

    /// Transform shader `source` read from `path`
    ///
    /// The path only contributes its base name and extension; nothing is read.
    pub fn transform(&self, path: &Path, source: &str) -> Result<OutputDocument, ShaderDocError> {
        let stage = self.stages.resolve(path)?;

        let class_name = naming::class_name(&naming::file_stem(path));
        let display_name = naming::display_name(&class_name);

        let scanned = Scanner::new(self.rules, &stage.qualifier, &self.shared_extension)
            .scan(source)?;
        if !scanned.includes.is_empty() {
            debug!(
                "{} references {} shared file(s): {}",
                path.display(),
                scanned.includes.len(),
                scanned.includes.join(", ")
            );
        }

        // Included snippets are documented under the shared stage's namespace
        let common_namespace = self
            .stages
            .get(&self.shared_extension)
            .map(|info| info.namespace.as_str())
            .unwrap_or(ShaderKind::Common.namespace());

        let ctx = DocContext {
            namespace: &self.namespace,
            stage_namespace: &stage.namespace,
            common_namespace,
            group: &self.group,
            class_name: &class_name,
            display_name: &display_name,
            description: &stage.description,
        };

        let header = document::render_header(&ctx, &scanned.includes)?;
        let body = document::render_body(&ctx, &scanned.lines)?;

        Ok(OutputDocument { header, body })
    }

    /// Read `path` and transform it
    pub fn transform_file(&self, path: &Path) -> Result<OutputDocument, ShaderDocError> {
        // Resolve first so an unsupported file fails before any I/O
        self.stages.resolve(path)?;

        let source = std::fs::read_to_string(path).map_err(|source| ShaderDocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.transform(path, &source)
    }
}

/// Transform a file with the default configuration
pub fn transform_file(path: impl AsRef<Path>) -> Result<OutputDocument, ShaderDocError> {
    Transformer::default().transform_file(path.as_ref())
}
