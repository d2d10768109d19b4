//! shader-doc.toml configuration
//!
//! Every field is optional; an empty file (or no file at all) reproduces the
//! default output exactly.
//!
//! ```toml
//! namespace = "GPUShaders"
//! group = "Shaders"
//! shared_extension = "glsl"
//! profile = "full"          # full | gpu | minimal
//!
//! [rules]
//! uniform_blocks = false    # overrides the profile
//!
//! [[stages]]
//! extension = "comp"
//! description = "compute"
//! namespace = "Comp"
//! ```

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::error::ShaderDocError;
use crate::scanner::RewriteRules;
use crate::stage::{ShaderKind, StageInfo, StageTable};

pub const DEFAULT_NAMESPACE: &str = "GPUShaders";
pub const DEFAULT_GROUP: &str = "Shaders";
pub const DEFAULT_SHARED_EXTENSION: &str = "glsl";

/// Presets bundling a stage set with a rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// All stages, all rewrites
    #[default]
    Full,
    /// Vertex, fragment and geometry stages plus shared snippets; no uniform rewriting
    Gpu,
    /// All stages; only layout stripping and include extraction
    Minimal,
}

impl Profile {
    pub fn rules(self) -> RewriteRules {
        match self {
            Profile::Full => RewriteRules::ALL,
            Profile::Gpu => RewriteRules {
                uniform_blocks: false,
                ..RewriteRules::ALL
            },
            Profile::Minimal => RewriteRules {
                interface_blocks: false,
                uniform_blocks: false,
                ..RewriteRules::ALL
            },
        }
    }

    pub fn stages(self) -> StageTable {
        match self {
            Profile::Full | Profile::Minimal => StageTable::builtin(),
            Profile::Gpu => StageTable::from_kinds(&[
                ShaderKind::Vertex,
                ShaderKind::Fragment,
                ShaderKind::Geometry,
                ShaderKind::Common,
            ]),
        }
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Profile::Full),
            "gpu" => Ok(Profile::Gpu),
            "minimal" => Ok(Profile::Minimal),
            other => Err(format!(
                "unknown profile '{}' (expected full, gpu or minimal)",
                other
            )),
        }
    }
}

/// Per-rule overrides applied on top of the profile
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverrides {
    pub strip_layout: Option<bool>,
    pub interface_blocks: Option<bool>,
    pub uniform_blocks: Option<bool>,
    pub includes: Option<bool>,
}

impl RuleOverrides {
    fn apply(&self, rules: RewriteRules) -> RewriteRules {
        RewriteRules {
            strip_layout: self.strip_layout.unwrap_or(rules.strip_layout),
            interface_blocks: self.interface_blocks.unwrap_or(rules.interface_blocks),
            uniform_blocks: self.uniform_blocks.unwrap_or(rules.uniform_blocks),
            includes: self.includes.unwrap_or(rules.includes),
        }
    }
}

/// Parsed configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShaderDocConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_group")]
    pub group: String,
    /// Extension of shared snippets; include directives must name files with it
    #[serde(default = "default_shared_extension")]
    pub shared_extension: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub rules: RuleOverrides,
    /// Stage entries overriding or extending the profile's table
    #[serde(default)]
    pub stages: Vec<StageInfo>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_group() -> String {
    DEFAULT_GROUP.to_string()
}

fn default_shared_extension() -> String {
    DEFAULT_SHARED_EXTENSION.to_string()
}

impl Default for ShaderDocConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            group: default_group(),
            shared_extension: default_shared_extension(),
            profile: Profile::default(),
            rules: RuleOverrides::default(),
            stages: Vec::new(),
        }
    }
}

impl ShaderDocConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ShaderDocError> {
        let config: ShaderDocConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ShaderDocError> {
        let content = std::fs::read_to_string(path).map_err(|source| ShaderDocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Rewrite rules: the profile's set with per-rule overrides applied
    pub fn rules(&self) -> RewriteRules {
        self.rules.apply(self.profile.rules())
    }

    /// Stage table: the profile's stages with configured entries applied
    pub fn stage_table(&self) -> StageTable {
        self.profile.stages().with_overrides(&self.stages)
    }

    /// Check that names are usable and the shared extension maps to a stage
    pub fn validate(&self) -> Result<(), ShaderDocError> {
        if self.namespace.trim().is_empty() {
            return Err(ShaderDocError::InvalidConfig(
                "namespace must not be empty".to_string(),
            ));
        }
        if self.group.trim().is_empty() {
            return Err(ShaderDocError::InvalidConfig(
                "group must not be empty".to_string(),
            ));
        }
        if let Some(stage) = self.stages.iter().find(|s| s.namespace.trim().is_empty()) {
            return Err(ShaderDocError::InvalidConfig(format!(
                "stage '{}' has an empty namespace",
                stage.extension
            )));
        }
        if self.stage_table().get(&self.shared_extension).is_none() {
            return Err(ShaderDocError::InvalidConfig(format!(
                "shared extension '{}' has no stage entry",
                self.shared_extension
            )));
        }
        Ok(())
    }
}
