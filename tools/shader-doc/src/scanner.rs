//! Line scanner that rewrites shader source into something Doxygen accepts
//!
//! The scanner walks the source once, line by line, keeping original line
//! terminators. Each line goes through the enabled rewrites in a fixed order:
//!
//! 1. `layout(...)` qualifiers are dropped, otherwise Doxygen reads them as
//!    function signatures.
//! 2. Block markers (`INTERFACE`, `uniform`) move the [`BlockState`] machine and
//!    are suppressed, as is the closing brace of a block.
//! 3. Members of an open block get the block's qualifier, so `in`/`out`/`uniform`
//!    show up in the generated member documentation.
//! 4. `#include "x.glsl"` directives are suppressed and collected for the `\sa`
//!    cross-references.

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::error::ShaderDocError;

const LAYOUT_KEYWORD: &str = "layout";
const INTERFACE_MARKER: &str = "INTERFACE";
const UNIFORM_KEYWORD: &str = "uniform";
const SAMPLER_MARKER: &str = "sampler";
const INCLUDE_DIRECTIVE: &str = "#include";

/// Toggles for the individual rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRules {
    pub strip_layout: bool,
    pub interface_blocks: bool,
    pub uniform_blocks: bool,
    pub includes: bool,
}

impl Default for RewriteRules {
    fn default() -> Self {
        Self::ALL
    }
}

impl RewriteRules {
    /// Every rewrite enabled
    pub const ALL: RewriteRules = RewriteRules {
        strip_layout: true,
        interface_blocks: true,
        uniform_blocks: true,
        includes: true,
    };

    /// Every rewrite disabled: lines pass through untouched
    pub const NONE: RewriteRules = RewriteRules {
        strip_layout: false,
        interface_blocks: false,
        uniform_blocks: false,
        includes: false,
    };
}

/// Which kind of block the scanner is inside
///
/// Blocks never nest: while one is open, opener markers are treated as ordinary
/// members of the current block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Normal,
    Interface,
    Uniform,
}

/// Result of feeding one line to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    state: BlockState,
    suppress: bool,
}

impl BlockState {
    /// Block opened by `line`, if any. Interface markers take precedence.
    fn opened_by(line: &str, rules: &RewriteRules) -> Option<BlockState> {
        if rules.interface_blocks && line.contains(INTERFACE_MARKER) {
            Some(BlockState::Interface)
        } else if rules.uniform_blocks
            && line.contains(UNIFORM_KEYWORD)
            && !line.contains(SAMPLER_MARKER)
        {
            Some(BlockState::Uniform)
        } else {
            None
        }
    }

    /// Transition table
    ///
    /// | state       | line                 | next        | suppressed |
    /// |-------------|----------------------|-------------|------------|
    /// | `Normal`    | opener, no `}`       | block       | yes        |
    /// | `Normal`    | opener and `}`       | `Normal`    | yes        |
    /// | `Normal`    | anything else        | `Normal`    | no         |
    /// | block       | contains `}`         | `Normal`    | yes        |
    /// | block       | anything else        | block       | no         |
    fn step(self, line: &str, rules: &RewriteRules) -> Step {
        let opened = match self {
            BlockState::Normal => Self::opened_by(line, rules),
            BlockState::Interface | BlockState::Uniform => None,
        };
        let current = opened.unwrap_or(self);

        if current != BlockState::Normal && line.contains('}') {
            return Step {
                state: BlockState::Normal,
                suppress: true,
            };
        }

        Step {
            state: current,
            suppress: opened.is_some(),
        }
    }
}

/// Scanned shader body, ready to be wrapped in a class declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBody {
    /// Emitted lines with their original terminators
    pub lines: String,
    /// Base names of included shared files, in order of appearance
    pub includes: Vec<String>,
    /// Block state at end of file; anything but `Normal` means an unterminated block
    pub final_state: BlockState,
}

/// Per-file line scanner
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rules: RewriteRules,
    qualifier: &'a str,
    include_suffix: String,
}

impl<'a> Scanner<'a> {
    /// `qualifier` prefixes interface block members, `shared_extension` is the
    /// extension include directives must end with (without the dot).
    pub fn new(rules: RewriteRules, qualifier: &'a str, shared_extension: &str) -> Self {
        Self {
            rules,
            qualifier,
            include_suffix: format!(".{}\"", shared_extension),
        }
    }

    pub fn scan(&self, source: &str) -> Result<ScannedBody, ShaderDocError> {
        let mut lines = String::with_capacity(source.len());
        let mut includes = Vec::new();
        let mut state = BlockState::Normal;

        for (index, raw) in source.split_inclusive('\n').enumerate() {
            let mut line = Cow::Borrowed(raw);

            if self.rules.strip_layout {
                line = strip_layout(line);
            }

            let step = state.step(&line, &self.rules);
            if step.state != state {
                trace!("line {}: {:?} -> {:?}", index + 1, state, step.state);
            }
            state = step.state;
            let mut emit = !step.suppress;

            if emit && state != BlockState::Normal {
                line = self.prefix_member(line, state);
            }

            if self.rules.includes && line.contains(INCLUDE_DIRECTIVE) {
                let name = self
                    .parse_include(&line)
                    .ok_or_else(|| ShaderDocError::MalformedInclude {
                        line: index + 1,
                        text: raw.trim_end().to_string(),
                    })?;
                debug!("line {}: includes {}", index + 1, name);
                includes.push(name);
                emit = false;
            }

            if emit {
                lines.push_str(&line);
            }
        }

        if state != BlockState::Normal {
            warn!("{:?} block still open at end of file", state);
        }

        Ok(ScannedBody {
            lines,
            includes,
            final_state: state,
        })
    }

    fn prefix_member<'l>(&self, line: Cow<'l, str>, state: BlockState) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return line;
        }
        let keyword = match state {
            BlockState::Interface => self.qualifier,
            BlockState::Uniform => UNIFORM_KEYWORD,
            BlockState::Normal => return line,
        };
        if keyword.is_empty() {
            return line;
        }
        Cow::Owned(format!("{} {}", keyword, line.trim_start()))
    }

    /// Base name of the shared file named by an include directive
    ///
    /// `#include "common/utils.glsl"` -> `utils`
    fn parse_include(&self, line: &str) -> Option<String> {
        let directive = line.find(INCLUDE_DIRECTIVE)?;
        let after_directive = &line[directive + INCLUDE_DIRECTIVE.len()..];
        let quote = after_directive.find('"')?;
        let quoted = &after_directive[quote + 1..];
        let end = quoted.find(self.include_suffix.as_str())?;
        let path = &quoted[..end];
        let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if name.is_empty() {
            return None;
        }
        Some(name.to_string())
    }
}

/// Drop a leading `layout(...)` qualifier, keeping what follows the first `)`
fn strip_layout(line: Cow<'_, str>) -> Cow<'_, str> {
    if !line.trim_start().starts_with(LAYOUT_KEYWORD) {
        return line;
    }
    let rest = match line.find(')') {
        Some(close) => line[close + 1..].trim_start(),
        None => line.trim_start(),
    };
    Cow::Owned(rest.to_string())
}
