//! Documentation unit rendering
//!
//! Produces the two text blocks Doxygen sees for a shader: a header opening the
//! namespaces and carrying the class comment, and a body holding the scanned
//! source wrapped in a `public class` declaration.

use std::fmt::{self, Write as FmtWrite};

/// Names and labels needed to render one shader
#[derive(Debug, Clone, Copy)]
pub struct DocContext<'a> {
    /// Product namespace, e.g. `GPUShaders`
    pub namespace: &'a str,
    /// Stage sub-namespace, e.g. `Frag`
    pub stage_namespace: &'a str,
    /// Sub-namespace shared snippets live in, used for `\sa` references
    pub common_namespace: &'a str,
    /// Doxygen group the class is added to
    pub group: &'a str,
    pub class_name: &'a str,
    pub display_name: &'a str,
    /// Stage description, e.g. `fragment`
    pub description: &'a str,
}

/// Header and body, emitted in that order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub header: String,
    pub body: String,
}

impl OutputDocument {
    pub fn into_string(self) -> String {
        let mut output = self.header;
        output.push_str(&self.body);
        output
    }
}

impl fmt::Display for OutputDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header)?;
        f.write_str(&self.body)
    }
}

/// Render the namespace openers and the class documentation comment
///
/// `includes` are base names of shared files; each becomes a fully qualified
/// reference into the common namespace. No `\sa` line is written without includes.
pub fn render_header(ctx: &DocContext<'_>, includes: &[String]) -> Result<String, fmt::Error> {
    let mut output = String::new();

    writeln!(output, "namespace {} {{", ctx.namespace)?;
    writeln!(output, "namespace {} {{", ctx.stage_namespace)?;

    writeln!(output, "/** \\class {}", ctx.class_name)?;
    writeln!(
        output,
        "  * \\brief {} {} shader.",
        ctx.display_name, ctx.description
    )?;

    if !includes.is_empty() {
        let references: Vec<String> = includes
            .iter()
            .map(|name| cross_reference(ctx, name))
            .collect();
        writeln!(output, "  * \\sa {}", references.join(", "))?;
    }

    writeln!(output, "  * \\ingroup {}", ctx.group)?;
    writeln!(output, "*/")?;

    Ok(output)
}

/// Wrap scanned lines in the class declaration and close both namespaces
pub fn render_body(ctx: &DocContext<'_>, lines: &str) -> Result<String, fmt::Error> {
    let mut output = String::with_capacity(lines.len() + 64);

    writeln!(output, "public class {} {{", ctx.class_name)?;
    writeln!(output, "public:")?;
    output.push_str(lines);
    writeln!(output)?;
    writeln!(output, "}};")?;

    // Namespaces opened by the header
    writeln!(output, "}}")?;
    writeln!(output, "}}")?;

    Ok(output)
}

fn cross_reference(ctx: &DocContext<'_>, include: &str) -> String {
    format!(
        "{}::{}::{}",
        ctx.namespace,
        ctx.common_namespace,
        crate::naming::class_name(include)
    )
}
