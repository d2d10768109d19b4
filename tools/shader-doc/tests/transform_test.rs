//! Integration tests for the shader-doc library
//!
//! Shader files are written to a temp dir and run through `transform_file`.

use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use shader_doc::{
    Profile, RewriteRules, ShaderDocConfig, ShaderDocError, ShaderKind, StageTable, Transformer,
    transform_file,
};

const LIGHTING_FRAG: &str = r#"#version 400

#include "common/utils.glsl"
#include "common/gamma-correction.glsl"

INTERFACE {
	vec3 position;
	vec2 uv;
} In ;

layout(std140) uniform Light {
	vec4 position;
	vec4 color;
};

uniform sampler2D albedoTexture;

layout(location = 0) out vec4 fragColor;

/** Compute the final color. */
void main(){
	vec3 albedo = texture(albedoTexture, In.uv).rgb;
	fragColor = vec4(gamma(albedo), 1.0);
}
"#;

fn write_shader(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write shader");
    path
}

/// Lines that must survive untouched: everything except directives, block
/// markers, block members and layout-qualified lines.
fn verbatim_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut in_block = false;
    for line in source.lines() {
        if line.contains("INTERFACE") || (line.contains("uniform") && !line.contains("sampler")) {
            in_block = !line.contains('}');
            continue;
        }
        if in_block {
            in_block = !line.contains('}');
            continue;
        }
        if line.contains("#include") || line.trim_start().starts_with("layout") {
            continue;
        }
        lines.push(line);
    }
    lines
}

#[test]
fn test_full_fragment_shader() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "point-light.frag", LIGHTING_FRAG);

    let doc = transform_file(&path).expect("Transform failed");

    assert_eq!(
        doc.header,
        "namespace GPUShaders {\n\
         namespace Frag {\n\
         /** \\class Point_light\n\
         \x20 * \\brief Point light fragment shader.\n\
         \x20 * \\sa GPUShaders::Common::Utils, GPUShaders::Common::Gamma_correction\n\
         \x20 * \\ingroup Shaders\n\
         */\n"
    );

    assert!(doc.body.starts_with("public class Point_light {\npublic:\n"));
    assert!(doc.body.ends_with("\n};\n}\n}\n"));

    // Block members are qualified
    assert!(doc.body.contains("in vec3 position;\nin vec2 uv;\n"));
    assert!(doc.body.contains("uniform vec4 position;\nuniform vec4 color;\n"));
    // Layout qualifiers are stripped
    assert!(doc.body.contains("\nout vec4 fragColor;\n"));
    assert!(!doc.body.contains("layout("));
    // Markers and directives are gone
    assert!(!doc.body.contains("INTERFACE"));
    assert!(!doc.body.contains("#include"));
    assert!(!doc.body.contains("} In ;"));
    assert!(!doc.body.contains("Light {"));
}

#[test]
fn test_untouched_lines_keep_their_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "point-light.frag", LIGHTING_FRAG);
    let doc = transform_file(&path).expect("Transform failed");

    let mut cursor = 0;
    for line in verbatim_lines(LIGHTING_FRAG) {
        let found = doc.body[cursor..]
            .find(line)
            .unwrap_or_else(|| panic!("Line missing or out of order: {:?}", line));
        cursor += found + line.len();
    }
}

#[test]
fn test_minimal_vertex_shader() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "screen-quad.vert", "void main(){}\n");

    let doc = transform_file(&path).expect("Transform failed");
    let output = doc.to_string();

    assert!(output.contains("namespace GPUShaders {\nnamespace Vert {\n"));
    assert!(output.contains("public class Screen_quad {"));
    assert!(output.contains("\nvoid main(){}\n"));
}

#[test]
fn test_vertex_interface_block_is_output() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(
        &dir,
        "object.vert",
        "layout(location = 0) in vec3 v;\nINTERFACE {\n\tvec3 n;\n} Out ;\nvoid main(){}\n",
    );

    let doc = transform_file(&path).expect("Transform failed");
    assert!(doc.body.contains("public:\nin vec3 v;\nout vec3 n;\nvoid main(){}\n"));
}

#[test]
fn test_each_builtin_stage() {
    let dir = tempdir().expect("Failed to create temp dir");
    for kind in ShaderKind::ALL {
        let name = format!("stage.{}", kind.extension());
        let path = write_shader(&dir, &name, "void f();\n");
        let doc = transform_file(&path).expect("Transform failed");

        assert!(doc.header.contains(&format!("namespace {} {{", kind.namespace())));
        assert!(doc.header.contains(&format!(
            "\\brief Stage {} shader.",
            kind.description()
        )));
    }
}

#[test]
fn test_uppercase_extension_resolves() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "blur.GEOM", "void main(){}\n");
    let doc = transform_file(&path).expect("Transform failed");
    assert!(doc.header.contains("namespace Geom {"));
}

#[test]
fn test_unknown_extension_fails_before_reading() {
    // The file does not exist; the extension check comes first
    let err = transform_file(Path::new("/nonexistent/shader.comp")).unwrap_err();
    assert!(matches!(err, ShaderDocError::UnknownExtension { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = transform_file(dir.path().join("missing.frag")).unwrap_err();
    match err {
        ShaderDocError::Io { path, .. } => assert!(path.ends_with("missing.frag")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_include_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "broken.frag", "#include \"utils\n");
    let err = transform_file(&path).unwrap_err();
    assert!(matches!(err, ShaderDocError::MalformedInclude { line: 1, .. }));
}

#[test]
fn test_transform_file_is_deterministic() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "point-light.frag", LIGHTING_FRAG);

    let first = transform_file(&path).expect("Transform failed").into_string();
    let second = transform_file(&path).expect("Transform failed").into_string();
    assert_eq!(first, second);
}

#[test]
fn test_minimal_profile_keeps_blocks() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "point-light.frag", LIGHTING_FRAG);

    let config = ShaderDocConfig {
        profile: Profile::Minimal,
        ..Default::default()
    };
    let doc = Transformer::new(&config)
        .transform_file(&path)
        .expect("Transform failed");

    assert!(doc.body.contains("INTERFACE {\n\tvec3 position;\n"));
    assert!(doc.body.contains("uniform Light {\n"));
    assert!(!doc.body.contains("#include"));
    assert!(doc.header.contains("\\sa GPUShaders::Common::Utils"));
}

#[test]
fn test_explicit_table_and_rules() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_shader(&dir, "tess.tessc", "#include \"utils.glsl\"\nvoid main(){}\n");

    let transformer = Transformer::with_table(
        StageTable::from_kinds(&[ShaderKind::TessControl]),
        RewriteRules::NONE,
    );
    let doc = transformer.transform_file(&path).expect("Transform failed");

    assert!(doc.header.contains("namespace TessControl {"));
    assert!(doc.header.contains("tesselation control shader."));
    assert!(!doc.header.contains("\\sa"));
    assert!(doc.body.contains("#include \"utils.glsl\"\n"));
    assert_eq!(transformer.stages().len(), 1);
}

#[test]
fn test_configuration_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config_path = dir.path().join("shader-doc.toml");
    std::fs::write(
        &config_path,
        r#"
namespace = "Engine"
profile = "gpu"

[[stages]]
extension = "comp"
description = "compute"
namespace = "Compute"
"#,
    )
    .expect("Failed to write config");

    let config = ShaderDocConfig::load(&config_path).expect("Failed to load config");
    let transformer = Transformer::new(&config);

    let comp = write_shader(&dir, "cull.comp", "void main(){}\n");
    let doc = transformer.transform_file(&comp).expect("Transform failed");
    assert!(doc.header.starts_with("namespace Engine {\nnamespace Compute {\n"));
    assert!(doc.header.contains("\\brief Cull compute shader."));

    let tess = write_shader(&dir, "patch.tesse", "void main(){}\n");
    assert!(matches!(
        transformer.transform_file(&tess),
        Err(ShaderDocError::UnknownExtension { .. })
    ));
}
