//! Shader sources compiled by the conformance suite

use std::fmt;

use crate::codes;

/// Programmable stage a shader object is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The `glCreateShader` enum for this stage
    pub fn gl_kind(self) -> u32 {
        match self {
            Self::Vertex => codes::VERTEX_SHADER,
            Self::Fragment => codes::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}

/// Whether a source is expected to compile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expectation {
    Compiles,
    Fails,
}

/// A source and the outcome the driver must produce for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderCase {
    pub name: &'static str,
    pub stage: ShaderStage,
    pub source: &'static str,
    pub expect: Expectation,
}

pub const VALID_VERTEX_SHADER: &str = r#"
		#version 410
		void main() {
			gl_Position = vec4(0, 0, 0, 1);
		}
	"#;

/// Assigns to an undeclared built-in through an undeclared constructor
pub const INVALID_VERTEX_SHADER: &str = r#"
		#version 410
		void main() {
			gl_Unlucky = vec13(13);
		}
	"#;

pub const VALID_FRAGMENT_SHADER: &str = r#"
		#version 410
		out vec4 color;
		void main() {
			color = vec4(1, 0, 1, 1);
		}
	"#;

pub const INVALID_FRAGMENT_SHADER: &str = r#"
		#version 410
		out vec4 color;
		void main() {
			color = undeclared_color;
		}
	"#;

impl ShaderCase {
    pub const fn new(
        name: &'static str,
        stage: ShaderStage,
        source: &'static str,
        expect: Expectation,
    ) -> Self {
        Self {
            name,
            stage,
            source,
            expect,
        }
    }

    /// The vertex shader pair every run compiles
    pub fn stock() -> Vec<Self> {
        vec![
            Self::new(
                "valid vertex shader",
                ShaderStage::Vertex,
                VALID_VERTEX_SHADER,
                Expectation::Compiles,
            ),
            Self::new(
                "invalid vertex shader",
                ShaderStage::Vertex,
                INVALID_VERTEX_SHADER,
                Expectation::Fails,
            ),
        ]
    }

    /// Stock cases plus a fragment shader pair
    pub fn extended() -> Vec<Self> {
        let mut cases = Self::stock();
        cases.push(Self::new(
            "valid fragment shader",
            ShaderStage::Fragment,
            VALID_FRAGMENT_SHADER,
            Expectation::Compiles,
        ));
        cases.push(Self::new(
            "invalid fragment shader",
            ShaderStage::Fragment,
            INVALID_FRAGMENT_SHADER,
            Expectation::Fails,
        ));
        cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GlslVersion;

    #[test]
    fn test_stock_cases_target_glsl_410() {
        for case in ShaderCase::extended() {
            let version = GlslVersion::from_directive(case.source).unwrap();
            assert_eq!(version.number, 410, "{}", case.name);
        }
    }

    #[test]
    fn test_stock_cases_pair_up() {
        let cases = ShaderCase::stock();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].expect, Expectation::Compiles);
        assert_eq!(cases[1].expect, Expectation::Fails);
        assert!(cases[1].source.contains("gl_Unlucky = vec13(13);"));
        assert_eq!(ShaderCase::extended().len(), 4);
    }

    #[test]
    fn test_stage_kinds() {
        assert_eq!(ShaderStage::Vertex.gl_kind(), 0x8B31);
        assert_eq!(ShaderStage::Fragment.gl_kind(), 0x8B30);
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
