//! Results collected by a conformance run

use std::fmt;

use crate::{GlVersion, GlslVersion};

/// The check routine a failure was recorded by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CheckKind {
    /// Errors already pending when the run started
    Setup,
    Integers,
    Strings,
    Textures,
    Shader,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Integers => "integers",
            Self::Strings => "strings",
            Self::Textures => "textures",
            Self::Shader => "shader",
        })
    }
}

/// A single failed assertion
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    pub check: CheckKind,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.message)
    }
}

/// Compiler output for a shader that was expected to fail
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub case: String,
    pub log: String,
}

/// What the driver reported about itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverInfo {
    pub vendor: Option<String>,
    pub renderer: Option<String>,
    pub version: Option<String>,
    pub shading_language_version: Option<String>,
    pub major_version: Option<i32>,
    pub max_texture_size: Option<i32>,
    pub gl_version: Option<GlVersion>,
    pub glsl_version: Option<GlslVersion>,
}

/// Outcome of a conformance run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub info: DriverInfo,
    pub failures: Vec<Failure>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures recorded by one check routine
    pub fn failures_for(&self, check: CheckKind) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.check == check)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unknown = "<unavailable>";
        writeln!(f, "vendor:   {}", self.info.vendor.as_deref().unwrap_or(unknown))?;
        writeln!(f, "renderer: {}", self.info.renderer.as_deref().unwrap_or(unknown))?;
        writeln!(f, "version:  {}", self.info.version.as_deref().unwrap_or(unknown))?;
        writeln!(
            f,
            "glsl:     {}",
            self.info
                .shading_language_version
                .as_deref()
                .unwrap_or(unknown)
        )?;
        for diagnostic in &self.diagnostics {
            writeln!(f, "expected diagnostic ({}):", diagnostic.case)?;
            for line in diagnostic.log.lines().filter(|l| !l.trim().is_empty()) {
                writeln!(f, "    {}", line)?;
            }
        }
        if self.is_success() {
            write!(f, "all checks passed")
        } else {
            for failure in &self.failures {
                writeln!(f, "FAIL {}", failure)?;
            }
            write!(f, "{} check(s) failed", self.failures.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_success() {
        let report = Report::default();
        assert!(report.is_success());
        assert!(report.to_string().ends_with("all checks passed"));
    }

    #[test]
    fn test_failures_are_listed() {
        let report = Report {
            failures: vec![
                Failure {
                    check: CheckKind::Textures,
                    message: "glGenTextures() returned zero".into(),
                },
                Failure {
                    check: CheckKind::Strings,
                    message: "glGetString(): GL_INVALID_ENUM (0x0500)".into(),
                },
            ],
            ..Default::default()
        };
        assert!(!report.is_success());
        assert_eq!(report.failures_for(CheckKind::Textures).count(), 1);
        assert_eq!(report.failures_for(CheckKind::Shader).count(), 0);
        let text = report.to_string();
        assert!(text.contains("FAIL [textures] glGenTextures() returned zero"));
        assert!(text.ends_with("2 check(s) failed"));
    }
}
