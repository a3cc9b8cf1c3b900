//! The full conformance run

use tracing::{info, warn};

use crate::{Checker, GlApi, Report, ShaderCase};

/// Polls allowed when clearing errors left over from context creation
pub const DEFAULT_DRAIN_LIMIT: usize = 16;

/// Thresholds and shader cases for a run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuiteOptions {
    /// Required `GL_MAJOR_VERSION`
    pub expected_major: i32,
    /// Context version the `GL_VERSION` string is compared against
    pub requested_version: (u32, u32),
    /// Lower bound for `GL_MAX_TEXTURE_SIZE`; 1024 is guaranteed by the GL 4 specification
    pub min_texture_size: i32,
    #[cfg_attr(feature = "serde", serde(skip, default = "ShaderCase::stock"))]
    pub shader_cases: Vec<ShaderCase>,
    pub drain_limit: usize,
    /// Clear errors pending before the run instead of failing on them
    pub discard_setup_errors: bool,
}

impl Default for SuiteOptions {
    fn default() -> Self {
        Self {
            expected_major: 4,
            requested_version: (4, 1),
            min_texture_size: 1024,
            shader_cases: ShaderCase::stock(),
            drain_limit: DEFAULT_DRAIN_LIMIT,
            discard_setup_errors: false,
        }
    }
}

impl SuiteOptions {
    pub fn with_expected_major(mut self, major: i32) -> Self {
        self.expected_major = major;
        self
    }

    pub fn with_requested_version(mut self, major: u32, minor: u32) -> Self {
        self.requested_version = (major, minor);
        self
    }

    pub fn with_min_texture_size(mut self, size: i32) -> Self {
        self.min_texture_size = size;
        self
    }

    pub fn with_shader_cases(mut self, cases: Vec<ShaderCase>) -> Self {
        self.shader_cases = cases;
        self
    }

    pub fn with_discard_setup_errors(mut self, discard: bool) -> Self {
        self.discard_setup_errors = discard;
        self
    }
}

/// Run every check against the current context
pub fn run_suite<G: GlApi + ?Sized>(gl: &G, options: &SuiteOptions) -> Report {
    let mut checker = Checker::new(gl);
    if options.discard_setup_errors {
        let stray = gl.drain_errors(options.drain_limit);
        if !stray.is_empty() {
            warn!("discarded {} error(s) pending before the run: {:?}", stray.len(), stray);
        }
    } else {
        checker.check_pending_errors(options.drain_limit);
    }

    checker.check_integers(options.expected_major, options.min_texture_size);
    checker.check_strings(options.requested_version);
    checker.check_textures();
    for case in &options.shader_cases {
        checker.check_shader_case(case);
    }

    let report = checker.finish();
    info!(
        failures = report.failures.len(),
        diagnostics = report.diagnostics.len(),
        "conformance run finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeDriver, FakeQuirks};
    use crate::{CheckKind, GlError};

    #[test]
    fn test_suite_passes_on_conforming_driver() {
        let gl = FakeDriver::new();
        let report = run_suite(&gl, &SuiteOptions::default());
        assert!(report.is_success(), "{report}");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(gl.live_shader_count(), 0);
    }

    #[test]
    fn test_suite_fails_on_errors_from_setup() {
        let gl = FakeDriver::with_quirks(FakeQuirks {
            stray_error: Some(GlError::InvalidOperation),
            ..Default::default()
        });
        let report = run_suite(&gl, &SuiteOptions::default());
        assert!(!report.is_success());
        let setup: Vec<_> = report.failures_for(CheckKind::Setup).collect();
        assert_eq!(setup.len(), 1);
        assert_eq!(
            setup[0].message,
            "error pending before checks: GL_INVALID_OPERATION (0x0502)"
        );
        // Drained up front, so the integer group still sees a clean slot
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_suite_can_discard_errors_from_setup() {
        let gl = FakeDriver::with_quirks(FakeQuirks {
            stray_error: Some(GlError::InvalidOperation),
            ..Default::default()
        });
        let options = SuiteOptions::default().with_discard_setup_errors(true);
        let report = run_suite(&gl, &options);
        assert!(report.is_success(), "{report}");
    }

    #[test]
    fn test_newer_requested_version_only_warns() {
        let gl = FakeDriver::new();
        let options = SuiteOptions::default().with_requested_version(4, 6);
        let report = run_suite(&gl, &options);
        assert!(report.is_success(), "{report}");
        assert_eq!(report.info.gl_version.map(|v| v.satisfies((4, 6))), Some(false));
    }

    #[test]
    fn test_suite_options_follow_requested_version() {
        let gl = FakeDriver::with_quirks(FakeQuirks {
            major_version: 3,
            minor_version: 3,
            ..Default::default()
        });
        let report = run_suite(&gl, &SuiteOptions::default());
        assert_eq!(report.failures_for(CheckKind::Integers).count(), 1);

        let options = SuiteOptions::default()
            .with_expected_major(3)
            .with_shader_cases(Vec::new());
        let report = run_suite(&gl, &options);
        assert!(report.is_success(), "{report}");
    }
}
