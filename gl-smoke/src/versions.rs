//! OpenGL and GLSL version strings reported by the driver

/// OpenGL version information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_es: bool,
}

impl GlVersion {
    /// Parse OpenGL version from version string
    pub fn parse(version_string: &str) -> Self {
        // Examples:
        // "4.6.0 NVIDIA 460.89"
        // "4.1 Metal - 88"
        // "OpenGL ES 3.0 (OpenGL ES GLSL ES 3.00)"
        // "WebGL 2.0 (OpenGL ES 3.0 Chromium)"

        let is_es = version_string.contains("OpenGL ES") || version_string.contains("WebGL");

        let (major, minor) = if is_es {
            if version_string.contains("WebGL 2.0") || version_string.contains("OpenGL ES 3.") {
                (3, 0)
            } else if version_string.contains("WebGL 1.0")
                || version_string.contains("OpenGL ES 2.")
            {
                (2, 0)
            } else {
                parse_version_numbers(version_string).unwrap_or((2, 0))
            }
        } else {
            parse_version_numbers(version_string).unwrap_or((2, 1))
        };

        Self {
            major,
            minor,
            is_es,
        }
    }

    /// Whether a context of this version provides `requested`
    pub fn satisfies(self, requested: (u32, u32)) -> bool {
        !self.is_es && (self.major, self.minor) >= requested
    }
}

impl std::fmt::Display for GlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_es {
            write!(f, "OpenGL ES {}.{}", self.major, self.minor)
        } else {
            write!(f, "OpenGL {}.{}", self.major, self.minor)
        }
    }
}

/// GLSL version as reported by `GL_SHADING_LANGUAGE_VERSION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlslVersion {
    /// Version number as written in a `#version` directive, e.g. 410
    pub number: u32,
    pub is_es: bool,
}

impl GlslVersion {
    /// Parse a shading language version string, e.g. "4.10 NVIDIA via Cg compiler"
    /// or "OpenGL ES GLSL ES 3.00"
    pub fn parse(version_string: &str) -> Option<Self> {
        let is_es = version_string.contains(" ES ");
        let (major, minor) = parse_version_numbers(version_string)?;
        // "4.1" and "4.10" both mean 410
        let minor = if minor < 10 { minor * 10 } else { minor };
        Some(Self {
            number: major * 100 + minor,
            is_es,
        })
    }

    /// Parse the `#version` directive at the top of a shader source
    pub fn from_directive(source: &str) -> Option<Self> {
        let line = source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())?;
        let mut words = line.strip_prefix("#version")?.split_whitespace();
        let number = words.next()?.parse().ok()?;
        Some(Self {
            number,
            is_es: words.next() == Some("es"),
        })
    }

    /// The directive a shader would use to target this version
    pub fn directive(self) -> String {
        if self.is_es {
            format!("#version {} es", self.number)
        } else {
            format!("#version {}", self.number)
        }
    }
}

fn parse_version_numbers(version_string: &str) -> Option<(u32, u32)> {
    // Look for pattern like "3.2" or "4.6.0"
    for word in version_string.split_whitespace() {
        if let Some((major_str, rest)) = word.split_once('.') {
            if let Ok(major) = major_str.parse::<u32>() {
                let minor_str = rest.split('.').next().unwrap_or(rest);
                if let Ok(minor) = minor_str.parse::<u32>() {
                    return Some((major, minor));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_desktop_versions() {
        let nvidia = GlVersion::parse("4.6.0 NVIDIA 460.89");
        assert_eq!((nvidia.major, nvidia.minor, nvidia.is_es), (4, 6, false));

        let apple = GlVersion::parse("4.1 Metal - 88");
        assert_eq!((apple.major, apple.minor), (4, 1));
        assert!(apple.satisfies((4, 1)));
        assert!(!apple.satisfies((4, 2)));

        let mesa = GlVersion::parse("4.5 (Core Profile) Mesa 23.2.1");
        assert_eq!(mesa.to_string(), "OpenGL 4.5");
    }

    #[test]
    fn test_parse_es_versions() {
        let es = GlVersion::parse("OpenGL ES 3.0 (OpenGL ES GLSL ES 3.00)");
        assert!(es.is_es);
        assert_eq!((es.major, es.minor), (3, 0));
        assert!(!es.satisfies((3, 0)));

        let webgl = GlVersion::parse("WebGL 1.0");
        assert_eq!((webgl.major, webgl.minor), (2, 0));
    }

    #[test]
    fn test_unparseable_version_falls_back() {
        let version = GlVersion::parse("garbage");
        assert_eq!((version.major, version.minor, version.is_es), (2, 1, false));
    }

    #[test]
    fn test_glsl_version_parse() {
        let desktop = GlslVersion::parse("4.10 NVIDIA via Cg compiler").unwrap();
        assert_eq!(desktop.number, 410);
        assert_eq!(desktop.directive(), "#version 410");

        let short = GlslVersion::parse("4.1 Metal").unwrap();
        assert_eq!(short.number, 410);

        let es = GlslVersion::parse("OpenGL ES GLSL ES 3.00").unwrap();
        assert_eq!(es.number, 300);
        assert!(es.is_es);
        assert_eq!(es.directive(), "#version 300 es");

        assert_eq!(GlslVersion::parse("no numbers here"), None);
    }

    #[test]
    fn test_glsl_directive() {
        let source = "\n\t\t#version 410\n\t\tvoid main() {}\n";
        assert_eq!(
            GlslVersion::from_directive(source),
            Some(GlslVersion {
                number: 410,
                is_es: false
            })
        );
        assert_eq!(GlslVersion::from_directive("void main() {}"), None);
        assert!(GlslVersion::from_directive("#version 300 es\n").unwrap().is_es);
    }
}
