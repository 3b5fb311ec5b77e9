//! Version compatibility checker for rules import/export.
//!
//! Rule bundles carry a semver format version; this module decides whether a
//! bundle produced elsewhere can be imported safely.

use std::fmt;

/// Result of comparing two bundle versions for compatibility.
#[derive(Debug, Clone, PartialEq)]
pub enum Compatibility {
    /// Versions are fully compatible.
    Compatible,
    /// Import version is newer but still compatible (minor difference).
    /// Worth a warning to the user.
    MinorNewer { current: String, import: String },
    /// Versions are incompatible (major difference). Import is rejected.
    Incompatible {
        current: String,
        import: String,
        hints: Vec<String>,
    },
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compatibility::Compatible => write!(f, "Versions are compatible"),
            Compatibility::MinorNewer { current, import } => write!(
                f,
                "Rules version ({import}) is newer than current ({current}). \
                 Unknown fields will be ignored, but import should work."
            ),
            Compatibility::Incompatible {
                current,
                import,
                hints,
            } => {
                writeln!(f, "Incompatible versions: current={current}, import={import}")?;
                if !hints.is_empty() {
                    writeln!(f, "Hints:")?;
                    for hint in hints {
                        writeln!(f, "  - {hint}")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Parse a semver version string into (major, minor, patch).
pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}

/// Check compatibility between the current rules format and an import.
///
/// Major mismatch rejects the import; a newer minor on the import side is
/// accepted with a warning; everything else (older minor, any patch) is
/// compatible.
pub fn check_compatibility(current: &str, import: &str) -> Compatibility {
    let current_ver = match parse_version(current) {
        Some(v) => v,
        None => {
            return Compatibility::Incompatible {
                current: current.to_string(),
                import: import.to_string(),
                hints: vec!["Invalid current version format".to_string()],
            }
        }
    };
    let import_ver = match parse_version(import) {
        Some(v) => v,
        None => {
            return Compatibility::Incompatible {
                current: current.to_string(),
                import: import.to_string(),
                hints: vec!["Invalid import version format".to_string()],
            }
        }
    };

    if current_ver.0 != import_ver.0 {
        let hint = if import_ver.0 > current_ver.0 {
            format!(
                "The rules file was produced by a newer format (v{}.x.x); update Glow to import it.",
                import_ver.0
            )
        } else {
            format!(
                "The rules file uses an older format (v{}.x.x); re-export it from a current install.",
                import_ver.0
            )
        };
        return Compatibility::Incompatible {
            current: current.to_string(),
            import: import.to_string(),
            hints: vec![hint],
        };
    }

    if import_ver.1 > current_ver.1 {
        return Compatibility::MinorNewer {
            current: current.to_string(),
            import: import.to_string(),
        };
    }

    Compatibility::Compatible
}
