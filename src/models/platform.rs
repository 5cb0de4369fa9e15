use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system family the viewer is running on.
///
/// Decides the path separator used when building Steam paths and which
/// default install root applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
    Unknown,
}

impl Platform {
    /// Detect the platform of the running process.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::Macos,
            "linux" => Platform::Linux,
            _ => Platform::Unknown,
        }
    }

    /// Separator used when joining Steam path segments.
    pub fn separator(&self) -> char {
        match self {
            Platform::Windows => '\\',
            _ => '/',
        }
    }

    /// Join path segments onto `base` with this platform's separator.
    ///
    /// A trailing separator on `base` is not doubled.
    pub fn join(&self, base: &str, segments: &[&str]) -> String {
        let sep = self.separator();
        let mut path = base.trim_end_matches(['/', '\\']).to_string();
        for segment in segments {
            path.push(sep);
            path.push_str(segment);
        }
        path
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Macos => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os() {
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("macos"), Platform::Macos);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("freebsd"), Platform::Unknown);
    }

    #[test]
    fn test_windows_join_uses_backslash() {
        let path = Platform::Windows.join(
            "C:\\Program Files (x86)\\Steam",
            &["steamapps", "workshop", "content", "400"],
        );
        assert_eq!(
            path,
            "C:\\Program Files (x86)\\Steam\\steamapps\\workshop\\content\\400"
        );
    }

    #[test]
    fn test_unix_join_strips_trailing_separator() {
        let path = Platform::Linux.join("/home/user/.steam/steam/", &["steamapps"]);
        assert_eq!(path, "/home/user/.steam/steam/steamapps");
    }
}
