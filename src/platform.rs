use std::fmt;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Linux,
    MacOs,
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::MacOs => write!(f, "darwin"),
            Os::Windows => write!(f, "win32"),
        }
    }
}

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    pub os: Os,
}

impl Platform {
    /// Detect the current platform.
    #[must_use]
    pub fn detect() -> Self {
        Self { os: detect_os() }
    }

    /// Create a platform with an explicit OS (for testing).
    #[must_use]
    pub const fn new(os: Os) -> Self {
        Self { os }
    }

    /// Whether the host uses symlink-based integration.
    #[must_use]
    pub fn is_unix(&self) -> bool {
        self.os != Os::Windows
    }

    #[must_use]
    pub fn is_windows(&self) -> bool {
        self.os == Os::Windows
    }
}

fn detect_os() -> Os {
    if cfg!(target_os = "windows") {
        Os::Windows
    } else if cfg!(target_os = "macos") {
        Os::MacOs
    } else {
        // Default to Linux for other Unix-like systems
        Os::Linux
    }
}
