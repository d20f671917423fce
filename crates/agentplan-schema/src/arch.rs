//! CPU architecture names and their aliases.

/// CPU architecture as it appears in platform tags and rpm filenames.
///
/// Host inventories report the same machine under several names (`x64`,
/// `amd64`, `x86_64`), so every alias is folded into one variant when
/// parsed. Names we have no variant for are kept, lowercased, in
/// [`Arch::Other`] so that the support matrix can name them when it rejects
/// them.
///
/// # Example
///
/// ```
/// use agentplan_schema::Arch;
///
/// assert_eq!(Arch::from("x64"), Arch::X86_64);
/// assert_eq!(Arch::from("i686").as_str(), "i386");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Arch {
    /// Intel/AMD 64-bit.
    X86_64,
    /// Intel 32-bit, any of the i386..i686 family.
    I386,
    /// ARM 64-bit.
    Aarch64,
    /// IBM Z.
    S390x,
    /// IBM POWER, little endian.
    Ppc64le,
    /// Anything else, lowercased.
    Other(String),
}

impl Arch {
    /// Name used in platform tags and package filenames.
    pub fn as_str(&self) -> &str {
        match self {
            Self::X86_64 => "x86_64",
            Self::I386 => "i386",
            Self::Aarch64 => "aarch64",
            Self::S390x => "s390x",
            Self::Ppc64le => "ppc64le",
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Arch {
    fn from(s: &str) -> Self {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "x86_64" | "x64" | "amd64" => Self::X86_64,
            "i386" | "i486" | "i586" | "i686" | "x86" => Self::I386,
            "aarch64" | "arm64" => Self::Aarch64,
            "s390x" => Self::S390x,
            "ppc64le" => Self::Ppc64le,
            _ => Self::Other(lower),
        }
    }
}

impl From<String> for Arch {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Arch> for String {
    fn from(arch: Arch) -> Self {
        arch.as_str().to_string()
    }
}
