use std::fmt;

/// Namespace all OVAL definition documents live under.
pub const OVAL_DEFINITIONS_NAMESPACE: &str = "http://oval.mitre.org/XMLSchema/oval-definitions-5";

/// Coarse grouping of checks, derived arithmetically from the subtype.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Family {
    /// Sentinel for subtypes outside any known family.
    #[default]
    Unknown,
    /// Platform-independent checks.
    Independent,
    /// Linux-specific checks.
    Linux,
    /// macOS-specific checks.
    Macos,
    /// Solaris-specific checks.
    Solaris,
    /// Generic Unix checks.
    Unix,
    /// Windows-specific checks.
    Windows,
}

impl Family {
    /// Maps a family base value (`subtype / 1000 * 1000`) to the family.
    #[must_use]
    pub const fn from_value(value: u32) -> Self {
        match value {
            7000 => Self::Independent,
            9000 => Self::Linux,
            10000 => Self::Macos,
            12000 => Self::Solaris,
            13000 => Self::Unix,
            14000 => Self::Windows,
            _ => Self::Unknown,
        }
    }

    /// Base value of the family block.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Independent => 7000,
            Self::Linux => 9000,
            Self::Macos => 10000,
            Self::Solaris => 12000,
            Self::Unix => 13000,
            Self::Windows => 14000,
        }
    }

    /// Canonical lower-case family name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Independent => "independent",
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Solaris => "solaris",
            Self::Unix => "unix",
            Self::Windows => "windows",
        }
    }

    /// Namespace URI serialized objects of this family are placed under.
    #[must_use]
    pub fn namespace_uri(self) -> String {
        format!("{OVAL_DEFINITIONS_NAMESPACE}#{}", self.name())
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies exactly which check an object performs.
///
/// Subtype values partition into blocks of 1000 per family, so the family is
/// always `subtype / 1000 * 1000`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Subtype {
    /// Sentinel for an object whose check kind has not been resolved; an
    /// object with this subtype never validates.
    #[default]
    Unknown = 0,
    /// independent: family check.
    Family = 7001,
    /// independent: file hash check.
    FileHash = 7003,
    /// independent: environment variable check.
    EnvironmentVariable = 7004,
    /// independent: text file content check.
    TextFileContent54 = 7010,
    /// independent: variable check.
    Variable = 7012,
    /// independent: XML file content check.
    XmlFileContent = 7013,
    /// linux: dpkg package check.
    DpkgInfo = 9001,
    /// linux: rpm package check.
    RpmInfo = 9004,
    /// linux: SELinux boolean check.
    SelinuxBoolean = 9007,
    /// unix: file attribute check.
    File = 13006,
    /// unix: password database check.
    Password = 13008,
    /// unix: process check.
    Process = 13009,
    /// unix: uname check.
    Uname = 13012,
}

impl Subtype {
    /// Numeric value of the subtype.
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }

    /// The family the subtype belongs to.
    #[must_use]
    pub const fn family(self) -> Family {
        Family::from_value(self.value() / 1000 * 1000)
    }

    /// Canonical lower-case subtype name; serialized objects are named
    /// `"<name>_object"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Family => "family",
            Self::FileHash => "filehash",
            Self::EnvironmentVariable => "environmentvariable",
            Self::TextFileContent54 => "textfilecontent54",
            Self::Variable => "variable",
            Self::XmlFileContent => "xmlfilecontent",
            Self::DpkgInfo => "dpkginfo",
            Self::RpmInfo => "rpminfo",
            Self::SelinuxBoolean => "selinuxboolean",
            Self::File => "file",
            Self::Password => "password",
            Self::Process => "process",
            Self::Uname => "uname",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
