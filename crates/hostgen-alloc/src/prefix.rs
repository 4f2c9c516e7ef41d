//! OS identifier → hostname prefix.

use std::fmt;

/// One-letter OS class code that starts every hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsPrefix {
    /// Windows.
    W,
    /// Apple macOS.
    M,
    /// Appliances.
    A,
    /// CIFS shares and storage.
    D,
    /// Blade enclosures.
    E,
    /// Solaris 10 and older.
    S,
    /// Linux family, Solaris 11, and anything unrecognized.
    L,
    /// VMware.
    V,
    /// FreeBSD.
    F,
}

impl OsPrefix {
    pub fn as_char(self) -> char {
        match self {
            OsPrefix::W => 'W',
            OsPrefix::M => 'M',
            OsPrefix::A => 'A',
            OsPrefix::D => 'D',
            OsPrefix::E => 'E',
            OsPrefix::S => 'S',
            OsPrefix::L => 'L',
            OsPrefix::V => 'V',
            OsPrefix::F => 'F',
        }
    }
}

impl fmt::Display for OsPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Map a free-form OS identifier to its prefix.
///
/// Matching is case-insensitive and the first rule that matches wins, so
/// "windows-vmware-hybrid" is `W`, not `V`. Never fails; unknown input is `L`.
pub fn resolve_prefix(os: &str) -> OsPrefix {
    let os = os.to_lowercase();
    let has = |needle: &str| os.contains(needle);

    if has("windows") {
        OsPrefix::W
    } else if has("mac") && has("apple") {
        OsPrefix::M
    } else if has("appliance") {
        OsPrefix::A
    } else if has("cifs") || has("storage") {
        OsPrefix::D
    } else if has("enclosure") {
        OsPrefix::E
    } else if has("solaris 10") || (has("solaris") && !has("11")) {
        OsPrefix::S
    } else if has("solaris 11") {
        OsPrefix::L
    } else if has("vmware") {
        OsPrefix::V
    } else if has("freebsd") {
        OsPrefix::F
    } else {
        // linux, centos, rhel, ubuntu, debian, amzn, and anything unrecognized.
        OsPrefix::L
    }
}
