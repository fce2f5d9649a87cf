//! Access-control entries and the colon-delimited ACL grammar.
//!
//! ```text
//! world:<id>:<perms>            anyone (the id segment is ignored)
//! auth:<perms>                  authenticated identities
//! digest:<user>:<hash>:<perms>  user and credential hash
//! ```
//!
//! The permission segment is a string of letters from `cdrwa`; other
//! letters are ignored.

use std::fmt;
use std::ops::BitOr;

use crate::error::ArgumentError;

/// Permission bitmask of an access-control entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Perms(u32);

impl Perms {
    /// No permissions.
    pub const NONE: Self = Self(0);
    /// Read data and list children.
    pub const READ: Self = Self(1);
    /// Write data.
    pub const WRITE: Self = Self(1 << 1);
    /// Create children.
    pub const CREATE: Self = Self(1 << 2);
    /// Delete children.
    pub const DELETE: Self = Self(1 << 3);
    /// Change the ACL.
    pub const ADMIN: Self = Self(1 << 4);
    /// Every permission.
    pub const ALL: Self = Self(0b1_1111);

    /// Raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Maps a single permission letter.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'c' => Some(Self::CREATE),
            'd' => Some(Self::DELETE),
            'r' => Some(Self::READ),
            'w' => Some(Self::WRITE),
            'a' => Some(Self::ADMIN),
            _ => None,
        }
    }

    /// Parses a permission string. Unknown letters are skipped.
    #[must_use]
    pub fn from_letters(letters: &str) -> Self {
        letters
            .chars()
            .filter_map(Self::from_letter)
            .fold(Self::NONE, BitOr::bitor)
    }
}

impl BitOr for Perms {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One `(scheme, id, permissions)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AclEntry {
    /// Granted permissions.
    pub perms: Perms,
    /// Authentication scheme (`world`, `auth`, `digest`, ...).
    pub scheme: String,
    /// Identity within the scheme.
    pub id: String,
}

impl AclEntry {
    /// Entry granting `perms` to anyone.
    #[must_use]
    pub fn world(perms: Perms) -> Self {
        Self {
            perms,
            scheme: "world".to_string(),
            id: "anyone".to_string(),
        }
    }

    /// Entry granting `perms` to every identity authenticated on the session.
    #[must_use]
    pub fn auth(perms: Perms) -> Self {
        Self {
            perms,
            scheme: "auth".to_string(),
            id: String::new(),
        }
    }

    /// Entry granting `perms` to a digest user.
    #[must_use]
    pub fn digest(perms: Perms, user: &str, hash: &str) -> Self {
        Self {
            perms,
            scheme: "digest".to_string(),
            id: format!("{user}:{hash}"),
        }
    }
}

impl fmt::Display for AclEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {} {}}}", self.perms, self.scheme, self.id)
    }
}

/// The ACL applied to every node created from the shell.
#[must_use]
pub fn anyone_all() -> Vec<AclEntry> {
    vec![AclEntry::world(Perms::ALL)]
}

/// Parses an ACL specification.
///
/// # Errors
///
/// Returns [`ArgumentError::AclSpec`] for unknown schemes and segment count
/// mismatches.
pub fn parse_acl_spec(spec: &str) -> Result<Vec<AclEntry>, ArgumentError> {
    let segments: Vec<&str> = spec.split(':').collect();
    let Some((letters, prefix)) = segments.split_last() else {
        return Err(ArgumentError::acl_spec(spec));
    };
    if prefix.is_empty() {
        return Err(ArgumentError::acl_spec(spec));
    }
    let perms = Perms::from_letters(letters);

    let entry = match prefix {
        ["world", _id] => AclEntry::world(perms),
        ["auth"] => AclEntry::auth(perms),
        ["digest", user, hash] => AclEntry::digest(perms, user, hash),
        _ => return Err(ArgumentError::acl_spec(spec)),
    };
    Ok(vec![entry])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_case::test_case;

    #[test_case("rw", Perms::READ | Perms::WRITE ; "read write")]
    #[test_case("wr", Perms::READ | Perms::WRITE ; "reversed")]
    #[test_case("rwr", Perms::READ | Perms::WRITE ; "duplicate letter")]
    #[test_case("cdrwa", Perms::ALL ; "all letters")]
    #[test_case("xyz", Perms::NONE ; "unknown letters")]
    #[test_case("", Perms::NONE ; "empty")]
    #[test_case("rRw", Perms::READ | Perms::WRITE ; "uppercase ignored")]
    fn permission_letters(letters: &str, expected: Perms) {
        assert_eq!(Perms::from_letters(letters), expected);
    }

    #[test]
    fn permission_bits_match_wire_values() {
        assert_eq!(Perms::READ.bits(), 1);
        assert_eq!(Perms::WRITE.bits(), 2);
        assert_eq!(Perms::CREATE.bits(), 4);
        assert_eq!(Perms::DELETE.bits(), 8);
        assert_eq!(Perms::ADMIN.bits(), 16);
        assert_eq!(Perms::ALL.bits(), 31);
    }

    #[test]
    fn world_spec_grants_all() {
        let acl = parse_acl_spec("world:anyone:cdrwa").unwrap();
        assert_eq!(acl, vec![AclEntry::world(Perms::ALL)]);
    }

    #[test]
    fn world_spec_ignores_id_segment() {
        let acl = parse_acl_spec("world:somebody:r").unwrap();
        assert_eq!(acl[0].id, "anyone");
        assert_eq!(acl[0].perms, Perms::READ);
    }

    #[test]
    fn digest_spec_is_read_only() {
        let acl = parse_acl_spec("digest:alice:HASH:r").unwrap();
        assert_eq!(acl.len(), 1);
        assert_eq!(acl[0].scheme, "digest");
        assert_eq!(acl[0].id, "alice:HASH");
        assert_eq!(acl[0].perms, Perms::READ);
    }

    #[test]
    fn auth_spec_reads_and_writes() {
        let acl = parse_acl_spec("auth:rw").unwrap();
        assert_eq!(acl, vec![AclEntry::auth(Perms::READ | Perms::WRITE)]);
    }

    #[test_case("bogus:x" ; "unknown scheme")]
    #[test_case("digest:onlytwo" ; "digest too short")]
    #[test_case("digest:a:b:c:r" ; "digest too long")]
    #[test_case("world:r" ; "world missing id")]
    #[test_case("auth:x:r" ; "auth with id")]
    #[test_case("cdrwa" ; "single segment")]
    #[test_case("" ; "empty")]
    fn invalid_specs_are_argument_errors(spec: &str) {
        assert_eq!(parse_acl_spec(spec), Err(ArgumentError::acl_spec(spec)));
    }

    #[test]
    fn entry_display_matches_list_format() {
        assert_eq!(AclEntry::world(Perms::ALL).to_string(), "{31 world anyone}");
        assert_eq!(AclEntry::auth(Perms::READ).to_string(), "{1 auth }");
    }

    #[test]
    fn default_acl_is_anyone_all() {
        assert_eq!(anyone_all(), vec![AclEntry::world(Perms::ALL)]);
    }

    proptest! {
        #[test]
        fn prop_permission_order_does_not_matter(letters in "[cdrwaxyz]{0,12}") {
            let mut reversed: Vec<char> = letters.chars().collect();
            reversed.reverse();
            let reversed: String = reversed.into_iter().collect();
            prop_assert_eq!(Perms::from_letters(&letters), Perms::from_letters(&reversed));
        }

        #[test]
        fn prop_duplicate_letters_do_not_matter(letters in "[cdrwa]{0,8}") {
            let doubled = format!("{letters}{letters}");
            prop_assert_eq!(Perms::from_letters(&letters), Perms::from_letters(&doubled));
        }

        #[test]
        fn prop_permissions_never_exceed_all(letters in ".{0,16}") {
            prop_assert!(Perms::ALL.contains(Perms::from_letters(&letters)));
        }
    }
}
