// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Sets of roles named by access policies.

use std::fmt;

use campus_core::RoleName;

/// A small set of [`RoleName`]s.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RoleSet(u8);

const fn bit(role: RoleName) -> u8 {
    match role {
        RoleName::Admin => 1,
        RoleName::Professor => 1 << 1,
        RoleName::Student => 1 << 2,
    }
}

impl RoleSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns a copy with `role` added.
    pub const fn with(self, role: RoleName) -> Self {
        Self(self.0 | bit(role))
    }

    /// Admin only.
    pub const fn admin() -> Self {
        Self::empty().with(RoleName::Admin)
    }

    /// Admin and Professor.
    pub const fn staff() -> Self {
        Self::admin().with(RoleName::Professor)
    }

    /// Returns `true` if the set contains `role`.
    pub const fn contains(&self, role: RoleName) -> bool {
        self.0 & bit(role) != 0
    }

    /// Returns `true` if the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates the members in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = RoleName> + '_ {
        RoleName::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

impl FromIterator<RoleName> for RoleSet {
    fn from_iter<I: IntoIterator<Item = RoleName>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, role) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(role.as_str())?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RoleSet{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let staff = RoleSet::staff();
        assert!(staff.contains(RoleName::Admin));
        assert!(staff.contains(RoleName::Professor));
        assert!(!staff.contains(RoleName::Student));
        assert!(RoleSet::empty().is_empty());
    }

    #[test]
    fn test_from_iter_and_display() {
        let set: RoleSet = [RoleName::Student, RoleName::Admin].into_iter().collect();
        assert_eq!(set.to_string(), "{Admin, Student}");
        assert_eq!(set.iter().count(), 2);
        assert_eq!(RoleSet::empty().to_string(), "{}");
    }
}
