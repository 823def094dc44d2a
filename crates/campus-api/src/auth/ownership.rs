// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Ownership rules.
//!
//! An ownership rule maps the target id of an operation to the user that
//! owns the target. The policy evaluator compares that owner with the caller
//! and never needs to know which relation produced it.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use campus_core::{CoreResult, RecordId, Store};

// =============================================================================
// OwnershipRule
// =============================================================================

/// Resolves the owning user of a target record.
#[async_trait]
pub trait OwnershipRule: Send + Sync + fmt::Debug {
    /// Short name used in logs and policy descriptions.
    fn name(&self) -> &'static str;

    /// Returns the owning user id, or `None` if the target does not exist.
    async fn owner_of(&self, store: &dyn Store, target: RecordId) -> CoreResult<Option<RecordId>>;
}

/// The target id is itself a user id.
#[derive(Debug, Clone, Copy)]
pub struct SelfIdentity;

#[async_trait]
impl OwnershipRule for SelfIdentity {
    fn name(&self) -> &'static str {
        "SelfIdentity"
    }

    async fn owner_of(&self, _store: &dyn Store, target: RecordId) -> CoreResult<Option<RecordId>> {
        Ok(Some(target))
    }
}

/// The target is a student record, owned by its linked user.
#[derive(Debug, Clone, Copy)]
pub struct StudentOwner;

#[async_trait]
impl OwnershipRule for StudentOwner {
    fn name(&self) -> &'static str {
        "StudentOwner"
    }

    async fn owner_of(&self, store: &dyn Store, target: RecordId) -> CoreResult<Option<RecordId>> {
        Ok(store.find_student(target).await?.map(|s| s.user_id))
    }
}

/// The target is a professor record, owned by its linked user.
#[derive(Debug, Clone, Copy)]
pub struct ProfessorOwner;

#[async_trait]
impl OwnershipRule for ProfessorOwner {
    fn name(&self) -> &'static str {
        "ProfessorOwner"
    }

    async fn owner_of(&self, store: &dyn Store, target: RecordId) -> CoreResult<Option<RecordId>> {
        Ok(store.find_professor(target).await?.map(|p| p.user_id))
    }
}

// =============================================================================
// Ownership
// =============================================================================

/// An ownership rule bound to the path parameter holding the target id.
#[derive(Clone)]
pub struct Ownership {
    /// Path parameter name.
    pub param: &'static str,
    /// Rule resolving the owner.
    pub rule: Arc<dyn OwnershipRule>,
}

impl Ownership {
    /// Binds a rule to a path parameter.
    pub fn new(param: &'static str, rule: impl OwnershipRule + 'static) -> Self {
        Self {
            param,
            rule: Arc::new(rule),
        }
    }

    /// The target id is the caller's own user id.
    pub fn self_identity(param: &'static str) -> Self {
        Self::new(param, SelfIdentity)
    }

    /// The target is a student record.
    pub fn student(param: &'static str) -> Self {
        Self::new(param, StudentOwner)
    }

    /// The target is a professor record.
    pub fn professor(param: &'static str) -> Self {
        Self::new(param, ProfessorOwner)
    }
}

impl fmt::Debug for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.rule.name(), self.param)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{
        Credentials, HashConfig, MemoryStore, NewAccount, NewProfessor, NewStudent, RoleName,
    };

    async fn store() -> (MemoryStore, RecordId, RecordId, RecordId, RecordId) {
        let store = MemoryStore::new();
        for role in RoleName::ALL {
            store.ensure_role(role).await.unwrap();
        }
        let credentials = Credentials::new(HashConfig::for_testing()).unwrap();
        let department = store.create_department("Physics".to_string()).await.unwrap();

        let (student_user, student) = store
            .create_student(
                NewAccount {
                    username: "stu".to_string(),
                    email: "stu@campus.test".to_string(),
                    password: credentials.hash("pw").unwrap(),
                },
                NewStudent {
                    student_id: "S-1".to_string(),
                    first_name: "Marie".to_string(),
                    last_name: "Curie".to_string(),
                    department_id: department.id,
                },
            )
            .await
            .unwrap();

        let (professor_user, professor) = store
            .create_professor(
                NewAccount {
                    username: "prof".to_string(),
                    email: "prof@campus.test".to_string(),
                    password: credentials.hash("pw").unwrap(),
                },
                NewProfessor {
                    first_name: "Niels".to_string(),
                    last_name: "Bohr".to_string(),
                    title: None,
                    department_id: department.id,
                },
            )
            .await
            .unwrap();

        (store, student_user.id, student.id, professor_user.id, professor.id)
    }

    #[tokio::test]
    async fn test_rules_resolve_owner() {
        let (store, student_user, student, professor_user, professor) = store().await;

        assert_eq!(SelfIdentity.owner_of(&store, 42).await.unwrap(), Some(42));
        assert_eq!(
            StudentOwner.owner_of(&store, student).await.unwrap(),
            Some(student_user)
        );
        assert_eq!(
            ProfessorOwner.owner_of(&store, professor).await.unwrap(),
            Some(professor_user)
        );
    }

    #[tokio::test]
    async fn test_missing_target_has_no_owner() {
        let (store, ..) = store().await;
        assert_eq!(StudentOwner.owner_of(&store, 999).await.unwrap(), None);
        assert_eq!(ProfessorOwner.owner_of(&store, 999).await.unwrap(), None);
    }

    #[test]
    fn test_debug_names_rule_and_param() {
        assert_eq!(
            format!("{:?}", Ownership::student("student_id")),
            "StudentOwner(student_id)"
        );
    }
}
