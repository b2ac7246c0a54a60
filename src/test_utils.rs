//! Shared fixtures and proptest strategies for unit tests.

use proptest::prelude::*;

use crate::identity::TokenIdentifier;
use crate::model::{Company, CompanyId, TaskId, User, UserId};
use crate::store::MemoryStore;
use crate::task::{Priority, Task, TaskState};

/// Company C1 owned by `tok-A` with `tok-B` associated, company C2 owned by
/// `tok-D`. `tok-C` is linked to C1 without being authorized; `tok-U` has no
/// company.
pub(crate) fn scenario_store() -> MemoryStore {
    let store = MemoryStore::new();

    store.insert_company(Company {
        id: CompanyId::new("C1"),
        name: "Acme Holdings".to_string(),
        user_id: "tok-A".into(),
        associated_users: [TokenIdentifier::new("tok-B")].into_iter().collect(),
    });
    store.insert_company(Company {
        id: CompanyId::new("C2"),
        name: "Globex".to_string(),
        user_id: "tok-D".into(),
        associated_users: Default::default(),
    });

    for (id, token, company) in [
        ("U-A", "tok-A", Some("C1")),
        ("U-B", "tok-B", Some("C1")),
        ("U-C", "tok-C", Some("C1")),
        ("U-D", "tok-D", Some("C2")),
        ("U-U", "tok-U", None),
    ] {
        store.insert_user(User {
            id: UserId::new(id),
            token_identifier: token.into(),
            name: None,
            company_id: company.map(CompanyId::new),
        });
    }

    store
}

pub(crate) fn sample_task(id: &str, company_id: &str) -> Task {
    Task {
        id: TaskId::new(id),
        company_id: CompanyId::new(company_id),
        title: "Quarterly filing".to_string(),
        description: "File the quarterly statement".to_string(),
        due_date: Some("2026-12-31".to_string()),
        estimated_time: 2.0,
        task_state: Some(TaskState::NotStarted),
        review_status: None,
        meeting_agenda_flag: Some(false),
        notes: None,
        priority: Some(Priority::High),
        category: None,
    }
}

/// Printable text with no surrounding whitespace, at most `max` characters.
pub(crate) fn arb_valid_text(max: usize) -> impl Strategy<Value = String> {
    assert!(max >= 2);
    prop::string::string_regex(&format!(
        "[A-Za-z0-9]([A-Za-z0-9 ,.-]{{0,{}}}[A-Za-z0-9])?",
        max - 2
    ))
    .expect("valid regex")
}
