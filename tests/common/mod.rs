//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use company_gate::{
    Company, CompanyId, MemoryStore, Person, PersonId, Task, TaskId, TokenIdentifier, User, UserId,
};

/// User U-A (`tok-A`) owns C1, `tok-B` is associated with C1, `tok-C` is
/// linked to C1 without rights. C2 belongs to `tok-D`.
pub fn scenario_store() -> MemoryStore {
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

    store.insert_task(task("T1", "C1", "Quarterly filing"));
    store.insert_task(task("T2", "C1", "Update share register"));
    store.insert_task(task("T3", "C2", "Globex payroll"));

    store.insert_person(Person {
        id: PersonId::new("P1"),
        company_id: CompanyId::new("C1"),
        name: "Grace Hopper".to_string(),
        is_shareholder: true,
    });
    store.insert_person(Person {
        id: PersonId::new("P2"),
        company_id: CompanyId::new("C1"),
        name: "Alan Turing".to_string(),
        is_shareholder: false,
    });

    store
}

pub fn task(id: &str, company_id: &str, title: &str) -> Task {
    Task {
        id: TaskId::new(id),
        company_id: CompanyId::new(company_id),
        title: title.to_string(),
        description: "Routine company administration".to_string(),
        due_date: None,
        estimated_time: 1.0,
        task_state: None,
        review_status: None,
        meeting_agenda_flag: None,
        notes: None,
        priority: None,
        category: None,
    }
}
