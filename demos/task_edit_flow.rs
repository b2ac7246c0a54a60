//! Task edit flow through the access gate.
//!
//! 1. The gate resolves the caller's user and company
//! 2. The edit form is pre-filled from the stored task
//! 3. The submission is marked `Tainted` and validated into `Verified<TaskUpdate>`
//! 4. Only the verified update reaches `update_task`, on a mutation context
//!
//! Run with: `cargo run --example task_edit_flow`

use company_gate::{
    get_task, update_task, AccessValidator, Company, CompanyId, Ctx, Identity, MemoryStore,
    Priority, Sanitizer, Tainted, Task, TaskId, TaskUpdateForm, TaskUpdateSanitizer,
    TokenIdentifier, User, UserId,
};

fn seed() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_company(Company {
        id: CompanyId::new("C1"),
        name: "Acme Holdings".to_string(),
        user_id: "tok-owner".into(),
        associated_users: [TokenIdentifier::new("tok-assistant")].into_iter().collect(),
    });
    for (id, token, company) in [
        ("U1", "tok-owner", Some("C1")),
        ("U2", "tok-assistant", Some("C1")),
        ("U3", "tok-outsider", None),
    ] {
        store.insert_user(User {
            id: UserId::new(id),
            token_identifier: token.into(),
            name: None,
            company_id: company.map(CompanyId::new),
        });
    }
    store.insert_task(Task {
        id: TaskId::new("T1"),
        company_id: CompanyId::new("C1"),
        title: "Annual return".to_string(),
        description: "File the annual return with the registry".to_string(),
        due_date: Some("2026-11-30".to_string()),
        estimated_time: 2.0,
        task_state: None,
        review_status: None,
        meeting_agenda_flag: Some(false),
        notes: Some("Waiting on accounts".to_string()),
        priority: Some(Priority::Medium),
        category: Some("Compliance".to_string()),
    });
    store
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let store = seed();
    let gate = AccessValidator::default();
    let task_id = TaskId::new("T1");

    // Scenario 1: associated user edits the task
    let read = Ctx::query("req-1", Some(Identity::new("tok-assistant")), &store);
    let current = match get_task(&gate, &read, &task_id) {
        Ok(task) => task,
        Err(e) => {
            tracing::error!(error = %e, "could not load task");
            return;
        }
    };

    let mut form = TaskUpdateForm::from_task(&current);
    form.priority = Some("high".to_string());
    form.notes = Some(String::new());

    match TaskUpdateSanitizer::default().sanitize(Tainted::new(form)) {
        Ok(update) => {
            let write = Ctx::mutation("req-2", Some(Identity::new("tok-assistant")), &store);
            match update_task(&gate, &write, &task_id, update) {
                Ok(task) => tracing::info!(
                    priority = ?task.priority,
                    notes = ?task.notes,
                    "scenario 1: task updated"
                ),
                Err(e) => tracing::error!(error = %e, "scenario 1: update rejected"),
            }
        }
        Err(e) => tracing::error!(error = %e, "scenario 1: invalid submission"),
    }

    // Scenario 2: invalid submission never reaches the store
    let mut form = TaskUpdateForm::from_task(&current);
    form.title = "AG".to_string();
    if let Err(e) = TaskUpdateSanitizer::default().sanitize(Tainted::new(form)) {
        tracing::info!(error = %e, "scenario 2: submission rejected before the gate");
    }

    // Scenario 3: user without a company is turned away
    let outsider = Ctx::query("req-3", Some(Identity::new("tok-outsider")), &store);
    if let Err(e) = get_task(&gate, &outsider, &task_id) {
        tracing::info!(error = %e, "scenario 3: outsider denied");
    }

    // Scenario 4: anonymous caller sees the reason's message
    let anonymous = Ctx::query("req-4", None, &store);
    if let Err(e) = get_task(&gate, &anonymous, &task_id) {
        tracing::info!(error = %e, "scenario 4: anonymous denied");
    }
}
