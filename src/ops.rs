//! Tenant-scoped operations.
//!
//! Every operation starts by passing the access gate. Reads accept either
//! execution mode. Writes require a `Ctx<Mutation>`.

use crate::context::Ctx;
use crate::error::{Error, Violation, ViolationKind};
use crate::gate::AccessValidator;
use crate::model::{CompanyId, Person, TaskId};
use crate::reason::Reason;
use crate::state::{Mode, Mutation};
use crate::store::{DocumentStore, PersonStore, TaskStore, TaskWriter};
use crate::task::{Task, TaskUpdate};
use crate::Verified;

const TASK_NOT_FOUND_MESSAGE: &str = "We couldn't find the task you are looking for.";
const OTHER_COMPANY_MESSAGE: &str = "You do not have permission to view this company.";

fn task_not_found() -> Error {
    Violation::new(ViolationKind::NotFound, TASK_NOT_FOUND_MESSAGE).into()
}

/// Fetches one task of the caller's company.
///
/// A task that belongs to another company is reported as not found.
///
/// # Errors
///
/// Any gate failure, or `NotFound` if the task is missing or not visible.
pub fn get_task<S, M>(
    gate: &AccessValidator,
    ctx: &Ctx<'_, S, M>,
    task_id: &TaskId,
) -> Result<Task, Error>
where
    S: DocumentStore + TaskStore + ?Sized,
    M: Mode,
{
    let access = gate.validate(ctx, Reason::CompanyInformation)?;

    ctx.db()
        .task(task_id)?
        .filter(|t| t.company_id == access.company().id)
        .ok_or_else(task_not_found)
}

/// Lists the tasks of the caller's company.
///
/// # Errors
///
/// Any gate failure, or a store error.
pub fn list_tasks<S, M>(gate: &AccessValidator, ctx: &Ctx<'_, S, M>) -> Result<Vec<Task>, Error>
where
    S: DocumentStore + TaskStore + ?Sized,
    M: Mode,
{
    let access = gate.validate(ctx, Reason::CompanyInformation)?;
    let tasks = ctx.db().tasks_by_company(&access.company().id)?;

    ctx.log()
        .debug(format_args!("listed {} tasks", tasks.len()));
    Ok(tasks)
}

/// Lists the shareholders of `company_id`.
///
/// The requested company must be the caller's own company.
///
/// # Errors
///
/// Any gate failure, or `Forbidden` for another company.
pub fn shareholders_by_company<S, M>(
    gate: &AccessValidator,
    ctx: &Ctx<'_, S, M>,
    company_id: &CompanyId,
) -> Result<Vec<Person>, Error>
where
    S: DocumentStore + PersonStore + ?Sized,
    M: Mode,
{
    let access = gate.validate(ctx, Reason::CompanyInformation)?;
    if &access.company().id != company_id {
        return Err(Violation::new(ViolationKind::Forbidden, OTHER_COMPANY_MESSAGE).into());
    }

    Ok(ctx
        .db()
        .persons_by_company(company_id)?
        .into_iter()
        .filter(|p| p.is_shareholder)
        .collect())
}

/// Applies a validated edit to a task of the caller's company.
///
/// Returns the task as stored after the update.
///
/// # Errors
///
/// Any gate failure, `NotFound` if the task is missing or belongs to another
/// company, or a store error from the write.
///
/// # Examples
///
/// ```
/// use company_gate::{
///     update_task, AccessValidator, Company, CompanyId, Ctx, Identity, MemoryStore, Sanitizer,
///     Task, TaskId, TaskUpdateForm, TaskUpdateSanitizer, User, UserId,
/// };
///
/// let store = MemoryStore::new();
/// store.insert_company(Company {
///     id: CompanyId::new("C1"),
///     name: "Acme".to_string(),
///     user_id: "tok-A".into(),
///     associated_users: Default::default(),
/// });
/// store.insert_user(User {
///     id: UserId::new("U1"),
///     token_identifier: "tok-A".into(),
///     name: None,
///     company_id: Some(CompanyId::new("C1")),
/// });
/// store.insert_task(Task {
///     id: TaskId::new("T1"),
///     company_id: CompanyId::new("C1"),
///     title: "Draft".to_string(),
///     description: "Draft description".to_string(),
///     due_date: None,
///     estimated_time: 1.0,
///     task_state: None,
///     review_status: None,
///     meeting_agenda_flag: None,
///     notes: None,
///     priority: None,
///     category: None,
/// });
///
/// let form = TaskUpdateForm::from_json(
///     r#"{"title": "Final", "description": "Final description", "estimatedTime": 4}"#,
/// ).unwrap();
/// let update = TaskUpdateSanitizer::default().sanitize(form).unwrap();
///
/// let ctx = Ctx::mutation("req-1", Some(Identity::new("tok-A")), &store);
/// let task = update_task(&AccessValidator::default(), &ctx, &TaskId::new("T1"), update).unwrap();
/// assert_eq!(task.title, "Final");
/// ```
pub fn update_task<S>(
    gate: &AccessValidator,
    ctx: &Ctx<'_, S, Mutation>,
    task_id: &TaskId,
    update: Verified<TaskUpdate>,
) -> Result<Task, Error>
where
    S: DocumentStore + TaskWriter + ?Sized,
{
    let access = gate.validate(ctx, Reason::CompanyInformation)?;

    let mut task = ctx
        .db()
        .task(task_id)?
        .filter(|t| t.company_id == access.company().id)
        .ok_or_else(task_not_found)?;

    task.apply(update.into_inner());
    ctx.db().replace_task(task.clone())?;

    ctx.log()
        .info(format_args!("task {} updated", task.id));
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Identity;
    use crate::model::PersonId;
    use crate::sanitizer::Sanitizer;
    use crate::store::MemoryStore;
    use crate::task::{Priority, TaskUpdateForm, TaskUpdateSanitizer};
    use crate::test_utils::{sample_task, scenario_store};
    use crate::Tainted;

    fn store_with_tasks() -> MemoryStore {
        let store = scenario_store();
        store.insert_task(sample_task("T1", "C1"));
        store.insert_task(sample_task("T2", "C2"));
        store
    }

    fn verified_update(title: &str) -> Verified<TaskUpdate> {
        let form = TaskUpdateForm {
            title: title.to_string(),
            description: "Updated description".to_string(),
            estimated_time: Some("5".into()),
            priority: Some("medium".to_string()),
            ..Default::default()
        };
        TaskUpdateSanitizer::default()
            .sanitize(Tainted::new(form))
            .unwrap()
    }

    #[test]
    fn get_task_returns_own_company_task() {
        let store = store_with_tasks();
        let ctx = Ctx::query("req-1", Some(Identity::new("tok-B")), &store);

        let task = get_task(&AccessValidator::default(), &ctx, &TaskId::new("T1")).unwrap();
        assert_eq!(task.company_id, CompanyId::new("C1"));
    }

    #[test]
    fn other_company_task_is_not_found() {
        let store = store_with_tasks();
        let ctx = Ctx::query("req-2", Some(Identity::new("tok-A")), &store);

        let err = get_task(&AccessValidator::default(), &ctx, &TaskId::new("T2")).unwrap_err();
        assert_eq!(err.kind(), Some(&ViolationKind::NotFound));
        assert_eq!(err.violation().unwrap().message, TASK_NOT_FOUND_MESSAGE);
    }

    #[test]
    fn list_tasks_is_scoped_to_company() {
        let store = store_with_tasks();
        let ctx = Ctx::query("req-3", Some(Identity::new("tok-A")), &store);

        let tasks = list_tasks(&AccessValidator::default(), &ctx).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, TaskId::new("T1"));
    }

    #[test]
    fn update_task_persists_patch() {
        let store = store_with_tasks();
        let ctx = Ctx::mutation("req-4", Some(Identity::new("tok-A")), &store);

        let task = update_task(
            &AccessValidator::default(),
            &ctx,
            &TaskId::new("T1"),
            verified_update("Renamed task"),
        )
        .unwrap();

        assert_eq!(task.title, "Renamed task");
        assert_eq!(task.priority, Some(Priority::Medium));

        let stored = store.task(&TaskId::new("T1")).unwrap().unwrap();
        assert_eq!(stored, task);
    }

    #[test]
    fn update_task_clears_blank_free_text() {
        let store = scenario_store();
        let mut task = sample_task("T1", "C1");
        task.notes = Some("old notes".to_string());
        task.category = Some("Legal".to_string());
        task.due_date = Some("2026-01-01".to_string());
        store.insert_task(task);

        let form = TaskUpdateForm::from_json(
            r#"{
                "title": "Quarterly filing",
                "description": "File the quarterly statement",
                "estimatedTime": 2,
                "notes": "",
                "category": "",
                "dueDate": ""
            }"#,
        )
        .unwrap();
        let update = TaskUpdateSanitizer::default().sanitize(form).unwrap();
        let ctx = Ctx::mutation("req-clear", Some(Identity::new("tok-A")), &store);

        update_task(&AccessValidator::default(), &ctx, &TaskId::new("T1"), update).unwrap();

        let stored = store.task(&TaskId::new("T1")).unwrap().unwrap();
        assert_eq!(stored.notes.as_deref(), Some(""));
        assert_eq!(stored.category.as_deref(), Some(""));
        assert_eq!(stored.due_date.as_deref(), Some(""));
        assert_eq!(stored.priority, Some(Priority::High));
    }

    #[test]
    fn update_task_on_other_company_changes_nothing() {
        let store = store_with_tasks();
        let before = store.tasks();
        let ctx = Ctx::mutation("req-5", Some(Identity::new("tok-A")), &store);

        let err = update_task(
            &AccessValidator::default(),
            &ctx,
            &TaskId::new("T2"),
            verified_update("Hijacked"),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(&ViolationKind::NotFound));
        assert_eq!(store.tasks(), before);
    }

    #[test]
    fn update_task_requires_access() {
        let store = store_with_tasks();
        let ctx = Ctx::mutation("req-6", Some(Identity::new("tok-C")), &store);

        let err = update_task(
            &AccessValidator::default(),
            &ctx,
            &TaskId::new("T1"),
            verified_update("Sneaky"),
        )
        .unwrap_err();

        assert_eq!(err.kind(), Some(&ViolationKind::Forbidden));
        assert_eq!(store.task(&TaskId::new("T1")).unwrap().unwrap().title, "Quarterly filing");
    }

    #[test]
    fn shareholders_are_filtered_and_scoped() {
        let store = scenario_store();
        store.insert_person(Person {
            id: PersonId::new("P1"),
            company_id: CompanyId::new("C1"),
            name: "Grace".to_string(),
            is_shareholder: true,
        });
        store.insert_person(Person {
            id: PersonId::new("P2"),
            company_id: CompanyId::new("C1"),
            name: "Alan".to_string(),
            is_shareholder: false,
        });
        let gate = AccessValidator::default();
        let ctx = Ctx::query("req-7", Some(Identity::new("tok-A")), &store);

        let holders = shareholders_by_company(&gate, &ctx, &CompanyId::new("C1")).unwrap();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].name, "Grace");

        let err = shareholders_by_company(&gate, &ctx, &CompanyId::new("C2")).unwrap_err();
        assert_eq!(err.kind(), Some(&ViolationKind::Forbidden));
    }
}
