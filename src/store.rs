//! Document store seam.
//!
//! The gate reads users and companies through [`UserStore`] and
//! [`CompanyStore`]. Task operations additionally need [`TaskStore`],
//! [`TaskWriter`] and [`PersonStore`]. [`MemoryStore`] implements all of them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

use crate::identity::TokenIdentifier;
use crate::model::{Company, CompanyId, Person, TaskId, User};
use crate::task::Task;

/// Failure reported by a document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness-enforcing lookup matched more than one document.
    NotUnique {
        /// Index that was queried
        index: &'static str,
        /// Number of matching documents
        count: usize,
    },
    /// A write targeted a document that does not exist.
    MissingDocument {
        /// Table name
        table: &'static str,
        /// Document id
        id: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotUnique { index, count } => {
                write!(f, "expected at most one document on '{}', found {}", index, count)
            }
            StoreError::MissingDocument { table, id } => {
                write!(f, "document '{}' not found in '{}'", id, table)
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Lookup of users by the `by_token` index.
pub trait UserStore {
    /// Fetches the unique user whose token identifier equals `token`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotUnique`] if more than one user matches.
    fn user_by_token(&self, token: &TokenIdentifier) -> Result<Option<User>, StoreError>;
}

/// Lookup of companies by id.
pub trait CompanyStore {
    /// Fetches a company by id.
    fn company(&self, id: &CompanyId) -> Result<Option<Company>, StoreError>;
}

/// Everything the access gate reads.
pub trait DocumentStore: UserStore + CompanyStore {}

impl<T: UserStore + CompanyStore + ?Sized> DocumentStore for T {}

/// Read access to tasks.
pub trait TaskStore {
    /// Fetches a task by id.
    fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError>;

    /// Lists the tasks of a company.
    fn tasks_by_company(&self, company_id: &CompanyId) -> Result<Vec<Task>, StoreError>;
}

/// Write access to tasks.
pub trait TaskWriter: TaskStore {
    /// Replaces an existing task document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingDocument`] if no task has that id.
    fn replace_task(&self, task: Task) -> Result<(), StoreError>;
}

/// Read access to persons.
pub trait PersonStore {
    /// Lists the persons attached to a company.
    fn persons_by_company(&self, company_id: &CompanyId) -> Result<Vec<Person>, StoreError>;
}

/// In-memory document store.
///
/// Users are kept in insertion order and looked up by scanning, so duplicate
/// token identifiers are detectable and reported the same way a unique index
/// would report them.
///
/// # Examples
///
/// ```
/// use company_gate::{MemoryStore, User, UserId, UserStore};
///
/// let store = MemoryStore::new();
/// store.insert_user(User {
///     id: UserId::new("U1"),
///     token_identifier: "tok-A".into(),
///     name: None,
///     company_id: None,
/// });
///
/// let found = store.user_by_token(&"tok-A".into()).unwrap();
/// assert!(found.is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RefCell<Vec<User>>,
    companies: RefCell<BTreeMap<CompanyId, Company>>,
    tasks: RefCell<BTreeMap<TaskId, Task>>,
    persons: RefCell<Vec<Person>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user.
    pub fn insert_user(&self, user: User) {
        self.users.borrow_mut().push(user);
    }

    /// Inserts or replaces a company.
    pub fn insert_company(&self, company: Company) {
        self.companies
            .borrow_mut()
            .insert(company.id.clone(), company);
    }

    /// Inserts or replaces a task.
    pub fn insert_task(&self, task: Task) {
        self.tasks.borrow_mut().insert(task.id.clone(), task);
    }

    /// Inserts a person.
    pub fn insert_person(&self, person: Person) {
        self.persons.borrow_mut().push(person);
    }

    /// Removes a company, leaving any user references to it dangling.
    pub fn remove_company(&self, id: &CompanyId) -> Option<Company> {
        self.companies.borrow_mut().remove(id)
    }

    /// Returns a snapshot of all users.
    pub fn users(&self) -> Vec<User> {
        self.users.borrow().clone()
    }

    /// Returns a snapshot of all companies.
    pub fn companies(&self) -> Vec<Company> {
        self.companies.borrow().values().cloned().collect()
    }

    /// Returns a snapshot of all tasks.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().values().cloned().collect()
    }
}

impl UserStore for MemoryStore {
    fn user_by_token(&self, token: &TokenIdentifier) -> Result<Option<User>, StoreError> {
        let users = self.users.borrow();
        let mut matches = users.iter().filter(|u| &u.token_identifier == token);

        let first = matches.next();
        let rest = matches.count();
        if rest > 0 {
            return Err(StoreError::NotUnique {
                index: "by_token",
                count: rest + 1,
            });
        }
        Ok(first.cloned())
    }
}

impl CompanyStore for MemoryStore {
    fn company(&self, id: &CompanyId) -> Result<Option<Company>, StoreError> {
        Ok(self.companies.borrow().get(id).cloned())
    }
}

impl TaskStore for MemoryStore {
    fn task(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.borrow().get(id).cloned())
    }

    fn tasks_by_company(&self, company_id: &CompanyId) -> Result<Vec<Task>, StoreError> {
        Ok(self
            .tasks
            .borrow()
            .values()
            .filter(|t| &t.company_id == company_id)
            .cloned()
            .collect())
    }
}

impl TaskWriter for MemoryStore {
    fn replace_task(&self, task: Task) -> Result<(), StoreError> {
        let mut tasks = self.tasks.borrow_mut();
        match tasks.get_mut(&task.id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(StoreError::MissingDocument {
                table: "tasks",
                id: task.id.to_string(),
            }),
        }
    }
}

impl PersonStore for MemoryStore {
    fn persons_by_company(&self, company_id: &CompanyId) -> Result<Vec<Person>, StoreError> {
        Ok(self
            .persons
            .borrow()
            .iter()
            .filter(|p| &p.company_id == company_id)
            .cloned()
            .collect())
    }
}
