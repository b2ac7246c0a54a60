use crate::context::AccessContext;
use crate::error::{Error, InternalError, Violation, ViolationKind};
use crate::identity::{resolve_identity, Identity};
use crate::model::{Company, User};
use crate::reason::{Reason, ReasonMessages};
use crate::store::{CompanyStore, UserStore};

const UNLINKED_MESSAGE: &str = "You must be associated with a company to perform this action";
const COMPANY_NOT_FOUND_MESSAGE: &str = "We couldn't find the company you are looking for.";
const FORBIDDEN_MESSAGE: &str = "You do not have permission to perform this action.";
const MISSING_USER_MESSAGE: &str = "Unauthenticated call to mutation";

/// Proof that the caller passed the access gate.
///
/// Holds the resolved user, their company, and the identity the decision was
/// made for. Only [`AccessValidator`] constructs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Access {
    user: User,
    company: Company,
    identity: Identity,
}

impl Access {
    /// The resolved user record.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The company the caller is authorized to act on.
    pub fn company(&self) -> &Company {
        &self.company
    }

    /// The identity the decision was made for.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Splits the proof into its parts.
    pub fn into_parts(self) -> (User, Company, Identity) {
        (self.user, self.company, self.identity)
    }
}

/// The access gate every tenant-scoped operation passes through.
///
/// `AccessValidator` owns the reason message table. The validation itself is
/// the same for queries and mutations.
///
/// # Examples
///
/// ```
/// use company_gate::{
///     AccessValidator, Company, CompanyId, Ctx, Identity, MemoryStore, Reason, User, UserId,
///     ViolationKind,
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
///
/// let gate = AccessValidator::default();
///
/// let ctx = Ctx::query("req-1", Some(Identity::new("tok-A")), &store);
/// let access = gate.validate(&ctx, Reason::CompanyInformation).expect("owner");
/// assert_eq!(access.company().name, "Acme");
///
/// let anon = Ctx::query("req-2", None, &store);
/// let err = gate.validate(&anon, Reason::Files).unwrap_err();
/// assert_eq!(err.kind(), Some(&ViolationKind::Unauthenticated));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AccessValidator {
    messages: ReasonMessages,
}

impl AccessValidator {
    /// Creates a validator with a custom message table.
    pub fn new(messages: ReasonMessages) -> Self {
        Self { messages }
    }

    /// Returns the message table.
    pub fn messages(&self) -> &ReasonMessages {
        &self.messages
    }

    /// Checks that the caller may act on their company.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// 1. identity present, else `Unauthenticated` with the message for `reason`
    /// 2. user record for the identity, else [`Error::Internal`]
    /// 3. user linked to a company, else `Unlinked`
    /// 4. company exists, else `NotFound`
    /// 5. caller is owner or associated user, else `Forbidden`
    ///
    /// Only reads are performed.
    ///
    /// # Errors
    ///
    /// See above. Store failures are returned as [`Error::Store`].
    pub fn validate<C>(&self, ctx: &C, reason: Reason) -> Result<Access, Error>
    where
        C: AccessContext + ?Sized,
    {
        let result = self.check(ctx, reason);
        match &result {
            Ok(access) => tracing::debug!(
                request_id = %ctx.request_id(),
                reason = %reason,
                company_id = %access.company.id,
                "access granted"
            ),
            Err(Error::Violation(v)) => tracing::warn!(
                request_id = %ctx.request_id(),
                reason = %reason,
                kind = %v.kind,
                "access denied"
            ),
            Err(e) => tracing::error!(
                request_id = %ctx.request_id(),
                reason = %reason,
                error = %e,
                "access check failed"
            ),
        }
        result
    }

    fn check<C>(&self, ctx: &C, reason: Reason) -> Result<Access, Error>
    where
        C: AccessContext + ?Sized,
    {
        let identity = resolve_identity(ctx).map_err(|_| {
            Violation::new(ViolationKind::Unauthenticated, self.messages.message(reason))
        })?;

        let store = ctx.store();
        let token = identity.token_identifier();

        let user = store
            .user_by_token(token)?
            .ok_or_else(|| InternalError::new(MISSING_USER_MESSAGE))?;

        let company_id = user
            .company_id
            .clone()
            .ok_or_else(|| Violation::new(ViolationKind::Unlinked, UNLINKED_MESSAGE))?;

        let company = store
            .company(&company_id)?
            .ok_or_else(|| Violation::new(ViolationKind::NotFound, COMPANY_NOT_FOUND_MESSAGE))?;

        if !company.authorizes(token) {
            return Err(Violation::new(ViolationKind::Forbidden, FORBIDDEN_MESSAGE).into());
        }

        Ok(Access {
            user,
            company,
            identity,
        })
    }
}

/// Runs the access gate with the default message table.
///
/// Shorthand for `AccessValidator::default().validate(ctx, reason)`.
pub fn validate_access<C>(ctx: &C, reason: Reason) -> Result<Access, Error>
where
    C: AccessContext + ?Sized,
{
    AccessValidator::default().validate(ctx, reason)
}
