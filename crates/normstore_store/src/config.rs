//! Store configuration and lifecycle hooks.

use std::fmt;

use normstore_foundation::{Id, Record};
use normstore_state::StoredEntity;

/// Default store name, used in log events and error context.
pub const DEFAULT_STORE_NAME: &str = "entity-store";

/// Outcome of the entity validation hook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Validation {
    /// The entity is accepted.
    Valid,
    /// The entity is rejected without a reason.
    Invalid,
    /// The entity is rejected with a reason.
    Rejected(String),
}

impl Validation {
    /// Returns true if the entity is accepted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        if valid { Self::Valid } else { Self::Invalid }
    }
}

impl From<&str> for Validation {
    /// A returned message always means rejection.
    fn from(reason: &str) -> Self {
        Self::Rejected(reason.to_string())
    }
}

impl From<String> for Validation {
    /// A returned message always means rejection.
    fn from(reason: String) -> Self {
        Self::Rejected(reason)
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Valid,
            Err(reason) => Self::Rejected(reason),
        }
    }
}

type ValidateFn = Box<dyn FnMut(&Record) -> Validation + Send>;
type CreatedFn = Box<dyn FnMut(&Record) + Send>;
type UpdatedFn = Box<dyn FnMut(&Record, &StoredEntity) + Send>;
type DeletedFn = Box<dyn FnMut(&StoredEntity) + Send>;
type DirtyCheckFn = Box<dyn Fn(&StoredEntity) -> bool + Send>;
type GenerateIdFn = Box<dyn FnMut() -> Id + Send>;

/// Configuration for an entity store.
///
/// Every hook is always present. Unset hooks default to a no-op, and the
/// default validator accepts everything, so the action layer never has to
/// check whether a hook was configured.
pub struct StoreConfig {
    name: String,
    validate_entity: ValidateFn,
    on_entity_created: CreatedFn,
    on_entity_updated: UpdatedFn,
    on_entity_deleted: DeletedFn,
    custom_dirty_check: DirtyCheckFn,
    generate_id: GenerateIdFn,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let mut next = 0i64;
        Self {
            name: DEFAULT_STORE_NAME.to_string(),
            validate_entity: Box::new(|_| Validation::Valid),
            on_entity_created: Box::new(|_| {}),
            on_entity_updated: Box::new(|_, _| {}),
            on_entity_deleted: Box::new(|_| {}),
            custom_dirty_check: Box::new(StoredEntity::is_dirty),
            generate_id: Box::new(move || {
                next += 1;
                Id::Int(next)
            }),
        }
    }
}

impl StoreConfig {
    /// Creates a configuration with default hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the store name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method to set the validation hook.
    ///
    /// The hook runs before every create. Returning `false` or a message
    /// rejects the entity.
    #[must_use]
    pub fn with_validate_entity<F, V>(mut self, mut validate: F) -> Self
    where
        F: FnMut(&Record) -> V + Send + 'static,
        V: Into<Validation>,
    {
        self.validate_entity = Box::new(move |record: &Record| -> Validation {
            validate(record).into()
        });
        self
    }

    /// Builder method to set the hook fired after an entity is created.
    ///
    /// The hook receives the record as passed in by the caller.
    #[must_use]
    pub fn with_on_entity_created<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Record) + Send + 'static,
    {
        self.on_entity_created = Box::new(hook);
        self
    }

    /// Builder method to set the hook fired after an entity is updated.
    ///
    /// The hook receives the patch and a copy of the entity taken before
    /// the patch was applied.
    #[must_use]
    pub fn with_on_entity_updated<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&Record, &StoredEntity) + Send + 'static,
    {
        self.on_entity_updated = Box::new(hook);
        self
    }

    /// Builder method to set the hook fired after an entity is deleted.
    ///
    /// The hook receives the entity as it was stored before removal.
    #[must_use]
    pub fn with_on_entity_deleted<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&StoredEntity) + Send + 'static,
    {
        self.on_entity_deleted = Box::new(hook);
        self
    }

    /// Builder method to set a custom dirty check.
    ///
    /// Reserved extension point: the store records the check but its own
    /// dirty bookkeeping does not consult it.
    #[must_use]
    pub fn with_custom_dirty_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&StoredEntity) -> bool + Send + 'static,
    {
        self.custom_dirty_check = Box::new(check);
        self
    }

    /// Builder method to set the id generator.
    ///
    /// Reserved extension point: the store never assigns ids itself. The
    /// default generator yields `1, 2, 3, ...`.
    #[must_use]
    pub fn with_generate_id<F>(mut self, generate: F) -> Self
    where
        F: FnMut() -> Id + Send + 'static,
    {
        self.generate_id = Box::new(generate);
        self
    }

    /// Returns the store name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the validation hook.
    pub fn validate(&mut self, record: &Record) -> Validation {
        (self.validate_entity)(record)
    }

    /// Evaluates the custom dirty check against an entity.
    #[must_use]
    pub fn is_custom_dirty(&self, entity: &StoredEntity) -> bool {
        (self.custom_dirty_check)(entity)
    }

    /// Draws the next id from the configured generator.
    pub fn next_id(&mut self) -> Id {
        (self.generate_id)()
    }

    pub(crate) fn entity_created(&mut self, record: &Record) {
        (self.on_entity_created)(record);
    }

    pub(crate) fn entity_updated(&mut self, patch: &Record, previous: &StoredEntity) {
        (self.on_entity_updated)(patch, previous);
    }

    pub(crate) fn entity_deleted(&mut self, entity: &StoredEntity) {
        (self.on_entity_deleted)(entity);
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
