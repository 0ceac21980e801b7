//! Instance table for registering and looking up natively-allocated objects by name.
//!
//! The table keeps a forward map from names to [`Reference`]s and a reverse map from object addresses back to
//! names. Both maps change together, so at every point where control leaves the table they are exact inverses.
//! Objects are destroyed through a delete function registered per [`TypeKey`], never by the table itself.
//!
//! Deletion happens in two phases. The name and address are detached from both maps first, then the delete
//! function runs. A delete function that ends up calling [`InstanceTable::notify_self_deleted`] for the object
//! being destroyed therefore finds nothing to do, while a delete function that tears down *other* registered
//! objects retires their names normally.

use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    address::ObjectAddress,
    config::TableConfig,
    error::{ConfigError, RegistryError},
    reference::Reference,
    surface::{BoxSurface, CommandSurface},
    types::{QualifiedType, TypeKey},
};

/// A function destroying the object at the given address.
pub type DeleteFn = Rc<dyn Fn(ObjectAddress)>;

#[derive(Debug, Default)]
struct Instances {
    by_name: HashMap<String, Reference>,
    names_by_address: HashMap<ObjectAddress, String>,
}

impl Instances {
    fn with_capacity(capacity: usize) -> Self {
        Instances {
            by_name: HashMap::with_capacity(capacity),
            names_by_address: HashMap::with_capacity(capacity),
        }
    }
}

/// A name-addressed table of native objects, owning the decision of when each one is destroyed.
///
/// The table is single threaded. Every method takes `&self` and releases its internal borrows before running a
/// delete function or notifying the command surface, so both may synchronously call back into the table.
///
/// # Example
///
/// ```
/// use instance_table::{DetachedSurface, InstanceTable, ObjectAddress, QualifiedType, TypeKey};
///
/// struct Foo;
///
/// let table = InstanceTable::new(DetachedSurface);
/// table.set_delete_function(TypeKey::of::<Foo>(), |_object| {});
///
/// let foo = Foo;
/// let object = ObjectAddress::from_ref(&foo);
/// table.set_object("objA", object, QualifiedType::of::<Foo>())?;
/// assert_eq!(table.object("objA")?, object);
///
/// table.delete_object("objA")?;
/// assert!(!table.exists("objA"));
/// # Ok::<(), instance_table::RegistryError>(())
/// ```
pub struct InstanceTable {
    instances: RefCell<Instances>,
    delete_fns: RefCell<HashMap<TypeKey, DeleteFn>>,
    temp_counter: Cell<u64>,
    temp_prefix: Cow<'static, str>,
    surface: BoxSurface,
}

impl InstanceTable {
    /// Creates a new empty table reporting retired names to `surface`.
    pub fn new<S>(surface: S) -> Self
    where
        S: CommandSurface + 'static,
    {
        InstanceTable::from_parts(TableConfig::default(), Box::new(surface))
    }

    /// Creates a new empty table from a config.
    pub fn with_config<S>(config: TableConfig, surface: S) -> Result<Self, ConfigError>
    where
        S: CommandSurface + 'static,
    {
        config.validate()?;
        Ok(InstanceTable::from_parts(config, Box::new(surface)))
    }

    fn from_parts(config: TableConfig, surface: Box<dyn CommandSurface>) -> Self {
        InstanceTable {
            instances: RefCell::new(Instances::with_capacity(config.capacity)),
            delete_fns: RefCell::new(HashMap::new()),
            temp_counter: Cell::new(0),
            temp_prefix: config.temp_prefix,
            surface: BoxSurface(surface),
        }
    }

    /// Registers `object` under `name`.
    ///
    /// If another object is already registered under `name`, it is deleted first with the full
    /// [`delete_object`](InstanceTable::delete_object) protocol, and any error from that deletion is returned with
    /// the old instance left in place. Registering the same object under the same name again only updates its
    /// type. Registering an object that is already known under a different name moves it: the old name is
    /// retired from the command surface, but the object is not destroyed.
    pub fn set_object(
        &self,
        name: impl Into<String>,
        object: ObjectAddress,
        ty: QualifiedType,
    ) -> Result<(), RegistryError> {
        let name = name.into();

        // A delete function may register something under `name` again, so re-check until the slot is free.
        loop {
            let current = self.instances.borrow().by_name.get(&name).copied();
            match current {
                Some(current) if current.object() == object => {
                    self.instances
                        .borrow_mut()
                        .by_name
                        .insert(name.clone(), Reference::new(object, ty));
                    trace!(%name, %object, %ty, "instance re-registered");
                    return Ok(());
                }
                Some(_) => self.delete_object(&name)?,
                None => break,
            }
        }

        let moved_from = {
            let mut instances = self.instances.borrow_mut();
            let moved_from = instances.names_by_address.remove(&object);
            if let Some(old_name) = &moved_from {
                instances.by_name.remove(old_name);
            }
            instances
                .by_name
                .insert(name.clone(), Reference::new(object, ty));
            instances.names_by_address.insert(object, name.clone());
            moved_from
        };

        if let Some(old_name) = moved_from {
            debug!(%object, from = %old_name, to = %name, "instance moved to a new name");
            self.surface.0.retire_command(&old_name);
        }
        trace!(%name, %object, %ty, "instance registered");

        Ok(())
    }

    /// Deletes the object registered under `name` and retires the name.
    ///
    /// Fails with [`RegistryError::UndefinedInstanceName`] if nothing is registered under `name`, and with
    /// [`RegistryError::UndefinedObjectType`] if the object's type has no delete function, in which case the
    /// instance stays registered.
    pub fn delete_object(&self, name: &str) -> Result<(), RegistryError> {
        let reference = self.entry(name)?;
        let object = reference.object();
        let ty = reference.referenced_type().type_key();

        let delete_fn = self.delete_fns.borrow().get(&ty).cloned();
        let Some(delete_fn) = delete_fn else {
            warn!(%name, %ty, "no delete function registered for instance type");
            return Err(RegistryError::UndefinedObjectType { ty });
        };

        // Detach before destroying so callbacks made from inside the delete function see the instance as gone.
        {
            let mut instances = self.instances.borrow_mut();
            instances.names_by_address.remove(&object);
            instances.by_name.remove(name);
        }

        delete_fn(object);
        self.surface.0.retire_command(name);
        trace!(%name, %object, "instance deleted");

        Ok(())
    }

    /// Returns `true` if an instance is registered under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.instances.borrow().by_name.contains_key(name)
    }

    /// Gets the reference registered under `name`.
    pub fn entry(&self, name: &str) -> Result<Reference, RegistryError> {
        self.instances
            .borrow()
            .by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::undefined_name(name))
    }

    /// Gets the address of the object registered under `name`.
    pub fn object(&self, name: &str) -> Result<ObjectAddress, RegistryError> {
        self.entry(name).map(|reference| reference.object())
    }

    /// Gets the type the object under `name` was registered as.
    pub fn object_type(&self, name: &str) -> Result<QualifiedType, RegistryError> {
        self.entry(name)
            .map(|reference| reference.referenced_type())
    }

    /// Returns the name `object` is registered under, if any.
    pub fn name_of(&self, object: ObjectAddress) -> Option<String> {
        self.instances
            .borrow()
            .names_by_address
            .get(&object)
            .cloned()
    }

    /// Sets the function used to delete objects of type `ty`, replacing any previous one.
    pub fn set_delete_function<F>(&self, ty: TypeKey, delete_fn: F)
    where
        F: Fn(ObjectAddress) + 'static,
    {
        self.delete_fns.borrow_mut().insert(ty, Rc::new(delete_fn));
    }

    /// Returns `true` if objects of type `ty` can be deleted.
    pub fn has_delete_function(&self, ty: TypeKey) -> bool {
        self.delete_fns.borrow().contains_key(&ty)
    }

    /// Registers `object` under a freshly generated temporary name and returns the name.
    ///
    /// Names are the temporary prefix followed by the lowercase hex value of a counter that advances once per
    /// call. A generated name that collides with one registered by hand replaces it, following
    /// [`set_object`](InstanceTable::set_object).
    pub fn create_temporary(
        &self,
        object: ObjectAddress,
        ty: QualifiedType,
    ) -> Result<String, RegistryError> {
        let number = self.temp_counter.get();
        self.temp_counter.set(number + 1);

        let name = format!("{}{number:x}", self.temp_prefix);
        if self.exists(&name) {
            warn!(%name, "temporary name collides with a registered instance");
        }
        self.set_object(name.clone(), object, ty)?;

        Ok(name)
    }

    /// Deletes the instance under `name` if it is a temporary, returning whether it was deleted.
    ///
    /// Fails with [`RegistryError::UndefinedInstanceName`] if nothing is registered under `name`, temporary or not.
    pub fn delete_if_temporary(&self, name: &str) -> Result<bool, RegistryError> {
        if !self.exists(name) {
            return Err(RegistryError::undefined_name(name));
        }
        if !self.is_temporary(name) {
            return Ok(false);
        }

        self.delete_object(name)?;
        Ok(true)
    }

    /// Retires the name of an object that destroyed itself without going through the table.
    ///
    /// Returns `false` if `object` isn't registered, which includes objects currently being deleted by the
    /// table. Calling this from inside a delete function for the object being deleted is always a no-op.
    pub fn notify_self_deleted(&self, object: ObjectAddress) -> Result<bool, RegistryError> {
        let name = self.name_of(object);
        match name {
            Some(name) => {
                debug!(%name, %object, "instance deleted itself");
                self.delete_object(&name)?;
                Ok(true)
            }
            None => {
                trace!(%object, "ignoring self-deletion of unregistered object");
                Ok(false)
            }
        }
    }

    /// Returns `true` if `name` carries the temporary prefix.
    pub fn is_temporary(&self, name: &str) -> bool {
        name.starts_with(self.temp_prefix.as_ref())
    }

    /// The prefix marking a name as temporary.
    pub fn temp_prefix(&self) -> &str {
        &self.temp_prefix
    }

    /// The number of temporary names generated so far.
    pub fn temp_counter(&self) -> u64 {
        self.temp_counter.get()
    }

    /// The number of registered instances.
    pub fn len(&self) -> usize {
        self.instances.borrow().by_name.len()
    }

    /// Returns `true` if the table contains no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.borrow().by_name.is_empty()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.instances
            .borrow()
            .by_name
            .keys()
            .sorted()
            .cloned()
            .collect()
    }

    /// A serializable view of every registered instance, sorted by name.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.instances
            .borrow()
            .by_name
            .iter()
            .sorted_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(name, reference)| {
                let ty = reference.referenced_type();
                EntrySnapshot {
                    name: name.clone(),
                    object: reference.object(),
                    type_name: ty.type_key().name().to_owned(),
                    is_const: ty.is_const(),
                    is_volatile: ty.is_volatile(),
                    temporary: self.is_temporary(name),
                }
            })
            .collect()
    }

    /// Deletes every temporary instance, returning how many were deleted.
    ///
    /// Stops at the first error, leaving the remaining temporaries registered.
    pub fn delete_temporaries(&self) -> Result<usize, RegistryError> {
        let names = self
            .names()
            .into_iter()
            .filter(|name| self.is_temporary(name))
            .collect();
        self.delete_each(names)
    }

    /// Deletes every instance in name order, returning how many were deleted.
    ///
    /// Stops at the first error, leaving the remaining instances registered.
    pub fn delete_all(&self) -> Result<usize, RegistryError> {
        self.delete_each(self.names())
    }

    fn delete_each(&self, names: Vec<String>) -> Result<usize, RegistryError> {
        let mut deleted = 0;
        for name in names {
            // A delete function may already have retired later names.
            if !self.exists(&name) {
                continue;
            }
            self.delete_object(&name)?;
            deleted += 1;
        }
        Ok(deleted)
    }
}

impl fmt::Debug for InstanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceTable")
            .field("instances", &self.len())
            .field("delete_fns", &self.delete_fns.borrow().len())
            .field("temp_counter", &self.temp_counter.get())
            .field("temp_prefix", &self.temp_prefix)
            .field("surface", &self.surface)
            .finish()
    }
}

/// A point-in-time description of one registered instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    /// The registered name.
    pub name: String,
    /// The object's address.
    pub object: ObjectAddress,
    /// The name of the object's type.
    pub type_name: String,
    /// Whether the type is const qualified.
    pub is_const: bool,
    /// Whether the type is volatile qualified.
    pub is_volatile: bool,
    /// Whether the name carries the temporary prefix.
    pub temporary: bool,
}

#[cfg(test)]
mod tests {
    use crate::surface::DetachedSurface;

    use super::*;

    struct Foo;
    struct Bar;

    #[derive(Clone, Default)]
    struct Journal {
        deleted: Rc<RefCell<Vec<ObjectAddress>>>,
        retired: Rc<RefCell<Vec<String>>>,
    }

    impl Journal {
        fn table(&self) -> InstanceTable {
            let retired = self.retired.clone();
            let table =
                InstanceTable::new(move |name: &str| retired.borrow_mut().push(name.to_owned()));
            let deleted = self.deleted.clone();
            table.set_delete_function(TypeKey::of::<Foo>(), move |object| {
                deleted.borrow_mut().push(object)
            });
            table
        }

        fn deleted(&self) -> Vec<ObjectAddress> {
            self.deleted.borrow().clone()
        }

        fn retired(&self) -> Vec<String> {
            self.retired.borrow().clone()
        }
    }

    fn addr(n: usize) -> ObjectAddress {
        ObjectAddress::from_usize(0x1000 + n * 0x10)
    }

    #[test]
    fn registration_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();
        let ty = QualifiedType::of::<Foo>().with_const();

        table.set_object("objA", addr(1), ty)?;

        assert!(table.exists("objA"));
        assert_eq!(table.object("objA")?, addr(1));
        assert_eq!(table.object_type("objA")?, ty);
        assert_eq!(table.entry("objA")?, Reference::new(addr(1), ty));
        assert_eq!(table.name_of(addr(1)).as_deref(), Some("objA"));
        assert_eq!(table.len(), 1);
        assert!(journal.deleted().is_empty());

        Ok(())
    }

    #[test]
    fn overwrite_deletes_previous_object_first() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();

        table.set_object("objA", addr(1), QualifiedType::of::<Foo>())?;
        table.set_object("objA", addr(2), QualifiedType::of::<Foo>())?;

        assert_eq!(journal.deleted(), vec![addr(1)]);
        assert_eq!(journal.retired(), vec!["objA".to_owned()]);
        assert_eq!(table.name_of(addr(1)), None);
        assert_eq!(table.object("objA")?, addr(2));
        assert_eq!(table.name_of(addr(2)).as_deref(), Some("objA"));
        assert_eq!(table.len(), 1);

        Ok(())
    }

    #[test]
    fn re_registering_same_object_only_updates_type() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();

        table.set_object("objA", addr(1), QualifiedType::of::<Foo>())?;
        table.set_object("objA", addr(1), QualifiedType::of::<Foo>().with_const())?;

        assert!(journal.deleted().is_empty());
        assert!(journal.retired().is_empty());
        assert!(table.object_type("objA")?.is_const());

        Ok(())
    }

    #[test]
    fn registering_known_object_under_new_name_moves_it() -> Result<(), Box<dyn std::error::Error>>
    {
        let journal = Journal::default();
        let table = journal.table();

        table.set_object("old", addr(1), QualifiedType::of::<Foo>())?;
        table.set_object("new", addr(1), QualifiedType::of::<Foo>())?;

        assert!(!table.exists("old"));
        assert_eq!(table.name_of(addr(1)).as_deref(), Some("new"));
        assert_eq!(table.len(), 1);
        assert!(journal.deleted().is_empty());
        assert_eq!(journal.retired(), vec!["old".to_owned()]);

        Ok(())
    }

    #[test]
    fn overwrite_without_delete_function_keeps_old_instance() {
        let journal = Journal::default();
        let table = journal.table();

        table
            .set_object("objB", addr(1), QualifiedType::of::<Bar>())
            .unwrap();
        let err = table
            .set_object("objB", addr(2), QualifiedType::of::<Foo>())
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::UndefinedObjectType {
                ty: TypeKey::of::<Bar>()
            }
        );
        assert_eq!(table.object("objB"), Ok(addr(1)));
        assert_eq!(table.name_of(addr(2)), None);
    }

    #[test]
    fn delete_clears_both_maps() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();

        table.set_object("objA", addr(1), QualifiedType::of::<Foo>())?;
        table.delete_object("objA")?;

        assert!(!table.exists("objA"));
        assert_eq!(table.name_of(addr(1)), None);
        assert!(table.is_empty());
        assert_eq!(journal.deleted(), vec![addr(1)]);
        assert_eq!(journal.retired(), vec!["objA".to_owned()]);

        Ok(())
    }

    #[test]
    fn unknown_names_are_rejected() {
        let journal = Journal::default();
        let table = journal.table();
        table
            .set_object("gone", addr(1), QualifiedType::of::<Foo>())
            .unwrap();
        table.delete_object("gone").unwrap();

        for name in ["never", "gone"] {
            let expected = RegistryError::undefined_name(name);
            assert_eq!(table.entry(name), Err(expected.clone()));
            assert_eq!(table.object(name), Err(expected.clone()));
            assert_eq!(table.object_type(name), Err(expected.clone()));
            assert_eq!(table.delete_object(name), Err(expected.clone()));
            assert_eq!(table.delete_if_temporary(name), Err(expected));
        }
        assert_eq!(journal.deleted(), vec![addr(1)]);
    }

    #[test]
    fn missing_delete_function_leaves_instance_registered() {
        let journal = Journal::default();
        let table = journal.table();
        table
            .set_object("objB", addr(1), QualifiedType::of::<Bar>().with_volatile())
            .unwrap();

        let err = table.delete_object("objB").unwrap_err();

        assert_eq!(err.object_type(), Some(TypeKey::of::<Bar>()));
        assert!(table.exists("objB"));
        assert_eq!(table.name_of(addr(1)).as_deref(), Some("objB"));
        assert!(journal.retired().is_empty());

        // Once the type learns how to be deleted, the same instance can go.
        assert!(!table.has_delete_function(TypeKey::of::<Bar>()));
        table.set_delete_function(TypeKey::of::<Bar>(), |_| {});
        assert_eq!(table.delete_object("objB"), Ok(()));
        assert!(!table.exists("objB"));
    }

    #[test]
    fn delete_function_can_be_replaced() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();
        let replaced = Rc::new(RefCell::new(Vec::new()));
        table.set_delete_function(TypeKey::of::<Foo>(), {
            let replaced = replaced.clone();
            move |object| replaced.borrow_mut().push(object)
        });

        table.set_object("objA", addr(1), QualifiedType::of::<Foo>())?;
        table.delete_object("objA")?;

        assert!(journal.deleted().is_empty());
        assert_eq!(*replaced.borrow(), vec![addr(1)]);

        Ok(())
    }

    #[test]
    fn temporary_names_are_distinct_and_prefixed() -> Result<(), Box<dyn std::error::Error>> {
        let table = Journal::default().table();
        let ty = QualifiedType::of::<Foo>();

        let mut names = Vec::new();
        for n in 0..20 {
            let before = table.temp_counter();
            names.push(table.create_temporary(addr(n), ty)?);
            assert_eq!(table.temp_counter(), before + 1);
        }

        assert_eq!(names[0], "__temp0");
        assert_eq!(names[10], "__tempa");
        assert_eq!(names[16], "__temp10");
        assert!(names.iter().all(|name| table.is_temporary(name)));
        assert_eq!(names.iter().unique().count(), names.len());
        assert_eq!(table.len(), names.len());

        Ok(())
    }

    #[test]
    fn delete_if_temporary_is_selective() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();
        let ty = QualifiedType::of::<Foo>();

        let temp = table.create_temporary(addr(1), ty)?;
        table.set_object("kept", addr(2), ty)?;

        assert_eq!(table.delete_if_temporary("kept"), Ok(false));
        assert!(table.exists("kept"));
        assert_eq!(table.delete_if_temporary(&temp), Ok(true));
        assert!(!table.exists(&temp));
        assert_eq!(journal.deleted(), vec![addr(1)]);

        Ok(())
    }

    #[test]
    fn custom_prefix_controls_temporaries() -> Result<(), Box<dyn std::error::Error>> {
        let table =
            InstanceTable::with_config(TableConfig::default().temp_prefix("tmp:"), DetachedSurface)?;
        table.set_delete_function(TypeKey::of::<Foo>(), |_| {});

        let name = table.create_temporary(addr(1), QualifiedType::of::<Foo>())?;

        assert_eq!(name, "tmp:0");
        assert_eq!(table.temp_prefix(), "tmp:");
        assert!(table.is_temporary(&name));
        assert!(!table.is_temporary("__temp0"));

        Ok(())
    }

    #[test]
    fn empty_prefix_config_is_rejected() {
        let err = InstanceTable::with_config(TableConfig::default().temp_prefix(""), DetachedSurface)
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyTempPrefix);
    }

    #[test]
    fn failed_temporary_still_advances_counter() -> Result<(), Box<dyn std::error::Error>> {
        let table = Journal::default().table();

        table.set_object("__temp0", addr(1), QualifiedType::of::<Bar>())?;

        assert_eq!(
            table.create_temporary(addr(2), QualifiedType::of::<Foo>()),
            Err(RegistryError::UndefinedObjectType {
                ty: TypeKey::of::<Bar>()
            })
        );
        assert_eq!(table.temp_counter(), 1);
        assert_eq!(table.object("__temp0")?, addr(1));
        assert_eq!(table.name_of(addr(2)), None);

        let next = table.create_temporary(addr(2), QualifiedType::of::<Foo>())?;
        assert_eq!(next, "__temp1");
        assert_eq!(table.temp_counter(), 2);

        Ok(())
    }

    #[test]
    fn temporary_collision_replaces_hand_registered_instance(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();
        let ty = QualifiedType::of::<Foo>();

        table.set_object("__temp0", addr(1), ty)?;
        let name = table.create_temporary(addr(2), ty)?;

        assert_eq!(name, "__temp0");
        assert_eq!(table.object(&name)?, addr(2));
        assert_eq!(journal.deleted(), vec![addr(1)]);

        Ok(())
    }

    #[test]
    fn self_deletion_matches_explicit_delete() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();

        table.set_object("objA", addr(1), QualifiedType::of::<Foo>())?;

        assert_eq!(table.notify_self_deleted(addr(1)), Ok(true));
        assert!(!table.exists("objA"));
        assert_eq!(table.name_of(addr(1)), None);
        assert_eq!(journal.retired(), vec!["objA".to_owned()]);
        assert_eq!(journal.deleted(), vec![addr(1)]);

        assert_eq!(table.notify_self_deleted(addr(1)), Ok(false));
        assert_eq!(journal.retired().len(), 1);
        assert_eq!(journal.deleted().len(), 1);

        Ok(())
    }

    #[test]
    fn bulk_deletion() -> Result<(), Box<dyn std::error::Error>> {
        let journal = Journal::default();
        let table = journal.table();
        let ty = QualifiedType::of::<Foo>();

        table.create_temporary(addr(1), ty)?;
        table.create_temporary(addr(2), ty)?;
        table.set_object("kept", addr(3), ty)?;

        assert_eq!(table.delete_temporaries()?, 2);
        assert_eq!(table.names(), vec!["kept".to_owned()]);
        assert_eq!(table.delete_all()?, 1);
        assert!(table.is_empty());
        assert_eq!(journal.deleted().len(), 3);

        Ok(())
    }

    #[test]
    fn delete_all_stops_at_first_error() -> Result<(), Box<dyn std::error::Error>> {
        let table = Journal::default().table();

        table.set_object("a", addr(1), QualifiedType::of::<Foo>())?;
        table.set_object("b", addr(2), QualifiedType::of::<Bar>())?;
        table.set_object("c", addr(3), QualifiedType::of::<Foo>())?;

        assert_eq!(
            table.delete_all(),
            Err(RegistryError::UndefinedObjectType {
                ty: TypeKey::of::<Bar>()
            })
        );
        assert_eq!(table.names(), vec!["b".to_owned(), "c".to_owned()]);

        Ok(())
    }

    #[test]
    fn snapshot_describes_entries() -> Result<(), Box<dyn std::error::Error>> {
        let table = Journal::default().table();

        table.set_object("zeta", addr(1), QualifiedType::of::<Foo>().with_const())?;
        let temp = table.create_temporary(addr(2), QualifiedType::of::<Foo>())?;

        let snapshot = table.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name, temp);
        assert!(snapshot[0].temporary);
        assert_eq!(snapshot[1].name, "zeta");
        assert_eq!(snapshot[1].object, addr(1));
        assert!(snapshot[1].is_const);
        assert!(!snapshot[1].temporary);
        assert!(snapshot[1].type_name.ends_with("Foo"));

        let bytes = rmp_serde::to_vec_named(&snapshot)?;
        let decoded: Vec<EntrySnapshot> = rmp_serde::from_slice(&bytes)?;
        assert_eq!(decoded, snapshot);

        Ok(())
    }
}
