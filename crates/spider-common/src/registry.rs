//! Single-Instance Registry
//!
//! Process-wide cache holding at most one instance per type. The spider's
//! long-lived resources (database pools, HTTP clients, queues) are created
//! through here so repeated construction hands back the same instance.
//!
//! The registry is an explicit object rather than a hidden cache so tests
//! can create their own isolated one; production code reaches the shared
//! instance through [`global`].

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

lazy_static! {
    static ref GLOBAL: InstanceRegistry = InstanceRegistry::new();
}

/// The process-wide registry. Created lazily on first access; entries live
/// until process exit.
pub fn global() -> &'static InstanceRegistry {
    &GLOBAL
}

/// Registry mapping a type to its single permitted instance.
///
/// The check-then-insert step is mutex-guarded, so a concurrent first use
/// of a type constructs exactly once. Entries are never evicted.
#[derive(Default)]
pub struct InstanceRegistry {
    instances: Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached instance of `T`, constructing it with `init` on
    /// first use.
    ///
    /// On every later call `init` is dropped unused, so anything it
    /// captures has no effect on the returned instance. Callers that need
    /// to detect such a mismatch should check [`get`](Self::get) first.
    ///
    /// The lock is held while `init` runs; `init` must not call back into
    /// the same registry.
    pub fn get_or_init<T, F>(&self, init: F) -> Arc<T>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let mut instances = self.instances.lock().unwrap_or_else(|e| e.into_inner());
        let entry = instances
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(init()));
        Arc::clone(entry)
            .downcast::<T>()
            .expect("registry entry matches its type key")
    }

    /// Fallible variant of [`get_or_init`](Self::get_or_init).
    ///
    /// A constructor error on first use propagates unchanged and caches
    /// nothing, so a later call may retry.
    pub fn try_get_or_init<T, E, F>(&self, init: F) -> Result<Arc<T>, E>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, E>,
    {
        let mut instances = self.instances.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = instances.get(&TypeId::of::<T>()) {
            return Ok(Arc::clone(entry)
                .downcast::<T>()
                .expect("registry entry matches its type key"));
        }

        let instance = Arc::new(init()?);
        instances.insert(TypeId::of::<T>(), instance.clone());
        Ok(instance)
    }

    /// Peek at the cached instance of `T` without constructing one.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let instances = self.instances.lock().unwrap_or_else(|e| e.into_inner());
        instances.get(&TypeId::of::<T>()).map(|entry| {
            Arc::clone(entry)
                .downcast::<T>()
                .expect("registry entry matches its type key")
        })
    }

    /// Number of cached instances.
    pub fn len(&self) -> usize {
        self.instances
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
