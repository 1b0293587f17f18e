//! Query-time value resolution.
//!
//! Each synthesized field carries a resolver that, given the parent value
//! and a [`ResolveContext`], looks up the field's stored value and coerces
//! it. Resolution is side-effect-free on shared state: it only reads the
//! immutable field config and the external data store, so sibling fields
//! may be resolved concurrently by the query engine.

pub mod coerce;

use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::config::Field;
use crate::kind::FieldKindDefinition;

/// Reserved key carrying the host entity id through composite parent values.
pub const ENTITY_ID_KEY: &str = "_entity_id";

/// Reserved key carrying a flex layout's slug through row values.
pub const LAYOUT_KEY: &str = "_layout";

/// Prefix distinguishing options-style singleton entity ids from node ids.
pub const OPTIONS_ID_PREFIX: &str = "options:";

/// The value a resolver receives from the level above it.
///
/// Carries the host entity id (when the parent is attached to a concrete
/// entity) and any values an ancestor composite resolver pre-loaded, keyed
/// by storage key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParentValue {
    pub entity_id: Option<String>,
    pub values: Map<String, JsonValue>,
    pub group_key: Option<String>,
}

impl ParentValue {
    /// A parent value bound to a host entity with no pre-loaded values.
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            values: Map::new(),
            group_key: None,
        }
    }

    /// A parent value bound to an options-style singleton.
    pub fn for_options(slug: &str) -> Self {
        Self::for_entity(format!("{OPTIONS_ID_PREFIX}{slug}"))
    }

    pub fn with_group_key(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }

    /// Builder-style helper pre-loading a stored value under its storage key.
    pub fn with_value(mut self, storage_key: impl Into<String>, value: JsonValue) -> Self {
        self.values.insert(storage_key.into(), value);
        self
    }

    /// Pre-loaded value for a storage key, if any. `null` entries count as
    /// absent.
    pub fn get(&self, storage_key: &str) -> Option<&JsonValue> {
        self.values.get(storage_key).filter(|v| !v.is_null())
    }

    /// The flex layout slug carried by this value, if it represents a layout
    /// row.
    pub fn layout_slug(&self) -> Option<&str> {
        self.values.get(LAYOUT_KEY).and_then(JsonValue::as_str)
    }

    /// Reconstructs a parent value from a composite resolver's JSON output.
    ///
    /// Reserved keys are lifted out; everything else becomes a pre-loaded
    /// value.
    pub fn from_value(value: &JsonValue) -> Self {
        let mut parent = Self::default();
        if let Some(object) = value.as_object() {
            for (key, val) in object {
                if key == ENTITY_ID_KEY {
                    parent.entity_id = val.as_str().map(str::to_string);
                } else {
                    parent.values.insert(key.clone(), val.clone());
                }
            }
        }
        parent
    }

    /// Serializes this parent value as the JSON object a composite resolver
    /// returns, embedding the entity id under its reserved key.
    pub fn into_value(self) -> JsonValue {
        let mut object = self.values;
        if let Some(id) = self.entity_id {
            object.insert(ENTITY_ID_KEY.to_string(), JsonValue::String(id));
        }
        JsonValue::Object(object)
    }
}

/// Read access to the external store of field values.
///
/// `format` asks the store to expand the raw representation; it is passed as
/// `true` only for kinds whose stored form needs expansion (e.g. rich text).
pub trait ValueStore {
    fn get(&self, storage_key: &str, entity_id: &str, format: bool) -> Option<JsonValue>;
}

/// Batched access to options-style singleton values.
///
/// The external loader may defer and batch lookups; the core only requires
/// "accept a key, return the value".
pub trait SingletonLoader {
    fn load(&self, slug: &str, storage_key: &str, format: bool) -> Option<JsonValue>;
}

/// Extension point invoked before the store lookup. Returning a value
/// short-circuits resolution; the hook's value is returned as-is.
pub type PreResolveHook =
    Arc<dyn Fn(&ParentValue, &str, bool) -> Option<JsonValue> + Send + Sync>;

/// Extension point invoked after coercion, receiving the coerced value (or
/// `None`) and returning the final result.
pub type PostResolveHook =
    Arc<dyn Fn(Option<JsonValue>, &ParentValue, &str) -> Option<JsonValue> + Send + Sync>;

/// Everything a resolver needs at query time, injected by the caller.
pub struct ResolveContext<'a> {
    pub store: &'a dyn ValueStore,
    pub singletons: Option<&'a dyn SingletonLoader>,
    pub pre_resolve: Option<PreResolveHook>,
    pub post_resolve: Option<PostResolveHook>,
}

impl<'a> ResolveContext<'a> {
    pub fn new(store: &'a dyn ValueStore) -> Self {
        Self {
            store,
            singletons: None,
            pre_resolve: None,
            post_resolve: None,
        }
    }

    pub fn with_singleton_loader(mut self, loader: &'a dyn SingletonLoader) -> Self {
        self.singletons = Some(loader);
        self
    }

    pub fn with_pre_resolve(mut self, hook: PreResolveHook) -> Self {
        self.pre_resolve = Some(hook);
        self
    }

    pub fn with_post_resolve(mut self, hook: PostResolveHook) -> Self {
        self.post_resolve = Some(hook);
        self
    }

    fn fetch(&self, storage_key: &str, entity_id: &str, format: bool) -> Option<JsonValue> {
        match entity_id.strip_prefix(OPTIONS_ID_PREFIX) {
            Some(slug) => match self.singletons {
                Some(loader) => loader.load(slug, storage_key, format),
                None => self.store.get(storage_key, entity_id, format),
            },
            None => self.store.get(storage_key, entity_id, format),
        }
    }
}

/// Resolves one field's value, applying the resolution precedence chain:
///
/// 1. a value pre-loaded on the parent under the field's storage key;
/// 2. for clones, the original field's storage key (already folded into
///    [`Field::storage_key`]);
/// 3. the pre-resolve hook, whose result short-circuits uncoerced;
/// 4. the store lookup keyed by (storage key, entity id);
/// 5. coercion;
/// 6. the post-resolve hook.
///
/// A missing storage key, missing entity id, or empty coerced value all
/// resolve to `None`; resolution never fails.
pub fn resolve_field_value(
    field: &Field,
    definition: &FieldKindDefinition,
    parent: &ParentValue,
    ctx: &ResolveContext<'_>,
) -> Option<JsonValue> {
    let storage_key = field.storage_key();
    if storage_key.is_empty() {
        return None;
    }

    // A value an ancestor composite resolver already loaded wins outright.
    if let Some(preloaded) = parent.get(storage_key) {
        return coerce::coerce_value(field, definition, preloaded.clone());
    }

    let entity_id = parent.entity_id.as_deref()?;

    if let Some(hook) = &ctx.pre_resolve {
        if let Some(value) = hook(parent, storage_key, definition.should_format) {
            return Some(value);
        }
    }

    let raw = ctx.fetch(storage_key, entity_id, definition.should_format);
    let coerced = raw.and_then(|value| coerce::coerce_value(field, definition, value));

    match &ctx.post_resolve {
        Some(hook) => hook(coerced, parent, storage_key),
        None => coerced,
    }
}
