//! Documents: the owning container of model instances and their reference
//! graph.
//!
//! A [`Document`] owns every [`ModelInstance`] in one coherent graph.
//! Instance-valued attributes hold [`ModelId`]s resolved within the
//! document, never owning pointers, so the graph serializes to a flat list
//! of records with `{"ref": id}` tokens.
//!
//! # Responsibilities
//!
//! - **Factory**: [`Document::create`] resolves provided values and
//!   descriptor defaults into a new instance, allocating companion
//!   instances for instance-valued defaults and coercions. Construction is
//!   all-or-nothing: on failure, companions allocated along the way are
//!   rolled back.
//! - **Mutation**: [`Document::set`] re-runs coercion and validation for
//!   one attribute, commits atomically, and synchronously notifies
//!   registered [`ChangeObserver`]s before returning.
//! - **Serialization**: [`Document::serialize`] walks the graph reachable
//!   from the document roots and emits each instance once, in depth-first
//!   discovery order. The graph must be acyclic.
//! - **Deserialization**: [`Document::deserialize`] is two-pass — allocate
//!   every instance, then link attribute values — so forward references are
//!   permitted.

mod wire;

pub use wire::{DocumentData, InstanceData, RefToken, WIRE_VERSION, WireValue};

use std::{collections::HashSet, rc::Rc};

use indexmap::IndexMap;
use log::{debug, info, trace};
use petgraph::{algo, graphmap::DiGraphMap};
use thiserror::Error;

use gnomon_core::{id::ModelId, name::Name, value::Value};

use crate::{
    config::SerializationConfig,
    error::GnomonError,
    instance::ModelInstance,
    observe::{ChangeEvent, ChangeObserver},
    property::{CoercionInto, DefaultValue, PropertyDescriptor, PropertyError},
    schema::{ModelClass, ModelRegistry},
};

/// Errors raised by document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("construction of `{class}` failed: {source}")]
    Construction {
        class: Name,
        #[source]
        source: PropertyError,
    },

    #[error("unknown instance {id}")]
    UnknownInstance { id: ModelId },

    #[error("unknown model class `{class}` in document")]
    UnknownClass { class: Name },

    #[error("duplicate instance id {id} in document")]
    DuplicateId { id: ModelId },

    #[error("`{instance}.{attribute}` references missing instance {target}")]
    DanglingReference {
        instance: ModelId,
        attribute: Name,
        target: ModelId,
    },

    #[error("`{instance}.{attribute}` references unknown instance {target}")]
    UnresolvedReference {
        instance: ModelId,
        attribute: Name,
        target: ModelId,
    },

    #[error("reference cycle through instance {id}; document graphs must be acyclic")]
    CyclicReference { id: ModelId },

    #[error("unsupported document version {found}, expected {WIRE_VERSION}")]
    UnsupportedVersion { found: u32 },

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

/// The owning container of a model instance graph.
#[derive(Debug)]
pub struct Document {
    registry: Rc<ModelRegistry>,
    instances: IndexMap<ModelId, ModelInstance>,
    roots: Vec<ModelId>,
    observers: Vec<Rc<dyn ChangeObserver>>,
}

impl Document {
    /// Creates an empty document over the given registry.
    pub fn new(registry: Rc<ModelRegistry>) -> Self {
        Self {
            registry,
            instances: IndexMap::new(),
            roots: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Creates an empty document over the built-in catalog.
    pub fn with_builtin() -> Self {
        Self::new(ModelRegistry::builtin())
    }

    /// The registry this document resolves classes against.
    pub fn registry(&self) -> &Rc<ModelRegistry> {
        &self.registry
    }

    /// Constructs an instance of the named class.
    ///
    /// Provided values resolve through the class descriptors (coercion, then
    /// validation); every remaining attribute takes its descriptor default.
    /// Instance-valued defaults and coercions allocate fresh companion
    /// instances in this document.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::UnknownClass`](crate::schema::SchemaError) for an
    ///   unregistered class name.
    /// - [`DocumentError::Construction`] wrapping `UnknownAttribute` for a
    ///   provided key the class does not resolve, or `TypeMismatch` for a
    ///   value failing its declared type. Nothing is left behind on failure.
    pub fn create<I>(&mut self, class: &str, values: I) -> Result<ModelId, GnomonError>
    where
        I: IntoIterator<Item = (Name, Value)>,
    {
        let class = self.registry.expect_class(Name::new(class))?;
        let provided: IndexMap<Name, Value> = values.into_iter().collect();

        let mut allocated = Vec::new();
        match self.construct(Rc::clone(&class), provided, &mut allocated) {
            Ok(id) => {
                debug!(class = class.name().to_string(), id = id.to_string(); "Instance created");
                Ok(id)
            }
            Err(err) => {
                self.rollback(&allocated);
                Err(Self::as_construction(class.name(), err))
            }
        }
    }

    /// Assigns one attribute on an existing instance.
    ///
    /// The raw value runs through the descriptor's coercions and validation;
    /// on success the assignment commits and registered observers are
    /// notified synchronously before this call returns. On failure the
    /// instance is untouched.
    pub fn set(
        &mut self,
        id: ModelId,
        attribute: impl Into<Name>,
        raw: Value,
    ) -> Result<(), GnomonError> {
        let attribute = attribute.into();
        let instance = self
            .instances
            .get(&id)
            .ok_or(DocumentError::UnknownInstance { id })?;
        let descriptor = instance
            .class()
            .descriptor(attribute)
            .cloned()
            .ok_or(PropertyError::UnknownAttribute { attribute })?;

        let mut allocated = Vec::new();
        match self.resolve_value(&descriptor, raw, &mut allocated) {
            Ok(value) => {
                let instance = self
                    .instances
                    .get_mut(&id)
                    .expect("instance presence was checked above");
                let old = instance.assign(attribute, value.clone());
                let event = ChangeEvent::new(id, attribute, old, value);
                self.notify(&event);
                Ok(())
            }
            Err(err) => {
                self.rollback(&allocated);
                Err(err)
            }
        }
    }

    /// Looks up an instance by id.
    pub fn get(&self, id: ModelId) -> Option<&ModelInstance> {
        self.instances.get(&id)
    }

    /// Returns true if the document owns the given instance.
    pub fn contains(&self, id: ModelId) -> bool {
        self.instances.contains_key(&id)
    }

    /// The number of instances in the document.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns true if the document owns no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates the instances in document order.
    pub fn instances(&self) -> impl Iterator<Item = &ModelInstance> {
        self.instances.values()
    }

    /// Removes an instance from the document, returning it.
    ///
    /// The id is retired permanently; it is never reassigned. References to
    /// the removed instance held by other instances become dangling and are
    /// reported when the graph is next serialized.
    pub fn remove(&mut self, id: ModelId) -> Result<ModelInstance, GnomonError> {
        let instance = self
            .instances
            .shift_remove(&id)
            .ok_or(DocumentError::UnknownInstance { id })?;
        self.roots.retain(|root| *root != id);
        Ok(instance)
    }

    /// Marks an instance as a serialization root.
    pub fn add_root(&mut self, id: ModelId) -> Result<(), GnomonError> {
        if !self.contains(id) {
            return Err(DocumentError::UnknownInstance { id }.into());
        }
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        Ok(())
    }

    /// The serialization roots, in declaration order.
    pub fn roots(&self) -> &[ModelId] {
        &self.roots
    }

    /// Registers an observer for committed attribute assignments.
    pub fn subscribe(&mut self, observer: Rc<dyn ChangeObserver>) {
        self.observers.push(observer);
    }

    /// Serializes the graph reachable from the document roots.
    pub fn serialize(&self) -> Result<DocumentData, GnomonError> {
        self.serialize_with(&SerializationConfig::default())
    }

    /// Serializes the graph reachable from the document roots with explicit
    /// settings.
    ///
    /// Each reachable instance is emitted exactly once, in depth-first
    /// discovery order; instance references always render as `{"ref": id}`
    /// tokens.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::DanglingReference`] when a reachable attribute
    ///   references a removed instance.
    /// - [`DocumentError::CyclicReference`] when the reachable graph
    ///   contains a cycle.
    pub fn serialize_with(&self, config: &SerializationConfig) -> Result<DocumentData, GnomonError> {
        let order = self.reachable_order()?;
        self.check_acyclic(&order)?;

        let mut records = Vec::with_capacity(order.len());
        for id in &order {
            let instance = self
                .instances
                .get(id)
                .expect("reachability walk only yields owned instances");
            let class = instance.class();

            let mut attributes = IndexMap::new();
            for (name, value) in instance.values() {
                if !config.include_defaults() {
                    let descriptor = class
                        .descriptor(name)
                        .expect("instance values correspond to class descriptors");
                    if is_default(descriptor, value) {
                        continue;
                    }
                }
                attributes.insert(name, WireValue::from(value));
            }
            records.push(InstanceData::new(*id, class.name(), attributes));
        }

        info!(roots = self.roots.len(), instances = records.len(); "Document serialized");
        Ok(DocumentData::new(self.roots.clone(), records))
    }

    /// Reconstructs a document from its wire representation.
    ///
    /// Two passes: first every instance is allocated (classes resolved, ids
    /// reserved, duplicates rejected), then attribute values are linked, so
    /// forward references between instances are permitted. Attributes
    /// missing from a record take their descriptor defaults.
    pub fn deserialize(
        registry: Rc<ModelRegistry>,
        data: &DocumentData,
    ) -> Result<Self, GnomonError> {
        if data.version() != WIRE_VERSION {
            return Err(DocumentError::UnsupportedVersion {
                found: data.version(),
            }
            .into());
        }

        let mut document = Document::new(registry);

        // Pass 1: allocate.
        let mut allocations: Vec<(ModelId, Rc<ModelClass>)> =
            Vec::with_capacity(data.instances().len());
        let mut known = HashSet::new();
        for record in data.instances() {
            let id = ModelId::reserve(record.id().raw());
            if !known.insert(id) {
                return Err(DocumentError::DuplicateId { id }.into());
            }
            let class = document
                .registry
                .class(record.class())
                .cloned()
                .ok_or(DocumentError::UnknownClass {
                    class: record.class(),
                })?;
            allocations.push((id, class));
        }

        // Pass 2: link.
        for (record, (id, class)) in data.instances().iter().zip(allocations) {
            let provided: IndexMap<Name, Value> = record
                .attributes()
                .iter()
                .map(|(name, wire)| (*name, Value::from(wire)))
                .collect();

            let mut scratch = Vec::new();
            let values = document
                .resolve_values(&class, provided, &mut scratch)
                .map_err(|err| Self::as_construction(class.name(), err))?;
            document
                .instances
                .insert(id, ModelInstance::new(id, class, values));
        }

        // Every reference must resolve within the document.
        for instance in document.instances.values() {
            for (attribute, target) in instance.references() {
                if !document.instances.contains_key(&target) {
                    return Err(DocumentError::UnresolvedReference {
                        instance: instance.id(),
                        attribute,
                        target,
                    }
                    .into());
                }
            }
        }

        for root in data.roots() {
            if !document.instances.contains_key(root) {
                return Err(DocumentError::UnknownInstance { id: *root }.into());
            }
            document.roots.push(*root);
        }

        debug!(instances = document.instances.len(); "Document deserialized");
        Ok(document)
    }

    fn construct(
        &mut self,
        class: Rc<ModelClass>,
        provided: IndexMap<Name, Value>,
        allocated: &mut Vec<ModelId>,
    ) -> Result<ModelId, GnomonError> {
        let values = self.resolve_values(&class, provided, allocated)?;
        let id = ModelId::next();
        self.instances
            .insert(id, ModelInstance::new(id, class, values));
        Ok(id)
    }

    /// Resolves a full value table for `class`: provided values through
    /// coercion and validation, everything else from descriptor defaults.
    fn resolve_values(
        &mut self,
        class: &Rc<ModelClass>,
        mut provided: IndexMap<Name, Value>,
        allocated: &mut Vec<ModelId>,
    ) -> Result<IndexMap<Name, Value>, GnomonError> {
        if let Some(name) = provided.keys().find(|name| !class.has_attribute(**name)) {
            return Err(PropertyError::UnknownAttribute { attribute: *name }.into());
        }

        let mut values = IndexMap::with_capacity(class.attribute_count());
        for descriptor in class.properties() {
            let name = descriptor.name();
            let value = match provided.shift_remove(&name) {
                Some(raw) => self.resolve_value(descriptor, raw, allocated)?,
                None => self.default_value(descriptor, allocated)?,
            };
            values.insert(name, value);
        }
        Ok(values)
    }

    /// Runs one raw value through a descriptor: first matching coercion,
    /// then type validation.
    fn resolve_value(
        &mut self,
        descriptor: &PropertyDescriptor,
        raw: Value,
        allocated: &mut Vec<ModelId>,
    ) -> Result<Value, GnomonError> {
        let coerced = match descriptor.coerce(&raw) {
            Some(CoercionInto::Value(produce)) => produce(&raw),
            Some(CoercionInto::Instance(class)) => {
                let class = *class;
                Value::Ref(self.materialize(class, allocated)?)
            }
            None => raw,
        };
        descriptor.check(&coerced)?;
        Ok(coerced)
    }

    /// Computes a descriptor's default for a new instance. Producer defaults
    /// are invoked freshly; instance defaults allocate a companion.
    fn default_value(
        &mut self,
        descriptor: &PropertyDescriptor,
        allocated: &mut Vec<ModelId>,
    ) -> Result<Value, GnomonError> {
        let value = match descriptor.default() {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Computed(produce) => produce(),
            DefaultValue::Instance(class) => {
                let class = *class;
                Value::Ref(self.materialize(class, allocated)?)
            }
        };
        // Defaults obey the same declared type as provided values.
        descriptor.check(&value)?;
        Ok(value)
    }

    /// Instantiates a companion instance of the named class, tracking it for
    /// rollback.
    fn materialize(
        &mut self,
        class: &str,
        allocated: &mut Vec<ModelId>,
    ) -> Result<ModelId, GnomonError> {
        let class = self.registry.expect_class(Name::new(class))?;
        let id = self.construct(class, IndexMap::new(), allocated)?;
        allocated.push(id);
        Ok(id)
    }

    fn rollback(&mut self, allocated: &[ModelId]) {
        for id in allocated {
            self.instances.shift_remove(id);
        }
    }

    fn as_construction(class: Name, err: GnomonError) -> GnomonError {
        match err {
            GnomonError::Property(source) => DocumentError::Construction { class, source }.into(),
            other => other,
        }
    }

    fn notify(&self, event: &ChangeEvent) {
        trace!(
            instance = event.instance().to_string(),
            attribute = event.attribute().to_string();
            "Attribute changed"
        );
        for observer in &self.observers {
            observer.on_change(event);
        }
    }

    /// Depth-first discovery order of the instances reachable from the
    /// roots. Fails on references to instances the document no longer owns.
    fn reachable_order(&self) -> Result<Vec<ModelId>, GnomonError> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(ModelId, Option<(ModelId, Name)>)> =
            self.roots.iter().rev().map(|id| (*id, None)).collect();

        while let Some((id, origin)) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let instance = self.instances.get(&id).ok_or_else(|| match origin {
                Some((instance, attribute)) => DocumentError::DanglingReference {
                    instance,
                    attribute,
                    target: id,
                },
                None => DocumentError::UnknownInstance { id },
            })?;
            order.push(id);
            for (attribute, target) in instance.references().into_iter().rev() {
                stack.push((target, Some((id, attribute))));
            }
        }
        Ok(order)
    }

    fn check_acyclic(&self, reachable: &[ModelId]) -> Result<(), GnomonError> {
        let mut graph: DiGraphMap<ModelId, ()> = DiGraphMap::new();
        for id in reachable {
            graph.add_node(*id);
        }
        for id in reachable {
            let instance = self
                .instances
                .get(id)
                .expect("reachability walk only yields owned instances");
            for (_, target) in instance.references() {
                graph.add_edge(*id, target, ());
            }
        }

        algo::toposort(&graph, None)
            .map_err(|cycle| DocumentError::CyclicReference {
                id: cycle.node_id(),
            })?;
        Ok(())
    }
}

fn is_default(descriptor: &PropertyDescriptor, value: &Value) -> bool {
    match descriptor.default() {
        DefaultValue::Literal(default) => default == value,
        DefaultValue::Computed(produce) => produce() == *value,
        // Instance defaults are allocated per instance; the reference is
        // always document state worth emitting.
        DefaultValue::Instance(_) => false,
    }
}
