//! Parameter isolation: detaching transform parameters from live build state.
//!
//! A registered transform must not observe later changes to the objects it was
//! configured with. Isolation evaluates deferred values and takes an owned
//! snapshot, which is what the transform descriptor keeps.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::property::TypeName;
use crate::util::hash::Fingerprint;

/// A value computed when the parameters are isolated.
pub type DeferredValue = Arc<dyn Fn() -> anyhow::Result<Value> + Send + Sync>;

/// One parameter value as configured by the build author.
#[derive(Clone)]
pub enum ParameterValue {
    Fixed(Value),
    Deferred(DeferredValue),
}

impl ParameterValue {
    pub fn deferred(f: impl Fn() -> anyhow::Result<Value> + Send + Sync + 'static) -> Self {
        ParameterValue::Deferred(Arc::new(f))
    }
}

impl fmt::Debug for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            ParameterValue::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Parameters object handed to a transform action at registration.
#[derive(Debug, Clone)]
pub struct TransformParameters {
    type_name: TypeName,
    values: BTreeMap<String, ParameterValue>,
}

impl TransformParameters {
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        TransformParameters {
            type_name: type_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values
            .insert(name.into(), ParameterValue::Fixed(value.into()));
        self
    }

    pub fn with_deferred(
        mut self,
        name: impl Into<String>,
        f: impl Fn() -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        self.values.insert(name.into(), ParameterValue::deferred(f));
        self
    }

    /// The parameters type, inspected by the parameter store.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn values(&self) -> &BTreeMap<String, ParameterValue> {
        &self.values
    }
}

/// Owned snapshot of transform parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsolatedParameters {
    type_name: TypeName,
    values: BTreeMap<String, Value>,
    fingerprint: String,
}

impl IsolatedParameters {
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

/// Owned snapshot of legacy transform constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IsolatedArgs {
    values: Vec<Value>,
    fingerprint: String,
}

impl IsolatedArgs {
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

#[derive(Debug, Error)]
pub enum IsolationError {
    #[error("could not evaluate parameter '{name}' of {type_name}")]
    Deferred {
        type_name: TypeName,
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Produces isolated snapshots of transform parameters and arguments.
pub trait IsolationService: Send + Sync {
    fn isolate_parameters(
        &self,
        parameters: &TransformParameters,
    ) -> Result<IsolatedParameters, IsolationError>;

    fn isolate_args(&self, args: &[Value]) -> Result<IsolatedArgs, IsolationError>;
}

/// Isolation by deep copy: deferred values are evaluated, everything is cloned.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotIsolation;

impl IsolationService for SnapshotIsolation {
    fn isolate_parameters(
        &self,
        parameters: &TransformParameters,
    ) -> Result<IsolatedParameters, IsolationError> {
        let mut values = BTreeMap::new();
        for (name, value) in parameters.values() {
            let value = match value {
                ParameterValue::Fixed(value) => value.clone(),
                ParameterValue::Deferred(compute) => {
                    compute().map_err(|source| IsolationError::Deferred {
                        type_name: parameters.type_name().clone(),
                        name: name.clone(),
                        source,
                    })?
                }
            };
            values.insert(name.clone(), value);
        }

        let mut fp = Fingerprint::new();
        fp.update_str(parameters.type_name().as_str());
        for (name, value) in &values {
            fp.update_str(name).update_json(value);
        }

        Ok(IsolatedParameters {
            type_name: parameters.type_name().clone(),
            values,
            fingerprint: fp.finish(),
        })
    }

    fn isolate_args(&self, args: &[Value]) -> Result<IsolatedArgs, IsolationError> {
        let mut fp = Fingerprint::new();
        for value in args {
            fp.update_json(value);
        }
        Ok(IsolatedArgs {
            values: args.to_vec(),
            fingerprint: fp.finish(),
        })
    }
}
