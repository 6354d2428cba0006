//! Named model factories with dotted-path fallback.
//!
//! [`ModelRegistry`] maps short names such as `"DummyRegressor"` to
//! [`ModelFactory`] instances. Names that were never registered can still be
//! resolved as `module.Attr` paths through [`ModelResolver`] plugins, unless
//! flexible resolution is switched off.

use crate::data::Value;
use crate::model::dummy::DummyRegressorFactory;
use crate::model::error::{ModelError, Result};
use crate::model::{Model, ModelFactory, ModelParams};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Module path under which the built-in models resolve.
pub const BUILTIN_MODULE: &str = "sk_general.model";

/// Resolves `module.Attr` paths to factories.
pub trait ModelResolver: Send + Sync {
    /// Whether this resolver provides `module` at all.
    fn has_module(&self, module: &str) -> bool;

    /// The factory named `attr` in `module`, if any.
    fn resolve(&self, module: &str, attr: &str) -> Option<Arc<dyn ModelFactory>>;
}

/// A resolver serving a single module's factories.
#[derive(Clone)]
pub struct ModuleResolver {
    module: String,
    factories: BTreeMap<String, Arc<dyn ModelFactory>>,
}

impl ModuleResolver {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            factories: BTreeMap::new(),
        }
    }

    /// Add a factory under its own model type name.
    pub fn with_factory(mut self, factory: Arc<dyn ModelFactory>) -> Self {
        self.factories.insert(factory.model_type().to_string(), factory);
        self
    }

    pub fn with_factory_as(
        mut self,
        attr: impl Into<String>,
        factory: Arc<dyn ModelFactory>,
    ) -> Self {
        self.factories.insert(attr.into(), factory);
        self
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

impl ModelResolver for ModuleResolver {
    fn has_module(&self, module: &str) -> bool {
        self.module == module
    }

    fn resolve(&self, module: &str, attr: &str) -> Option<Arc<dyn ModelFactory>> {
        if !self.has_module(module) {
            return None;
        }
        self.factories.get(attr).cloned()
    }
}

/// Model name plus hyperparameters, as found in configuration files.
///
/// ```
/// use sk_general::model::ModelConfig;
///
/// let cfg: ModelConfig = serde_json::from_str(
///     r#"{"model": "DummyRegressor", "params": {"strategy": "median"}}"#,
/// ).unwrap();
/// assert_eq!(cfg.model, "DummyRegressor");
/// assert_eq!(cfg.params().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Registered name or dotted path.
    pub model: String,
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl ModelConfig {
    /// Hyperparameters as model params.
    pub fn params(&self) -> ModelParams {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(v.clone())))
            .collect()
    }
}

/// Holder of model factories keyed by name.
#[derive(Clone)]
pub struct ModelRegistry {
    factories: BTreeMap<String, Arc<dyn ModelFactory>>,
    resolvers: Vec<Arc<dyn ModelResolver>>,
    flexible: bool,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// An empty registry with flexible resolution enabled.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
            resolvers: Vec::new(),
            flexible: true,
        }
    }

    /// A registry holding the built-in models, also resolvable under
    /// [`BUILTIN_MODULE`].
    pub fn with_defaults() -> Self {
        let dummy: Arc<dyn ModelFactory> = Arc::new(DummyRegressorFactory);
        let mut registry = Self::new();
        registry
            .register(dummy.clone())
            .add_resolver(Arc::new(ModuleResolver::new(BUILTIN_MODULE).with_factory(dummy)));
        registry
    }

    /// Enable or disable dotted-path resolution of unregistered names.
    pub fn with_flexible(mut self, flexible: bool) -> Self {
        self.flexible = flexible;
        self
    }

    pub fn is_flexible(&self) -> bool {
        self.flexible
    }

    /// Register a factory under its model type name, replacing any previous one.
    pub fn register(&mut self, factory: Arc<dyn ModelFactory>) -> &mut Self {
        let name = factory.model_type().to_string();
        self.register_as(name, factory)
    }

    /// Register a factory under an explicit name.
    pub fn register_as(
        &mut self,
        name: impl Into<String>,
        factory: Arc<dyn ModelFactory>,
    ) -> &mut Self {
        let name = name.into();
        debug!(name = %name, "Registering model factory");
        self.factories.insert(name, factory);
        self
    }

    pub fn add_resolver(&mut self, resolver: Arc<dyn ModelResolver>) -> &mut Self {
        self.resolvers.push(resolver);
        self
    }

    /// Registered names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Find a factory by registered name, falling back to dotted-path
    /// resolution when flexible.
    ///
    /// # Errors
    /// [`ModelError::RegistryResolution`] when the name is unregistered and
    /// cannot be resolved.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn ModelFactory>> {
        if let Some(factory) = self.factories.get(name) {
            return Ok(factory.clone());
        }
        if !self.flexible {
            return Err(ModelError::RegistryResolution(format!(
                "\"{name}\" is not registered"
            )));
        }
        debug!(name, "Name not registered, resolving as module path");
        self.resolve_path(name)
    }

    /// Look up `name` and build a model from `params`.
    pub fn create(&self, name: &str, params: &ModelParams) -> Result<Box<dyn Model>> {
        self.lookup(name)?.create(params)
    }

    /// Build the model described by `config`.
    pub fn create_from_config(&self, config: &ModelConfig) -> Result<Box<dyn Model>> {
        self.create(&config.model, &config.params())
    }

    fn resolve_path(&self, path: &str) -> Result<Arc<dyn ModelFactory>> {
        let (module, attr) = path.rsplit_once('.').ok_or_else(|| {
            ModelError::RegistryResolution(format!("{path} doesn't look like a module path"))
        })?;

        let mut module_found = false;
        for resolver in &self.resolvers {
            if !resolver.has_module(module) {
                continue;
            }
            module_found = true;
            if let Some(factory) = resolver.resolve(module, attr) {
                return Ok(factory);
            }
        }

        Err(ModelError::RegistryResolution(if module_found {
            format!("Module \"{module}\" does not define a \"{attr}\" attribute/class")
        } else {
            format!("No module named \"{module}\"")
        }))
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("factories", &self.keys().collect::<Vec<_>>())
            .field("resolvers", &self.resolvers.len())
            .field("flexible", &self.flexible)
            .finish()
    }
}
