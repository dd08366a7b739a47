use std::rc::Rc;

use foldhash::fast::RandomState;
use hashbrown::HashMap;
use thiserror::Error;

/// A late-bound routine. Receives the context and the optional string
/// parameter of the command that invoked it.
pub type DynHandler<Ctx> = Rc<dyn Fn(&mut Ctx, Option<&str>) -> anyhow::Result<()>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("empty routine path")]
  EmptyPath,
  #[error("no namespace '{segment}' while resolving '{path}'")]
  MissingNamespace { path: String, segment: String },
  #[error("no routine registered at '{path}'")]
  MissingRoutine { path: String },
}

/// Split a routine path on `::` and `.` separators.
pub fn split_path(path: &str) -> Vec<&str> {
  path
    .split("::")
    .flat_map(|part| part.split('.'))
    .map(str::trim)
    .filter(|segment| !segment.is_empty())
    .collect()
}

pub struct DispatchRegistry<Ctx> {
  handlers:   HashMap<String, DynHandler<Ctx>, RandomState>,
  namespaces: HashMap<String, DispatchRegistry<Ctx>, RandomState>,
}

impl<Ctx> Clone for DispatchRegistry<Ctx> {
  fn clone(&self) -> Self {
    Self {
      handlers:   self.handlers.clone(),
      namespaces: self.namespaces.clone(),
    }
  }
}

impl<Ctx> Default for DispatchRegistry<Ctx> {
  fn default() -> Self {
    Self::new()
  }
}

impl<Ctx> DispatchRegistry<Ctx> {
  pub fn new() -> Self {
    Self {
      handlers:   HashMap::default(),
      namespaces: HashMap::default(),
    }
  }

  /// Register `handler` at `path`, creating intermediate namespaces.
  ///
  /// Replaces any routine already registered at that path. An empty path is
  /// ignored.
  pub fn set(&mut self, path: &str, handler: DynHandler<Ctx>) {
    let segments = split_path(path);
    let Some((name, parents)) = segments.split_last() else {
      log::warn!("ignoring routine with empty path");
      return;
    };
    let namespace = parents
      .iter()
      .fold(self, |ns, segment| ns.namespace_mut(segment));
    namespace.handlers.insert((*name).to_string(), handler);
    log::debug!("registered routine '{path}'");
  }

  pub fn get(&self, path: &str) -> Option<&DynHandler<Ctx>> {
    let segments = split_path(path);
    let (name, parents) = segments.split_last()?;
    let mut namespace = self;
    for segment in parents {
      namespace = namespace.namespaces.get(*segment)?;
    }
    namespace.handlers.get(*name)
  }

  /// Look up the routine at `path`, reporting which part of the path is
  /// missing.
  pub fn resolve(&self, path: &str) -> Result<DynHandler<Ctx>, ResolveError> {
    let segments = split_path(path);
    let Some((name, parents)) = segments.split_last() else {
      return Err(ResolveError::EmptyPath);
    };
    let mut namespace = self;
    for segment in parents {
      namespace =
        namespace
          .namespaces
          .get(*segment)
          .ok_or_else(|| ResolveError::MissingNamespace {
            path:    path.to_string(),
            segment: (*segment).to_string(),
          })?;
    }
    namespace
      .handlers
      .get(*name)
      .cloned()
      .ok_or_else(|| ResolveError::MissingRoutine {
        path: path.to_string(),
      })
  }

  pub fn remove(&mut self, path: &str) -> Option<DynHandler<Ctx>> {
    let segments = split_path(path);
    let (name, parents) = segments.split_last()?;
    let mut namespace = self;
    for segment in parents {
      namespace = namespace.namespaces.get_mut(*segment)?;
    }
    namespace.handlers.remove(*name)
  }

  pub fn namespace(&self, name: &str) -> Option<&DispatchRegistry<Ctx>> {
    self.namespaces.get(name)
  }

  /// The child namespace `name`, created on first use.
  pub fn namespace_mut(&mut self, name: &str) -> &mut DispatchRegistry<Ctx> {
    self.namespaces.entry(name.to_string()).or_default()
  }

  pub fn contains(&self, path: &str) -> bool {
    self.get(path).is_some()
  }

  pub fn is_empty(&self) -> bool {
    self.handlers.is_empty() && self.namespaces.values().all(|ns| ns.is_empty())
  }

  pub fn clear(&mut self) {
    self.handlers.clear();
    self.namespaces.clear();
  }
}
