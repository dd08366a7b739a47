use std::{
  path::PathBuf,
  rc::Rc,
};

use the_extman_dispatch::DispatchRegistry;
use the_extman_event::{
  Event,
  EventContext,
  EventKind,
  HandlerId,
  Modifiers,
  Registry,
};
use the_extman_loader::config::ExtConfig;

use crate::{
  Error,
  Result,
  command::{
    CommandSlot,
    CommandSpec,
    Commands,
    Declaration,
    parse_invocation,
  },
  derived,
  host::{
    Host,
    PaneId,
  },
};

/// The extension manager: handler chains, commands and late-bound routines
/// for one host.
pub struct Extman<H: Host> {
  host:     H,
  config:   ExtConfig,
  registry: Registry<Self>,
  commands: Commands<Self>,
  routines: DispatchRegistry<Self>,
}

impl<H: Host> EventContext for Extman<H> {
  fn registry(&mut self) -> &mut Registry<Self> {
    &mut self.registry
  }
}

impl<H: Host> Extman<H> {
  pub fn new(host: H, config: ExtConfig) -> Self {
    let mut extman = Self {
      host,
      commands: Commands::new(config.menu_base),
      config,
      registry: Registry::new(),
      routines: DispatchRegistry::new(),
    };
    derived::install(&mut extman.registry);
    extman
  }

  /// Build with the user configuration from the config directory.
  pub fn with_user_config(host: H) -> anyhow::Result<Self> {
    let config = the_extman_loader::config::user_config()?;
    Ok(Self::new(host, config))
  }

  /// Like [`Extman::with_user_config`], reading `config_file` instead of the
  /// default user file when given. Only the first call picks the file.
  pub fn with_config_file(host: H, config_file: Option<PathBuf>) -> anyhow::Result<Self> {
    the_extman_loader::initialize_config_file(config_file);
    Self::with_user_config(host)
  }

  /// Forget every handler, command and routine. The derived-event hooks are
  /// installed again. Properties already written to the host are left alone.
  pub fn reset(&mut self) {
    self.registry.reset();
    self.commands.reset();
    self.routines.clear();
    derived::install(&mut self.registry);
    log::debug!("extension manager reset");
  }

  pub fn host(&self) -> &H {
    &self.host
  }

  pub fn host_mut(&mut self) -> &mut H {
    &mut self.host
  }

  pub fn config(&self) -> &ExtConfig {
    &self.config
  }

  pub fn handlers(&self) -> &Registry<Self> {
    &self.registry
  }

  pub fn handlers_mut(&mut self) -> &mut Registry<Self> {
    &mut self.registry
  }

  /// Append `handler` to the chain for `kind`. A `once` handler is removed the
  /// first time it runs.
  pub fn on<F>(&mut self, kind: EventKind, once: bool, handler: F) -> HandlerId
  where
    F: Fn(&mut Self, &Event<'_>) -> bool + 'static,
  {
    self.registry.register_fn(kind, handler, once)
  }

  /// Like [`Extman::on`] for an already shared handler, so that registering
  /// the same handler again is a no-op.
  pub fn add_event_handler(
    &mut self,
    kind: EventKind,
    handler: the_extman_event::Handler<Self>,
    once: bool,
  ) -> HandlerId {
    self.registry.register(kind, handler, once)
  }

  pub fn remove_event_handler(&mut self, kind: EventKind, id: HandlerId) -> bool {
    self.registry.unregister(kind, id)
  }

  pub fn dispatch(&mut self, event: &Event<'_>) -> bool {
    the_extman_event::dispatch(self, event)
  }

  /// Log `message` and print it on the output pane.
  pub fn report(&mut self, message: &str) {
    log::warn!("{message}");
    self.host.print(message);
  }

  pub fn current_file(&self) -> Option<String> {
    self.host.props().get_non_empty("FilePath")
  }

  pub fn file_dir(&self) -> Option<String> {
    self.host.props().get_non_empty("FileDir")
  }

  /// File name of the current file without its extension.
  pub fn file_name(&self) -> Option<String> {
    self.host.props().get_non_empty("FileName")
  }

  pub fn file_ext(&self) -> Option<String> {
    self.host.props().get_non_empty("FileExt")
  }

  pub fn routines(&self) -> &DispatchRegistry<Self> {
    &self.routines
  }

  pub fn routines_mut(&mut self) -> &mut DispatchRegistry<Self> {
    &mut self.routines
  }

  /// Make `routine` reachable at `path` for commands declared in batch form.
  pub fn register_routine<F>(&mut self, path: &str, routine: F)
  where
    F: Fn(&mut Self, Option<&str>) -> anyhow::Result<()> + 'static,
  {
    self.routines.set(path, Rc::new(routine));
  }

  /// Define a command and return its slot. See [`Commands::define`].
  pub fn define_command<F>(&mut self, spec: CommandSpec, thunk: F) -> Result<u32>
  where
    F: Fn(&mut Self, Option<&str>) -> anyhow::Result<()> + 'static,
  {
    self
      .commands
      .define(self.host.props_mut(), &self.config, spec, Rc::new(thunk))
  }

  /// Define commands from `name|target [param]|mode|shortcut` declarations.
  ///
  /// Every declaration is parsed before any command is defined. Targets are
  /// looked up among the registered routines each time the command runs.
  pub fn command(&mut self, declarations: &[&str]) -> Result<Vec<u32>> {
    let declarations = declarations
      .iter()
      .map(|declaration| Declaration::parse(declaration))
      .collect::<Result<Vec<_>>>()?;

    declarations
      .into_iter()
      .map(|Declaration { spec, target }| {
        self.define_command(spec, move |ctx, param| -> anyhow::Result<()> {
          let routine = ctx.routines.resolve(&target).map_err(|source| {
            Error::UnresolvedTarget {
              path: target.clone(),
              source,
            }
          })?;
          routine(ctx, param)
        })
      })
      .collect()
  }

  /// Run the command registered as `name`.
  pub fn call_command(&mut self, name: &str, param: Option<&str>) -> Result<()> {
    let thunk = self
      .commands
      .thunk(name)
      .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
    log::debug!("calling command '{name}'");

    thunk(self, param).map_err(|source| {
      match source.downcast::<Error>() {
        Ok(err) => err,
        Err(source) => {
          Error::Command {
            name: name.to_string(),
            source,
          }
        },
      }
    })
  }

  pub fn commands(&self) -> &Commands<Self> {
    &self.commands
  }

  /// Commands whose mode matches `file_name`, by slot.
  pub fn applicable_commands(&self, file_name: &str) -> Vec<&CommandSlot> {
    self.commands.applicable(file_name)
  }

  /// Run a host command line. Lines that do not call into the extension
  /// manager are left to the host and yield `false`.
  pub fn execute(&mut self, line: &str) -> Result<bool> {
    let Some((name, param)) = parse_invocation(&self.config.command_prefix, line) else {
      return Ok(false);
    };
    self.call_command(&name, param.as_deref())?;
    Ok(true)
  }

  pub fn on_margin_click(&mut self) -> bool {
    self.dispatch(&Event::MarginClick)
  }

  pub fn on_double_click(&mut self) -> bool {
    self.dispatch(&Event::DoubleClick)
  }

  pub fn on_save_point_left(&mut self) -> bool {
    self.dispatch(&Event::SavePointLeft)
  }

  pub fn on_save_point_reached(&mut self) -> bool {
    self.dispatch(&Event::SavePointReached)
  }

  pub fn on_char(&mut self, ch: char) -> bool {
    self.dispatch(&Event::Char(ch))
  }

  pub fn on_save(&mut self, file: &str) -> bool {
    self.dispatch(&Event::Save(file))
  }

  pub fn on_before_save(&mut self, file: &str) -> bool {
    self.dispatch(&Event::BeforeSave(file))
  }

  pub fn on_switch_file(&mut self, file: &str) -> bool {
    self.dispatch(&Event::SwitchFile(file))
  }

  pub fn on_open(&mut self, file: &str) -> bool {
    self.dispatch(&Event::Open(file))
  }

  /// Only dispatched while the editor pane has focus.
  pub fn on_update_ui(&mut self) -> bool {
    if self.host.focused_pane() != PaneId::Editor {
      return false;
    }
    self.dispatch(&Event::UpdateUI)
  }

  pub fn on_key(&mut self, key: i32, modifiers: Modifiers) -> bool {
    self.dispatch(&Event::Key { key, modifiers })
  }

  pub fn on_dwell_start(&mut self, pos: usize, word: &str) -> bool {
    self.dispatch(&Event::DwellStart { pos, word })
  }

  pub fn on_close(&mut self, file: &str) -> bool {
    self.dispatch(&Event::Close(file))
  }

  pub fn on_user_list_selection(&mut self, list_type: i32, selection: &str) -> bool {
    self.dispatch(&Event::UserListSelection {
      list_type,
      selection,
    })
  }

  pub fn on_strip(&mut self, control: i32, change: i32) -> bool {
    self.dispatch(&Event::Strip { control, change })
  }
}
