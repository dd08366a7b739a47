use the_extman_event::{
  Event,
  EventKind,
  HandlerId,
};

use crate::{
  Extman,
  host::Host,
};

impl<H: Host> Extman<H> {
  /// Show `options[start..]` as a user list of the configured default type.
  pub fn user_list_show<F>(&mut self, options: &[impl AsRef<str>], start: usize, on_select: F)
  where
    F: Fn(&mut Self, &str) + 'static,
  {
    let list_type = self.config().list_type;
    self.user_list_show_typed(options, start, list_type, on_select);
  }

  /// Show `options[start..]` as a user list of type `list_type`.
  ///
  /// At most one selection handler is live: any previous one is dropped, and
  /// `on_select` is removed once a selection is made. A start index past the
  /// end shows an empty list.
  pub fn user_list_show_typed<F>(
    &mut self,
    options: &[impl AsRef<str>],
    start: usize,
    list_type: i32,
    on_select: F,
  ) where
    F: Fn(&mut Self, &str) + 'static,
  {
    self.handlers_mut().clear(EventKind::UserListSelection);
    self.on(EventKind::UserListSelection, true, move |ctx, event| {
      if let Some(selection) = event.text() {
        on_select(ctx, selection);
      }
      true
    });

    let separator = self.config().list_separator;
    let items = options
      .get(start..)
      .unwrap_or_default()
      .iter()
      .map(|option| option.as_ref())
      .collect::<Vec<&str>>()
      .join(&separator.to_string());

    let focused = self.host().focused_pane();
    let pane = self.host_mut().pane_mut(focused);
    pane.set_list_separator(separator);
    pane.show_user_list(list_type, &items);
    pane.set_list_separator(' ');
    log::debug!("showing user list {list_type} on {focused:?}");
  }

  /// Replace every strip handler with `handler` and ask the host to show the
  /// strip described by `description`.
  pub fn strip_show<F>(&mut self, description: &str, handler: Option<F>) -> Option<HandlerId>
  where
    F: Fn(&mut Self, i32, i32) -> bool + 'static,
  {
    self.handlers_mut().clear(EventKind::Strip);
    let id = handler.map(|handler| {
      self.on(EventKind::Strip, false, move |ctx, event| {
        match *event {
          Event::Strip { control, change } => handler(ctx, control, change),
          _ => false,
        }
      })
    });
    self.host_mut().strip_show(description);
    id
  }
}
