use super::{
  EolMode,
  Host,
  Pane,
  PaneId,
  PropertySet,
  PropertyStore,
};

/// A pane backed by a plain string.
#[derive(Debug, Clone)]
pub struct MemoryPane {
  text:      String,
  caret:     usize,
  eol:       EolMode,
  separator: char,
  lists:     Vec<(i32, String)>,
  modified:  bool,
}

impl Default for MemoryPane {
  fn default() -> Self {
    Self {
      text:      String::new(),
      caret:     0,
      eol:       EolMode::default(),
      separator: ' ',
      lists:     Vec::new(),
      modified:  false,
    }
  }
}

impl MemoryPane {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_eol_mode(mut self, eol: EolMode) -> Self {
    self.eol = eol;
    self
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  /// Replace the text, as if a file was loaded, and put the caret at its end.
  pub fn set_text(&mut self, text: &str) {
    self.text = text.to_string();
    self.caret = self.text.len();
    self.modified = false;
  }

  /// Insert `text` at the caret and move the caret past it.
  pub fn type_text(&mut self, text: &str) {
    let caret = self.clamp(self.caret);
    self.text.insert_str(caret, text);
    self.caret = caret + text.len();
    self.modified = true;
  }

  pub fn set_modified(&mut self, modified: bool) {
    self.modified = modified;
  }

  pub fn set_caret(&mut self, pos: usize) {
    self.caret = self.clamp(pos);
  }

  pub fn set_eol_mode(&mut self, eol: EolMode) {
    self.eol = eol;
  }

  pub fn list_separator(&self) -> char {
    self.separator
  }

  /// User lists shown so far as `(list type, items)`.
  pub fn shown_lists(&self) -> &[(i32, String)] {
    &self.lists
  }

  fn clamp(&self, pos: usize) -> usize {
    let mut pos = pos.min(self.text.len());
    while !self.text.is_char_boundary(pos) {
      pos -= 1;
    }
    pos
  }
}

impl Pane for MemoryPane {
  fn current_pos(&self) -> usize {
    self.caret
  }

  fn line_from_position(&self, pos: usize) -> usize {
    let pos = self.clamp(pos);
    self.text[..pos].matches(self.eol.as_str()).count()
  }

  fn line(&self, line: usize) -> Option<String> {
    self
      .text
      .split_inclusive(self.eol.as_str())
      .nth(line)
      .map(str::to_string)
  }

  fn eol_mode(&self) -> EolMode {
    self.eol
  }

  fn contents(&self) -> String {
    self.text.clone()
  }

  fn is_modified(&self) -> bool {
    self.modified
  }

  fn set_list_separator(&mut self, separator: char) {
    self.separator = separator;
  }

  fn show_user_list(&mut self, list_type: i32, items: &str) {
    self.lists.push((list_type, items.to_string()));
  }
}

/// A complete host kept in memory, for headless embedding and tests.
///
/// Requests that a real editor would act on (opening files, showing strips,
/// printing) are recorded so they can be inspected.
#[derive(Debug, Clone)]
pub struct MemoryHost {
  pub editor: MemoryPane,
  pub output: MemoryPane,
  pub props:  PropertySet,
  focus:      PaneId,
  opened:     Vec<String>,
  strips:     Vec<String>,
  printed:    Vec<String>,
}

impl Default for MemoryHost {
  fn default() -> Self {
    Self {
      editor:  MemoryPane::default(),
      output:  MemoryPane::default(),
      props:   PropertySet::default(),
      focus:   PaneId::Editor,
      opened:  Vec::new(),
      strips:  Vec::new(),
      printed: Vec::new(),
    }
  }
}

impl MemoryHost {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn focus(&mut self, pane: PaneId) {
    self.focus = pane;
  }

  /// Set the properties the host derives from the current file.
  pub fn set_current_file(&mut self, path: &str) {
    let path = std::path::Path::new(path);
    let dir = path.parent().map(|dir| dir.to_string_lossy().into_owned());
    let stem = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
    let ext = path.extension().map(|ext| ext.to_string_lossy().into_owned());

    self.props.set("FilePath", &path.to_string_lossy());
    self.props.set("FileDir", dir.as_deref().unwrap_or(""));
    self.props.set("FileName", stem.as_deref().unwrap_or(""));
    self.props.set("FileExt", ext.as_deref().unwrap_or(""));
  }

  pub fn opened(&self) -> &[String] {
    &self.opened
  }

  pub fn strips(&self) -> &[String] {
    &self.strips
  }

  pub fn printed(&self) -> &[String] {
    &self.printed
  }
}

impl Host for MemoryHost {
  fn focused_pane(&self) -> PaneId {
    self.focus
  }

  fn pane(&self, pane: PaneId) -> &dyn Pane {
    match pane {
      PaneId::Editor => &self.editor,
      PaneId::Output => &self.output,
    }
  }

  fn pane_mut(&mut self, pane: PaneId) -> &mut dyn Pane {
    match pane {
      PaneId::Editor => &mut self.editor,
      PaneId::Output => &mut self.output,
    }
  }

  fn props(&self) -> &dyn PropertyStore {
    &self.props
  }

  fn props_mut(&mut self) -> &mut dyn PropertyStore {
    &mut self.props
  }

  fn open(&mut self, path: &str) {
    self.opened.push(path.to_string());
    self.set_current_file(path);
  }

  fn strip_show(&mut self, description: &str) {
    self.strips.push(description.to_string());
  }

  fn print(&mut self, text: &str) {
    self.printed.push(text.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lines_follow_the_eol_mode() {
    let mut pane = MemoryPane::new().with_eol_mode(EolMode::CrLf);
    pane.set_text("first\r\nsecond\r\nthird");

    assert_eq!(pane.line_from_position(pane.current_pos()), 2);
    assert_eq!(pane.line(0).as_deref(), Some("first\r\n"));
    assert_eq!(pane.line(2).as_deref(), Some("third"));
    assert_eq!(pane.line(3), None);
  }

  #[test]
  fn typing_moves_the_caret() {
    let mut pane = MemoryPane::new();
    pane.type_text("abc");
    pane.set_caret(1);
    pane.type_text("\n");
    assert_eq!(pane.text(), "a\nbc");
    assert_eq!(pane.current_pos(), 2);
    assert_eq!(pane.line_from_position(pane.current_pos()), 1);
  }

  #[test]
  fn current_file_properties_are_derived_from_the_path() {
    let mut host = MemoryHost::new();
    host.open("/src/main.cpp");

    assert_eq!(host.props.get("FilePath").as_deref(), Some("/src/main.cpp"));
    assert_eq!(host.props.get("FileDir").as_deref(), Some("/src"));
    assert_eq!(host.props.get("FileName").as_deref(), Some("main"));
    assert_eq!(host.props.get("FileExt").as_deref(), Some("cpp"));
    assert_eq!(host.opened(), ["/src/main.cpp"]);
  }
}
