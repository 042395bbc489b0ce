use std::fmt;
use std::rc::Rc;

use strum::{Display, EnumIter, IntoEnumIterator};
use unicode_segmentation::UnicodeSegmentation;

use crate::gifts::{GiftId, GiftRecord};

/// Removal capability handed to each editor by the list owner.
pub type RemoveGift = Rc<dyn Fn(GiftId)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum EditorField {
    Person,
    Present,
}

impl EditorField {
    pub fn next(self) -> Self {
        let fields: Vec<Self> = Self::iter().collect();
        let idx = fields.iter().position(|field| *field == self).unwrap_or(0);
        fields[(idx + 1) % fields.len()]
    }

    pub fn previous(self) -> Self {
        let fields: Vec<Self> = Self::iter().collect();
        let idx = fields.iter().position(|field| *field == self).unwrap_or(0);
        fields[(idx + fields.len() - 1) % fields.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    SetPerson(String),
    SetPresent(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    pub person: String,
    pub present: String,
}

impl EditorState {
    pub fn apply(self, action: EditorAction) -> Self {
        match action {
            EditorAction::SetPerson(person) => Self { person, ..self },
            EditorAction::SetPresent(present) => Self { present, ..self },
        }
    }

    pub fn field(&self, field: EditorField) -> &str {
        match field {
            EditorField::Person => &self.person,
            EditorField::Present => &self.present,
        }
    }
}

pub struct GiftEditor {
    gift: GiftRecord,
    state: EditorState,
    remove_gift: RemoveGift,
}

impl GiftEditor {
    pub fn new(gift: GiftRecord, remove_gift: RemoveGift) -> Self {
        Self {
            gift,
            state: EditorState::default(),
            remove_gift,
        }
    }

    pub fn gift(&self) -> &GiftRecord {
        &self.gift
    }

    pub fn gift_id(&self) -> GiftId {
        self.gift.id
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn person(&self) -> &str {
        &self.state.person
    }

    pub fn present(&self) -> &str {
        &self.state.present
    }

    pub fn dispatch(&mut self, action: EditorAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
    }

    pub fn on_person_change(&mut self, text: impl Into<String>) {
        self.dispatch(EditorAction::SetPerson(text.into()));
    }

    pub fn on_present_change(&mut self, text: impl Into<String>) {
        self.dispatch(EditorAction::SetPresent(text.into()));
    }

    pub fn on_field_change(&mut self, field: EditorField, text: impl Into<String>) {
        match field {
            EditorField::Person => self.on_person_change(text),
            EditorField::Present => self.on_present_change(text),
        }
    }

    pub fn on_remove_requested(&self) {
        (self.remove_gift)(self.gift.id);
    }

    /// Appends `ch` to `field` unless it already holds `max_len` graphemes.
    pub fn push_char(&mut self, field: EditorField, ch: char, max_len: usize) -> bool {
        let current = self.state.field(field);
        if current.graphemes(true).count() >= max_len {
            return false;
        }
        let mut text = current.to_string();
        text.push(ch);
        self.on_field_change(field, text);
        true
    }

    pub fn pop_char(&mut self, field: EditorField) -> bool {
        let current = self.state.field(field);
        let Some((idx, _)) = current.grapheme_indices(true).next_back() else {
            return false;
        };
        let text = current[..idx].to_string();
        self.on_field_change(field, text);
        true
    }
}

impl fmt::Debug for GiftEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GiftEditor")
            .field("gift", &self.gift)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{EditorAction, EditorField, EditorState, GiftEditor};
    use crate::gifts::GiftRecord;

    fn editor_with_log() -> (GiftEditor, Rc<RefCell<Vec<i64>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let editor = GiftEditor::new(
            GiftRecord { id: 1 },
            Rc::new(move |id| sink.borrow_mut().push(id)),
        );
        (editor, calls)
    }

    #[test]
    fn starts_with_empty_fields() {
        let (editor, _) = editor_with_log();
        assert_eq!(editor.state(), &EditorState::default());
        assert_eq!(editor.person(), "");
        assert_eq!(editor.present(), "");
    }

    #[test]
    fn person_change_leaves_present_alone() {
        let (mut editor, _) = editor_with_log();
        editor.on_present_change("Golf Clubs");
        editor.on_person_change("Uncle");
        assert_eq!(editor.person(), "Uncle");
        assert_eq!(editor.present(), "Golf Clubs");
    }

    #[test]
    fn present_change_leaves_person_alone() {
        let (mut editor, _) = editor_with_log();
        editor.on_person_change("Uncle");
        editor.on_present_change("Golf Clubs");
        assert_eq!(editor.person(), "Uncle");
        assert_eq!(editor.present(), "Golf Clubs");
    }

    #[test]
    fn changes_are_not_validated() {
        let (mut editor, _) = editor_with_log();
        editor.on_person_change("  ");
        assert_eq!(editor.person(), "  ");
        editor.on_person_change("");
        assert_eq!(editor.person(), "");
    }

    #[test]
    fn remove_request_calls_back_with_own_id_only() {
        let (mut editor, calls) = editor_with_log();
        editor.on_person_change("Uncle");
        editor.on_remove_requested();
        assert_eq!(*calls.borrow(), vec![1]);
        assert_eq!(editor.person(), "Uncle");
        assert_eq!(editor.present(), "");
    }

    #[test]
    fn apply_is_a_pure_transition() {
        let state = EditorState::default();
        let next = state
            .clone()
            .apply(EditorAction::SetPerson("Aunt".into()));
        assert_eq!(state, EditorState::default());
        assert_eq!(next.person, "Aunt");
        assert_eq!(next.present, "");
    }

    #[test]
    fn push_char_respects_grapheme_limit() {
        let (mut editor, _) = editor_with_log();
        assert!(editor.push_char(EditorField::Present, 'é', 2));
        assert!(editor.push_char(EditorField::Present, 'x', 2));
        assert!(!editor.push_char(EditorField::Present, 'y', 2));
        assert_eq!(editor.present(), "éx");
    }

    #[test]
    fn pop_char_removes_last_grapheme() {
        let (mut editor, _) = editor_with_log();
        editor.on_person_change("Ma\u{0301}");
        assert!(editor.pop_char(EditorField::Person));
        assert_eq!(editor.person(), "M");
        assert!(editor.pop_char(EditorField::Person));
        assert!(!editor.pop_char(EditorField::Person));
    }

    #[test]
    fn fields_cycle() {
        assert_eq!(EditorField::Person.next(), EditorField::Present);
        assert_eq!(EditorField::Present.next(), EditorField::Person);
        assert_eq!(EditorField::Present.previous(), EditorField::Person);
    }
}
