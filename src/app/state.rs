use std::rc::Rc;

use crossbeam_channel::{Receiver, Sender};
use indexmap::IndexMap;
use serde::Serialize;

use crate::app::editor::{EditorField, GiftEditor, RemoveGift};
use crate::gifts::{GiftId, GiftList, GiftRecord};

/// Flattened view of one gift and the text its editor currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftEntry {
    pub id: GiftId,
    pub person: String,
    pub present: String,
}

#[derive(Debug)]
pub struct AppState {
    pub gifts: GiftList,
    pub selected: usize,
    pub focus: EditorField,
    pub status_message: Option<String>,
    pub max_field_len: usize,
    editors: IndexMap<GiftId, GiftEditor>,
    generations: IndexMap<GiftId, u64>,
    next_generation: u64,
    removals_tx: Sender<RemovalRequest>,
    removals_rx: Receiver<RemovalRequest>,
}

/// Removal raised by one editor instance. `generation` tells a live editor
/// apart from an earlier one that held the same (reused) id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RemovalRequest {
    id: GiftId,
    generation: u64,
}

impl AppState {
    pub fn new(max_field_len: usize) -> Self {
        let (removals_tx, removals_rx) = crossbeam_channel::unbounded();
        Self {
            gifts: GiftList::new(),
            selected: 0,
            focus: EditorField::Person,
            status_message: None,
            max_field_len,
            editors: IndexMap::new(),
            generations: IndexMap::new(),
            next_generation: 0,
            removals_tx,
            removals_rx,
        }
    }

    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    pub fn editor(&self, id: GiftId) -> Option<&GiftEditor> {
        self.editors.get(&id)
    }

    pub fn editor_mut(&mut self, id: GiftId) -> Option<&mut GiftEditor> {
        self.editors.get_mut(&id)
    }

    pub fn selected_id(&self) -> Option<GiftId> {
        self.gifts.as_slice().get(self.selected).map(|gift| gift.id)
    }

    pub fn selected_editor(&self) -> Option<&GiftEditor> {
        self.selected_id().and_then(|id| self.editors.get(&id))
    }

    pub fn selected_editor_mut(&mut self) -> Option<&mut GiftEditor> {
        let id = self.selected_id()?;
        self.editors.get_mut(&id)
    }

    pub fn entries(&self) -> Vec<GiftEntry> {
        self.gifts
            .iter()
            .map(|gift| {
                let editor = self.editors.get(&gift.id);
                GiftEntry {
                    id: gift.id,
                    person: editor.map(|e| e.person().to_string()).unwrap_or_default(),
                    present: editor.map(|e| e.present().to_string()).unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn add_gift(&mut self) -> GiftRecord {
        let gift = self.gifts.add_gift();
        let generation = self.next_generation;
        self.next_generation += 1;
        let editor = GiftEditor::new(gift, self.remove_callback(generation));
        self.editors.insert(gift.id, editor);
        self.generations.insert(gift.id, generation);
        self.selected = self.gifts.len().saturating_sub(1);
        self.focus = EditorField::Person;
        gift
    }

    pub fn remove_gift(&mut self, id: GiftId) -> bool {
        let removed = self.gifts.remove_gift(id).is_some();
        self.editors.shift_remove(&id);
        self.generations.shift_remove(&id);
        self.normalize_selection();
        removed
    }

    /// Asks the selected gift's editor to request its own removal.
    pub fn request_remove_selected(&mut self) -> Option<GiftId> {
        let editor = self.selected_editor()?;
        editor.on_remove_requested();
        Some(editor.gift_id())
    }

    /// Applies removals raised by editors since the last call. Requests from
    /// editors that are no longer mounted are dropped.
    pub fn process_removals(&mut self) -> usize {
        let pending: Vec<RemovalRequest> = self.removals_rx.try_iter().collect();
        let mut removed = 0;
        for request in pending {
            if self.generations.get(&request.id) != Some(&request.generation) {
                tracing::debug!(gift_id = request.id, "stale removal request dropped");
                continue;
            }
            if self.remove_gift(request.id) {
                removed += 1;
            }
        }
        removed
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.gifts.is_empty() {
            return;
        }
        let len = self.gifts.len() as isize;
        let next = (self.selected as isize + delta).clamp(0, len - 1);
        self.selected = next as usize;
    }

    pub fn select_gift_by_id(&mut self, id: GiftId) {
        if let Some(idx) = self.gifts.position(id) {
            self.selected = idx;
        } else {
            self.normalize_selection();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    pub fn type_char(&mut self, ch: char) -> bool {
        let field = self.focus;
        let max_len = self.max_field_len;
        self.selected_editor_mut()
            .map(|editor| editor.push_char(field, ch, max_len))
            .unwrap_or(false)
    }

    pub fn backspace(&mut self) -> bool {
        let field = self.focus;
        self.selected_editor_mut()
            .map(|editor| editor.pop_char(field))
            .unwrap_or(false)
    }

    pub fn set_status_message<S: Into<String>>(&mut self, message: Option<S>) {
        self.status_message = message.map(Into::into);
    }

    fn remove_callback(&self, generation: u64) -> RemoveGift {
        let tx = self.removals_tx.clone();
        Rc::new(move |id| {
            if let Err(err) = tx.send(RemovalRequest { id, generation }) {
                tracing::error!(?err, gift_id = id, "failed to queue gift removal");
            }
        })
    }

    fn normalize_selection(&mut self) {
        if self.gifts.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.gifts.len() {
            self.selected = self.gifts.len() - 1;
        }
    }
}
