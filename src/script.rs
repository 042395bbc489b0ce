use std::str::FromStr;

use thiserror::Error;

use crate::app::editor::EditorField;
use crate::app::state::AppState;
use crate::gifts::GiftId;

/// One scripted interaction, as accepted by `giftgiver replay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Add,
    Remove(GiftId),
    Edit {
        id: GiftId,
        field: EditorField,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepParseError {
    #[error("empty step")]
    Empty,
    #[error("unknown step '{0}' (expected add, remove=<id>, person=<id>:<text> or present=<id>:<text>)")]
    UnknownVerb(String),
    #[error("invalid gift id '{0}'")]
    InvalidId(String),
    #[error("step '{0}' is missing ':' between id and text")]
    MissingText(String),
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(StepParseError::Empty);
        }
        let (verb, arg) = match raw.split_once('=') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (raw, None),
        };
        match (verb.to_ascii_lowercase().as_str(), arg) {
            ("add", None) => Ok(Step::Add),
            ("remove", Some(id)) => parse_id(id).map(Step::Remove),
            ("person", Some(arg)) => parse_edit(raw, arg, EditorField::Person),
            ("present", Some(arg)) => parse_edit(raw, arg, EditorField::Present),
            _ => Err(StepParseError::UnknownVerb(raw.to_string())),
        }
    }
}

pub fn parse_steps<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Step>, StepParseError> {
    raw.iter().map(|step| step.as_ref().parse()).collect()
}

/// Applies `step` to `state`; edits aimed at unknown gifts are skipped.
pub fn apply_step(state: &mut AppState, step: &Step) {
    match step {
        Step::Add => {
            state.add_gift();
        }
        Step::Remove(id) => {
            if let Some(editor) = state.editor(*id) {
                editor.on_remove_requested();
            } else {
                tracing::debug!(gift_id = id, "remove step for unknown gift");
            }
            state.process_removals();
        }
        Step::Edit { id, field, text } => match state.editor_mut(*id) {
            Some(editor) => editor.on_field_change(*field, text.as_str()),
            None => tracing::warn!(gift_id = id, %field, "edit step for unknown gift ignored"),
        },
    }
}

fn parse_id(raw: &str) -> Result<GiftId, StepParseError> {
    raw.trim()
        .parse()
        .map_err(|_| StepParseError::InvalidId(raw.to_string()))
}

fn parse_edit(raw: &str, arg: &str, field: EditorField) -> Result<Step, StepParseError> {
    let (id, text) = arg
        .split_once(':')
        .ok_or_else(|| StepParseError::MissingText(raw.to_string()))?;
    Ok(Step::Edit {
        id: parse_id(id)?,
        field,
        text: text.to_string(),
    })
}
