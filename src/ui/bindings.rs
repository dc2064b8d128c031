//! Key bindings
//!
//! One table maps keys to dashboard commands. The UI loop looks keys up here
//! and the footer renders its help line from the same table.

use crate::actions::ControlAction;
use crossterm::event::KeyCode;

/// What a key press on the dashboard asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Refresh,
    Control(ControlAction),
    /// Apply the patch under the cursor.
    ApplySelected,
    /// Roll back the patch under the cursor.
    RollbackSelected,
    OpenPatchForm,
    SelectNext,
    SelectPrevious,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub keys: &'static [KeyCode],
    /// Shown in the footer; `None` hides the binding from the help line.
    pub hint: Option<&'static str>,
    pub command: Command,
}

pub const DASHBOARD_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        keys: &[KeyCode::Char('r'), KeyCode::F(5)],
        hint: Some("[R] Refresh"),
        command: Command::Refresh,
    },
    KeyBinding {
        keys: &[KeyCode::Char('p')],
        hint: Some("[P] Pause"),
        command: Command::Control(ControlAction::Pause),
    },
    KeyBinding {
        keys: &[KeyCode::Char('u')],
        hint: Some("[U] Resume"),
        command: Command::Control(ControlAction::Resume),
    },
    KeyBinding {
        keys: &[KeyCode::Char('a')],
        hint: Some("[A] Apply"),
        command: Command::ApplySelected,
    },
    KeyBinding {
        keys: &[KeyCode::Char('b')],
        hint: Some("[B] Rollback"),
        command: Command::RollbackSelected,
    },
    KeyBinding {
        keys: &[KeyCode::Char('n')],
        hint: Some("[N] New patch"),
        command: Command::OpenPatchForm,
    },
    KeyBinding {
        keys: &[KeyCode::Down, KeyCode::Char('j')],
        hint: Some("[↑↓] Select"),
        command: Command::SelectNext,
    },
    KeyBinding {
        keys: &[KeyCode::Up, KeyCode::Char('k')],
        hint: None,
        command: Command::SelectPrevious,
    },
    KeyBinding {
        keys: &[KeyCode::Char('q'), KeyCode::Esc],
        hint: Some("[Q] Quit"),
        command: Command::Quit,
    },
];

pub fn lookup(code: KeyCode) -> Option<Command> {
    DASHBOARD_BINDINGS
        .iter()
        .find(|binding| binding.keys.contains(&code))
        .map(|binding| binding.command)
}

/// Footer help text built from the visible bindings.
pub fn help_line() -> String {
    DASHBOARD_BINDINGS
        .iter()
        .filter_map(|binding| binding.hint)
        .collect::<Vec<_>>()
        .join(" | ")
}
