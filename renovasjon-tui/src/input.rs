use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `App::lookup_address` for the typed text
    LookupAddress,
    /// Run `App::refresh_collections` for the current address
    RefreshCollections,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Enter, Esc, Left};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::AddressInput => match key.code {
            // 'q' is a valid letter here, so Esc quits instead
            Esc => {
                action = Action::Quit;
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.address_input.push(character);
                }
            }
            Backspace => {
                app.address_input.pop();
            }
            Enter => {
                action = Action::LookupAddress;
            }
            _ => {}
        },

        Screen::Collections => match key.code {
            Char('q') => {
                action = Action::Quit;
            }
            Char('r') => {
                action = Action::RefreshCollections;
            }
            Left | Esc | Char('b') => {
                app.back_to_input();
            }
            _ => {}
        },
    }
    action
}
