pub mod scripted;

use bracket_terminal::prelude::{BTerm, VirtualKeyCode};

use crate::map::Direction;

pub use scripted::ScriptedInput;

/// One discrete player request. What it means depends on the current mode:
/// `Select` picks menu entries and `Quit` backs out of prompts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Look,
    Inventory,
    Take,
    Face,
    Talk,
    Mirror,
    Undo,
    Hint,
    Save,
    Load,
    Help,
    Quit,
    Select(u8),
}

impl Command {
    /// Script alphabet: `^ v < >` or upper-case `WASD` move, lower-case letters
    /// are commands, digits select.
    pub fn from_char(c: char) -> Option<Self> {
        let command = match c {
            '^' | 'W' => Command::Move(Direction::North),
            'v' | 'S' => Command::Move(Direction::South),
            '<' | 'A' => Command::Move(Direction::West),
            '>' | 'D' => Command::Move(Direction::East),
            'l' => Command::Look,
            'i' => Command::Inventory,
            't' => Command::Take,
            'f' => Command::Face,
            'k' => Command::Talk,
            'x' => Command::Mirror,
            'u' => Command::Undo,
            'n' => Command::Hint,
            's' => Command::Save,
            'o' => Command::Load,
            'h' => Command::Help,
            'q' | '\x1B' => Command::Quit,
            '1'..='9' => Command::Select(c as u8 - b'0'),
            _ => return None,
        };
        Some(command)
    }

    pub fn from_key(key: VirtualKeyCode) -> Option<Self> {
        let command = match key {
            VirtualKeyCode::Up => Command::Move(Direction::North),
            VirtualKeyCode::Down => Command::Move(Direction::South),
            VirtualKeyCode::Left => Command::Move(Direction::West),
            VirtualKeyCode::Right => Command::Move(Direction::East),
            VirtualKeyCode::L => Command::Look,
            VirtualKeyCode::I => Command::Inventory,
            VirtualKeyCode::T => Command::Take,
            VirtualKeyCode::F => Command::Face,
            VirtualKeyCode::K => Command::Talk,
            VirtualKeyCode::X => Command::Mirror,
            VirtualKeyCode::U => Command::Undo,
            VirtualKeyCode::N => Command::Hint,
            VirtualKeyCode::S => Command::Save,
            VirtualKeyCode::O => Command::Load,
            VirtualKeyCode::H => Command::Help,
            VirtualKeyCode::Q | VirtualKeyCode::Escape => Command::Quit,
            VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => Command::Select(1),
            VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => Command::Select(2),
            VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => Command::Select(3),
            VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => Command::Select(4),
            VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => Command::Select(5),
            VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => Command::Select(6),
            VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => Command::Select(7),
            VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => Command::Select(8),
            VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => Command::Select(9),
            _ => return None,
        };
        Some(command)
    }
}

pub trait InputSource {
    /// `None` when no command is available right now.
    fn next_command(&mut self) -> Option<Command>;
}

/// Reads the key pressed during the current terminal frame.
pub struct Keyboard<'a> {
    ctx: &'a BTerm,
}

impl<'a> Keyboard<'a> {
    pub fn new(ctx: &'a BTerm) -> Self {
        Self { ctx }
    }
}

impl InputSource for Keyboard<'_> {
    fn next_command(&mut self) -> Option<Command> {
        self.ctx.key.and_then(Command::from_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_alphabet_covers_every_command() {
        let commands: Vec<Command> = "^v<>WASDltfkxunsohq19"
            .chars()
            .filter_map(Command::from_char)
            .collect();
        assert_eq!(commands.len(), 21);
        assert_eq!(commands[4], Command::Move(Direction::North));
        assert_eq!(commands[20], Command::Select(9));
    }

    #[test]
    fn digits_zero_and_stray_letters_are_ignored() {
        assert_eq!(Command::from_char('0'), None);
        assert_eq!(Command::from_char('z'), None);
        assert_eq!(Command::from_key(VirtualKeyCode::Z), None);
        assert_eq!(
            Command::from_key(VirtualKeyCode::Numpad3),
            Some(Command::Select(3))
        );
    }
}
