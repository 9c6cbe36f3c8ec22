use std::{
    collections::VecDeque,
    fs,
    io,
    path::Path,
};

use log::warn;

use super::{Command, InputSource};

/// Commands replayed from a text script. Blank lines and lines starting with
/// `#` are skipped; every other character is one command.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    commands: VecDeque<Command>,
}

impl ScriptedInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let script = fs::read_to_string(path)?;
        Ok(Self::parse(&script))
    }

    pub fn parse(script: &str) -> Self {
        let mut commands = VecDeque::new();
        for line in script.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                match Command::from_char(c) {
                    Some(command) => commands.push_back(command),
                    None => warn!("unknown key in script: {c:?}"),
                }
            }
        }
        Self { commands }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.commands.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn next_command(&mut self) -> Option<Command> {
        self.commands.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Direction;

    #[test]
    fn comments_and_unknown_keys_are_skipped() {
        let mut script = ScriptedInput::parse("# opening\n1\n\n> > ?t\n");
        assert_eq!(script.remaining(), 4);
        assert_eq!(script.next_command(), Some(Command::Select(1)));
        assert_eq!(script.next_command(), Some(Command::Move(Direction::East)));
        assert_eq!(script.next_command(), Some(Command::Move(Direction::East)));
        assert_eq!(script.next_command(), Some(Command::Take));
        assert_eq!(script.next_command(), None);
        assert!(script.is_exhausted());
    }
}
