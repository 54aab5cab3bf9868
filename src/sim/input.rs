use bitflags::bitflags;
use smallvec::SmallVec;

use crate::world::PlayerState;

bitflags! {
    /// Held-key state, sampled once per tic by the host.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Intent: u8 {
        const FORWARD    = 0x01;
        const BACKWARD   = 0x02;
        const TURN_LEFT  = 0x04;
        const TURN_RIGHT = 0x08;
    }
}

/// One discrete player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveForward,
    MoveBackward,
    TurnLeft,
    TurnRight,
}

/// Commands of a single tic; never more than one per intent bit.
pub type Commands = SmallVec<[Command; 4]>;

impl Intent {
    /// Expand to commands: moves first, then turns.
    pub fn commands(self) -> Commands {
        let mut out = Commands::new();
        if self.contains(Intent::FORWARD) {
            out.push(Command::MoveForward);
        }
        if self.contains(Intent::BACKWARD) {
            out.push(Command::MoveBackward);
        }
        if self.contains(Intent::TURN_LEFT) {
            out.push(Command::TurnLeft);
        }
        if self.contains(Intent::TURN_RIGHT) {
            out.push(Command::TurnRight);
        }
        out
    }
}

impl Command {
    pub fn apply(self, player: &mut PlayerState) {
        match self {
            Command::MoveForward => player.move_forward(),
            Command::MoveBackward => player.move_backward(),
            Command::TurnLeft => player.turn_left(),
            Command::TurnRight => player.turn_right(),
        }
    }

    /// Parse a compact command script: `f`/`w` forward, `b`/`s` back,
    /// `l`/`a` left, `r`/`d` right. Other characters are rejected.
    pub fn parse_script(script: &str) -> Result<Vec<Command>, char> {
        script
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c.to_ascii_lowercase() {
                'f' | 'w' => Ok(Command::MoveForward),
                'b' | 's' => Ok(Command::MoveBackward),
                'l' | 'a' => Ok(Command::TurnLeft),
                'r' | 'd' => Ok(Command::TurnRight),
                _ => Err(c),
            })
            .collect()
    }
}

/// Apply every command of `intent` to `player`, in order.
pub fn player_input(player: &mut PlayerState, intent: Intent) {
    for cmd in intent.commands() {
        cmd.apply(player);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
