mod input;
mod tic;

pub use input::{Command, Commands, Intent, player_input};
pub use tic::{Frame, FrameDriver, SIM_FPS, TicRunner};
