use heapless::Deque;
use log::debug;
use serde::{Deserialize, Serialize};

/// Max number of commands waiting in a [SpeedManager]
pub const SPEED_QUEUE_LEN: usize = 10;

/// Period at which [SpeedManager::next_speed] is expected to be called
pub const TIME_RES_MS: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedCommand {
    /// Jump to a fixed speed, rpm
    Fixed(u32),
    /// Ramp linearly to `rpm` in `ms` milliseconds
    Ramp { rpm: u32, ms: u32 },
    /// Increment the current speed by the given rpm
    Inc(u32),
    /// Decrement the current speed by the given rpm, stops at 0
    Dec(u32),
}

#[derive(Debug, Copy, Clone)]
struct Ramp {
    dest: u32,
    rem_steps: u32,
}

/// Runs queued speed commands one after the other.
#[derive(Debug, Default)]
pub struct SpeedManager {
    cur_spd: u32,
    cmds: Deque<SpeedCommand, SPEED_QUEUE_LEN>,
    ramp: Option<Ramp>,
}

impl SpeedManager {
    pub fn new() -> SpeedManager {
        SpeedManager::default()
    }

    /// Queue a command, the command is handed back if the queue is full.
    pub fn add_command(&mut self, cmd: SpeedCommand) -> Result<(), SpeedCommand> {
        self.cmds.push_back(cmd)
    }

    /// Drop every pending command and any running ramp, then queue `cmd`.
    pub fn force_command(&mut self, cmd: SpeedCommand) {
        self.cmds.clear();
        self.ramp = None;
        // Cannot fail, the queue has just been cleared
        let _ = self.cmds.push_back(cmd);
    }

    pub fn current_speed(&self) -> u32 {
        self.cur_spd
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    pub fn pending(&self) -> usize {
        self.cmds.len()
    }

    /// Advance by one [TIME_RES_MS] period and return the speed to apply now.
    ///
    /// A new command is only taken once the running ramp has reached its
    /// destination.
    pub fn next_speed(&mut self) -> u32 {
        if self.ramp.is_none() {
            if let Some(cmd) = self.cmds.pop_front() {
                self.start_command(cmd);
            }
        }

        let mut done = false;
        if let Some(ramp) = self.ramp.as_mut() {
            let cur = self.cur_spd as i64;
            let step = (ramp.dest as i64 - cur) / ramp.rem_steps as i64;
            ramp.rem_steps -= 1;
            if ramp.rem_steps == 0 {
                self.cur_spd = ramp.dest;
                done = true;
            } else {
                self.cur_spd = (cur + step) as u32;
            }
        }
        if done {
            self.ramp = None;
        }

        self.cur_spd
    }

    fn start_command(&mut self, cmd: SpeedCommand) {
        debug!("speed command {:?} at {} rpm", cmd, self.cur_spd);

        match cmd {
            SpeedCommand::Fixed(rpm) => self.cur_spd = rpm,
            SpeedCommand::Inc(rpm) => self.cur_spd = self.cur_spd.saturating_add(rpm),
            SpeedCommand::Dec(rpm) => self.cur_spd = self.cur_spd.saturating_sub(rpm),
            SpeedCommand::Ramp { rpm, ms } => {
                let steps = ms.div_ceil(TIME_RES_MS);
                if steps == 0 {
                    self.cur_spd = rpm;
                } else {
                    self.ramp = Some(Ramp {
                        dest: rpm,
                        rem_steps: steps,
                    });
                }
            }
        }
    }
}
