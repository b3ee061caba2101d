//! Software model of the compare-output timer driving the crank and cam pins.
//!
//! The prescaler is chosen so that one counter tick is one deci-degree at the
//! current speed, which lets wheel angles be written straight into the
//! compare registers.

use conversion::{deg_s_to_rpm, speed_time_to_angle};
use log::{debug, warn};

use crate::cam::CamSignal;
use crate::crank::CrankSignal;
use crate::event::*;
use crate::generator::SignalGenerator;

/// Counter period, ticks
pub const AUTORELOAD: u32 = 36_000;

const DECI_DEG_PER_DEG: f64 = 10.0;

fn wrapping_add(cv: u32, a: u32, lim: u32) -> u32 {
    (cv + a) % lim
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Crank,
    Cam,
}

impl Channel {
    fn idx(self) -> usize {
        match self {
            Channel::Crank => 0,
            Channel::Cam => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum OutputMode {
    Frozen,
    ActiveOnMatch,
    InactiveOnMatch,
}

#[derive(Debug, Copy, Clone)]
struct ChannelState {
    ccr: u16,
    mode: OutputMode,
    level: bool,
    // Absolute angles of the last and the next compare match
    last_match: u64,
    next_match: u64,
}

impl ChannelState {
    const fn new() -> ChannelState {
        ChannelState {
            ccr: 0,
            mode: OutputMode::Frozen,
            level: false,
            last_match: 0,
            next_match: 0,
        }
    }

    /// Apply the programmed output mode, returns the edge if the level moved.
    fn fire(&mut self) -> Option<Edge> {
        match self.mode {
            OutputMode::ActiveOnMatch if !self.level => {
                self.level = true;
                Some(Edge::Rising)
            }
            OutputMode::InactiveOnMatch if self.level => {
                self.level = false;
                Some(Edge::Falling)
            }
            _ => None,
        }
    }
}

/// A level change on one of the outputs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OutputEdge {
    pub channel: Channel,
    /// Deci-degrees since start
    pub angle: u64,
    /// Seconds since start
    pub at_s: f64,
    pub edge: Edge,
}

pub struct SimTimer {
    cam: Option<CamSignal>,
    crank: Option<CrankSignal>,
    prescaler: u16,
    /// Generation speed, rpm
    speed: u32,
    /// Timer clock frequency, Hz
    freq: u32,
    angle: u64,
    elapsed_s: f64,
    channels: [ChannelState; 2],
    running: bool,
}

impl SimTimer {
    /// `freq` is the timer clock in Hz. A timer with a zero clock never starts.
    pub const fn new(freq: u32) -> SimTimer {
        SimTimer {
            cam: None,
            crank: None,
            prescaler: 0xFFFF,
            speed: 0,
            freq,
            angle: 0,
            elapsed_s: 0.0,
            channels: [ChannelState::new(); 2],
            running: false,
        }
    }

    pub fn prescaler(&self) -> u16 {
        self.prescaler
    }

    pub fn speed_rpm(&self) -> u32 {
        self.speed
    }

    /// Speed actually produced with the current prescaler.
    pub fn actual_speed_rpm(&self) -> f64 {
        let ticks_per_s = self.freq as f64 / (self.prescaler as f64 + 1.0);
        deg_s_to_rpm(ticks_per_s / DECI_DEG_PER_DEG)
    }

    pub fn counter(&self) -> u32 {
        (self.angle % AUTORELOAD as u64) as u32
    }

    pub fn compare(&self, channel: Channel) -> u16 {
        self.channels[channel.idx()].ccr
    }

    /// Output level of a channel, `true` is high.
    pub fn level(&self, channel: Channel) -> bool {
        self.channels[channel.idx()].level
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    fn tick_s(&self) -> f64 {
        (self.prescaler as f64 + 1.0) / self.freq as f64
    }

    fn advance_to(&mut self, angle: u64) {
        self.elapsed_s += (angle - self.angle) as f64 * self.tick_s();
        self.angle = angle;
    }

    fn program(&mut self, channel: Channel, ev: WheelEvent) {
        let st = &mut self.channels[channel.idx()];

        st.next_match = st.last_match + ev.delta as u64;
        st.ccr = wrapping_add(
            (st.last_match % AUTORELOAD as u64) as u32,
            ev.delta,
            AUTORELOAD,
        ) as u16;

        st.mode = if !ev.active {
            OutputMode::Frozen
        } else {
            match ev.edge {
                Edge::Rising => OutputMode::ActiveOnMatch,
                Edge::Falling => OutputMode::InactiveOnMatch,
            }
        };
    }

    fn resync_crank(&mut self) {
        if let Some(crank) = self.crank.as_mut() {
            crank.reset();
        }
        let cycle_start = self.channels[Channel::Cam.idx()].last_match;
        self.channels[Channel::Crank.idx()].last_match = cycle_start;
        self.set_next_crank_event();
    }
}

impl SignalGenerator for SimTimer {
    fn initialize(&mut self, cam: CamSignal, crank: CrankSignal) {
        let mut crank_st = ChannelState::new();
        if let Some(ev) = crank.wheel().events.first() {
            crank_st.level = ev.edge.level_before();
        }
        let mut cam_st = ChannelState::new();
        if let Some(ev) = cam.wheel().events.first() {
            cam_st.level = ev.edge.level_before();
        }

        self.channels = [crank_st, cam_st];
        self.cam = Some(cam);
        self.crank = Some(crank);
        self.angle = 0;
        self.elapsed_s = 0.0;
        self.running = false;
    }

    fn set_speed_rpm(&mut self, rpm: u32) {
        self.speed = if rpm > 0 { rpm } else { 1 };

        let ticks_per_s = speed_time_to_angle(self.speed as f64, 1.0) * DECI_DEG_PER_DEG;
        // Round to the nearest divider, the ratio is never negative
        let div = (self.freq as f64 / ticks_per_s + 0.5) as u64;
        self.prescaler = (div.clamp(1, 0x1_0000) - 1) as u16;

        debug!("speed {} rpm, prescaler {}", self.speed, self.prescaler);
    }

    fn set_next_crank_event(&mut self) {
        let Some(ev) = self.crank.as_mut().and_then(|crank| crank.next()) else {
            return;
        };
        self.program(Channel::Crank, ev);
    }

    fn set_next_cam_event(&mut self) {
        let Some(ev) = self.cam.as_mut().and_then(|cam| cam.next()) else {
            return;
        };
        self.program(Channel::Cam, ev);

        // A new cam cycle starts, realign the crank on it
        if ev.id == 0 {
            self.resync_crank();
        }
    }

    fn start(&mut self) {
        if self.crank.is_none() || self.cam.is_none() {
            warn!("timer started before being initialized");
            return;
        }
        if self.freq == 0 {
            warn!("timer started without a clock");
            return;
        }

        self.set_next_crank_event();
        self.set_next_cam_event();
        self.running = true;
    }
}

impl Iterator for SimTimer {
    type Item = OutputEdge;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.running {
            return None;
        }

        loop {
            let crank_at = self.channels[Channel::Crank.idx()].next_match;
            let cam_at = self.channels[Channel::Cam.idx()].next_match;
            let channel = if crank_at <= cam_at {
                Channel::Crank
            } else {
                Channel::Cam
            };

            let at = crank_at.min(cam_at);
            self.advance_to(at);

            let st = &mut self.channels[channel.idx()];
            let fired = st.fire();
            st.last_match = at;

            match channel {
                Channel::Crank => self.set_next_crank_event(),
                Channel::Cam => self.set_next_cam_event(),
            }

            if let Some(edge) = fired {
                return Some(OutputEdge {
                    channel,
                    angle: at,
                    at_s: self.elapsed_s,
                    edge,
                });
            }
        }
    }
}
