use heapless::Vec;
use log::debug;

use crate::error::{Error, Result};
use crate::event::*;

/// Max number of edges in a cam cycle
pub const CAM_EVENT_CAPACITY: usize = 32;

/// Cam pattern as a list of `(angle, edge)` pairs, laid out as follows:
///
/// ```text
/// Level
/// ^
/// 0r     1f     2r               3f             4r
/// |------+      +----------------+              +------
/// |  ag0 |  ag1 |      ag2       |     ag3      |  ag4
/// |      |      |                |              |
/// +------+------+----------------+--------------+------> Ag
/// ```
///
/// The first angle is measured from the reference point (the crank gap), the
/// last one from the last edge to 720°. Angles are deci-degrees.
#[derive(Debug)]
pub struct CamConfig {
    pub events: &'static [(u32, Edge)],
}

#[derive(Debug)]
pub struct CamWheel {
    pub events: Vec<WheelEvent, CAM_EVENT_CAPACITY>,
    pub cfg: &'static CamConfig,
}

impl CamWheel {
    pub fn new(cfg: &'static CamConfig) -> Result<CamWheel> {
        if cfg.events.is_empty() {
            return Err(Error::NoCamEvents);
        }
        if cfg.events.len() > CAM_EVENT_CAPACITY {
            return Err(Error::TooManyEvents {
                events: cfg.events.len(),
                capacity: CAM_EVENT_CAPACITY,
            });
        }

        // u64 cannot overflow with at most CAM_EVENT_CAPACITY u32 angles
        let total: u64 = cfg.events.iter().map(|&(ag, _)| ag as u64).sum();
        if total != CAM_CYCLE_DECI_DEG as u64 {
            return Err(Error::CamCycleMismatch {
                total,
                expected: CAM_CYCLE_DECI_DEG,
            });
        }

        let mut cam = CamWheel {
            events: Vec::new(),
            cfg,
        };
        for (idx, &(delta, edge)) in cfg.events.iter().enumerate() {
            let _ = cam.events.push(WheelEvent {
                id: idx as u8,
                delta,
                edge,
                active: true,
            });
        }

        debug!("cam wheel with {} events", cam.events.len());

        Ok(cam)
    }
}

/// Endless sequence of cam events, ids restart at 0 every cycle.
#[derive(Debug)]
pub struct CamSignal {
    pos: usize,
    cam: CamWheel,
}

impl CamSignal {
    pub fn new(cfg: &'static CamConfig) -> Result<CamSignal> {
        Ok(CamSignal {
            pos: 0,
            cam: CamWheel::new(cfg)?,
        })
    }

    pub fn wheel(&self) -> &CamWheel {
        &self.cam
    }
}

impl Iterator for CamSignal {
    type Item = WheelEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let ev = *self.cam.events.get(self.pos)?;
        self.pos += 1;
        if self.pos >= self.cam.events.len() {
            self.pos = 0;
        }
        Some(ev)
    }
}
