use heapless::Vec;
use log::debug;

use crate::error::{Error, Result};
use crate::event::*;

/// Max number of edges on a crank wheel, two per tooth
pub const CRANK_EVENT_CAPACITY: usize = 240;

#[derive(Debug)]
pub struct CrankConfig {
    pub teeth: u8,
    pub missing_teeth: u8,
    /// Edge produced at the start of each tooth
    pub main_edge: Edge,
}

impl CrankConfig {
    pub const fn new(teeth: u8, missing_teeth: u8, main_edge: Edge) -> CrankConfig {
        CrankConfig {
            teeth,
            missing_teeth,
            main_edge,
        }
    }
}

/// Edges of a toothed crank wheel with a gap of missing teeth at the end.
///
/// Every tooth gives two events half a pitch apart: the main edge then its
/// inverse. The events of the missing teeth are kept, marked inactive, so
/// the gap still consumes its angle.
#[derive(Debug)]
pub struct CrankWheel {
    pub events: Vec<WheelEvent, CRANK_EVENT_CAPACITY>,
    pub cfg: &'static CrankConfig,
}

impl CrankWheel {
    pub fn new(cfg: &'static CrankConfig) -> Result<CrankWheel> {
        if cfg.teeth == 0 {
            return Err(Error::NoTeeth);
        }
        if cfg.missing_teeth >= cfg.teeth {
            return Err(Error::TooManyMissingTeeth {
                teeth: cfg.teeth,
                missing: cfg.missing_teeth,
            });
        }

        let event_nr = cfg.teeth as usize * 2;
        if event_nr > CRANK_EVENT_CAPACITY {
            return Err(Error::TooManyEvents {
                events: event_nr,
                capacity: CRANK_EVENT_CAPACITY,
            });
        }
        if DECI_DEG_PER_REV % event_nr as u32 != 0 {
            return Err(Error::UnevenPitch { teeth: cfg.teeth });
        }

        let half_pitch = DECI_DEG_PER_REV / event_nr as u32;
        let active_nr = (cfg.teeth - cfg.missing_teeth) as usize * 2;

        let mut crank = CrankWheel {
            events: Vec::new(),
            cfg,
        };
        for idx in 0..event_nr {
            let edge = if idx % 2 == 0 {
                cfg.main_edge
            } else {
                !cfg.main_edge
            };
            // Capacity was checked above
            let _ = crank.events.push(WheelEvent {
                id: idx as u8,
                delta: half_pitch,
                edge,
                active: idx < active_nr,
            });
        }

        debug!(
            "crank wheel {}-{}, half pitch {}",
            cfg.teeth, cfg.missing_teeth, half_pitch
        );

        Ok(crank)
    }

    pub fn teeth(&self) -> u8 {
        self.cfg.teeth
    }
}

/// Endless sequence of crank wheel events.
#[derive(Debug)]
pub struct CrankSignal {
    pos: usize,
    crank: CrankWheel,
}

impl CrankSignal {
    pub fn new(cfg: &'static CrankConfig) -> Result<CrankSignal> {
        Ok(CrankSignal {
            pos: 0,
            crank: CrankWheel::new(cfg)?,
        })
    }

    pub fn wheel(&self) -> &CrankWheel {
        &self.crank
    }

    /// Restart at the first tooth.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for CrankSignal {
    type Item = WheelEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let ev = *self.crank.events.get(self.pos)?;
        self.pos += 1;
        if self.pos >= self.crank.events.len() {
            self.pos = 0;
        }
        Some(ev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static WHEEL_60_2: CrankConfig = CrankConfig::new(60, 2, Edge::Rising);

    #[test]
    fn wheel_120_2() {
        static CFG: CrankConfig = CrankConfig::new(120, 2, Edge::Falling);
        let crank = CrankWheel::new(&CFG).unwrap();

        assert_eq!(crank.teeth(), 120);
        assert_eq!(crank.events.len(), 240);
        assert!(crank.events.iter().all(|ev| ev.delta == 15));
        assert_eq!(crank.events.iter().map(|ev| ev.delta).sum::<u32>(), DECI_DEG_PER_REV);
        assert_eq!(crank.events.iter().filter(|ev| ev.active).count(), 236);
        assert!(crank.events[235].active);
        assert!(!crank.events[236].active);
        assert_eq!(crank.events[0].edge, Edge::Falling);
        assert_eq!(crank.events[1].edge, Edge::Rising);
    }

    #[test]
    fn wheel_60_2() {
        let crank = CrankWheel::new(&WHEEL_60_2).unwrap();

        assert_eq!(crank.events.len(), 120);
        assert!(crank.events.iter().all(|ev| ev.delta == 30));
        assert_eq!(crank.events[0].edge, Edge::Rising);
        assert_eq!(crank.events[117].edge, Edge::Falling);
        assert!(crank.events[115].active);
        assert!(!crank.events[116].active);
    }

    #[test]
    fn invalid_wheels() {
        static NO_TEETH: CrankConfig = CrankConfig::new(0, 0, Edge::Rising);
        static ALL_MISSING: CrankConfig = CrankConfig::new(36, 36, Edge::Rising);
        static TOO_MANY: CrankConfig = CrankConfig::new(150, 1, Edge::Rising);
        static UNEVEN: CrankConfig = CrankConfig::new(7, 1, Edge::Rising);

        assert_eq!(CrankWheel::new(&NO_TEETH).unwrap_err(), Error::NoTeeth);
        assert_eq!(
            CrankWheel::new(&ALL_MISSING).unwrap_err(),
            Error::TooManyMissingTeeth {
                teeth: 36,
                missing: 36
            }
        );
        assert_eq!(
            CrankWheel::new(&TOO_MANY).unwrap_err(),
            Error::TooManyEvents {
                events: 300,
                capacity: CRANK_EVENT_CAPACITY
            }
        );
        assert_eq!(CrankWheel::new(&UNEVEN).unwrap_err(), Error::UnevenPitch { teeth: 7 });
    }

    #[test]
    fn signal_wraps_after_a_revolution() {
        let mut signal = CrankSignal::new(&WHEEL_60_2).unwrap();

        let ids: heapless::Vec<u8, 122> = signal.by_ref().take(122).map(|ev| ev.id).collect();
        assert_eq!(ids[0], 0);
        assert_eq!(ids[119], 119);
        assert_eq!(ids[120], 0);
        assert_eq!(ids[121], 1);

        signal.reset();
        assert_eq!(signal.next().map(|ev| ev.id), Some(0));
    }
}
