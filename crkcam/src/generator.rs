use crate::cam::CamSignal;
use crate::crank::CrankSignal;

/// A device producing the crank and cam output signals.
pub trait SignalGenerator {
    fn initialize(&mut self, cam: CamSignal, crank: CrankSignal);
    fn set_speed_rpm(&mut self, rpm: u32);
    /// Program the next crank edge, called once the previous one fired.
    fn set_next_crank_event(&mut self);
    /// Program the next cam edge, called once the previous one fired.
    fn set_next_cam_event(&mut self);
    fn start(&mut self);
}
