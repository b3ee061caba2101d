use crate::cam::CamConfig;
use crate::crank::CrankConfig;
use crate::event::Edge;

pub static CRANK_CONFIGS: [CrankConfig; 1] = [CrankConfig::new(120, 2, Edge::Falling)];

pub static CAM_CONFIGS: [CamConfig; 1] = [CamConfig {
    events: &[
        (289, Edge::Falling),
        (100, Edge::Rising),
        (800, Edge::Falling),
        (100, Edge::Rising),
        (200, Edge::Falling),
        (100, Edge::Rising),
        (500, Edge::Falling),
        (100, Edge::Rising),
        (500, Edge::Falling),
        (100, Edge::Rising),
        (1100, Edge::Falling),
        (100, Edge::Rising),
        (1100, Edge::Falling),
        (100, Edge::Rising),
        (500, Edge::Falling),
        (100, Edge::Rising),
        (500, Edge::Falling),
        (100, Edge::Rising),
        (200, Edge::Falling),
        (100, Edge::Rising),
        (511, Edge::Rising),
    ],
}];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam::CamWheel;
    use crate::crank::CrankWheel;

    #[test]
    fn shipped_configs_are_valid() {
        for cfg in CRANK_CONFIGS.iter() {
            assert!(CrankWheel::new(cfg).is_ok());
        }
        for cfg in CAM_CONFIGS.iter() {
            assert!(CamWheel::new(cfg).is_ok());
        }
    }
}
