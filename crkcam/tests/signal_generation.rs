use approx::assert_abs_diff_eq;
use conversion::speed_angle_to_time;
use crkcam::cam::CamSignal;
use crkcam::configs::{CAM_CONFIGS, CRANK_CONFIGS};
use crkcam::crank::CrankSignal;
use crkcam::generator::SignalGenerator;
use crkcam::speed::{SpeedCommand, SpeedManager, TIME_RES_MS};
use crkcam::timer::{Channel, SimTimer};
use crkcam::Edge;

const FREQ: u32 = 36_000_000;

#[test]
fn ramped_generator_settles_on_tooth_period() {
    let mut tim = SimTimer::new(FREQ);
    tim.initialize(
        CamSignal::new(&CAM_CONFIGS[0]).unwrap(),
        CrankSignal::new(&CRANK_CONFIGS[0]).unwrap(),
    );

    let mut mngr = SpeedManager::new();
    mngr.add_command(SpeedCommand::Fixed(1000)).unwrap();
    mngr.add_command(SpeedCommand::Ramp { rpm: 3000, ms: 100 }).unwrap();

    tim.set_speed_rpm(mngr.next_speed());
    tim.start();

    let res_s = TIME_RES_MS as f64 / 1000.0;
    let mut next_update_s = res_s;
    let mut falling = Vec::new();

    while let Some(edge) = tim.next() {
        if edge.at_s > 0.3 {
            break;
        }
        while edge.at_s >= next_update_s {
            tim.set_speed_rpm(mngr.next_speed());
            next_update_s += res_s;
        }
        if edge.channel == Channel::Crank && edge.edge == Edge::Falling {
            falling.push((edge.angle, edge.at_s));
        }
    }

    assert_eq!(tim.speed_rpm(), 3000);
    assert!(!mngr.is_ramping());

    // Last two consecutive teeth, away from the gap
    let pair = falling
        .windows(2)
        .rev()
        .find(|w| w[1].0 - w[0].0 == 30)
        .unwrap();
    assert_abs_diff_eq!(
        pair[1].1 - pair[0].1,
        speed_angle_to_time(3000.0, 3.0),
        epsilon = 1e-12
    );
}

#[test]
fn revolution_time_matches_speed() {
    let mut tim = SimTimer::new(FREQ);
    tim.initialize(
        CamSignal::new(&CAM_CONFIGS[0]).unwrap(),
        CrankSignal::new(&CRANK_CONFIGS[0]).unwrap(),
    );
    tim.set_speed_rpm(1500);
    tim.start();

    let first = tim.by_ref().find(|e| e.channel == Channel::Crank).unwrap();
    let next_rev = tim
        .by_ref()
        .find(|e| e.channel == Channel::Crank && e.angle == first.angle + 3600)
        .unwrap();

    // One revolution at 1500 rpm is 40 ms
    assert_abs_diff_eq!(next_rev.at_s - first.at_s, 0.04, epsilon = 1e-12);
    assert_abs_diff_eq!(
        next_rev.at_s - first.at_s,
        speed_angle_to_time(1500.0, 360.0),
        epsilon = 1e-12
    );
}
