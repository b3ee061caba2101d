use conversion::*;

const SPEED_RPM: f64 = 3000.0;
const TOOTH_TIME_S: f64 = 170.6e-6;
const HALF_TOOTH_DEG: f64 = 1.5;

fn main() {
    env_logger::init();

    let angle = speed_time_to_angle(SPEED_RPM, TOOTH_TIME_S);
    log::debug!("{} rpm, {} s -> {} deg", SPEED_RPM, TOOTH_TIME_S, angle);

    let time = speed_angle_to_time(SPEED_RPM, HALF_TOOTH_DEG);
    log::debug!("{} rpm, {} deg -> {} s", SPEED_RPM, HALF_TOOTH_DEG, time);

    println!("{}", angle);
    println!("{}", time);
}
