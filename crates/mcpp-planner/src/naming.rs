//! Reference agent-name generator (§6), grounded on
//! `original_source/src/core/uav.py::uav_name_generator`.

use mcpp_core::PlannerRng;

/// `"UAV-" + six decimal digits`, drawn from the given RNG.
pub fn generate_name(rng: &mut PlannerRng) -> String {
    let mut name = String::from("UAV-");
    for _ in 0..6 {
        let digit: u32 = rng.gen_range(0..10);
        name.push(char::from_digit(digit, 10).expect("0..10 is always a valid digit"));
    }
    name
}
