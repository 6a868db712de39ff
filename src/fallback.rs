//! Static fallback dataset, used when live standings are empty or unreachable.
//! Not a model of anything: five plausible drivers so the scorer always has input.

use crate::types::{Driver, FeatureRecord};

// (id, code, name, team, number)
const FALLBACK_DRIVERS: [(&str, &str, &str, &str, u32); 5] = [
    ("max_verstappen", "VER", "Max Verstappen", "Red Bull Racing", 1),
    ("lando_norris", "NOR", "Lando Norris", "McLaren", 4),
    ("charles_leclerc", "LEC", "Charles Leclerc", "Ferrari", 16),
    ("oscar_piastri", "PIA", "Oscar Piastri", "McLaren", 81),
    ("lewis_hamilton", "HAM", "Lewis Hamilton", "Mercedes", 44),
];

// Earlier rows pretend to be the stronger drivers.
const FALLBACK_RECENT: [[u32; 5]; 5] = [
    [1, 1, 2, 1, 3],
    [2, 3, 1, 2, 4],
    [3, 2, 4, 3, 2],
    [4, 5, 3, 4, 6],
    [6, 7, 5, 8, 7],
];

pub fn fallback_drivers() -> Vec<Driver> {
    FALLBACK_DRIVERS
        .iter()
        .map(|&(id, code, name, team, number)| Driver {
            id: id.to_string(),
            code: Some(code.to_string()),
            name: name.to_string(),
            team: team.to_string(),
            number: Some(number),
        })
        .collect()
}

/// Feature records for the fallback drivers: standing = row + 1,
/// points = (rows - row) * 10.
pub fn fallback_features() -> Vec<FeatureRecord> {
    let drivers = fallback_drivers();
    let n = drivers.len();
    drivers
        .into_iter()
        .zip(FALLBACK_RECENT)
        .enumerate()
        .map(|(i, (driver, recent))| FeatureRecord {
            driver,
            standing_position: Some(i as u32 + 1),
            points: Some(((n - i) * 10) as f64),
            recent_results: recent.to_vec(),
        })
        .collect()
}
