//! Benchmark utilities.

#![warn(missing_docs)]

use equipdb_core::{RecordFields, RecordStore, Status};
use rand::seq::SliceRandom;
use rand::Rng;

const NAMES: [&str; 8] = [
    "Ventilator",
    "Infusion Pump",
    "Defibrillator",
    "Patient Monitor",
    "Ultrasound",
    "Autoclave",
    "ECG",
    "Syringe Driver",
];

const CATEGORIES: [&str; 5] = ["Respiratory", "Therapy", "Imaging", "Cardiology", "Sterilization"];

const MANUFACTURERS: [&str; 6] = ["Hamilton", "Baxter", "Philips", "GE", "Zoll", "Dräger"];

/// Generate random but valid record fields.
pub fn random_fields() -> RecordFields {
    let mut rng = rand::thread_rng();
    let pick = |items: &[&str], rng: &mut rand::rngs::ThreadRng| -> String {
        items.choose(rng).copied().unwrap_or_default().to_string()
    };

    RecordFields::new(
        format!("{} {}", pick(&NAMES, &mut rng), rng.gen_range(1..100)),
        pick(&CATEGORIES, &mut rng),
        pick(&MANUFACTURERS, &mut rng),
    )
    .serial_number(format!("SN-{:06}", rng.gen_range(0..1_000_000)))
    .status(*Status::ALL.choose(&mut rng).unwrap_or(&Status::Operational))
}

/// Build an in-memory store holding `count` random records.
pub fn populated_store(count: usize) -> RecordStore {
    let mut store = RecordStore::in_memory();
    for _ in 0..count {
        store
            .create(random_fields())
            .expect("in-memory create cannot fail");
    }
    store
}
