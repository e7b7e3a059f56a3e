//! Fuzz target for the column name classifiers.

#![no_main]

use dibie::{ColumnClassifier, EntityClassifier};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let name = String::from_utf8_lossy(data);

    let _ = ColumnClassifier::new().classify(&name);
    let entity = EntityClassifier::new();
    let _ = entity.classify(&name);
    let _ = entity.group_columns(name.split(','));
});
