//! Fuzz target for the parser and the report builders.
//!
//! Any input the parser accepts must also go through every builder without
//! panicking; builders may only fail with a typed error.

#![no_main]

use dibie::{AtomicTableProposer, DataDictionaryBuilder, Parser, QualityReportBuilder};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let Ok(table) = Parser::new().parse_bytes(data) else {
        return;
    };

    let _ = DataDictionaryBuilder::new().build(&table, "fuzz");
    let _ = QualityReportBuilder::new().build(&table, "fuzz");
    let _ = AtomicTableProposer::new().propose(&table);
});
