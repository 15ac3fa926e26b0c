#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(html) = std::str::from_utf8(data) {
        let _ = prolific_monitor::adapters::scraper::study_parser::parse_studies(html);
    }
});
