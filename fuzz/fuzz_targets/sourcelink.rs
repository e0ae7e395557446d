#![no_main]

use libfuzzer_sys::fuzz_target;
use pdbscope::sourcelink::{PatternMap, SourceLinkMap};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Some((json, document)) = text.split_once('\n') else {
        return;
    };

    if let Ok(map) = SourceLinkMap::parse(json) {
        let _ = map.lookup(document);
    }
});
