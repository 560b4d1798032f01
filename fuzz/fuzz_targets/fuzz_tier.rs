#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Tier from CLI/config strings
        if let Ok(tier) = content.parse::<hsc::Tier>() {
            assert_eq!(tier.as_str().parse::<hsc::Tier>(), Ok(tier));
        }

        // Tier deserialization from JSON
        let _ = serde_json::from_str::<hsc::Tier>(content);
    }
});
