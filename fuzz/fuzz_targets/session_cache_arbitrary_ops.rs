#![no_main]

use std::collections::HashMap;
use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use tls_session_cache::{ManualClock, SessionCache, SessionCacheConfig, SessionHandle};

// Fuzz arbitrary operation sequences on SessionCache
//
// The first two bytes pick max_entries and expiration_check_count; the rest
// drive insert, lookup, clock moves, flush and flush_expired. After every
// step the size bound and per-session reference counts are checked.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let max_entries = usize::from(data[0] % 16) + 1;
    let check_count = u32::from(data[1] % 8) + 1;
    let clock = ManualClock::new();
    let config = SessionCacheConfig::default()
        .with_max_entries(max_entries)
        .with_timeout(Duration::from_secs(100))
        .with_expiration_check_count(check_count);
    let mut cache = SessionCache::with_clock(config, clock.clone());

    let sessions: Vec<SessionHandle<u8>> = (0..4).map(SessionHandle::new).collect();
    let mut stored: HashMap<String, usize> = HashMap::new();

    let mut idx = 2;
    while idx + 1 < data.len() {
        let op = data[idx] % 6;
        let arg = data[idx + 1];
        let key = format!("k{}", arg % 32);

        match op {
            0 => {
                // insert
                let s = usize::from(arg) % sessions.len();
                cache.insert(&key, &sessions[s]);
                stored.insert(key.clone(), s);
                assert!(cache.contains(&key));
            },
            1 => {
                // lookup
                if let Some(handle) = cache.lookup(&key) {
                    assert!(handle.ptr_eq(&sessions[stored[&key]]));
                }
            },
            2 => clock.advance(Duration::from_secs(u64::from(arg))),
            3 => clock.rewind(Duration::from_secs(u64::from(arg % 16))),
            4 => {
                cache.flush();
                assert_eq!(cache.size(), 0);
            },
            _ => {
                let before = cache.size();
                let removed = cache.flush_expired();
                assert_eq!(cache.size(), before - removed);
            },
        }

        assert!(cache.size() <= max_entries);
        stored.retain(|k, _| cache.contains(k));
        assert_eq!(stored.len(), cache.size());
        for (i, s) in sessions.iter().enumerate() {
            let refs = stored.values().filter(|&&v| v == i).count();
            assert_eq!(s.strong_count(), refs + 1);
        }

        idx += 2;
    }

    drop(cache);
    for s in &sessions {
        assert_eq!(s.strong_count(), 1);
    }
});
