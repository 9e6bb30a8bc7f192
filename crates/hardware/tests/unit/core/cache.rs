//! Statistics-Only Cache Tests.

use dualsim_core::config::CacheConfig;
use dualsim_core::core::units::cache::CacheSim;

fn small() -> CacheSim {
    CacheSim::new(&CacheConfig {
        enabled: true,
        size_bytes: 256,
        line_bytes: 64,
        ways: 2,
    })
}

#[test]
fn first_touch_misses_then_hits() {
    let mut cache = small();
    assert_eq!(cache.access(0x100), Some(false));
    assert_eq!(cache.access(0x104), Some(true), "same line should hit");
    assert!(cache.contains(0x13C));
}

#[test]
fn least_recently_used_way_is_evicted() {
    let mut cache = small();
    // Two sets of two ways: lines 0x000, 0x080 and 0x100 all map to set 0.
    let _ = cache.access(0x000);
    let _ = cache.access(0x080);
    let _ = cache.access(0x000);
    let _ = cache.access(0x100);
    assert!(cache.contains(0x000));
    assert!(!cache.contains(0x080), "0x080 was the LRU way");
}

#[test]
fn disabled_cache_tracks_nothing() {
    let mut cache = CacheSim::new(&CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    });
    assert_eq!(cache.access(0), None);
    assert!(!cache.contains(0));
}

#[test]
fn flush_invalidates_every_line() {
    let mut cache = small();
    let _ = cache.access(0x40);
    cache.flush();
    assert!(!cache.contains(0x40));
}
