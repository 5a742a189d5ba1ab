use std::time::Duration;

use super::*;
use crate::state::test_helpers::test_app_state;

#[test]
fn jitter_threat_clamps_to_range() {
    assert_eq!(jitter_threat(64, 2), 66);
    assert_eq!(jitter_threat(64, -2), 62);
    assert_eq!(jitter_threat(10, -2), 10);
    assert_eq!(jitter_threat(99, 2), 99);
    assert_eq!(jitter_threat(0, 0), 10);
    assert_eq!(jitter_threat(u8::MAX, 0), 99);
}

#[test]
fn home_has_static_stats_and_news() {
    let h = home(INITIAL_THREAT_LEVEL);
    assert_eq!(h.threat_level, 64);
    assert_eq!(h.stats.len(), 4);
    assert_eq!(h.stats[0].value, "42.8K+");
    assert_eq!(h.news.len(), 3);
    assert_eq!(h.news[0].kind, NewsKind::Critical);
    let json = serde_json::to_value(&h).unwrap();
    assert_eq!(json["news"][1]["kind"], "UPDATE");
    assert_eq!(json["threatLevel"], 64);
}

#[tokio::test(start_paused = true)]
async fn threat_task_moves_gauge_within_bounds() {
    let state = test_app_state();
    let handle = spawn_threat_task(state.clone());

    tokio::time::sleep(state.config.threat_interval * 10 + Duration::from_millis(10)).await;
    let level = state.workspace.read().await.threat_level;
    assert!((MIN_THREAT_LEVEL..=MAX_THREAT_LEVEL).contains(&level));
    // Ten ticks of at most two points each.
    assert!(level.abs_diff(INITIAL_THREAT_LEVEL) <= 20);
    assert!(state.revision.current() >= 10);
    handle.abort();
}
