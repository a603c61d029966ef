//! Dashboard startup and refresh scheduling against a scripted source.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::{grid, FakeSource, Recorders};
use skyboard_ui::{Dashboard, Location, SchedulerConfig};

const INTERVAL: Duration = Duration::from_secs(60);

fn config() -> SchedulerConfig {
    SchedulerConfig {
        refresh_interval: INTERVAL,
        ..Default::default()
    }
}

fn locations(latitudes: &[f64]) -> Vec<Location> {
    latitudes.iter().map(|lat| Location::new(*lat, -76.0)).collect()
}

#[tokio::test]
async fn failed_location_is_reported_and_skipped() {
    let recorders = Recorders::new();
    let parent = grid();
    let source = Arc::new(FakeSource::failing(&[3.0]));
    let dashboard = Dashboard::new(source, parent.clone(), recorders.surfaces(), config());

    let handles = dashboard.start(locations(&[1.0, 2.0, 3.0, 4.0])).await;

    assert_eq!(handles.len(), 3);
    assert_eq!(parent.query_all(".weather-report").len(), 3);

    let messages = recorders.messages.all();
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].starts_with("station-2: Server returned 500 for https://api.weather.gov/points/3,-76:"),
        "{}",
        messages[0]
    );

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn configured_name_labels_failures() {
    let recorders = Recorders::new();
    let source = Arc::new(FakeSource::failing(&[5.0]));
    let dashboard = Dashboard::new(source, grid(), recorders.surfaces(), config());

    let handles = dashboard
        .start(vec![Location::named("Cabin", 5.0, -76.0)])
        .await;

    assert!(handles.is_empty());
    let messages = recorders.messages.all();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Cabin: "));
}

#[tokio::test]
async fn progress_climbs_to_full_then_completes() {
    let recorders = Recorders::new();
    let source = Arc::new(FakeSource::failing(&[2.0]));
    let dashboard = Dashboard::new(source, grid(), recorders.surfaces(), config());

    let handles = dashboard.start(locations(&[1.0, 2.0, 3.0])).await;

    let percents = recorders.progress.percents.lock().clone();
    assert_eq!(percents, vec![33, 67, 100]);
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(recorders.progress.completions.load(Ordering::SeqCst), 1);
    assert!(recorders.loading.started.load(Ordering::SeqCst));
    assert!(recorders.loading.stopped.load(Ordering::SeqCst));

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test]
async fn no_locations_completes_immediately() {
    let recorders = Recorders::new();
    let parent = grid();
    let dashboard = Dashboard::new(
        Arc::new(FakeSource::default()),
        parent.clone(),
        recorders.surfaces(),
        config(),
    );

    let handles = dashboard.start(Vec::new()).await;

    assert!(handles.is_empty());
    assert!(parent.children().is_empty());
    assert_eq!(*recorders.progress.percents.lock(), vec![0]);
    assert_eq!(recorders.progress.completions.load(Ordering::SeqCst), 1);
    assert!(recorders.loading.stopped.load(Ordering::SeqCst));
    assert!(recorders.messages.all().is_empty());
}

#[tokio::test(start_paused = true)]
async fn refreshes_are_staggered_by_position() {
    let recorders = Recorders::new();
    let source = Arc::new(FakeSource::default());
    let dashboard = Dashboard::new(source.clone(), grid(), recorders.surfaces(), config());

    let handles = dashboard.start(locations(&[1.0, 2.0, 3.0])).await;
    tokio::time::sleep(INTERVAL * 3 + Duration::from_secs(1)).await;

    let firsts: Vec<Duration> = [1.0, 2.0, 3.0]
        .iter()
        .map(|lat| source.refreshes_of(*lat)[0])
        .collect();

    for (i, first) in firsts.iter().enumerate() {
        let due = INTERVAL * (i as u32 + 1);
        assert!(*first >= due, "location {} refreshed at {:?}", i, first);
        assert!(*first < due + Duration::from_secs(1));
    }
    assert!(firsts.windows(2).all(|pair| pair[0] < pair[1]));

    // The first location keeps its own cadence.
    assert_eq!(source.refreshes_of(1.0).len(), 3);
    assert_eq!(source.refreshes_of(3.0).len(), 1);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test(start_paused = true)]
async fn next_refresh_waits_for_slow_attempt_to_settle() {
    let recorders = Recorders::new();
    let took = Duration::from_secs(90);
    let source = Arc::new(FakeSource::slow(took));
    let dashboard = Dashboard::new(source.clone(), grid(), recorders.surfaces(), config());

    let handles = dashboard.start(locations(&[1.0])).await;
    tokio::time::sleep(INTERVAL * 3 + took * 2 + Duration::from_secs(1)).await;

    assert_eq!(
        source.refreshes_of(1.0),
        vec![INTERVAL, INTERVAL * 2 + took, INTERVAL * 3 + took * 2]
    );

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_panel_and_retries() {
    let recorders = Recorders::new();
    let parent = grid();
    let source = Arc::new(FakeSource::default());
    source.refresh_fails.store(true, Ordering::SeqCst);
    let dashboard = Dashboard::new(source.clone(), parent.clone(), recorders.surfaces(), config());

    let handles = dashboard
        .start(vec![Location::named("Home", 1.0, -76.0)])
        .await;
    let before = parent.outline();

    tokio::time::sleep(INTERVAL * 2 + Duration::from_secs(1)).await;

    let messages = recorders.messages.all();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Error refreshing Home: Server returned 500"));
    assert_eq!(parent.outline(), before);

    source.refresh_fails.store(false, Ordering::SeqCst);
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(source.refreshes_of(1.0).len(), 3);
    assert_eq!(recorders.messages.all().len(), 2);

    for handle in handles {
        handle.abort();
    }
}

#[tokio::test(start_paused = true)]
async fn aborted_loops_stop_refreshing() {
    let recorders = Recorders::new();
    let source = Arc::new(FakeSource::default());
    let dashboard = Dashboard::new(source.clone(), grid(), recorders.surfaces(), config());

    let handles = dashboard.start(locations(&[1.0])).await;
    for handle in &handles {
        handle.abort();
    }

    tokio::time::sleep(INTERVAL * 3).await;
    assert!(source.refreshes_of(1.0).is_empty());
}
