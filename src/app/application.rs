//! Application - Scripted Agenda Session
//!
//! Drives an [`AgendaWindow`] through a short session against an in-memory
//! fetcher and prints what a rendering engine would receive.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossbeam_channel::Receiver;
use serde_json::json;

use crate::domain::{AgendaConfig, RowKind, shift_days};
use crate::error::Result;
use crate::eventing::AgendaEvent;
use crate::features::agenda::{AgendaDriver, AgendaWindow};
use crate::services::{
    InMemoryFetcher, SharedFetcher, SystemTimeSource, TimeSource, join, spawn_named,
};

/// Simulated round trip of the in-memory fetcher
const DEMO_FETCH_LATENCY: Duration = Duration::from_millis(25);

/// Pause between scripted steps, long enough for a fetch to land
const DEMO_STEP_DELAY: Duration = Duration::from_millis(100);

/// Seed a fetcher with a few months of synthetic reservations around `center`
fn demo_fetcher(center: NaiveDate) -> InMemoryFetcher {
    let mut fetcher = InMemoryFetcher::new().with_latency(DEMO_FETCH_LATENCY);

    for offset in -120i64..=240 {
        let day = shift_days(center, offset);
        let bookings = match offset.rem_euclid(7) {
            0 => 2,
            3 | 5 => 1,
            _ => 0,
        };
        for slot in 0..bookings {
            fetcher.insert(
                day,
                json!({
                    "name": format!("Guest {}", offset.rem_euclid(97) + slot),
                    "room": 100 + offset.rem_euclid(12),
                    "slot": slot,
                }),
            );
        }
    }

    fetcher
}

/// Print and drain every queued window event
fn drain_events(step: &str, events: &Receiver<AgendaEvent>) {
    println!("-- {step}");
    for event in events.try_iter() {
        println!("   {event:?}");
    }
}

fn print_summary(window: &AgendaWindow) {
    let snapshot = window.snapshot();
    let headers = snapshot
        .iter()
        .filter(|e| e.kind() == RowKind::DayHeader)
        .count();
    let empty = snapshot
        .iter()
        .filter(|e| e.kind() == RowKind::EmptyDay)
        .count();

    println!(
        "buffer: {} rows ({} booked days, {} empty days), {:?}..{:?}, selected {}",
        snapshot.len(),
        headers,
        empty,
        window.buffer().first_day(),
        window.buffer().last_day(),
        window.selected_day(),
    );
}

/// Run the scripted session
pub async fn run_demo(config: AgendaConfig) -> Result<()> {
    let center = config
        .selected_day
        .unwrap_or_else(|| SystemTimeSource.today());

    let fetcher: SharedFetcher = Arc::new(demo_fetcher(center));
    let window = AgendaWindow::with_fetcher(config, fetcher)?;
    let events = window.events();

    let (driver, handle) = AgendaDriver::new(window);
    let task = spawn_named("agenda-driver", driver.run())?;

    tokio::time::sleep(DEMO_STEP_DELAY).await;
    drain_events("mount", &events);

    handle.visible_range_changed(40).await?;
    tokio::time::sleep(DEMO_STEP_DELAY).await;
    drain_events("scroll report right after mount", &events);

    handle.user_touch().await?;
    handle.visible_range_changed(40).await?;
    tokio::time::sleep(DEMO_STEP_DELAY).await;
    drain_events("user drag", &events);

    handle.select_day(shift_days(center, 50)).await?;
    tokio::time::sleep(DEMO_STEP_DELAY).await;
    drain_events("jump inside the buffer", &events);

    handle.select_day(shift_days(center, 200)).await?;
    tokio::time::sleep(DEMO_STEP_DELAY).await;
    drain_events("far jump", &events);

    handle.shutdown().await?;
    let window = join(task).await?;
    drain_events("shutdown", &events);
    print_summary(&window);

    Ok(())
}
