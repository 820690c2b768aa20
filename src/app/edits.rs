//! The two preference operations: update and clear.
//!
//! Both are fire-and-forget from the UI thread. The store applies queued
//! edits one at a time, so rapid clicks stack up without overlapping; the
//! shared `EditTracker` mirrors that queue for display.

use super::App;
use crate::constants::{CLEAR_WORK_MS, UPDATE_WORK_MS};
use crate::prefs::{COUNTER, DARK_THEME};
use crate::types::{EditKind, EditTracker};
use eframe::egui;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{error, info};

fn mark_started(tracker: &Arc<Mutex<EditTracker>>, seq: u32, kind: EditKind) {
    let mut t = tracker.lock().unwrap();
    t.queued = t.queued.saturating_sub(1);
    t.active = Some((seq, kind));
}

fn mark_finished(tracker: &Arc<Mutex<EditTracker>>, seq: u32, kind: EditKind) {
    let mut t = tracker.lock().unwrap();
    t.active = None;
    t.last_finished = Some((seq, kind));
}

impl App {
    /// Queue an edit that increments the counter and re-asserts the theme
    /// flag at its current (or default) value.
    pub fn update_preferences(&mut self, ctx: &egui::Context) {
        let seq = self.next_op_seq();
        let tracker = self.edit_state.clone();
        let ctx = ctx.clone();

        tracker.lock().unwrap().queued += 1;
        info!(op = seq, "Update queued");

        // Enqueued here, on the UI thread, so clicks keep their order.
        let transform_tracker = tracker.clone();
        let transform_ctx = ctx.clone();
        let edit = self.store.edit(move |mut prefs| async move {
            mark_started(&transform_tracker, seq, EditKind::Update);
            transform_ctx.request_repaint();
            info!(op = seq, "Update started");

            // Simulate a long-running step inside the transaction
            tokio::time::sleep(Duration::from_millis(UPDATE_WORK_MS)).await;

            let next = prefs.get(COUNTER).unwrap_or(0) + 1;
            prefs.set(COUNTER, next);
            let dark = prefs.get(DARK_THEME).unwrap_or(false);
            prefs.set(DARK_THEME, dark);

            mark_finished(&transform_tracker, seq, EditKind::Update);
            info!(op = seq, counter = next, "Update finished");
            prefs
        });

        self.runtime.spawn(async move {
            match edit.await {
                Ok(_) => tracker.lock().unwrap().completed += 1,
                Err(e) => {
                    tracker.lock().unwrap().failed += 1;
                    error!(op = seq, error = %e, "Update failed");
                }
            }
            ctx.request_repaint();
        });
    }

    /// Queue an edit that empties the preference map.
    pub fn clear_preferences(&mut self, ctx: &egui::Context) {
        let seq = self.next_op_seq();
        let tracker = self.edit_state.clone();
        let ctx = ctx.clone();

        tracker.lock().unwrap().queued += 1;
        info!(op = seq, "Clear queued");

        // Enqueued here, on the UI thread, so clicks keep their order.
        let transform_tracker = tracker.clone();
        let transform_ctx = ctx.clone();
        let edit = self.store.edit(move |mut prefs| async move {
            mark_started(&transform_tracker, seq, EditKind::Clear);
            transform_ctx.request_repaint();
            info!(op = seq, "Clear started");

            tokio::time::sleep(Duration::from_millis(CLEAR_WORK_MS)).await;

            prefs.clear();

            mark_finished(&transform_tracker, seq, EditKind::Clear);
            info!(op = seq, "Clear finished");
            prefs
        });

        self.runtime.spawn(async move {
            match edit.await {
                Ok(_) => tracker.lock().unwrap().completed += 1,
                Err(e) => {
                    tracker.lock().unwrap().failed += 1;
                    error!(op = seq, error = %e, "Clear failed");
                }
            }
            ctx.request_repaint();
        });
    }
}
