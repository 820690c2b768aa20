//! App module - contains the main application state and logic

mod edits;

use crate::prefs::{Preferences, UiState};
use crate::store::PrefStore;
use crate::types::EditTracker;
use eframe::egui;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) store: PrefStore,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) snapshot_rx: watch::Receiver<Option<Preferences>>,
    // Edit queue mirror for display
    pub(crate) edit_state: Arc<Mutex<EditTracker>>,
    pub(crate) op_seq: u32,
    // Theme applied last frame, so visuals are only rebuilt on change
    pub(crate) applied_dark: Option<bool>,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: PrefStore,
        runtime: tokio::runtime::Runtime,
        data_dir: PathBuf,
    ) -> Self {
        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Theme is re-applied from the persisted flag each time it changes;
        // start from light until the first snapshot arrives.
        crate::theme::apply_visuals(&cc.egui_ctx, false);

        // Repaint whenever the store publishes a new snapshot.
        let mut rx = store.subscribe();
        let ctx = cc.egui_ctx.clone();
        runtime.spawn(async move {
            while rx.changed().await.is_ok() {
                ctx.request_repaint();
            }
        });

        let snapshot_rx = store.subscribe();

        Self {
            store,
            runtime,
            snapshot_rx,
            edit_state: Arc::new(Mutex::new(EditTracker::default())),
            op_seq: 0,
            applied_dark: None,
            logo_texture: None,
            needs_center: false,
            data_dir,
        }
    }

    /// Latest UI projection, or `None` before the store's first snapshot.
    pub fn ui_state(&self) -> Option<UiState> {
        self.snapshot_rx.borrow().as_ref().map(UiState::from_prefs)
    }

    pub(crate) fn next_op_seq(&mut self) -> u32 {
        let seq = self.op_seq;
        self.op_seq += 1;
        seq
    }
}
