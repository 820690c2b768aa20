#![windows_subsystem = "windows"]
//! Pref Counter - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod prefs;
mod store;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use store::PrefStore;
use tracing::{error, info};
use ui::components::{action_button, flag_indicator, queue_label};

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "pref-counter.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pref_counter=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Pref Counter starting");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "Failed to start tokio runtime");
            panic!("Failed to start tokio runtime: {}", e);
        }
    };

    let prefs_path = data_dir.join(PREFS_FILE_NAME);
    let store = PrefStore::open(prefs_path.clone(), runtime.handle());
    info!(path = %prefs_path.display(), "Preference store opened");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(420.0, 420.0))
        .with_min_inner_size([360.0, 380.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the embedded SVG
    {
        let (rgba, w, h) = utils::rasterize_logo_square(64);
        let icon = egui::IconData {
            rgba,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, store, runtime, data_dir);
            app.needs_center = true;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.ui_state();

        // Visuals follow the persisted theme flag
        let dark = state.map(|s| s.dark_theme).unwrap_or(false);
        if self.applied_dark != Some(dark) {
            theme::apply_visuals(ctx, dark);
            self.applied_dark = Some(dark);
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(24.0);
            ui.with_layout(egui::Layout::top_down(egui::Align::Center), |ui| {
                // Header: logo + app name
                let texture = self.logo_texture.get_or_insert_with(|| {
                    let (pixels, w, h) = utils::rasterize_logo_square(96);
                    ctx.load_texture(
                        "logo",
                        egui::ColorImage::from_rgba_unmultiplied(
                            [w as usize, h as usize],
                            &pixels,
                        ),
                        egui::TextureOptions::LINEAR,
                    )
                });
                ui.image(egui::load::SizedTexture::new(
                    texture.id(),
                    egui::vec2(48.0, 48.0),
                ));
                ui.add_space(4.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new("PREF COUNTER")
                            .size(theme::FONT_SMALL)
                            .color(theme::text_dim(dark)),
                    )
                    .selectable(false),
                );
                ui.add_space(theme::SPACING_XL);

                // Latest persisted snapshot (or nothing yet)
                match state {
                    None => {
                        ui.add_space(28.0);
                        ui.label(
                            egui::RichText::new("No data")
                                .size(theme::FONT_HEADING)
                                .color(theme::text_muted(dark)),
                        );
                        ui.add_space(28.0);
                    }
                    Some(state) => {
                        ui.label(
                            egui::RichText::new(state.counter.to_string())
                                .size(theme::FONT_COUNTER)
                                .color(theme::text_primary(dark)),
                        );
                        ui.add_space(theme::SPACING_MD);
                        ui.horizontal(|ui| {
                            let row_w = theme::CHECKBOX_SIZE + 6.0 + 72.0;
                            ui.add_space((ui.available_width() - row_w) / 2.0);
                            flag_indicator(ui, state.dark_theme, theme::CHECKBOX_SIZE);
                            ui.add_space(6.0);
                            ui.label(
                                egui::RichText::new("Dark theme")
                                    .size(theme::FONT_BODY)
                                    .color(theme::text_muted(dark)),
                            );
                        });
                        ui.add_space(theme::SPACING_MD);
                        ui.label(
                            egui::RichText::new(state.to_string())
                                .size(theme::FONT_CAPTION)
                                .color(theme::text_dim(dark)),
                        );
                    }
                }

                ui.add_space(theme::SPACING_XL);

                // The two actions; rapid clicks queue without overlapping
                ui.horizontal(|ui| {
                    let buttons_w = 120.0 * 2.0 + theme::SPACING_MD;
                    ui.add_space((ui.available_width() - buttons_w) / 2.0);

                    let update_label =
                        format!("{} Update", egui_phosphor::regular::PLUS_CIRCLE);
                    if action_button(
                        ui,
                        &update_label,
                        theme::BTN_ACCENT,
                        theme::BTN_ACCENT_HOVER,
                    )
                    .clicked()
                    {
                        self.update_preferences(ctx);
                    }

                    ui.add_space(theme::SPACING_MD);

                    let clear_label = format!("{} Clear", egui_phosphor::regular::TRASH);
                    if action_button(
                        ui,
                        &clear_label,
                        theme::BTN_DANGER,
                        theme::BTN_DANGER_HOVER,
                    )
                    .clicked()
                    {
                        self.clear_preferences(ctx);
                    }
                });

                ui.add_space(theme::SPACING_XL);

                // Edit queue status
                let (busy, label, completed, failed, last) = {
                    let tracker = self.edit_state.lock().unwrap();
                    (
                        tracker.busy(),
                        queue_label(&tracker),
                        tracker.completed,
                        tracker.failed,
                        tracker.last_finished,
                    )
                };
                if busy {
                    // Keep the spinner animating between snapshot updates
                    ctx.request_repaint_after(std::time::Duration::from_millis(100));
                }
                if let Some(label) = label {
                    ui.horizontal(|ui| {
                        let row_w = 16.0 + 6.0 + label.len() as f32 * 6.0;
                        ui.add_space((ui.available_width() - row_w).max(0.0) / 2.0);
                        ui.add(egui::Spinner::new().size(16.0).color(theme::ACCENT));
                        ui.add_space(6.0);
                        ui.label(
                            egui::RichText::new(label)
                                .size(theme::FONT_SMALL)
                                .color(theme::text_muted(dark)),
                        );
                    });
                } else if let Some((seq, kind)) = last {
                    ui.label(
                        egui::RichText::new(format!("last: {} #{}", kind.label(), seq))
                            .size(theme::FONT_SMALL)
                            .color(theme::text_dim(dark)),
                    );
                }
                if completed > 0 || failed > 0 {
                    ui.add_space(2.0);
                    let color = if failed > 0 {
                        theme::STATUS_ERROR
                    } else {
                        theme::STATUS_SUCCESS
                    };
                    ui.label(
                        egui::RichText::new(format!(
                            "{} completed · {} failed",
                            completed, failed
                        ))
                        .size(theme::FONT_CAPTION)
                        .color(color),
                    );
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(data_dir = %self.data_dir.display(), "Pref Counter shutting down");
    }
}
