use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use notify::RecommendedWatcher;
use tracing::{info, warn};

use crate::io::AppPaths;
use crate::model::focus::focused_tasks;
use crate::model::{Settings, Task};
use crate::text::TextMap;
use crate::ui;
use crate::ui::tip::TipContent;

/// How often the meter redraws to follow the clock.
const REPAINT_INTERVAL: std::time::Duration = std::time::Duration::from_millis(500);

/// Entries of the meter's right-click menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    EditSchedule,
    Quit,
}

/// Input dispatched to [`MeterApp::handle_event`] by the host loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterEvent {
    /// Cursor over the meter at `y`, with the meter occupying
    /// `[top, top + height)` in the same coordinate space.
    CursorMoved { y: f32, top: f32, height: f32 },
    CursorLeft,
    /// The schedule file changed on disk.
    ScheduleChanged,
    Menu(MenuCommand),
}

/// Main application state.
pub struct MeterApp {
    pub paths: AppPaths,
    pub settings: Arc<Settings>,
    /// Current schedule snapshot; replaced wholesale on reload.
    pub tasks: Arc<[Task]>,
    pub text: TextMap,
    /// Sticky schedule load failure shown in the tip until a reload succeeds.
    pub error_message: Option<String>,
    pub tip: Option<TipContent>,
    /// Last cursor row over the meter, in meter-local coordinates.
    pub cursor_y: Option<f32>,

    events_tx: Sender<MeterEvent>,
    events_rx: Receiver<MeterEvent>,
    placed: bool,
    _watcher: Option<RecommendedWatcher>,
}

impl MeterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, paths: AppPaths, settings: Settings) -> Self {
        ui::theme::apply_theme(&cc.egui_ctx, &settings);

        let mut app = Self::with_state(paths, settings);
        app.start_watcher(&cc.egui_ctx);
        app.reload_schedule();
        app
    }

    /// Build the app without a window or file watcher.
    pub fn with_state(paths: AppPaths, settings: Settings) -> Self {
        if settings.target_display_index != 0 {
            warn!(
                index = settings.target_display_index,
                "display selection is not supported, using the current monitor"
            );
        }
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            paths,
            settings: Arc::new(settings),
            tasks: Arc::from(Vec::new()),
            text: TextMap::embedded(),
            error_message: None,
            tip: None,
            cursor_y: None,
            events_tx,
            events_rx,
            placed: false,
            _watcher: None,
        }
    }

    fn start_watcher(&mut self, ctx: &egui::Context) {
        let tx = self.events_tx.clone();
        let ctx = ctx.clone();
        match crate::io::watcher::watch_file(&self.paths.schedule, move || {
            let _ = tx.send(MeterEvent::ScheduleChanged);
            ctx.request_repaint();
        }) {
            Ok(watcher) => self._watcher = Some(watcher),
            Err(e) => warn!("schedule will not auto-reload: {}", e),
        }
    }

    // --- Event dispatch ---

    pub fn handle_event(&mut self, ctx: &egui::Context, event: MeterEvent, now: DateTime<Utc>) {
        match event {
            MeterEvent::CursorMoved { y, top, height } => {
                self.cursor_y = Some(y - top);
                let focused = focused_tasks(
                    f64::from(y),
                    f64::from(top),
                    f64::from(height),
                    self.settings.past,
                    self.settings.future,
                    now,
                    &self.tasks,
                );
                self.tip = ui::tip::tip_content(&focused, self.error_message.as_deref(), now, &self.text);
            }
            MeterEvent::CursorLeft => {
                self.cursor_y = None;
                self.tip = None;
            }
            MeterEvent::ScheduleChanged => self.reload_schedule(),
            MeterEvent::Menu(MenuCommand::EditSchedule) => self.edit_schedule(now),
            MeterEvent::Menu(MenuCommand::Quit) => {
                info!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    // --- Schedule operations ---

    pub fn reload_schedule(&mut self) {
        match crate::io::load_tasks(&self.paths.schedule) {
            Ok(tasks) => {
                info!(count = tasks.len(), "schedule loaded");
                self.tasks = Arc::from(tasks);
                self.error_message = None;
            }
            Err(e) => {
                warn!("schedule load failed: {}", e);
                self.error_message = Some(
                    self.text
                        .of("NOTIFY_FAILED_SCHEDULE")
                        .set("filename", display_name(&self.paths.schedule))
                        .into(),
                );
            }
        }
    }

    fn edit_schedule(&mut self, now: DateTime<Utc>) {
        let sample = self.text.of("NOUN_SAMPLE_TASK").to_string();
        if let Err(e) = crate::io::editor::edit_schedule(
            &self.paths.schedule,
            &self.settings.schedule_edit_command,
            &sample,
            now,
        ) {
            warn!("edit schedule failed: {}", e);
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(self.text.of("NOUN_TIME_METER").to_string())
                .set_description(self.text.of("NOTIFY_FAILED_OPERATION").set("detail", &e).to_string())
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }

    // --- Window placement ---

    /// Stretch the meter to the monitor height at the left edge once the
    /// monitor size is known.
    fn place_window(&mut self, ctx: &egui::Context) {
        if self.placed {
            return;
        }
        let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) else {
            return;
        };
        let width = self.settings.meter_width as f32;
        ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(0.0, 0.0)));
        ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(width, monitor.y)));
        self.placed = true;
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl eframe::App for MeterApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();
        self.place_window(ctx);

        // Events from the watcher thread
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(ctx, event, now);
        }

        let mut menu_command = None;
        let panel_frame = egui::Frame::none().inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(panel_frame).show(ctx, |ui| {
            let tasks = Arc::clone(&self.tasks);
            let response = ui::meter::show_meter(&tasks, &self.settings, now, ui);

            let cursor = match response.hover_pos() {
                Some(pos) => MeterEvent::CursorMoved {
                    y: pos.y,
                    top: response.rect.top(),
                    height: response.rect.height(),
                },
                None => MeterEvent::CursorLeft,
            };
            self.handle_event(ui.ctx(), cursor, now);

            response.context_menu(|ui| {
                if ui.button(self.text.of("VERB_EDIT_SCHEDULE").to_string()).clicked() {
                    menu_command = Some(MenuCommand::EditSchedule);
                    ui.close_menu();
                }
                if ui.button(self.text.of("VERB_QUIT").to_string()).clicked() {
                    menu_command = Some(MenuCommand::Quit);
                    ui.close_menu();
                }
            });
        });

        if let Some(command) = menu_command {
            self.handle_event(ctx, MeterEvent::Menu(command), now);
        }

        if let (Some(tip), Some(cursor_y)) = (&self.tip, self.cursor_y) {
            if let Some(meter) = ctx.input(|i| i.viewport().inner_rect) {
                let position = egui::pos2(meter.right(), meter.top() + cursor_y);
                ui::tip::show_tip(ctx, tip, position, &self.settings);
            }
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn app_in(dir: &Path) -> MeterApp {
        MeterApp::with_state(AppPaths::in_dir(dir), Settings::default())
    }

    fn write_schedule(app: &MeterApp, tasks: &[Task]) {
        crate::io::schedule::save_tasks(&app.paths.schedule, tasks).unwrap();
    }

    // 960px meter, 60 min past + 180 min future: now is at y = 720.
    fn hover_now() -> MeterEvent {
        MeterEvent::CursorMoved { y: 720.0, top: 0.0, height: 960.0 }
    }

    #[test]
    fn missing_schedule_sets_sticky_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.reload_schedule();
        let message = app.error_message.clone().unwrap();
        assert!(message.contains("schedule.json"));

        let ctx = egui::Context::default();
        app.handle_event(&ctx, MeterEvent::CursorMoved { y: 5.0, top: 0.0, height: 960.0 }, now());
        assert_eq!(app.tip, Some(TipContent::Error(message)));
    }

    #[test]
    fn successful_reload_clears_error_and_swaps_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.reload_schedule();
        assert!(app.error_message.is_some());

        write_schedule(&app, &[Task::new("focus", now() - Duration::minutes(10), now() + Duration::minutes(10))]);
        let ctx = egui::Context::default();
        app.handle_event(&ctx, MeterEvent::ScheduleChanged, now());
        assert!(app.error_message.is_none());
        assert_eq!(app.tasks.len(), 1);

        app.handle_event(&ctx, hover_now(), now());
        match &app.tip {
            Some(TipContent::Rows(rows)) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].subject, "focus");
                assert_eq!(rows[0].indicator, "10 min remaining");
            }
            other => panic!("unexpected tip: {other:?}"),
        }
    }

    #[test]
    fn failed_reload_keeps_previous_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        write_schedule(&app, &[Task::new("keep", now(), now() + Duration::hours(1))]);
        app.reload_schedule();
        assert_eq!(app.tasks.len(), 1);

        std::fs::write(&app.paths.schedule, "not json").unwrap();
        app.reload_schedule();
        assert_eq!(app.tasks.len(), 1);
        assert!(app.error_message.is_some());
    }

    #[test]
    fn cursor_over_empty_time_hides_tip() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        write_schedule(&app, &[Task::new("later", now() + Duration::hours(2), now() + Duration::hours(3))]);
        app.reload_schedule();

        let ctx = egui::Context::default();
        app.handle_event(&ctx, hover_now(), now());
        assert_eq!(app.tip, None);
        assert_eq!(app.cursor_y, Some(720.0));

        app.handle_event(&ctx, MeterEvent::CursorLeft, now());
        assert_eq!(app.cursor_y, None);
    }

    #[test]
    fn task_starting_exactly_now_is_not_focused() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        write_schedule(&app, &[Task::new("starts", now(), now() + Duration::hours(1))]);
        app.reload_schedule();

        let ctx = egui::Context::default();
        app.handle_event(&ctx, hover_now(), now());
        assert_eq!(app.tip, None);
    }

    #[test]
    fn watcher_starts_when_config_dir_is_missing() {
        let root = tempfile::tempdir().unwrap();
        let mut app = app_in(&root.path().join("TimeMeter"));
        app.start_watcher(&egui::Context::default());
        assert!(app._watcher.is_some());
        assert!(app.paths.schedule.parent().unwrap().is_dir());
    }
}
