use std::path::Path;
use std::sync::mpsc;

use desk_logging::{desk_debug, desk_info, desk_warn};
use eframe::egui;
use ragdesk_core::{is_supported_name, update, AppState, AppViewModel, Effect, FileHandle, Msg};

use super::config::{AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::browse::FileBrowser;
use super::ui::render::FrameFlags;

pub fn run_app() -> anyhow::Result<()> {
    let (config, warnings) = AppConfig::load(Path::new(CONFIG_FILENAME));
    logging::initialize(config.log_destination, config.level_filter());
    for warning in warnings {
        desk_warn!("{}", warning);
    }
    desk_info!("RagDesk starting; backend at {}", config.api_url);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(ui::constants::WINDOW_TITLE)
            .with_inner_size(ui::constants::WINDOW_SIZE)
            .with_min_inner_size(ui::constants::WINDOW_MIN_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let settings = config.client_settings();
    eframe::run_native(
        ui::constants::WINDOW_TITLE,
        native_options,
        Box::new(
            move |creation_context: &eframe::CreationContext<'_>| -> Result<
                Box<dyn eframe::App>,
                Box<dyn std::error::Error + Send + Sync>,
            > {
                let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
                let runner = EffectRunner::new(
                    settings,
                    msg_tx.clone(),
                    creation_context.egui_ctx.clone(),
                )?;
                Ok(Box::new(RagDeskApp::new(runner, msg_tx, msg_rx)))
            },
        ),
    )
    .map_err(|err| anyhow::anyhow!("ui terminated with error: {err}"))
}

struct RagDeskApp {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    browser: FileBrowser,
    flags: FrameFlags,
}

impl RagDeskApp {
    fn new(runner: EffectRunner, msg_tx: mpsc::Sender<Msg>, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let state = AppState::new();
        let view = state.view();
        let _ = msg_tx.send(Msg::Started);
        Self {
            state,
            view,
            runner,
            msg_rx,
            browser: FileBrowser::default(),
            flags: FrameFlags::default(),
        }
    }

    fn process_pending_messages(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        self.log_stale_completion(&msg);
        if let Msg::FilesSelected(files) = &msg {
            log_selection(files);
        }
        let transcript_len = self.state.transcript().len();

        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if self.state.consume_dirty() {
            self.view = self.state.view();
        }
        if self.state.transcript().len() != transcript_len {
            self.flags.scroll_to_latest = true;
        }
        for effect in effects {
            self.apply_effect(effect);
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::OpenFileBrowser => self.browser.open(),
            Effect::FocusQuestionInput => self.flags.focus_question = true,
            other => self.runner.run(other),
        }
    }

    fn log_stale_completion(&self, msg: &Msg) {
        match msg {
            Msg::IngestFinished { request_id, .. }
                if self.state.upload_in_flight() != Some(*request_id) =>
            {
                desk_warn!("Ignoring stale ingest completion request_id={}", request_id);
            }
            Msg::QueryFinished { request_id, .. }
                if self.state.query_in_flight() != Some(*request_id) =>
            {
                desk_warn!("Ignoring stale query completion request_id={}", request_id);
            }
            _ => {}
        }
    }
}

/// Translates window-level drag-and-drop input into messages.
fn collect_file_drops(ctx: &egui::Context, drag_hover: bool) -> Vec<Msg> {
    let mut msgs = Vec::new();

    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
    if hovering != drag_hover {
        msgs.push(Msg::DragHoverChanged(hovering));
    }

    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    if !dropped.is_empty() {
        let files: Vec<FileHandle> = dropped.into_iter().filter_map(file_from_drop).collect();
        desk_debug!("Dropped {} file(s)", files.len());
        msgs.push(Msg::FilesSelected(files));
    }

    msgs
}

/// Accepted and rejected counts for a candidate selection.
fn selection_counts(files: &[FileHandle]) -> (usize, usize) {
    let accepted = files
        .iter()
        .filter(|file| is_supported_name(&file.name))
        .count();
    (accepted, files.len() - accepted)
}

fn log_selection(files: &[FileHandle]) {
    let (accepted, rejected) = selection_counts(files);
    if accepted == 0 {
        desk_info!(
            "Selection: no supported files among {}; keeping previous selection",
            rejected
        );
    } else {
        desk_info!("Selection: accepted={} rejected={}", accepted, rejected);
    }
}

fn file_from_drop(file: egui::DroppedFile) -> Option<FileHandle> {
    if let Some(bytes) = file.bytes {
        let name = match (&file.path, file.name.is_empty()) {
            (Some(path), true) => FileHandle::from_path(path.clone()).name,
            _ => file.name,
        };
        return Some(FileHandle::from_bytes(name, bytes));
    }
    file.path.map(FileHandle::from_path)
}

impl eframe::App for RagDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending_messages();

        let mut outbox = collect_file_drops(ctx, self.view.drop_zone.drag_hover);
        outbox.extend(ui::render::render(
            ctx,
            &self.view,
            &mut self.browser,
            &mut self.flags,
        ));

        if !outbox.is_empty() {
            for msg in outbox {
                self.dispatch_msg(msg);
            }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragdesk_core::FileSource;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn native_drop_uses_path() {
        let handle = file_from_drop(egui::DroppedFile {
            path: Some(PathBuf::from("/home/me/Report.PDF")),
            ..Default::default()
        })
        .expect("handle");

        assert_eq!(handle.name, "Report.PDF");
        assert_eq!(
            handle.source,
            FileSource::Path(PathBuf::from("/home/me/Report.PDF"))
        );
    }

    #[test]
    fn drop_with_bytes_keeps_payload() {
        let bytes: Arc<[u8]> = Arc::from(&b"hello"[..]);
        let handle = file_from_drop(egui::DroppedFile {
            name: "notes.txt".to_string(),
            bytes: Some(bytes.clone()),
            ..Default::default()
        })
        .expect("handle");

        assert_eq!(handle.name, "notes.txt");
        assert_eq!(handle.source, FileSource::Bytes(bytes));
    }

    #[test]
    fn drop_without_path_or_bytes_is_skipped() {
        assert!(file_from_drop(egui::DroppedFile::default()).is_none());
    }

    #[test]
    fn drop_yields_one_selection_with_accepted_and_rejected_counts() {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            dropped_files: vec![
                egui::DroppedFile {
                    path: Some(PathBuf::from("/docs/report.pdf")),
                    ..Default::default()
                },
                egui::DroppedFile {
                    path: Some(PathBuf::from("/docs/setup.exe")),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let mut msgs = Vec::new();
        let _ = ctx.run(input, |ctx| msgs.extend(collect_file_drops(ctx, false)));

        match msgs.as_slice() {
            [Msg::FilesSelected(files)] => assert_eq!(selection_counts(files), (1, 1)),
            other => panic!("unexpected messages: {other:?}"),
        }
    }

    #[test]
    fn hover_change_is_reported_without_drop() {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            hovered_files: vec![egui::HoveredFile::default()],
            ..Default::default()
        };

        let mut msgs = Vec::new();
        let _ = ctx.run(input, |ctx| msgs.extend(collect_file_drops(ctx, false)));

        assert_eq!(msgs, vec![Msg::DragHoverChanged(true)]);
    }

    #[test]
    fn browser_selection_counts_unsupported_files_as_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut paths = Vec::new();
        for name in ["scan.JPG", "notes.txt", "slides.pptx"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "x").unwrap();
            paths.push(path.display().to_string());
        }

        let mut browser = FileBrowser::default();
        browser.open();
        *browser.input_mut() = paths.join("\n");
        let files = browser.submit();

        assert_eq!(files.len(), 3);
        assert_eq!(selection_counts(&files), (2, 1));
    }

    #[test]
    fn selection_without_supported_files_counts_all_as_rejected() {
        let files = vec![
            FileHandle::from_bytes("a.docx", b"x".to_vec()),
            FileHandle::from_bytes("b.zip", b"y".to_vec()),
        ];

        assert_eq!(selection_counts(&files), (0, 2));
        assert_eq!(selection_counts(&[]), (0, 0));
    }
}
