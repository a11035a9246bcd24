use eframe::egui::{
    self, Align, CornerRadius, CursorIcon, Frame, Layout, Margin, RichText, ScrollArea, Sense,
    Stroke,
};
use ragdesk_core::{
    AppViewModel, BackendHealth, Bubble, CitationLine, MessageView, Msg, StatusLine, StatusTone,
};

use super::browse::FileBrowser;
use super::constants::*;

/// One-shot UI requests carried between frames.
#[derive(Debug, Default)]
pub struct FrameFlags {
    pub focus_question: bool,
    pub scroll_to_latest: bool,
}

/// Draws the whole window from the view model and returns the messages the
/// user produced this frame, in the order they happened.
pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    browser: &mut FileBrowser,
    flags: &mut FrameFlags,
) -> Vec<Msg> {
    let mut outbox = Vec::new();

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.strong(WINDOW_TITLE);
            ui.separator();
            let (label, color) = backend_label(&view.backend);
            ui.label(RichText::new(label).color(color));
        });
    });

    egui::SidePanel::left("upload_panel")
        .resizable(false)
        .exact_width(UPLOAD_PANEL_WIDTH)
        .show(ctx, |ui| {
            render_upload_panel(ui, view, browser, &mut outbox);
        });

    egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
        render_question_input(ui, view, flags, &mut outbox);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Chat");
        ui.separator();
        render_transcript(ui, view, flags);
    });

    outbox
}

fn backend_label(health: &BackendHealth) -> (String, egui::Color32) {
    match health {
        BackendHealth::Unknown => ("Checking backend...".to_string(), BACKEND_UNKNOWN),
        BackendHealth::Ready(greeting) => (format!("Backend: {greeting}"), STATUS_SUCCESS),
        BackendHealth::Unreachable => ("Backend unreachable".to_string(), STATUS_ERROR),
    }
}

fn render_upload_panel(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    browser: &mut FileBrowser,
    outbox: &mut Vec<Msg>,
) {
    ui.heading("Documents");
    ui.separator();

    let stroke_color = if view.drop_zone.drag_hover {
        DROP_ZONE_HOVER
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    let zone = Frame::group(ui.style())
        .stroke(Stroke::new(2.0, stroke_color))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let icon = if view.drop_zone.has_selection { "✔" } else { "⬆" };
                ui.label(RichText::new(icon).size(24.0));
                ui.label(&view.drop_zone.prompt);
            });
        });
    let zone = ui
        .interact(zone.response.rect, egui::Id::new(DROP_ZONE), Sense::click())
        .on_hover_cursor(CursorIcon::PointingHand);
    if zone.clicked() {
        outbox.push(Msg::DropZoneClicked);
    }

    for name in &view.pending_names {
        ui.label(RichText::new(name).small());
    }

    if browser.is_open() {
        ui.separator();
        ui.label("File paths, one per line:");
        ui.add(
            egui::TextEdit::multiline(browser.input_mut())
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.horizontal(|ui| {
            if ui.button("Select").clicked() {
                outbox.push(Msg::FilesSelected(browser.submit()));
            }
            if ui.button("Cancel").clicked() {
                browser.cancel();
            }
        });
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let clicked = ui
            .add_enabled(view.ingest_enabled, egui::Button::new("Upload & Ingest"))
            .clicked();
        if clicked {
            outbox.push(Msg::IngestClicked);
        }
        if view.uploading {
            ui.add(egui::Spinner::new());
        }
    });

    if let Some(status) = &view.upload_status {
        ui.label(status_text(status));
    }
}

fn status_text(status: &StatusLine) -> RichText {
    let text = RichText::new(&status.text);
    match status.tone {
        StatusTone::Neutral => text,
        StatusTone::Success => text.color(STATUS_SUCCESS),
        StatusTone::Error => text.color(STATUS_ERROR),
    }
}

fn render_question_input(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    flags: &mut FrameFlags,
    outbox: &mut Vec<Msg>,
) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let send_width = 80.0;
        let mut question = view.question.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut question)
                .id(egui::Id::new(QUESTION_INPUT))
                .hint_text("Ask a question about your documents...")
                .desired_width(ui.available_width() - send_width),
        );
        if response.changed() {
            outbox.push(Msg::QuestionEdited(question));
        }
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            outbox.push(Msg::QuestionSubmitted);
        }
        if flags.focus_question {
            response.request_focus();
            flags.focus_question = false;
        }

        let clicked = ui
            .add_enabled(view.send_enabled, egui::Button::new("Send"))
            .clicked();
        if clicked {
            outbox.push(Msg::QuestionSubmitted);
        }
    });
    ui.add_space(6.0);
}

fn render_transcript(ui: &mut egui::Ui, view: &AppViewModel, flags: &mut FrameFlags) {
    ScrollArea::vertical()
        .id_salt(TRANSCRIPT_SCROLL)
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in &view.transcript {
                render_message(ui, message);
                ui.add_space(6.0);
            }
            if view.awaiting_answer {
                ui.add(egui::Spinner::new());
            }
            if flags.scroll_to_latest {
                ui.scroll_to_cursor(Some(Align::BOTTOM));
            }
        });
    flags.scroll_to_latest = false;
}

fn render_message(ui: &mut egui::Ui, message: &MessageView) {
    let (align, fill) = match message.bubble {
        Bubble::User => (Align::Max, USER_BUBBLE),
        Bubble::Bot => (Align::Min, BOT_BUBBLE),
    };
    let max_width = ui.available_width() * 0.75;

    ui.with_layout(Layout::top_down(align), |ui| {
        Frame::default()
            .fill(fill)
            .corner_radius(CornerRadius::same(10))
            .inner_margin(Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(
                    RichText::new(message.sender.label())
                        .small()
                        .color(BUBBLE_TEXT),
                );
                for line in &message.lines {
                    ui.label(RichText::new(line).color(BUBBLE_TEXT));
                }
                if let Some(citations) = &message.citations {
                    render_citations(ui, citations);
                }
            });
    });
}

fn render_citations(ui: &mut egui::Ui, citations: &CitationLine) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label(RichText::new(CitationLine::PREFIX).small().color(BUBBLE_TEXT));
        for (index, anchor) in citations.anchors.iter().enumerate() {
            if index > 0 {
                ui.label(RichText::new(", ").small().color(BUBBLE_TEXT));
            }
            // Inert: a citation only carries its source as a tooltip.
            ui.link(RichText::new(&anchor.label).small())
                .on_hover_text(&anchor.tooltip);
        }
    });
}
