use crate::{filter_supported, AppState, BackendHealth, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::CheckBackend],
        Msg::DropZoneClicked => vec![Effect::OpenFileBrowser],
        Msg::DragHoverChanged(hovering) => {
            state.set_drag_hover(hovering);
            Vec::new()
        }
        Msg::FilesSelected(files) => {
            // Nothing acceptable: keep the previous selection and say nothing.
            let accepted = filter_supported(files);
            if !accepted.is_empty() {
                state.replace_selection(accepted);
            }
            Vec::new()
        }
        Msg::IngestClicked => match state.begin_ingest() {
            Some((request_id, files)) => vec![Effect::Ingest { request_id, files }],
            None => Vec::new(),
        },
        Msg::IngestFinished { request_id, result } => {
            state.finish_ingest(request_id, result);
            Vec::new()
        }
        Msg::QuestionEdited(text) => {
            state.set_question(text);
            Vec::new()
        }
        Msg::QuestionSubmitted => match state.begin_query() {
            Some((request_id, question)) => vec![Effect::Query {
                request_id,
                question,
            }],
            None => Vec::new(),
        },
        Msg::QueryFinished { request_id, result } => {
            if state.finish_query(request_id, result) {
                vec![Effect::FocusQuestionInput]
            } else {
                Vec::new()
            }
        }
        Msg::BackendChecked(result) => {
            let health = match result {
                Ok(greeting) => BackendHealth::Ready(greeting),
                Err(_) => BackendHealth::Unreachable,
            };
            state.set_backend_health(health);
            Vec::new()
        }
    };

    (state, effects)
}
