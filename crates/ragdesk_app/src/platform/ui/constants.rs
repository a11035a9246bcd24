use eframe::egui::Color32;

pub const WINDOW_TITLE: &str = "RagDesk";
pub const WINDOW_SIZE: [f32; 2] = [960.0, 720.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [720.0, 480.0];
pub const UPLOAD_PANEL_WIDTH: f32 = 300.0;

pub const QUESTION_INPUT: &str = "question_input";
pub const DROP_ZONE: &str = "drop_zone";
pub const TRANSCRIPT_SCROLL: &str = "chat_transcript";

pub const STATUS_SUCCESS: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);
pub const BACKEND_UNKNOWN: Color32 = Color32::GRAY;
pub const DROP_ZONE_HOVER: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);
pub const USER_BUBBLE: Color32 = Color32::from_rgb(0x2F, 0x6E, 0xD8);
pub const BOT_BUBBLE: Color32 = Color32::from_rgb(0x22, 0x2A, 0x35);
pub const BUBBLE_TEXT: Color32 = Color32::from_rgb(0xE6, 0xED, 0xF3);
