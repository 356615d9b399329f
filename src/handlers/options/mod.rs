// handlers/options - Per-user display preferences

pub mod toggle;

pub use toggle::post as toggle_hide_finished;
