pub mod handlers;

// Re-export commonly used helpers for convenience
pub use handlers::{
    format_stats, format_view, load_dataset, resolve_settings, run_event_loop,
    write_default_config,
};
