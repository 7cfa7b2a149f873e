pub mod files;
pub mod paths;
pub mod webview_map;
