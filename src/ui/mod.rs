//! WebShell UI layer.
//!
//! Uses `wry` for the embedded web view:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Splash and offline screens are internal HTML pages; toast and progress
//! overlays are injected into every page and driven by script evaluation.

pub mod shell_app;
