//! WebView shell using `wry` + `tao`.
//!
//! Architecture:
//! - The splash and offline screens are internal pages served through the
//!   `shell://` custom protocol. `SHELL_JS` is inlined into them because
//!   `with_initialization_script` does not run on custom-protocol pages on
//!   Windows WebView2.
//! - Remote pages get `SHELL_JS` through `with_initialization_script`; it draws
//!   the toast and progress overlays, tracks same-document history and posts
//!   `back` and `ready` over IPC. On `ready` the shell re-applies the progress
//!   overlay, since a committed document starts without it.
//! - Delayed callbacks (splash, retry) are tokio sleeps that post a `UserEvent`
//!   back to the event loop. Controllers are only touched on the event-loop
//!   thread or inside short locks in web view callbacks.

use std::borrow::Cow;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tokio::task::JoinHandle;
use wry::{PageLoadEvent, WebContext, WebView, WebViewBuilder};

use crate::app::App;
use crate::logging;
use crate::managers::page_host::PageHostTrait;
use crate::platform;
use crate::services::deep_link::ChannelResolver;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::surface::{BackStep, BrowserSurface, HistoryTracker, OverlayState, PageHistory, PageMessage};
use crate::types::effect::{Effect, Notice, TimerTicket};
use crate::types::errors::{DeepLinkError, PlatformError, ShellError};
use crate::types::load::HostState;

const SHELL_JS: &str = include_str!("../../resources/ui/shell.js");
const PAGES_CSS: &str = include_str!("../../resources/ui/pages.css");
const SPLASH_BODY: &str = include_str!("../../resources/ui/splash.html");
const OFFLINE_BODY: &str = include_str!("../../resources/ui/offline.html");

/// Notices younger than this are shown again when a new document finishes loading.
const NOTICE_REPLAY_WINDOW: Duration = Duration::from_millis(2500);

#[derive(Debug)]
enum UserEvent {
    SplashElapsed,
    RetryExpired(TimerTicket),
    PageStarted(String),
    PageFinished(String),
    InternalPageFinished,
    /// Effects produced inside a web view callback.
    Effects(Vec<Effect>),
    ChannelResolved(Result<String, DeepLinkError>),
    OpenFailed(PlatformError),
    BackRequested(PageHistory),
    DocumentReady,
}

// ─── Internal pages ───

#[cfg(any(target_os = "windows", target_os = "android"))]
fn internal_url(page: &str) -> String {
    format!("http://shell.localhost/{}", page)
}

#[cfg(not(any(target_os = "windows", target_os = "android")))]
fn internal_url(page: &str) -> String {
    format!("shell://localhost/{}", page)
}

fn is_internal_url(url: &str) -> bool {
    url.starts_with("shell://") || url.starts_with("http://shell.localhost/")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn internal_page(body: &str) -> String {
    let mut html = String::with_capacity(body.len() + PAGES_CSS.len() + SHELL_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"><style>");
    html.push_str(PAGES_CSS);
    html.push_str("</style></head><body>");
    html.push_str(body);
    html.push_str("<script>");
    html.push_str(SHELL_JS);
    html.push_str("</script></body></html>");
    html
}

fn splash_html(title: &str) -> String {
    internal_page(&SPLASH_BODY.replace("{{TITLE}}", &escape_html(title)))
}

fn offline_html(message: &str) -> String {
    internal_page(&OFFLINE_BODY.replace("{{MESSAGE}}", &escape_html(message)))
}

fn js_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}

// ─── Surface ───

struct WrySurface {
    webview: WebView,
    history: HistoryTracker,
    /// Same-document history reported with the pending back request.
    page_history: PageHistory,
    overlay: OverlayState,
    destroyed: bool,
}

impl WrySurface {
    fn new(webview: WebView) -> Self {
        Self {
            webview,
            history: HistoryTracker::new(),
            page_history: PageHistory::default(),
            overlay: OverlayState::new(),
            destroyed: false,
        }
    }

    fn eval(&self, js: &str) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.webview.evaluate_script(js) {
            tracing::warn!(error = %e, "script evaluation failed");
        }
    }

    fn record_page(&mut self, url: &str) {
        self.history.record(url);
        self.page_history = PageHistory::default();
    }

    fn replay_recent_notice(&self) {
        if let Some(message) = self.overlay.notice_to_replay(Instant::now(), NOTICE_REPLAY_WINDOW) {
            self.eval(&format!("window.__shell&&__shell.toast({})", js_string(message)));
        }
    }

    /// Shows the progress indicator again in a freshly committed document.
    fn restore_progress(&self) {
        if let Some(label) = self.overlay.progress() {
            self.eval(&progress_script(true, label));
        }
    }
}

fn progress_script(visible: bool, label: &str) -> String {
    format!(
        "window.__shell&&__shell.progress({},{})",
        visible,
        js_string(label)
    )
}

impl BrowserSurface for WrySurface {
    fn load_url(&mut self, url: &str) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.webview.load_url(url) {
            tracing::error!(url, error = %e, "failed to load URL");
        }
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back_with(self.page_history)
    }

    fn go_back(&mut self) {
        let page = std::mem::take(&mut self.page_history);
        match self.history.step_back(page) {
            BackStep::SameDocument => {
                tracing::debug!(depth = page.depth, "navigating back within the document");
            }
            BackStep::PreviousDocument(url) => {
                tracing::debug!(url = %url, "navigating back");
            }
            BackStep::None => return,
        }
        self.eval("history.back()");
    }

    fn show_notice(&mut self, notice: &Notice) {
        tracing::debug!(kind = ?notice.kind, message = %notice.message, "notice");
        self.overlay.record_notice(notice, Instant::now());
        self.eval(&format!(
            "window.__shell&&__shell.toast({})",
            js_string(&notice.message)
        ));
    }

    fn set_progress(&mut self, visible: bool, label: &str) {
        self.overlay.set_progress(visible, label);
        self.eval(&progress_script(visible, label));
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if let Err(e) = self.webview.load_url("about:blank") {
            tracing::warn!(error = %e, "failed to blank the web view on teardown");
        }
        self.history.clear();
        self.overlay.clear();
        self.destroyed = true;
    }
}

// ─── Effect dispatch ───

struct Dispatch {
    runtime: tokio::runtime::Runtime,
    proxy: EventLoopProxy<UserEvent>,
    resolver: Arc<dyn ChannelResolver>,
    retry_task: Option<JoinHandle<()>>,
}

impl Dispatch {
    fn schedule(&self, delay: Duration, event: UserEvent) -> JoinHandle<()> {
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = proxy.send_event(event);
        })
    }

    fn cancel_retry(&mut self) {
        if let Some(task) = self.retry_task.take() {
            task.abort();
        }
    }

    fn resolve_channel(&self, channel_id: String) {
        let resolver = self.resolver.clone();
        let proxy = self.proxy.clone();
        self.runtime.spawn(async move {
            let result = tokio::task::spawn_blocking(move || resolver.resolve(&channel_id))
                .await
                .unwrap_or_else(|e| Err(DeepLinkError::ResolverUnavailable(e.to_string())));
            let _ = proxy.send_event(UserEvent::ChannelResolved(result));
        });
    }

    fn open_external(&self, url: String) {
        let proxy = self.proxy.clone();
        self.runtime.spawn_blocking(move || {
            tracing::info!(url = %url, "opening external URL");
            if let Err(e) = platform::open_external(&url) {
                let _ = proxy.send_event(UserEvent::OpenFailed(e));
            }
        });
    }
}

fn lock(state: &Mutex<App>) -> MutexGuard<'_, App> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Executes effects in order. Must be called without holding the state lock,
/// since loading a URL can re-enter the navigation handler.
fn execute(
    effects: Vec<Effect>,
    surface: &mut WrySurface,
    state: &Mutex<App>,
    dispatch: &mut Dispatch,
    control_flow: &mut ControlFlow,
) {
    for effect in effects {
        match effect {
            Effect::LoadUrl(url) => surface.load_url(&url),
            Effect::ShowProgress { label } => surface.set_progress(true, &label),
            Effect::HideProgress => surface.set_progress(false, ""),
            Effect::ShowNotice(notice) => surface.show_notice(&notice),
            Effect::ArmRetryTimer { ticket, after } => {
                dispatch.cancel_retry();
                dispatch.retry_task = Some(dispatch.schedule(after, UserEvent::RetryExpired(ticket)));
            }
            Effect::CancelRetryTimer => dispatch.cancel_retry(),
            Effect::GoBack => surface.go_back(),
            Effect::ResolveChannel { channel_id } => dispatch.resolve_channel(channel_id),
            Effect::OpenExternal(url) => dispatch.open_external(url),
            Effect::Exit => {
                teardown(surface, state, dispatch, control_flow);
                return;
            }
        }
    }
}

/// Destroys the host, executes its teardown effects, then the surface.
fn teardown(
    surface: &mut WrySurface,
    state: &Mutex<App>,
    dispatch: &mut Dispatch,
    control_flow: &mut ControlFlow,
) {
    let effects = lock(state).shutdown();
    execute(effects, surface, state, dispatch, control_flow);
    dispatch.cancel_retry();
    surface.destroy();
    *control_flow = ControlFlow::Exit;
}

// ─── Main entry point ───

pub fn run() -> Result<(), ShellError> {
    // Installed before settings load so the engine and resolver can log.
    let log = logging::init(logging::DEFAULT_LEVEL);
    let mut engine = SettingsEngine::new(None);
    let app = App::from_engine(&mut engine)?;
    if let Some(log) = &log {
        log.apply_level(&app.settings.general.log_level);
    }
    tracing::info!(
        config = engine.get_config_path(),
        url = %app.settings.general.target_url,
        "starting webshell"
    );

    let settings = app.settings.clone();
    let resolver = app.resolver.clone();
    let state = Arc::new(Mutex::new(app));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .map_err(|e| ShellError::Runtime(e.to_string()))?;

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&settings.window.title)
        .with_inner_size(tao::dpi::LogicalSize::new(
            settings.window.width as f64,
            settings.window.height as f64,
        ))
        .build(&event_loop)
        .map_err(|e| ShellError::Window(e.to_string()))?;

    let mut web_context = WebContext::new(Some(platform::get_data_dir()));

    let nav_state = state.clone();
    let nav_proxy = proxy.clone();
    let nw_state = state.clone();
    let nw_proxy = proxy.clone();
    let load_proxy = proxy.clone();
    let ipc_proxy = proxy.clone();
    let page_title = settings.window.title.clone();
    let offline_message = settings.notices.network_unavailable.clone();

    let mut builder = WebViewBuilder::with_web_context(&mut web_context)
        .with_custom_protocol("shell".into(), move |_wv_id, request| {
            let html = match request.uri().path() {
                "/offline" => offline_html(&offline_message),
                _ => splash_html(&page_title),
            };
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(Cow::Owned(html.into_bytes()))
                .unwrap_or_else(|_| wry::http::Response::new(Cow::Borrowed(&[][..])))
        })
        .with_initialization_script(SHELL_JS)
        .with_url(internal_url("splash"))
        .with_navigation_handler(move |url: String| {
            if is_internal_url(&url) || url == "about:blank" {
                return true;
            }
            let decision = lock(&nav_state).host.on_navigation_request(&url);
            if !decision.effects.is_empty() {
                let _ = nav_proxy.send_event(UserEvent::Effects(decision.effects));
            }
            !decision.suppressed
        })
        .with_new_window_req_handler(move |url, _features| {
            // Pop-ups open in the single surface, subject to the same interception.
            if url.starts_with("http://") || url.starts_with("https://") {
                let decision = lock(&nw_state).host.on_navigation_request(&url);
                let mut effects = decision.effects;
                if !decision.suppressed {
                    effects.push(Effect::LoadUrl(url));
                }
                let _ = nw_proxy.send_event(UserEvent::Effects(effects));
            }
            wry::NewWindowResponse::Deny
        })
        .with_on_page_load_handler(move |event, url| {
            let user_event = match (event, is_internal_url(&url)) {
                (PageLoadEvent::Finished, true) => UserEvent::InternalPageFinished,
                (_, true) => return,
                (PageLoadEvent::Started, false) => UserEvent::PageStarted(url),
                (PageLoadEvent::Finished, false) => UserEvent::PageFinished(url),
            };
            let _ = load_proxy.send_event(user_event);
        })
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            let user_event = match PageMessage::parse(msg.body()) {
                Some(PageMessage::Back { depth }) => UserEvent::BackRequested(PageHistory { depth }),
                Some(PageMessage::Ready) => UserEvent::DocumentReady,
                None => return,
            };
            let _ = ipc_proxy.send_event(user_event);
        })
        .with_incognito(!settings.surface.storage_enabled)
        .with_autoplay(settings.surface.autoplay)
        .with_devtools(settings.surface.devtools_enabled());

    if let Some(user_agent) = settings.surface.user_agent.as_deref() {
        builder = builder.with_user_agent(user_agent);
    }

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .ok_or_else(|| ShellError::WebView("GTK vbox unavailable".to_string()))?;
        builder
            .build_gtk(vbox)
            .map_err(|e| ShellError::WebView(e.to_string()))?
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder
        .build(&window)
        .map_err(|e| ShellError::WebView(e.to_string()))?;

    let mut surface = WrySurface::new(webview);
    let mut dispatch = Dispatch {
        runtime,
        proxy,
        resolver,
        retry_task: None,
    };

    let splash_delay = lock(&state).startup(Instant::now());
    // The splash timer is never cancelled; a late expiry after hand-off is ignored.
    let _ = dispatch.schedule(splash_delay, UserEvent::SplashElapsed);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Keeps the web context alive for as long as the web view.
        let _ = &web_context;
        let _ = &window;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => teardown(&mut surface, &state, &mut dispatch, control_flow),

            Event::UserEvent(user_event) => {
                let now = Instant::now();
                match user_event {
                    UserEvent::SplashElapsed => {
                        let (effects, offline) = {
                            let mut app = lock(&state);
                            let effects = app.on_splash_elapsed(now);
                            (effects, app.host.state() == HostState::OfflineWaiting)
                        };
                        if offline {
                            surface.load_url(&internal_url("offline"));
                        }
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::RetryExpired(ticket) => {
                        let effects = lock(&state).host.on_retry_timer(ticket, now);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::PageStarted(url) => {
                        let effects = lock(&state).host.on_page_started(&url, now);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::PageFinished(url) => {
                        surface.record_page(&url);
                        let effects = lock(&state).host.on_page_finished(&url, now);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                        surface.replay_recent_notice();
                    }
                    UserEvent::InternalPageFinished => surface.replay_recent_notice(),
                    UserEvent::Effects(effects) => {
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::ChannelResolved(result) => {
                        let effects = lock(&state).host.on_channel_resolved(result);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::OpenFailed(error) => {
                        let effects = lock(&state).host.on_external_open_failed(&error);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                    UserEvent::DocumentReady => surface.restore_progress(),
                    UserEvent::BackRequested(page) => {
                        surface.page_history = page;
                        let can_go_back = surface.can_go_back();
                        let effects = lock(&state).host.on_back_requested(can_go_back, now);
                        execute(effects, &mut surface, &state, &mut dispatch, control_flow);
                    }
                }
            }

            _ => {}
        }
    });
}
