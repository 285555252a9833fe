//! Page entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server-rendered pages load the wasm bundle and call one of the
//! exported functions below: screen pages call `start_screen`, the operator
//! dashboard calls `start_status_board`, video screens call
//! `start_video_player`.
//!
//! DESIGN
//! ======
//! Each state machine lives in an `Rc<RefCell<_>>` kept alive by a
//! thread-local slot. Transport, timer and click callbacks hold a `Weak`
//! back-reference and dispatch into the machine; they always run from the
//! browser event loop, never while the machine is already borrowed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{PageGlobals, ScreenConfig, StatusBoardConfig};
use crate::error::ClientError;
use crate::net::transport::{AttemptId, TransportEvent};
use crate::net::ws_transport::WsTransport;
use crate::state::connection::ConnectionManager;
use crate::state::status_board::StatusBroadcastListener;
use crate::ui::dom::{DomProjector, WindowBrowser};
use crate::ui::projector::CONNECT_BUTTON;
use crate::util::scheduler::{BrowserScheduler, TaskId};
use crate::util::youtube::{load_iframe_api, mount_player};

type ScreenManager = ConnectionManager<WsTransport, BrowserScheduler, DomProjector, WindowBrowser>;
type StatusListener = StatusBroadcastListener<WsTransport, BrowserScheduler, DomProjector, WindowBrowser>;

/// Global the iframe API calls once `YT` is defined.
const API_READY_CALLBACK: &str = "onYouTubeIframeAPIReady";

thread_local! {
    static SCREEN: RefCell<Option<Rc<RefCell<ScreenManager>>>> = const { RefCell::new(None) };
    static STATUS_BOARD: RefCell<Option<Rc<RefCell<StatusListener>>>> = const { RefCell::new(None) };
}

fn init_console() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed by an earlier entry point.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn dispatch<M>(target: &Weak<RefCell<M>>, f: impl FnOnce(&mut M)) {
    let Some(target) = target.upgrade() else {
        return;
    };
    let Ok(mut machine) = target.try_borrow_mut() else {
        log::warn!("dropped browser callback: client is busy");
        return;
    };
    f(&mut machine);
}

fn on_click(id: &str, mut handler: impl FnMut() + 'static) -> Result<(), ClientError> {
    let Some(element) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(id)) else {
        log::debug!("no #{id} button on this page");
        return Ok(());
    };
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| handler());
    element
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
        .map_err(|e| ClientError::from_js(&e))?;
    callback.forget();
    Ok(())
}

/// Start the screen client: connect, keep reconnecting, open the content
/// window, and bind the manual connect button.
#[wasm_bindgen]
pub fn start_screen() -> Result<(), JsValue> {
    init_console();
    let config = ScreenConfig::from_page()?;
    log::info!("screen client starting: ws={} screen={:?}", config.ws_url, config.screen_id);

    let manager = Rc::new_cyclic(|weak: &Weak<RefCell<ScreenManager>>| {
        let events = weak.clone();
        let timers = weak.clone();
        let transport = WsTransport::new(Rc::new(move |attempt: AttemptId, event: TransportEvent| {
            dispatch(&events, move |m| m.handle_event(attempt, event));
        }));
        let scheduler = BrowserScheduler::new(Rc::new(move |task: TaskId| {
            dispatch(&timers, move |m| m.on_timer(task));
        }));
        RefCell::new(ConnectionManager::new(config, transport, scheduler, DomProjector::new(), WindowBrowser::new()))
    });

    let clicks = Rc::downgrade(&manager);
    on_click(CONNECT_BUTTON, move || {
        dispatch(&clicks, |m| {
            if !m.connect() {
                log::debug!("connect button ignored: attempt in flight");
            }
        });
    })?;

    manager.borrow_mut().start();
    SCREEN.with(|slot| {
        if let Some(previous) = slot.borrow_mut().replace(manager) {
            previous.borrow_mut().shutdown();
        }
    });
    Ok(())
}

/// Start the dashboard listener for screen connectivity broadcasts.
#[wasm_bindgen]
pub fn start_status_board() -> Result<(), JsValue> {
    init_console();
    let config = StatusBoardConfig::from_page()?;
    log::info!("status board starting: ws={}", config.ws_url);

    let listener = Rc::new_cyclic(|weak: &Weak<RefCell<StatusListener>>| {
        let events = weak.clone();
        let timers = weak.clone();
        let transport = WsTransport::new(Rc::new(move |attempt: AttemptId, event: TransportEvent| {
            dispatch(&events, move |l| l.handle_event(attempt, event));
        }));
        let scheduler = BrowserScheduler::new(Rc::new(move |task: TaskId| {
            dispatch(&timers, move |l| l.on_timer(task));
        }));
        RefCell::new(StatusBroadcastListener::new(
            config,
            transport,
            scheduler,
            DomProjector::new(),
            WindowBrowser::new(),
        ))
    });

    listener.borrow_mut().start();
    STATUS_BOARD.with(|slot| *slot.borrow_mut() = Some(listener));
    Ok(())
}

/// Load the YouTube iframe API and mount the looping player once it is ready.
#[wasm_bindgen]
pub fn start_video_player() -> Result<(), JsValue> {
    init_console();
    let window = web_sys::window().ok_or_else(|| ClientError::Browser("no window".to_owned()))?;
    let video_url = PageGlobals::from_window(&window).video_url;

    let on_api_ready = Closure::<dyn FnMut()>::new(move || {
        if let Err(err) = mount_player(video_url.as_deref(), &mut DomProjector::new()) {
            log::error!("video player setup failed: {err}");
        }
    });
    js_sys::Reflect::set(&window, &JsValue::from_str(API_READY_CALLBACK), on_api_ready.as_ref())
        .map_err(|e| ClientError::from_js(&e))?;
    on_api_ready.forget();

    let document = window.document().ok_or_else(|| ClientError::Browser("no document".to_owned()))?;
    load_iframe_api(&document)?;
    Ok(())
}
