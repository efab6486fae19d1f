use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::error::LabelerError;

#[cfg(windows)]
use windows::{
    core::w,
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DispatchMessageW, GetMessageW, PostMessageW,
            PostQuitMessage, RegisterClassW, TranslateMessage, MSG, SPI_SETWORKAREA,
            WINDOW_EX_STYLE, WM_CLOSE, WM_DESTROY, WM_SETTINGCHANGE, WNDCLASSW, WS_POPUP,
        },
    },
};

/// Handle on a stream of work-area geometry change events.
///
/// The controller drains it on the UI thread; the subscription owns whatever
/// platform resources feed it and tears them down on `unsubscribe` (or on
/// drop), so no notification can arrive after the owner is gone.
pub struct WorkAreaSubscription {
    rx: Receiver<()>,
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl WorkAreaSubscription {
    /// Drain pending events, coalescing a burst into one answer.
    pub fn changed(&self) -> bool {
        let mut seen = false;
        while self.rx.try_recv().is_ok() {
            seen = true;
        }
        seen
    }

    pub fn unsubscribe(mut self) {
        self.stop_source();
    }

    fn stop_source(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for WorkAreaSubscription {
    fn drop(&mut self) {
        self.stop_source();
    }
}

/// Injection handle paired with a manual subscription.
#[derive(Clone)]
pub struct WorkAreaNotifier {
    tx: Sender<()>,
}

impl WorkAreaNotifier {
    pub fn notify(&self) {
        let _ = self.tx.send(());
    }
}

/// Subscription fed by hand, for hosts that already observe work-area
/// changes themselves and for tests.
pub fn manual() -> (WorkAreaSubscription, WorkAreaNotifier) {
    let (tx, rx) = unbounded();
    (
        WorkAreaSubscription { rx, stop: None },
        WorkAreaNotifier { tx },
    )
}

/// Subscribe to the system work-area change notification.
///
/// A hidden top-level window on a background thread receives the
/// `WM_SETTINGCHANGE` broadcast for `SPI_SETWORKAREA` (taskbar or appbar
/// geometry changed) and forwards a unit event over a channel; unsubscribe
/// closes the window and joins the thread.
#[cfg(windows)]
pub fn native() -> Result<WorkAreaSubscription, LabelerError> {
    use std::thread;
    use std::time::Duration;

    let (tx, rx) = unbounded();
    *CHANGE_SENDER.lock() = Some(tx);

    let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
    let thread = thread::spawn(move || unsafe { watcher_message_loop(ready_tx) });

    let hwnd = match ready_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(Ok(hwnd)) => hwnd,
        Ok(Err(e)) => {
            CHANGE_SENDER.lock().take();
            let _ = thread.join();
            return Err(LabelerError::Watcher(e));
        }
        Err(_) => {
            CHANGE_SENDER.lock().take();
            return Err(LabelerError::Watcher(
                "watcher window did not come up".to_string(),
            ));
        }
    };

    let stop = Box::new(move || {
        unsafe {
            let _ = PostMessageW(
                Some(HWND(hwnd as *mut _)),
                WM_CLOSE,
                WPARAM(0),
                LPARAM(0),
            );
        }
        let _ = thread.join();
        CHANGE_SENDER.lock().take();
    });

    Ok(WorkAreaSubscription {
        rx,
        stop: Some(stop),
    })
}

/// Non-Windows fallback: an inert subscription that never fires.
#[cfg(not(windows))]
pub fn native() -> Result<WorkAreaSubscription, LabelerError> {
    let (_tx, rx) = unbounded();
    Ok(WorkAreaSubscription { rx, stop: None })
}

#[cfg(windows)]
static CHANGE_SENDER: parking_lot::Mutex<Option<Sender<()>>> = parking_lot::Mutex::new(None);

#[cfg(windows)]
unsafe fn watcher_message_loop(ready_tx: Sender<Result<isize, String>>) {
    let class_name = w!("DisplayLabelerWorkAreaWatcher");

    let hinstance = match GetModuleHandleW(None) {
        Ok(h) => h,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("GetModuleHandleW failed: {}", e)));
            return;
        }
    };

    let wc = WNDCLASSW {
        lpfnWndProc: Some(watcher_proc),
        hInstance: hinstance.into(),
        lpszClassName: class_name,
        ..Default::default()
    };
    RegisterClassW(&wc);

    let hwnd = match CreateWindowExW(
        WINDOW_EX_STYLE::default(),
        class_name,
        w!("Display Labeler Work Area Watcher"),
        WS_POPUP,
        0,
        0,
        0,
        0,
        None,
        None,
        Some(HINSTANCE(hinstance.0)),
        None,
    ) {
        Ok(hwnd) => hwnd,
        Err(e) => {
            let _ = ready_tx.send(Err(format!("watcher window creation failed: {}", e)));
            return;
        }
    };

    let _ = ready_tx.send(Ok(hwnd.0 as isize));

    let mut msg = MSG::default();
    while GetMessageW(&mut msg, None, 0, 0).as_bool() {
        let _ = TranslateMessage(&msg);
        DispatchMessageW(&msg);
    }
}

#[cfg(windows)]
unsafe extern "system" fn watcher_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_SETTINGCHANGE => {
            if wparam.0 == SPI_SETWORKAREA.0 as usize {
                if let Some(tx) = CHANGE_SENDER.lock().as_ref() {
                    let _ = tx.send(());
                }
            }
            LRESULT(0)
        }
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_subscription_coalesces_events() {
        let (sub, notifier) = manual();
        assert!(!sub.changed());

        notifier.notify();
        notifier.notify();
        notifier.notify();
        assert!(sub.changed());
        // Burst was drained in one call.
        assert!(!sub.changed());
    }

    #[test]
    fn unsubscribe_consumes_the_subscription() {
        let (sub, notifier) = manual();
        sub.unsubscribe();
        // Notifying a torn-down subscription must not panic.
        notifier.notify();
    }

    #[cfg(not(windows))]
    #[test]
    fn native_fallback_never_fires() {
        let sub = native().unwrap();
        assert!(!sub.changed());
        sub.unsubscribe();
    }
}
