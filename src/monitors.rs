use anyhow::Result;

use crate::geometry::Rect;

#[cfg(windows)]
use windows::{
    core::BOOL,
    Win32::Graphics::Gdi::{
        EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFOEXW,
    },
};

/// Geometry snapshot of one attached monitor.
#[derive(Debug, Clone)]
pub struct MonitorSnapshot {
    /// Display name shown to the user.
    pub name: String,
    /// Device/connector identifier, e.g. `\\.\DISPLAY1` or `DP-1`.
    pub device: String,
    pub is_primary: bool,
    /// Full monitor rectangle in virtual-screen coordinates.
    pub geometry: Rect,
    /// Monitor rectangle minus taskbars and docked appbars.
    pub work_area: Rect,
}

/// Enumerate attached monitors with their geometry and usable work area.
#[cfg(windows)]
pub fn enumerate_monitors() -> Result<Vec<MonitorSnapshot>> {
    use std::sync::Mutex;

    let monitors = Mutex::new(Vec::new());

    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(monitor_enum_proc),
            windows::Win32::Foundation::LPARAM(&monitors as *const _ as isize),
        );
    }

    let mut result = monitors.into_inner().unwrap();

    // Primary first, the rest in enumeration order.
    result.sort_by(|a: &MonitorSnapshot, b: &MonitorSnapshot| {
        b.is_primary.cmp(&a.is_primary)
    });

    Ok(result)
}

#[cfg(windows)]
unsafe extern "system" fn monitor_enum_proc(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _rect: *mut windows::Win32::Foundation::RECT,
    lparam: windows::Win32::Foundation::LPARAM,
) -> BOOL {
    use std::sync::Mutex;
    let monitors = &*(lparam.0 as *const Mutex<Vec<MonitorSnapshot>>);

    let mut info: MONITORINFOEXW = std::mem::zeroed();
    info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;

    if GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut _).as_bool() {
        let rect = info.monitorInfo.rcMonitor;
        let work = info.monitorInfo.rcWork;

        let is_primary = (info.monitorInfo.dwFlags & 1) != 0; // MONITORINFOF_PRIMARY

        let device = String::from_utf16_lossy(
            &info
                .szDevice
                .iter()
                .take_while(|&&c| c != 0)
                .copied()
                .collect::<Vec<_>>(),
        );

        let mut monitors = monitors.lock().unwrap();
        let index = monitors.len();

        monitors.push(MonitorSnapshot {
            name: format!("Display {}", index + 1),
            device,
            is_primary,
            geometry: Rect::new(
                rect.left,
                rect.top,
                rect.right - rect.left,
                rect.bottom - rect.top,
            ),
            work_area: Rect::new(
                work.left,
                work.top,
                work.right - work.left,
                work.bottom - work.top,
            ),
        });
    }

    true.into()
}

#[cfg(not(windows))]
pub fn enumerate_monitors() -> Result<Vec<MonitorSnapshot>> {
    // Fallback for non-Windows platforms.
    Ok(vec![MonitorSnapshot {
        name: "Display 1".to_string(),
        device: "DISPLAY1".to_string(),
        is_primary: true,
        geometry: Rect::new(0, 0, 1920, 1080),
        work_area: Rect::new(0, 0, 1920, 1040),
    }])
}
