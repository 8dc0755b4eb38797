// ── Main window ───────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the main window class.
//   • Create the top-level window, its File menu, accelerators and text area.
//   • Run the Win32 message loop.
//   • Dispatch WM_COMMAND, WM_CLOSE, WM_DESTROY, WM_SIZE, WM_SETFOCUS.
//   • Expose a safe error-dialog helper for use by main().
//
// `WindowState` lives in a `RefCell` whose address is stored in
// GWLP_USERDATA.  Modal dialogs pump messages while a command holds the
// mutable borrow; re-entrant messages find the cell busy and are skipped.
// That is also what silences the EN_CHANGE fired by our own `set_text`.

#![allow(unsafe_code)]

use std::cell::RefCell;

use tracing::{debug, info, warn};
use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::Gdi::{GetStockObject, UpdateWindow, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            AppendMenuW, CreateAcceleratorTableW, CreateMenu, CreateWindowExW, DefWindowProcW,
            DestroyAcceleratorTable, DestroyWindow, DispatchMessageW, GetMessageW,
            GetWindowLongPtrW, GetWindowPlacement, LoadCursorW, LoadIconW, MessageBoxW,
            PostQuitMessage, RegisterClassExW, SetMenu, SetWindowLongPtrW, ShowWindow,
            TranslateAcceleratorW, TranslateMessage, ACCEL, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
            FCONTROL, FSHIFT, FVIRTKEY, GWLP_USERDATA, HACCEL, HMENU, IDC_ARROW, IDI_APPLICATION,
            MB_ICONERROR, MB_OK, MF_POPUP, MF_SEPARATOR, MF_STRING, MSG, SW_SHOW,
            WINDOWPLACEMENT, WINDOW_EX_STYLE, WM_CLOSE, WM_COMMAND, WM_DESTROY, WM_SETFOCUS,
            WM_SIZE, WNDCLASSEXW, WS_OVERLAPPEDWINDOW,
        },
    },
};

use super::{dialogs::wide, Win32Host};
use crate::{
    app::{App, Effect, APP_NAME},
    commands::{is_mac, Command},
    editor::{TextArea, EN_CHANGE, IDC_TEXT_AREA},
    error::{JotterError, Result},
    platform::Host,
    settings::{self, Settings},
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the main window class.
const CLASS_NAME: PCWSTR = w!("JotterMainWindow");

// ── Menu command IDs ──────────────────────────────────────────────────────────

const IDM_FILE_NEW: u16 = 1001;
const IDM_FILE_OPEN: u16 = 1002;
const IDM_FILE_SAVE: u16 = 1003;
const IDM_FILE_SAVE_AS: u16 = 1004;
const IDM_FILE_EXIT: u16 = 1005;

fn command_id(command: Command) -> u16 {
    match command {
        Command::New => IDM_FILE_NEW,
        Command::Open => IDM_FILE_OPEN,
        Command::Save => IDM_FILE_SAVE,
        Command::SaveAs => IDM_FILE_SAVE_AS,
        Command::Exit => IDM_FILE_EXIT,
    }
}

fn command_from_id(id: u16) -> Option<Command> {
    Command::ALL.into_iter().find(|&c| command_id(c) == id)
}

// ── Window state ──────────────────────────────────────────────────────────────

/// Everything the window procedure needs between messages.
struct WindowState {
    app: App,
    text_area: TextArea,
    settings: Settings,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Register the main window class, create the window, and drive the message
/// loop until the user exits.
pub(crate) fn run(settings: Settings) -> Result<()> {
    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // always valid for the process lifetime and never fails in practice.
    let hmodule = unsafe { GetModuleHandleW(None) }.map_err(JotterError::from)?;

    // HINSTANCE and HMODULE represent the same underlying value on Windows.
    let hinstance = HINSTANCE(hmodule.0);

    register_class(hinstance)?;
    let hwnd = create_window(hinstance, &settings)?;
    let text_area = TextArea::create(hwnd, hinstance)?;
    let accel = build_accelerators()?;

    let state = Box::new(RefCell::new(WindowState {
        app: App::new(),
        text_area,
        settings,
    }));

    // SAFETY: `state` is boxed, so its address is stable, and it outlives the
    // message loop below.  WM_DESTROY clears the slot before the window dies.
    unsafe {
        let ptr: *const RefCell<WindowState> = &*state;
        let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, ptr as isize);
    }

    {
        let st = state.borrow();
        Win32Host::new(hwnd).set_title(&st.app.window_title());
    }

    // SAFETY: hwnd was just returned by CreateWindowExW and is valid.
    // ShowWindow returns the previous visibility state; UpdateWindow returns
    // a success BOOL; both are intentionally ignored here.
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = UpdateWindow(hwnd);
    }
    state.borrow().text_area.focus();
    info!("main window shown");

    let result = message_loop(hwnd, accel);

    // SAFETY: accel came from CreateAcceleratorTableW and is not used again.
    unsafe {
        let _ = DestroyAcceleratorTable(accel);
    }
    drop(state);
    result
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
/// Used by `main()` when `run()` returns an error.
pub(crate) fn show_error_dialog(message: &str) {
    let msg_wide = wide(message);
    let title_wide = wide(&format!("{APP_NAME} - Fatal Error"));

    // SAFETY: msg_wide and title_wide are valid null-terminated UTF-16 strings
    // that remain allocated for the duration of the MessageBoxW call.
    // HWND::default() (null) means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(msg_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            MB_OK | MB_ICONERROR,
        );
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: LoadIconW with IDI_APPLICATION always succeeds; it loads the
    // built-in application icon resource.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(JotterError::from)?;

    // SAFETY: LoadCursorW with IDC_ARROW always succeeds; the arrow cursor is
    // a built-in resource.
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(JotterError::from)?;

    // SAFETY: GetStockObject with WHITE_BRUSH always returns a valid HGDIOBJ.
    let bg_brush = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        hbrBackground: bg_brush,
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        return Err(last_error("RegisterClassExW"));
    }

    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, settings: &Settings) -> Result<HWND> {
    let title = wide(APP_NAME);

    // SAFETY: CLASS_NAME was just registered; hinstance is the exe's module.
    // HWND::default() (null parent) creates a top-level window.
    // HMENU::default() (null menu): we attach the menu separately below.
    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            PCWSTR(title.as_ptr()),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            settings.window_width,
            settings.window_height,
            HWND::default(),
            HMENU::default(),
            hinstance,
            None,
        )
    }
    .map_err(JotterError::from)?;

    let menu = build_menu()?;
    // SAFETY: hwnd and menu are valid handles.
    unsafe { SetMenu(hwnd, menu) }.map_err(JotterError::from)?;

    Ok(hwnd)
}

// ── Menu and accelerators ─────────────────────────────────────────────────────

fn build_menu() -> Result<HMENU> {
    let mac = is_mac();

    // SAFETY: CreateMenu has no preconditions.  Each label buffer outlives
    // the AppendMenuW call that copies it.
    unsafe {
        let bar = CreateMenu().map_err(JotterError::from)?;
        let file = CreateMenu().map_err(JotterError::from)?;

        for command in Command::ALL {
            if command == Command::Exit {
                AppendMenuW(file, MF_SEPARATOR, 0, PCWSTR::null()).map_err(JotterError::from)?;
            }
            let label = wide(&command.menu_text(mac));
            AppendMenuW(file, MF_STRING, usize::from(command_id(command)), PCWSTR(label.as_ptr()))
                .map_err(JotterError::from)?;
        }

        // The uIDNewItem parameter for MF_POPUP is the child HMENU cast to usize.
        AppendMenuW(bar, MF_POPUP, file.0 as usize, w!("&File")).map_err(JotterError::from)?;

        Ok(bar)
    }
}

fn build_accelerators() -> Result<HACCEL> {
    let table: Vec<ACCEL> = Command::ALL
        .into_iter()
        .map(|command| {
            let shortcut = command.shortcut();
            let mut flags = FVIRTKEY | FCONTROL;
            if shortcut.shift {
                flags = flags | FSHIFT;
            }
            // Upper-case ASCII letters equal their virtual-key codes.
            ACCEL {
                fVirt: flags,
                key: u16::from(shortcut.key),
                cmd: command_id(command),
            }
        })
        .collect();

    // SAFETY: the table slice is valid for the duration of the call; Windows
    // copies it into the new accelerator table.
    unsafe { CreateAcceleratorTableW(&table) }.map_err(JotterError::from)
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop(hwnd: HWND, accel: HACCEL) -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; HWND::default() retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };

        match ret.0 {
            -1 => return Err(last_error("GetMessageW")),
            // WM_QUIT
            0 => break,
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessageW call.
                // Accelerators are translated into WM_COMMAND for hwnd; once
                // the window is gone TranslateAcceleratorW simply returns 0.
                if TranslateAcceleratorW(hwnd, accel, &msg) == 0 {
                    let _ = TranslateMessage(&msg);
                    let _ = DispatchMessageW(&msg);
                }
            },
        }
    }

    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

/// The `WindowState` cell stored in GWLP_USERDATA, if any.
///
/// # Safety
/// Must be called on the UI thread with a window of this class.
unsafe fn window_state<'a>(hwnd: HWND) -> Option<&'a RefCell<WindowState>> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const RefCell<WindowState>;
    // SAFETY: the slot is either 0 or the boxed cell from `run`, which
    // outlives the window.
    ptr.as_ref()
}

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CLOSE => {
            // Closing the window goes through the same guard as File → Exit.
            run_command(hwnd, Command::Exit);
            LRESULT(0)
        }

        WM_DESTROY => {
            remember_window_size(hwnd);
            let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0);
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_SIZE => {
            // lparam low word = new client width, high word = new client height.
            let width = (lparam.0 & 0xFFFF) as i32;
            let height = ((lparam.0 >> 16) & 0xFFFF) as i32;
            if let Some(Ok(st)) = window_state(hwnd).map(RefCell::try_borrow) {
                st.text_area.resize(width, height);
            }
            LRESULT(0)
        }

        WM_SETFOCUS => {
            if let Some(Ok(st)) = window_state(hwnd).map(RefCell::try_borrow) {
                st.text_area.focus();
            }
            LRESULT(0)
        }

        WM_COMMAND => {
            let id = (wparam.0 & 0xFFFF) as u16;
            let code = ((wparam.0 >> 16) & 0xFFFF) as u32;

            if id == IDC_TEXT_AREA {
                if code == EN_CHANGE {
                    text_changed(hwnd);
                }
                return LRESULT(0);
            }

            match command_from_id(id) {
                Some(command) => {
                    run_command(hwnd, command);
                    LRESULT(0)
                }
                None => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Run a File command and apply its effect to the window.
fn run_command(hwnd: HWND, command: Command) {
    // SAFETY: called from wnd_proc on the UI thread.
    let Some(cell) = (unsafe { window_state(hwnd) }) else {
        return;
    };
    let effect = {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            debug!(?command, "command ignored while another is running");
            return;
        };
        let st = &mut *guard;
        let effect = st.app.run(command, &mut Win32Host::new(hwnd));
        if effect == Effect::Reloaded {
            st.text_area.set_text(st.app.text());
        }
        effect
    };

    // The borrow is released here, before WM_DESTROY re-enters wnd_proc.
    if effect == Effect::Quit {
        // SAFETY: hwnd is the main window; no WindowState borrow is alive.
        unsafe {
            let _ = DestroyWindow(hwnd);
        }
    }
}

/// EN_CHANGE from the text area: hand its contents to the session.
fn text_changed(hwnd: HWND) {
    // SAFETY: called from wnd_proc on the UI thread.
    let Some(cell) = (unsafe { window_state(hwnd) }) else {
        return;
    };
    // Busy means the change came from our own set_text.
    let Ok(mut st) = cell.try_borrow_mut() else {
        return;
    };
    let st = &mut *st;
    let text = st.text_area.text();
    st.app.edit(text, &mut Win32Host::new(hwnd));
}

/// Persist the outer window size for the next start.
fn remember_window_size(hwnd: HWND) {
    // SAFETY: called from wnd_proc on the UI thread.
    let Some(cell) = (unsafe { window_state(hwnd) }) else {
        return;
    };
    let Ok(mut st) = cell.try_borrow_mut() else {
        return;
    };

    // The restored rectangle, so a minimised or maximised window still
    // records its normal size.
    let mut placement = WINDOWPLACEMENT {
        length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
        ..Default::default()
    };
    // SAFETY: hwnd is still valid during WM_DESTROY; placement is a valid out
    // pointer with `length` set.
    if unsafe { GetWindowPlacement(hwnd, &mut placement) }.is_err() {
        warn!(error = %last_error("GetWindowPlacement"), "could not read window size");
        return;
    }
    let rect = placement.rcNormalPosition;
    if !st
        .settings
        .set_window_size(rect.right - rect.left, rect.bottom - rect.top)
    {
        debug!(?rect, "window size not remembered");
        return;
    }
    if let Err(e) = settings::save(&st.settings) {
        warn!(error = %e, "could not save settings");
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `JotterError`.
///
/// Call immediately after a Win32 function that signals failure: `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> JotterError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    JotterError::Win32 {
        function,
        code: code.0,
    }
}
