// ClipSentinel - Bindings et constantes Win32
// Declarations FFI pour les APIs Windows utilisees
//
// Ce fichier contient toutes les declarations FFI necessaires pour
// interagir avec les APIs Win32 depuis Rust.
//
// # Organisation
// 1. Types de base Win32 (HWND, HHOOK, etc.)
// 2. Constantes de messages, hooks, virtual keys, clipboard
// 3. Structures (WNDCLASSEXW, MSG, KBDLLHOOKSTRUCT, NOTIFYICONDATAW, etc.)
// 4. Declarations FFI extern "system" par DLL (user32, kernel32, shell32, advapi32)
// 5. Fonctions helpers Rust (to_wstring, from_wstring, last_error, etc.)
//
// # Safety
// Toutes les fonctions FFI sont marquees unsafe. Les wrappers safe
// sont fournis dans les modules de plus haut niveau (clipboard, gate,
// system, ui).
//
// # Portabilite
// Ce module est specifique a Windows. Les types et constantes suivent
// les conventions Win32 (HWND, LPARAM, etc.).

#![allow(non_snake_case, non_camel_case_types, dead_code)]

use std::ffi::c_void;

// --- Types de base Win32 ---
pub type HANDLE = *mut c_void;
pub type HWND = *mut c_void;
pub type HINSTANCE = *mut c_void;
pub type HMODULE = *mut c_void;
pub type HICON = *mut c_void;
pub type HCURSOR = *mut c_void;
pub type HBRUSH = *mut c_void;
pub type HMENU = *mut c_void;
pub type HHOOK = *mut c_void;
pub type WPARAM = usize;
pub type LPARAM = isize;
pub type LRESULT = isize;
pub type ATOM = u16;
pub type BOOL = i32;
pub type DWORD = u32;
pub type UINT = u32;
pub type LPCWSTR = *const u16;
pub type LPWSTR = *mut u16;

/// Signature des procedures de hook bas niveau (clavier et souris).
pub type HOOKPROC = Option<unsafe extern "system" fn(i32, WPARAM, LPARAM) -> LRESULT>;

pub const TRUE: BOOL = 1;
pub const FALSE: BOOL = 0;
pub const NULL_HWND: HWND = std::ptr::null_mut();
pub const NULL_HANDLE: HANDLE = std::ptr::null_mut();

// --- Window Messages ---
pub const WM_DESTROY: u32 = 0x0002;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_ENDSESSION: u32 = 0x0016;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_CLIPBOARDUPDATE: u32 = 0x031D;
pub const WM_USER: u32 = 0x0400;

// --- Hooks bas niveau ---
pub const WH_KEYBOARD_LL: i32 = 13;
pub const WH_MOUSE_LL: i32 = 14;
pub const HC_ACTION: i32 = 0;

// --- Virtual Keys ---
pub const VK_SHIFT: u32 = 0x10;
pub const VK_CONTROL: u32 = 0x11;
pub const VK_INSERT: u32 = 0x2D;
pub const VK_DELETE: u32 = 0x2E;
pub const VK_C: u32 = 0x43;
pub const VK_V: u32 = 0x56;
pub const VK_X: u32 = 0x58;

/// Masque "touche enfoncee" retourne par GetAsyncKeyState.
pub const KEY_DOWN_MASK: u16 = 0x8000;

// --- Clipboard Formats ---
pub const CF_UNICODETEXT: u32 = 13;

// --- Cursor / Icon ---
pub const IDC_ARROW: LPCWSTR = 32512 as LPCWSTR;
pub const IDI_APPLICATION: LPCWSTR = 32512 as LPCWSTR;

// --- Class Styles ---
pub const CS_HREDRAW: u32 = 0x0002;
pub const CS_VREDRAW: u32 = 0x0001;

// --- ShowWindow (ShellExecuteW) ---
pub const SW_SHOWNORMAL: i32 = 1;

// --- Notify Icon ---
pub const NIM_ADD: u32 = 0x00000000;
pub const NIM_MODIFY: u32 = 0x00000001;
pub const NIM_DELETE: u32 = 0x00000002;
pub const NIF_MESSAGE: u32 = 0x00000001;
pub const NIF_ICON: u32 = 0x00000002;
pub const NIF_TIP: u32 = 0x00000004;
pub const NIF_INFO: u32 = 0x00000010;
pub const NIIF_INFO: u32 = 0x00000001;
pub const NIIF_ERROR: u32 = 0x00000003;

// --- TrackPopupMenu ---
pub const TPM_LEFTALIGN: u32 = 0x0000;
pub const TPM_BOTTOMALIGN: u32 = 0x0020;
pub const TPM_RETURNCMD: u32 = 0x0100;
pub const TPM_NONOTIFY: u32 = 0x0080;

// --- Menu ---
pub const MF_STRING: u32 = 0x00000000;
pub const MF_SEPARATOR: u32 = 0x00000800;

// --- Process ---
pub const PROCESS_QUERY_LIMITED_INFORMATION: u32 = 0x1000;

// --- Memory ---
pub const GMEM_MOVEABLE: u32 = 0x0002;
pub const GMEM_ZEROINIT: u32 = 0x0040;
pub const GHND: u32 = GMEM_MOVEABLE | GMEM_ZEROINIT;
pub const GWLP_USERDATA: i32 = -21;

// --- MessageBox ---
pub const MB_OK: u32 = 0x00000000;
pub const MB_YESNO: u32 = 0x00000004;
pub const MB_ICONERROR: u32 = 0x00000010;
pub const MB_ICONWARNING: u32 = 0x00000030;
pub const MB_ICONINFORMATION: u32 = 0x00000040;
pub const MB_SETFOREGROUND: u32 = 0x00010000;
pub const MB_TOPMOST: u32 = 0x00040000;
pub const IDYES: i32 = 6;
pub const IDNO: i32 = 7;

// --- Codes d'erreur ---
pub const ERROR_ALREADY_EXISTS: u32 = 183;

// --- Structures ---

#[repr(C)]
pub struct WNDCLASSEXW {
    pub cbSize: u32,
    pub style: u32,
    pub lpfnWndProc: Option<unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT>,
    pub cbClsExtra: i32,
    pub cbWndExtra: i32,
    pub hInstance: HINSTANCE,
    pub hIcon: HICON,
    pub hCursor: HCURSOR,
    pub hbrBackground: HBRUSH,
    pub lpszMenuName: LPCWSTR,
    pub lpszClassName: LPCWSTR,
    pub hIconSm: HICON,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct MSG {
    pub hwnd: HWND,
    pub message: u32,
    pub wParam: WPARAM,
    pub lParam: LPARAM,
    pub time: u32,
    pub pt: POINT,
}

#[repr(C)]
#[derive(Default, Clone, Copy)]
pub struct POINT {
    pub x: i32,
    pub y: i32,
}

/// Donnees du hook clavier bas niveau (WH_KEYBOARD_LL).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct KBDLLHOOKSTRUCT {
    pub vkCode: u32,
    pub scanCode: u32,
    pub flags: u32,
    pub time: u32,
    pub dwExtraInfo: usize,
}

/// Donnees du hook souris bas niveau (WH_MOUSE_LL).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct MSLLHOOKSTRUCT {
    pub pt: POINT,
    pub mouseData: u32,
    pub flags: u32,
    pub time: u32,
    pub dwExtraInfo: usize,
}

#[repr(C)]
pub struct NOTIFYICONDATAW {
    pub cbSize: u32,
    pub hWnd: HWND,
    pub uID: u32,
    pub uFlags: u32,
    pub uCallbackMessage: u32,
    pub hIcon: HICON,
    pub szTip: [u16; 128],
    pub dwState: u32,
    pub dwStateMask: u32,
    pub szInfo: [u16; 256],
    pub uVersion: u32,
    pub szInfoTitle: [u16; 64],
    pub dwInfoFlags: u32,
    pub guidItem: [u8; 16],
    pub hBalloonIcon: HICON,
}

// --- FFI user32 ---
#[link(name = "user32")]
extern "system" {
    pub fn RegisterClassExW(lpwcx: *const WNDCLASSEXW) -> ATOM;
    pub fn CreateWindowExW(
        exStyle: u32, cls: LPCWSTR, name: LPCWSTR, style: u32,
        x: i32, y: i32, w: i32, h: i32,
        parent: HWND, menu: HMENU, inst: HINSTANCE, param: *mut c_void,
    ) -> HWND;
    pub fn DestroyWindow(hWnd: HWND) -> BOOL;
    pub fn GetMessageW(msg: *mut MSG, hWnd: HWND, min: u32, max: u32) -> BOOL;
    pub fn TranslateMessage(msg: *const MSG) -> BOOL;
    pub fn DispatchMessageW(msg: *const MSG) -> LRESULT;
    pub fn PostQuitMessage(code: i32);
    pub fn PostMessageW(hWnd: HWND, msg: u32, w: WPARAM, l: LPARAM) -> BOOL;
    pub fn DefWindowProcW(hWnd: HWND, msg: u32, w: WPARAM, l: LPARAM) -> LRESULT;
    pub fn SetWindowLongPtrW(hWnd: HWND, idx: i32, val: isize) -> isize;
    pub fn GetWindowLongPtrW(hWnd: HWND, idx: i32) -> isize;
    pub fn LoadCursorW(inst: HINSTANCE, name: LPCWSTR) -> HCURSOR;
    pub fn LoadIconW(inst: HINSTANCE, name: LPCWSTR) -> HICON;
    pub fn MessageBoxW(hWnd: HWND, text: LPCWSTR, caption: LPCWSTR, mtype: u32) -> i32;
    pub fn AddClipboardFormatListener(hWnd: HWND) -> BOOL;
    pub fn RemoveClipboardFormatListener(hWnd: HWND) -> BOOL;
    pub fn OpenClipboard(hWnd: HWND) -> BOOL;
    pub fn CloseClipboard() -> BOOL;
    pub fn EmptyClipboard() -> BOOL;
    pub fn GetClipboardData(fmt: u32) -> HANDLE;
    pub fn SetClipboardData(fmt: u32, hMem: HANDLE) -> HANDLE;
    pub fn IsClipboardFormatAvailable(fmt: u32) -> BOOL;
    pub fn GetClipboardOwner() -> HWND;
    pub fn GetForegroundWindow() -> HWND;
    pub fn SetForegroundWindow(hWnd: HWND) -> BOOL;
    pub fn GetWindowThreadProcessId(hWnd: HWND, pid: *mut u32) -> u32;
    pub fn GetCursorPos(pt: *mut POINT) -> BOOL;
    pub fn WindowFromPoint(pt: POINT) -> HWND;
    pub fn SetWindowsHookExW(id: i32, lpfn: HOOKPROC, hMod: HINSTANCE, tid: u32) -> HHOOK;
    pub fn UnhookWindowsHookEx(hhk: HHOOK) -> BOOL;
    pub fn CallNextHookEx(hhk: HHOOK, code: i32, w: WPARAM, l: LPARAM) -> LRESULT;
    pub fn GetAsyncKeyState(vk: i32) -> i16;
    pub fn CreatePopupMenu() -> HMENU;
    pub fn DestroyMenu(hMenu: HMENU) -> BOOL;
    pub fn AppendMenuW(m: HMENU, f: u32, id: usize, s: LPCWSTR) -> BOOL;
    pub fn TrackPopupMenu(m: HMENU, f: u32, x: i32, y: i32, r: i32, hWnd: HWND, rc: *const c_void) -> BOOL;
}

// --- FFI kernel32 ---
#[link(name = "kernel32")]
extern "system" {
    pub fn GetModuleHandleW(name: LPCWSTR) -> HMODULE;
    pub fn GetLastError() -> u32;
    pub fn GlobalAlloc(flags: u32, bytes: usize) -> HANDLE;
    pub fn GlobalLock(hMem: HANDLE) -> *mut c_void;
    pub fn GlobalUnlock(hMem: HANDLE) -> BOOL;
    pub fn GlobalSize(hMem: HANDLE) -> usize;
    pub fn GlobalFree(hMem: HANDLE) -> HANDLE;
    pub fn OpenProcess(access: u32, inherit: BOOL, pid: u32) -> HANDLE;
    pub fn CloseHandle(h: HANDLE) -> BOOL;
    pub fn QueryFullProcessImageNameW(h: HANDLE, f: u32, buf: LPWSTR, sz: *mut u32) -> BOOL;
    pub fn GetEnvironmentVariableW(name: LPCWSTR, buf: LPWSTR, sz: u32) -> u32;
    pub fn GetComputerNameW(buf: LPWSTR, sz: *mut u32) -> BOOL;
    pub fn CreateMutexW(attrs: *mut c_void, initial: BOOL, name: LPCWSTR) -> HANDLE;
}

// --- FFI shell32 ---
#[link(name = "shell32")]
extern "system" {
    pub fn Shell_NotifyIconW(msg: u32, data: *mut NOTIFYICONDATAW) -> BOOL;
    pub fn ShellExecuteW(
        hWnd: HWND, op: LPCWSTR, file: LPCWSTR,
        params: LPCWSTR, dir: LPCWSTR, show: i32,
    ) -> HINSTANCE;
}

// --- FFI advapi32 ---
#[link(name = "advapi32")]
extern "system" {
    pub fn GetUserNameW(buf: LPWSTR, sz: *mut u32) -> BOOL;
}

// --- Helpers ---

/// Convertit un &str en Vec<u16> UTF-16 null-termine.
pub fn to_wstring(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convertit un slice UTF-16 (possiblement null-termine) en String.
pub fn from_wstring(s: &[u16]) -> String {
    let len = s.iter().position(|&c| c == 0).unwrap_or(s.len());
    String::from_utf16_lossy(&s[..len])
}

/// Recupere le dernier code d'erreur Win32.
pub fn last_error() -> u32 {
    // SAFETY: Fonction Win32 sans effet de bord dangereux.
    unsafe { GetLastError() }
}

/// Recupere une variable d'environnement Windows.
pub fn get_env_var(name: &str) -> Option<String> {
    let wname = to_wstring(name);
    let mut buf = [0u16; 512];
    // SAFETY: Lecture seule de l'environnement.
    let len = unsafe { GetEnvironmentVariableW(wname.as_ptr(), buf.as_mut_ptr(), buf.len() as u32) };
    if len == 0 || len >= buf.len() as u32 { return None; }
    Some(from_wstring(&buf[..len as usize]))
}

/// Extrait le mot bas d'un LPARAM (messages tray).
pub const fn loword_l(l: LPARAM) -> u32 { (l & 0xFFFF) as u32 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wstring_roundtrip() {
        let w = to_wstring("hello");
        assert_eq!(w.last(), Some(&0));
        assert_eq!(from_wstring(&w), "hello");
    }

    #[test]
    fn test_from_wstring_without_nul() {
        let w: Vec<u16> = "abc".encode_utf16().collect();
        assert_eq!(from_wstring(&w), "abc");
    }

    #[test]
    fn test_loword() {
        assert_eq!(loword_l(0x0002_0204), WM_RBUTTONDOWN as u32);
    }
}
