// ClipSentinel - Creation et gestion des fenetres Win32
// Fenetre cachee receptrice des messages systeme
//
// ClipSentinel n'affiche aucune fenetre visible : une unique fenetre
// cachee recoit WM_CLIPBOARDUPDATE, les callbacks de l'icone tray et
// sert de proprietaire aux dialogues modaux.
//
// # Safety
// Tous les appels Win32 sont isoles dans des blocs unsafe locaux.
// Les fonctions publiques retournent des CsResult pour signaler les erreurs.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use crate::error::{CsError, CsResult};
use crate::system::win32::*;

/// Classe de fenetre pour la fenetre principale cachee.
pub const MAIN_CLASS: &str = "ClipSentinelMain";

/// Enregistre une classe de fenetre Win32.
pub fn register_class(
    class_name: &str,
    wndproc: unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT,
) -> CsResult<ATOM> {
    let wclass = to_wstring(class_name);
    // SAFETY: appels FFI Win32 pour enregistrer la classe.
    let hinstance = unsafe { GetModuleHandleW(std::ptr::null()) };

    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wndproc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: unsafe { LoadIconW(std::ptr::null_mut(), IDI_APPLICATION) },
        hCursor: unsafe { LoadCursorW(std::ptr::null_mut(), IDC_ARROW) },
        hbrBackground: std::ptr::null_mut(),
        lpszMenuName: std::ptr::null(),
        lpszClassName: wclass.as_ptr(),
        hIconSm: std::ptr::null_mut(),
    };

    // SAFETY: la structure est correctement initialisee ci-dessus.
    let atom = unsafe { RegisterClassExW(&wc) };
    if atom == 0 {
        return Err(CsError::Win32("RegisterClassExW failed".into(), last_error()));
    }
    Ok(atom)
}

/// Cree une fenetre cachee (receptrice de messages).
pub fn create_hidden_window(class_name: &str) -> CsResult<HWND> {
    let wclass = to_wstring(class_name);
    let wtitle = to_wstring("ClipSentinel");
    // SAFETY: appels FFI Win32.
    let hinstance = unsafe { GetModuleHandleW(std::ptr::null()) };

    let hwnd = unsafe {
        CreateWindowExW(
            0,
            wclass.as_ptr(),
            wtitle.as_ptr(),
            0, // Pas de style visible
            0, 0, 0, 0,
            NULL_HWND,
            std::ptr::null_mut(),
            hinstance,
            std::ptr::null_mut(),
        )
    };

    if hwnd.is_null() {
        return Err(CsError::Win32("CreateWindowExW hidden failed".into(), last_error()));
    }
    Ok(hwnd)
}

/// Recupere le pointeur user_data associe a une fenetre.
pub fn get_user_data<T>(hwnd: HWND) -> *mut T {
    // SAFETY: appel FFI Win32.
    unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut T }
}

/// Detruit une fenetre.
pub fn destroy(hwnd: HWND) {
    if !hwnd.is_null() {
        // SAFETY: appel FFI Win32.
        unsafe { DestroyWindow(hwnd) };
    }
}
