// ClipSentinel - Surveillance du presse-papiers
// Utilise AddClipboardFormatListener pour detecter les changements.
//
// Ce module fournit les fonctions de surveillance du presse-papiers :
// - Enregistrement/desenregistrement du listener Win32
// - Prise d'instantane du contenu texte (CF_UNICODETEXT uniquement)
//
// Un echec d'ouverture du presse-papiers (tenu par un autre processus)
// rend simplement None : la notification est abandonnee sans nouvelle
// tentative, la prochaine modification declenchera une reevaluation.
//
// # Safety
// Tous les appels Win32 sont isoles dans des blocs unsafe locaux.
// La sequence OpenClipboard/lecture/CloseClipboard est garantie dans
// chaque fonction de lecture pour eviter les fuites de ressources.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use crate::error::{CsError, CsResult};
use crate::system::win32::*;

/// Enregistre la fenetre comme ecouteur du presse-papiers.
///
/// Apres enregistrement, la fenetre recevra le message WM_CLIPBOARDUPDATE
/// a chaque modification du presse-papiers par une application quelconque.
///
/// # Errors
/// Retourne `CsError::Clipboard` si l'enregistrement echoue.
pub fn register_listener(hwnd: HWND) -> CsResult<()> {
    // SAFETY: appel FFI Win32. hwnd doit etre un handle de fenetre valide.
    let ok = unsafe { AddClipboardFormatListener(hwnd) };
    if ok == FALSE {
        return Err(CsError::Clipboard("AddClipboardFormatListener failed".into()));
    }
    Ok(())
}

/// Desenregistre l'ecouteur du presse-papiers.
pub fn unregister_listener(hwnd: HWND) {
    // SAFETY: appel FFI Win32.
    unsafe { RemoveClipboardFormatListener(hwnd) };
}

/// Prend un instantane du texte Unicode du presse-papiers.
///
/// Retourne None si le presse-papiers est inaccessible (tenu par un
/// autre processus), ne contient pas de texte CF_UNICODETEXT, ou si le
/// contenu est vide. La copie retournee n'aliase jamais la memoire du
/// presse-papiers : elle appartient exclusivement a l'appelant.
pub fn read_clipboard_text(hwnd: HWND) -> Option<String> {
    // SAFETY: sequence d'appels FFI Win32 pour le clipboard.
    unsafe {
        if OpenClipboard(hwnd) == FALSE {
            return None;
        }
        let result = read_text_inner();
        CloseClipboard();
        result
    }
}

/// Lecture interne du texte (doit etre appelee entre Open/CloseClipboard).
unsafe fn read_text_inner() -> Option<String> {
    if IsClipboardFormatAvailable(CF_UNICODETEXT) == FALSE {
        return None;
    }
    let hdata = GetClipboardData(CF_UNICODETEXT);
    if hdata.is_null() {
        return None;
    }
    let ptr = GlobalLock(hdata);
    if ptr.is_null() {
        return None;
    }
    let size_bytes = GlobalSize(hdata);
    let len_u16 = size_bytes / 2;
    let slice = std::slice::from_raw_parts(ptr as *const u16, len_u16);
    let text = from_wstring(slice);
    GlobalUnlock(hdata);
    if text.is_empty() { None } else { Some(text) }
}
