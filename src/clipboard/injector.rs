// ClipSentinel - Ecriture dans le presse-papiers
// Restauration et vidage du presse-papiers via les APIs Win32.
//
// Ce module fournit deux operations :
// - `set_clipboard_text` : replace du texte dans le presse-papiers
//   (restauration defensive apres le collage autorise)
// - `clear_clipboard` : vide le presse-papiers (rejet du contenu)
//
// # Safety
// Tous les appels FFI Win32 sont isoles dans des blocs unsafe locaux.
// La sequence OpenClipboard/EmptyClipboard/SetClipboardData/CloseClipboard
// est executee dans un seul scope pour garantir la coherence.
// En cas d'erreur, les ressources (GlobalAlloc) sont liberees avant retour.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use crate::error::{CsError, CsResult};
use crate::system::win32::*;

/// Ecrit du texte dans le presse-papiers Windows au format CF_UNICODETEXT.
///
/// Ouvre le presse-papiers, le vide, alloue un bloc de memoire globale,
/// y copie le texte au format UTF-16, puis le transmet au presse-papiers.
///
/// # Errors
/// Retourne `CsError::Clipboard` si une des operations Win32 echoue
/// (ouverture, vidage, allocation memoire, verrouillage, ecriture).
pub fn set_clipboard_text(hwnd: HWND, text: &str) -> CsResult<()> {
    let wtext = to_wstring(text);
    let bytes_needed = wtext.len() * 2;

    // SAFETY: sequence d'appels FFI Win32 pour le clipboard.
    unsafe {
        if OpenClipboard(hwnd) == FALSE {
            return Err(CsError::Clipboard("OpenClipboard failed".into()));
        }

        if EmptyClipboard() == FALSE {
            CloseClipboard();
            return Err(CsError::Clipboard("EmptyClipboard failed".into()));
        }

        let hmem = GlobalAlloc(GHND, bytes_needed);
        if hmem.is_null() {
            CloseClipboard();
            return Err(CsError::Clipboard("GlobalAlloc failed".into()));
        }

        let ptr = GlobalLock(hmem);
        if ptr.is_null() {
            GlobalFree(hmem);
            CloseClipboard();
            return Err(CsError::Clipboard("GlobalLock failed".into()));
        }

        std::ptr::copy_nonoverlapping(
            wtext.as_ptr() as *const u8,
            ptr as *mut u8,
            bytes_needed,
        );
        GlobalUnlock(hmem);

        if SetClipboardData(CF_UNICODETEXT, hmem).is_null() {
            GlobalFree(hmem);
            CloseClipboard();
            return Err(CsError::Clipboard("SetClipboardData failed".into()));
        }

        CloseClipboard();
    }
    Ok(())
}

/// Vide le presse-papiers (rejet d'un contenu suspect).
///
/// # Errors
/// Retourne `CsError::Clipboard` si l'ouverture ou le vidage echoue.
pub fn clear_clipboard(hwnd: HWND) -> CsResult<()> {
    // SAFETY: sequence d'appels FFI Win32 pour le clipboard.
    unsafe {
        if OpenClipboard(hwnd) == FALSE {
            return Err(CsError::Clipboard("OpenClipboard failed".into()));
        }
        let ok = EmptyClipboard();
        CloseClipboard();
        if ok == FALSE {
            return Err(CsError::Clipboard("EmptyClipboard failed".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    // L'ecriture du presse-papiers necessite un contexte Win32 complet
    // et ne peut pas etre testee en CI headless. Le chemin de decision
    // qui pilote ces appels est couvert par les tests de gate::state.
}
