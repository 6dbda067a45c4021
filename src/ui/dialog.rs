// ClipSentinel - Dialogues modaux
// Alerte de decision et messages d'erreur via MessageBoxW
//
// Le dialogue de decision est volontairement bloquant et sans delai
// d'expiration : tant que l'utilisateur n'a pas tranche, la boucle de
// messages reste suspendue dans l'appel modal et les hooks continuent
// d'avaler les gestes copier/couper/coller.
//
// # Safety
// Les appels MessageBoxW sont isoles dans des blocs unsafe locaux.
//
// # Portabilite
// Ce module est specifique a Windows (user32).

use crate::system::win32::*;

/// Verdict de l'utilisateur face a un contenu suspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Rejeter : vider le presse-papiers
    Discard,
    /// Garder : autoriser exactement un collage
    Keep,
}

/// Presente l'alerte de decision et bloque jusqu'a la reponse.
///
/// Oui = rejeter le contenu, Non = le garder pour un collage unique.
/// Une fermeture sans choix explicite vaut rejet (choix conservateur).
pub fn ask_discard_keep(hwnd: HWND, title: &str, text: &str) -> Decision {
    let wtitle = to_wstring(title);
    let wtext = to_wstring(text);
    // SAFETY: appel FFI Win32, modal sur le thread de la boucle de messages.
    let choice = unsafe {
        MessageBoxW(
            hwnd,
            wtext.as_ptr(),
            wtitle.as_ptr(),
            MB_YESNO | MB_ICONWARNING | MB_SETFOREGROUND | MB_TOPMOST,
        )
    };
    if choice == IDNO {
        Decision::Keep
    } else {
        Decision::Discard
    }
}

/// Affiche un message d'erreur modal.
pub fn show_error(hwnd: HWND, text: &str) {
    let wtitle = to_wstring("ClipSentinel - Erreur");
    let wtext = to_wstring(text);
    // SAFETY: appel FFI Win32.
    unsafe {
        MessageBoxW(
            hwnd,
            wtext.as_ptr(),
            wtitle.as_ptr(),
            MB_OK | MB_ICONERROR | MB_SETFOREGROUND | MB_TOPMOST,
        );
    }
}

/// Affiche un message d'information modal (boite "A propos").
pub fn show_info(hwnd: HWND, title: &str, text: &str) {
    let wtitle = to_wstring(title);
    let wtext = to_wstring(text);
    // SAFETY: appel FFI Win32.
    unsafe {
        MessageBoxW(
            hwnd,
            wtext.as_ptr(),
            wtitle.as_ptr(),
            MB_OK | MB_ICONINFORMATION,
        );
    }
}
