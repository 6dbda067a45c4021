// ClipSentinel - Controleur d'admission des collages
// Hooks globaux clavier et souris (WH_KEYBOARD_LL / WH_MOUSE_LL)
//
// Ce module installe et retire les deux hooks bas niveau qui
// interceptent les gestes copier/couper/coller pendant un cycle de
// decision. Les procedures de hook sont des shims minces : elles
// classifient l'evenement brut (gate::gesture), demandent le verdict
// a la machine a etats du watcher, et retournent 1 (evenement avale)
// ou CallNextHookEx (evenement transmis).
//
// # Singleton assume
// L'API Win32 de hook n'accepte que des pointeurs de fonction sans
// etat ; les shims retrouvent le watcher via WATCHER_PTR, une
// reference unique injectee par `bind` au demarrage du watcher et
// invalidee par `unbind` a l'arret. Un seul watcher par processus a
// un sens : ce pointeur est assume singulier, pas cache comme un
// etat ambiant accidentel.
//
// # Safety
// Les hooks sont installes par le thread de la boucle de messages ;
// Windows rappelle les procedures de hook bas niveau sur ce meme
// thread, via sa boucle de messages. Tous les acces a WATCHER_PTR et
// aux handles de hook sont donc serialises par le dispatch : etat a
// ecrivain unique, aucun verrou necessaire.
//
// # Portabilite
// Ce module est specifique a Windows (SetWindowsHookExW).

use crate::error::{CsError, CsResult};
use crate::gate::gesture;
use crate::system::win32::*;
use crate::watcher::Watcher;

/// Reference unique vers le watcher actif, consultee par les shims.
///
/// # Safety
/// ClipSentinel est mono-thread (boucle de messages unique). Ce
/// pointeur est renseigne dans `Watcher::start` et invalide dans
/// `Watcher::stop` ; il n'est jamais accede hors du thread principal.
static mut WATCHER_PTR: *mut Watcher = std::ptr::null_mut();

/// Handle du hook clavier bas niveau (null si desarme).
static mut KB_HOOK: HHOOK = std::ptr::null_mut();

/// Handle du hook souris bas niveau (null si desarme).
static mut MOUSE_HOOK: HHOOK = std::ptr::null_mut();

/// Injecte la reference du watcher actif pour les shims.
pub fn bind(watcher: *mut Watcher) {
    // SAFETY: mono-thread, appele depuis Watcher::start.
    unsafe { WATCHER_PTR = watcher };
}

/// Invalide la reference du watcher (arret du watcher).
pub fn unbind() {
    // SAFETY: mono-thread, appele depuis Watcher::stop.
    unsafe { WATCHER_PTR = std::ptr::null_mut() };
}

/// Installe les hooks clavier et souris. Idempotent.
///
/// En cas d'echec sur l'un des deux, l'autre est retire : la garantie
/// de blocage doit etre complete ou absente, jamais partielle.
///
/// # Errors
/// Retourne `CsError::Hook` avec le code GetLastError.
pub fn arm() -> CsResult<()> {
    // SAFETY: appels FFI Win32 depuis le thread de la boucle de messages.
    unsafe {
        let hinstance = GetModuleHandleW(std::ptr::null());

        if KB_HOOK.is_null() {
            KB_HOOK = SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_shim), hinstance, 0);
            if KB_HOOK.is_null() {
                let err = last_error();
                disarm();
                return Err(CsError::Hook("SetWindowsHookExW WH_KEYBOARD_LL failed".into(), err));
            }
        }

        if MOUSE_HOOK.is_null() {
            MOUSE_HOOK = SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_shim), hinstance, 0);
            if MOUSE_HOOK.is_null() {
                let err = last_error();
                disarm();
                return Err(CsError::Hook("SetWindowsHookExW WH_MOUSE_LL failed".into(), err));
            }
        }
    }
    Ok(())
}

/// Retire les deux hooks. Idempotent (sans effet si deja desarme).
pub fn disarm() {
    // SAFETY: appels FFI Win32 depuis le thread de la boucle de messages.
    unsafe {
        if !KB_HOOK.is_null() {
            UnhookWindowsHookEx(KB_HOOK);
            KB_HOOK = std::ptr::null_mut();
        }
        if !MOUSE_HOOK.is_null() {
            UnhookWindowsHookEx(MOUSE_HOOK);
            MOUSE_HOOK = std::ptr::null_mut();
        }
    }
}

/// Shim du hook clavier bas niveau.
///
/// # Safety
/// Appele par Windows sur le thread qui a installe le hook. Le
/// dereferencement de WATCHER_PTR est serialise par la boucle de
/// messages de ce thread.
unsafe extern "system" fn keyboard_shim(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION && !WATCHER_PTR.is_null() {
        let kb = &*(lparam as *const KBDLLHOOKSTRUCT);
        let ctrl = (GetAsyncKeyState(VK_CONTROL as i32) as u16 & KEY_DOWN_MASK) != 0;
        let shift = (GetAsyncKeyState(VK_SHIFT as i32) as u16 & KEY_DOWN_MASK) != 0;

        if let Some(gesture) = gesture::classify_key(kb.vkCode, ctrl, shift) {
            let watcher = &mut *WATCHER_PTR;
            if watcher.handle_key_gesture(gesture) {
                return 1;
            }
        }
    }
    CallNextHookEx(KB_HOOK, code, wparam, lparam)
}

/// Shim du hook souris bas niveau.
///
/// # Safety
/// Memes garanties que `keyboard_shim`.
unsafe extern "system" fn mouse_shim(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if code == HC_ACTION && !WATCHER_PTR.is_null() {
        if let Some(click) = gesture::classify_mouse(wparam as u32) {
            let watcher = &mut *WATCHER_PTR;
            if watcher.handle_click(click) {
                return 1;
            }
        }
    }
    CallNextHookEx(MOUSE_HOOK, code, wparam, lparam)
}
