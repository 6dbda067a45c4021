// ClipSentinel - Icone de notification systeme (tray icon)
// Gestion de la zone de notification Windows
//
// Ce module gere l'icone de ClipSentinel dans la zone de notification
// (system tray) : ajout, retrait, affichage du menu contextuel et
// notifications en bulle (verdicts de decision).
//
// # Safety
// Tous les appels Win32 (Shell_NotifyIconW, CreatePopupMenu, etc.)
// sont isoles dans des blocs unsafe locaux. Les handles de menu sont
// detruits dans le meme scope que leur creation.
//
// # Portabilite
// Ce module est specifique a Windows (Shell_NotifyIconW, TrackPopupMenu).

use crate::constants::{TRAY_ICON_ID, WM_TRAY_CALLBACK};
use crate::error::{CsError, CsResult};
use crate::system::win32::*;

/// Gravite d'une notification en bulle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonKind {
    /// Information (collage autorise)
    Info,
    /// Erreur (contenu rejete)
    Error,
}

/// Ajoute l'icone de notification dans la zone de notification.
///
/// Utilise l'icone systeme par defaut (IDI_APPLICATION).
///
/// # Errors
/// Retourne `CsError::Win32` si Shell_NotifyIconW echoue.
pub fn add_tray_icon(hwnd: HWND, tooltip: &str) -> CsResult<()> {
    let mut nid = create_nid(hwnd);
    set_tooltip(&mut nid, tooltip);

    // SAFETY: appel FFI Win32 pour charger l'icone systeme.
    nid.hIcon = unsafe { LoadIconW(std::ptr::null_mut(), IDI_APPLICATION) };

    // SAFETY: appel FFI Win32 pour ajouter l'icone tray.
    let ok = unsafe { Shell_NotifyIconW(NIM_ADD, &mut nid) };
    if ok == FALSE {
        return Err(CsError::Win32("Shell_NotifyIconW NIM_ADD failed".into(), last_error()));
    }
    Ok(())
}

/// Retire l'icone de notification.
pub fn remove_tray_icon(hwnd: HWND) {
    let mut nid = create_nid(hwnd);
    // SAFETY: appel FFI Win32.
    unsafe { Shell_NotifyIconW(NIM_DELETE, &mut nid) };
}

/// Affiche une notification en bulle sur l'icone tray.
///
/// Utilisee pour les verdicts de decision ("Contenu rejete.",
/// "Collez maintenant..."). Un echec est silencieux : la bulle est
/// un confort, pas une garantie.
pub fn show_balloon(hwnd: HWND, title: &str, text: &str, kind: BalloonKind) {
    let mut nid = create_nid(hwnd);
    nid.uFlags = NIF_INFO;
    nid.dwInfoFlags = match kind {
        BalloonKind::Info => NIIF_INFO,
        BalloonKind::Error => NIIF_ERROR,
    };
    copy_wstr(&mut nid.szInfoTitle, title);
    copy_wstr(&mut nid.szInfo, text);

    // SAFETY: appel FFI Win32.
    unsafe { Shell_NotifyIconW(NIM_MODIFY, &mut nid) };
}

/// Affiche le menu contextuel de l'icone tray.
///
/// Cree un menu popup Win32, y ajoute les elements specifies, puis
/// l'affiche a la position du curseur. Le menu est modal (bloquant).
///
/// # Arguments
/// * `hwnd` - Handle de la fenetre proprietaire du menu
/// * `items` - Tableau de tuples (label, id). Un label vide insere
///   un separateur.
///
/// # Returns
/// L'ID de la commande selectionnee (0 si l'utilisateur annule).
pub fn show_tray_menu(hwnd: HWND, items: &[(&str, u16)]) -> u16 {
    // SAFETY: appels FFI Win32 pour le menu popup.
    unsafe {
        let menu = CreatePopupMenu();
        if menu.is_null() {
            return 0;
        }

        for (label, id) in items {
            if label.is_empty() {
                AppendMenuW(menu, MF_SEPARATOR, 0, std::ptr::null());
            } else {
                let wlabel = to_wstring(label);
                AppendMenuW(menu, MF_STRING, *id as usize, wlabel.as_ptr());
            }
        }

        // Position du curseur
        let mut pt = POINT::default();
        GetCursorPos(&mut pt);

        // Forcer la fenetre au premier plan pour que le menu se ferme correctement
        SetForegroundWindow(hwnd);

        let cmd = TrackPopupMenu(
            menu,
            TPM_RETURNCMD | TPM_NONOTIFY | TPM_LEFTALIGN | TPM_BOTTOMALIGN,
            pt.x,
            pt.y,
            0,
            hwnd,
            std::ptr::null(),
        );

        DestroyMenu(menu);

        // Forcer la fermeture du menu en postant WM_NULL
        PostMessageW(hwnd, 0, 0, 0);

        cmd as u16
    }
}

/// Ouvre un dossier ou une URL via le shell Windows.
///
/// Utilise pour "Ouvrir les journaux" (explorateur) et "Faire un don"
/// (navigateur par defaut). Meilleur effort, echec silencieux.
pub fn shell_open(target: &str) {
    let wop = to_wstring("open");
    let wtarget = to_wstring(target);
    // SAFETY: appel FFI Win32.
    unsafe {
        ShellExecuteW(
            NULL_HWND,
            wop.as_ptr(),
            wtarget.as_ptr(),
            std::ptr::null(),
            std::ptr::null(),
            SW_SHOWNORMAL,
        );
    }
}

/// Cree une structure NOTIFYICONDATAW initialisee.
fn create_nid(hwnd: HWND) -> NOTIFYICONDATAW {
    NOTIFYICONDATAW {
        cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
        hWnd: hwnd,
        uID: TRAY_ICON_ID,
        uFlags: NIF_MESSAGE | NIF_ICON | NIF_TIP,
        uCallbackMessage: WM_TRAY_CALLBACK,
        hIcon: std::ptr::null_mut(),
        szTip: [0u16; 128],
        dwState: 0,
        dwStateMask: 0,
        szInfo: [0u16; 256],
        uVersion: 0,
        szInfoTitle: [0u16; 64],
        dwInfoFlags: 0,
        guidItem: [0u8; 16],
        hBalloonIcon: std::ptr::null_mut(),
    }
}

/// Ecrit le tooltip dans la structure NOTIFYICONDATAW.
fn set_tooltip(nid: &mut NOTIFYICONDATAW, tooltip: &str) {
    copy_wstr(&mut nid.szTip, tooltip);
}

/// Copie une chaine UTF-16 tronquee dans un tampon de taille fixe.
fn copy_wstr(dest: &mut [u16], src: &str) {
    let wtext = to_wstring(src);
    let max = dest.len() - 1;
    let copy_len = wtext.len().min(max);
    dest[..copy_len].copy_from_slice(&wtext[..copy_len]);
    dest[copy_len] = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_wstr_truncates() {
        let mut buf = [0xFFFFu16; 8];
        copy_wstr(&mut buf, "0123456789");
        assert_eq!(buf[7], 0);
        assert_eq!(from_wstring(&buf), "0123456");
    }

    #[test]
    fn test_copy_wstr_short() {
        let mut buf = [0xFFFFu16; 16];
        copy_wstr(&mut buf, "ok");
        assert_eq!(from_wstring(&buf), "ok");
    }
}
