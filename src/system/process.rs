// ClipSentinel - Resolution des processus
// Identifie les applications source et destination d'un contenu
//
// Trois points d'entree, pour les trois moments ou un nom d'application
// est necessaire :
// - `clipboard_owner_process_name` : proprietaire du presse-papiers au
//   moment de la detection (champ SourceApp)
// - `foreground_process_name` : fenetre au premier plan lors d'un
//   collage clavier autorise (champ DestApp)
// - `process_name_at_cursor` : fenetre sous le curseur lors d'un
//   collage souris autorise (champ DestApp)
//
// La resolution est un meilleur effort : toute etape qui echoue rend
// le nom sentinel "unknown", jamais une erreur.
//
// # Safety
// Les appels FFI Win32 (OpenProcess, etc.) sont isoles dans des blocs
// unsafe locaux. Le handle de processus est ferme dans le meme scope
// que son ouverture.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 process API).

use crate::constants::UNKNOWN_APP;
use crate::system::win32::*;

/// Retourne le nom de l'executable proprietaire du presse-papiers.
pub fn clipboard_owner_process_name() -> String {
    // SAFETY: appel FFI Win32 sans effet de bord dangereux.
    let hwnd = unsafe { GetClipboardOwner() };
    process_name_from_hwnd(hwnd)
}

/// Retourne le nom de l'executable de la fenetre au premier plan.
pub fn foreground_process_name() -> String {
    // SAFETY: appel FFI Win32 sans effet de bord dangereux.
    let hwnd = unsafe { GetForegroundWindow() };
    process_name_from_hwnd(hwnd)
}

/// Retourne le nom de l'executable de la fenetre sous le curseur.
pub fn process_name_at_cursor() -> String {
    // SAFETY: appels FFI Win32 sans effet de bord dangereux.
    let hwnd = unsafe {
        let mut pt = POINT::default();
        if GetCursorPos(&mut pt) == FALSE {
            return UNKNOWN_APP.into();
        }
        WindowFromPoint(pt)
    };
    process_name_from_hwnd(hwnd)
}

/// Resout un handle de fenetre vers le nom de son executable.
///
/// Sequence GetWindowThreadProcessId -> OpenProcess ->
/// QueryFullProcessImageNameW, puis extraction du nom de fichier.
/// Retourne "unknown" si une etape echoue.
fn process_name_from_hwnd(hwnd: HWND) -> String {
    if hwnd.is_null() {
        return UNKNOWN_APP.into();
    }

    // SAFETY: appels FFI Win32 pour identifier le processus.
    unsafe {
        let mut pid: u32 = 0;
        GetWindowThreadProcessId(hwnd, &mut pid);
        if pid == 0 {
            return UNKNOWN_APP.into();
        }

        let proc_handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, pid);
        if proc_handle.is_null() {
            return UNKNOWN_APP.into();
        }

        let mut buf = [0u16; 512];
        let mut size = buf.len() as u32;
        let ok = QueryFullProcessImageNameW(proc_handle, 0, buf.as_mut_ptr(), &mut size);
        CloseHandle(proc_handle);

        if ok == FALSE || size == 0 {
            return UNKNOWN_APP.into();
        }

        let full_path = from_wstring(&buf[..size as usize]);
        extract_filename(&full_path)
    }
}

/// Extrait le nom de fichier d'un chemin complet Windows.
///
/// Recherche le dernier separateur et retourne tout ce qui suit,
/// converti en minuscules pour une comparaison insensible a la casse.
fn extract_filename(path: &str) -> String {
    path.rsplit(['\\', '/'])
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| UNKNOWN_APP.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("C:\\Windows\\System32\\notepad.exe"), "notepad.exe");
        assert_eq!(extract_filename("C:/tools/App.EXE"), "app.exe");
        assert_eq!(extract_filename("notepad.exe"), "notepad.exe");
        assert_eq!(extract_filename(""), UNKNOWN_APP);
    }

    #[test]
    fn test_resolution_never_panics() {
        // Meme sans contexte Win32 complet, la resolution doit rendre
        // un nom (au pire le sentinel).
        let _ = clipboard_owner_process_name();
        let _ = foreground_process_name();
    }
}
