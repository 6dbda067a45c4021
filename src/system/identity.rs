// ClipSentinel - Identite de session
// Noms d'utilisateur et de machine pour le journal d'audit
//
// Les deux valeurs sont resolues une fois au demarrage du watcher et
// mises en cache pour la duree du processus. Un echec de resolution
// degrade vers le sentinel "unknown", jamais une erreur.
//
// # Safety
// Les appels FFI (GetUserNameW, GetComputerNameW) sont isoles dans des
// blocs unsafe locaux avec des tampons de taille fixe.
//
// # Portabilite
// Ce module est specifique a Windows (advapi32, kernel32).

use crate::constants::UNKNOWN_APP;
use crate::system::win32::*;

/// Retourne le nom de l'utilisateur de la session.
pub fn user_name() -> String {
    let mut buf = [0u16; 257];
    let mut len = buf.len() as u32;
    // SAFETY: appel FFI Win32 avec tampon de taille suffisante (UNLEN+1).
    let ok = unsafe { GetUserNameW(buf.as_mut_ptr(), &mut len) };
    if ok == FALSE || len == 0 {
        return UNKNOWN_APP.into();
    }
    // len inclut le terminateur nul
    from_wstring(&buf[..len as usize])
}

/// Retourne le nom de la machine.
pub fn host_name() -> String {
    let mut buf = [0u16; 64];
    let mut len = buf.len() as u32;
    // SAFETY: appel FFI Win32 avec tampon de taille suffisante
    // (MAX_COMPUTERNAME_LENGTH+1).
    let ok = unsafe { GetComputerNameW(buf.as_mut_ptr(), &mut len) };
    if ok == FALSE || len == 0 {
        return UNKNOWN_APP.into();
    }
    // len ne compte pas le terminateur nul
    from_wstring(&buf[..len as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_never_empty() {
        assert!(!user_name().is_empty());
        assert!(!host_name().is_empty());
    }
}
