// ClipSentinel - Classification des gestes
// Traduit les evenements bruts des hooks en gestes copier/couper/coller
//
// Les combinaisons reconnues couvrent les raccourcis standards de
// Windows :
// - Copier  : Ctrl+C, Ctrl+Inser
// - Couper  : Ctrl+X, Maj+Suppr
// - Coller  : Ctrl+V, Maj+Inser
//
// Cote souris, les messages bruts sont traduits en `ClickKind` ; c'est
// la machine a etats qui decide ensuite du sort de chaque clic.
//
// # Portabilite
// Seules les constantes VK_* de Win32 sont utilisees ; la logique est
// en pur Rust et testable sans contexte Windows.

use crate::gate::state::{ClickKind, Gesture};
use crate::system::win32::*;

/// Classifie une touche en geste copier/couper/coller.
///
/// Retourne `None` pour toute touche qui n'est pas un geste surveille ;
/// ces evenements ne sont jamais interceptes.
pub fn classify_key(vk: u32, ctrl: bool, shift: bool) -> Option<Gesture> {
    if ctrl {
        match vk {
            VK_C => return Some(Gesture::Copy),
            VK_X => return Some(Gesture::Cut),
            VK_V => return Some(Gesture::Paste),
            VK_INSERT => return Some(Gesture::Copy),
            _ => {}
        }
    }
    if shift {
        match vk {
            VK_INSERT => return Some(Gesture::Paste),
            VK_DELETE => return Some(Gesture::Cut),
            _ => {}
        }
    }
    None
}

/// Classifie un message souris en type de clic surveille.
///
/// Retourne `None` pour les messages non surveilles (bouton gauche,
/// deplacements, molette), qui passent toujours.
pub fn classify_mouse(msg: u32) -> Option<ClickKind> {
    match msg {
        WM_RBUTTONDOWN => Some(ClickKind::RightDown),
        WM_RBUTTONUP => Some(ClickKind::RightUp),
        WM_MBUTTONDOWN => Some(ClickKind::MiddleDown),
        WM_MBUTTONUP => Some(ClickKind::MiddleUp),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_letter_gestures() {
        assert_eq!(classify_key(VK_C, true, false), Some(Gesture::Copy));
        assert_eq!(classify_key(VK_X, true, false), Some(Gesture::Cut));
        assert_eq!(classify_key(VK_V, true, false), Some(Gesture::Paste));
    }

    #[test]
    fn test_insert_delete_variants() {
        assert_eq!(classify_key(VK_INSERT, true, false), Some(Gesture::Copy));
        assert_eq!(classify_key(VK_INSERT, false, true), Some(Gesture::Paste));
        assert_eq!(classify_key(VK_DELETE, false, true), Some(Gesture::Cut));
    }

    #[test]
    fn test_plain_keys_are_not_gestures() {
        assert_eq!(classify_key(VK_C, false, false), None);
        assert_eq!(classify_key(VK_V, false, false), None);
        assert_eq!(classify_key(VK_INSERT, false, false), None);
        assert_eq!(classify_key(0x41, true, false), None); // Ctrl+A
    }

    #[test]
    fn test_ctrl_wins_over_shift() {
        // Ctrl+Maj+V reste un collage
        assert_eq!(classify_key(VK_V, true, true), Some(Gesture::Paste));
        // Ctrl+Maj+Inser : copie (Ctrl prioritaire)
        assert_eq!(classify_key(VK_INSERT, true, true), Some(Gesture::Copy));
    }

    #[test]
    fn test_mouse_classification() {
        assert_eq!(classify_mouse(WM_RBUTTONDOWN), Some(ClickKind::RightDown));
        assert_eq!(classify_mouse(WM_RBUTTONUP), Some(ClickKind::RightUp));
        assert_eq!(classify_mouse(WM_MBUTTONDOWN), Some(ClickKind::MiddleDown));
        assert_eq!(classify_mouse(WM_MBUTTONUP), Some(ClickKind::MiddleUp));
        assert_eq!(classify_mouse(WM_KEYDOWN), None);
    }
}
