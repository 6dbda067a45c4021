// ClipSentinel - Types d'erreur centralises
//
// Ce module definit l'enumeration `CsError` et le type alias
// `CsResult<T>` utilises dans toute l'application.
//
// # Categories d'erreurs
// - `PatternSource`   : fichier de signatures inaccessible (fatal au demarrage)
// - `NoValidPatterns` : aucune signature compilee (fatal au demarrage)
// - `Clipboard`       : echec d'acces au presse-papiers (transitoire)
// - `Hook`            : echec d'installation d'un hook global (avec code GetLastError)
// - `Win32`           : erreur API Windows generique (avec code GetLastError)
// - `Audit`           : echec d'ecriture du journal d'audit (non fatal)
//
// Chaque variante est formatee avec un prefixe entre crochets pour
// faciliter le diagnostic dans les journaux.

use thiserror::Error;

/// Enumeration de toutes les erreurs possibles dans ClipSentinel.
#[derive(Debug, Error)]
pub enum CsError {
    /// Fichier de signatures introuvable ou illisible
    #[error("[Patterns] {0}")]
    PatternSource(String),
    /// Aucune signature n'a pu etre compilee
    #[error("[Patterns] no valid patterns loaded")]
    NoValidPatterns,
    /// Erreur d'acces au presse-papiers Windows
    #[error("[Clipboard] {0}")]
    Clipboard(String),
    /// Echec d'installation ou de retrait d'un hook global
    #[error("[Hook] {0} (code={1})")]
    Hook(String, u32),
    /// Erreur Win32 API avec code d'erreur
    #[error("[Win32] {0} (code={1})")]
    Win32(String, u32),
    /// Echec d'ecriture du journal d'audit
    #[error("[Audit] {0}")]
    Audit(String),
}

impl From<std::io::Error> for CsError {
    fn from(e: std::io::Error) -> Self {
        CsError::Audit(e.to_string())
    }
}

/// Type Result specialise pour ClipSentinel.
pub type CsResult<T> = Result<T, CsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefixes() {
        assert_eq!(
            CsError::Clipboard("OpenClipboard failed".into()).to_string(),
            "[Clipboard] OpenClipboard failed"
        );
        assert_eq!(
            CsError::Hook("SetWindowsHookExW failed".into(), 5).to_string(),
            "[Hook] SetWindowsHookExW failed (code=5)"
        );
        assert_eq!(
            CsError::NoValidPatterns.to_string(),
            "[Patterns] no valid patterns loaded"
        );
    }
}
