// ClipSentinel - Module ui
// Fenetre cachee et dialogues modaux
//
// ClipSentinel n'a pas d'interface graphique permanente : son "UI" se
// limite a la fenetre cachee qui recoit les messages systeme, a
// l'alerte modale de decision et aux dialogues d'erreur/information.
//
// # Sous-modules
// - `window` : enregistrement de classe et fenetre cachee Win32
// - `dialog` : alerte de decision (Oui/Non) et messages modaux

/// Alerte de decision et dialogues modaux.
pub mod dialog;
/// Fenetre cachee receptrice des messages systeme.
pub mod window;
