// ClipSentinel - Module gate
// Barriere de decision : machine a etats, gestes, hooks d'admission
//
// Ce module regroupe les trois pieces du cycle de decision :
// - `state`     : machine a etats pure (Idle / AwaitingDecision /
//                 AwaitingAuthorizedPaste), incident en cours et jeton
//                 de collage unique. Testable sans contexte Windows.
// - `gesture`   : classification des evenements bruts en gestes
//                 copier/couper/coller. Pur Rust egalement.
// - `admission` : installation des hooks globaux WH_KEYBOARD_LL et
//                 WH_MOUSE_LL et shims qui interrogent la machine a
//                 etats pour chaque geste intercepte.
//
// # Garantie centrale
// Entre l'ouverture d'un incident et sa resolution, aucun geste
// copier/couper/coller n'atteint une application ; apres un verdict
// "garder", exactement un collage passe ses effets, puis tout est
// reverrouille jusqu'au retour a Idle.

/// Controleur d'admission : hooks globaux et shims de rappel.
pub mod admission;
/// Classification des evenements bruts en gestes surveilles.
pub mod gesture;
/// Machine a etats du cycle de decision.
pub mod state;
