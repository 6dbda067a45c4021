// ClipSentinel - Module clipboard
// Surveillance et ecriture du presse-papiers Windows
//
// Ce module fournit deux sous-modules complementaires :
// - `monitor`  : ecoute les changements du presse-papiers via
//   AddClipboardFormatListener et prend un instantane du texte Unicode.
// - `injector` : vide le presse-papiers (rejet) ou y replace le contenu
//   signale (restauration defensive apres le collage autorise).
//
// Architecture :
// Le module est specifique a Windows (Win32 API) et utilise des blocs
// unsafe isoles pour chaque appel FFI. Le presse-papiers est ouvert et
// ferme dans le meme scope (RAII-like) pour chaque operation.

/// Vidage et restauration du presse-papiers Windows.
pub mod injector;
/// Surveillance des changements du presse-papiers via Win32 API.
pub mod monitor;
