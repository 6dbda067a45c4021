// ClipSentinel - Module system
// Bindings Win32, processus, identite, icone de notification
//
// Ce module regroupe tous les composants systeme specifiques a Windows.
// Chaque sous-module isole ses appels FFI dans des blocs unsafe locaux
// et expose une API safe en Rust.
//
// # Sous-modules
// - `win32`    : declarations FFI (types, constantes, fonctions extern)
//                et helpers de conversion (to_wstring, from_wstring)
// - `process`  : resolution des applications source et destination
//                (proprietaire du presse-papiers, premier plan, curseur)
// - `identity` : noms d'utilisateur et de machine pour l'audit
// - `tray`     : icone de notification, menu contextuel et bulles
//
// # Portabilite
// Ce module est specifique a Windows 10/11 (cfg(target_os = "windows")).
// Les bindings Win32 sont declares manuellement dans win32.rs.

/// Noms d'utilisateur et de machine de la session.
pub mod identity;
/// Resolution des processus source et destination.
pub mod process;
/// Icone de notification systeme (tray icon), menu et bulles.
pub mod tray;
/// Declarations FFI Win32 (types, constantes, fonctions) et helpers.
pub mod win32;
