// ClipSentinel - Point d'entree
// Garde-fou presse-papiers contre les attaques paste-and-run pour Windows
//
// Ce binaire lance l'application ClipSentinel qui s'installe dans la
// zone de notification systeme, surveille chaque modification du
// presse-papiers et bloque tout collage d'un contenu correspondant a
// une signature d'attaque tant que l'utilisateur n'a pas tranche.
//
// # Prerequis
// - Windows 10 ou 11 (x86_64)
//
// # Configuration
// Le fichier %APPDATA%\ClipSentinel\config.txt et le fichier de
// signatures patterns.txt sont crees automatiquement au premier
// lancement avec les valeurs par defaut.

#![cfg_attr(not(test), windows_subsystem = "windows")]
#![allow(non_snake_case, non_camel_case_types, dead_code)]
#![cfg(target_os = "windows")]

mod app;
mod audit;
mod clipboard;
mod config;
mod constants;
mod error;
mod gate;
mod patterns;
mod system;
mod ui;
mod watcher;

use app::App;
use constants::SINGLE_INSTANCE_MUTEX;
use system::win32::*;

/// Point d'entree principal de ClipSentinel.
///
/// Verifie l'unicite de l'instance, initialise l'application puis
/// demarre la boucle de messages Win32. En cas d'erreur fatale au
/// demarrage, affiche un dialogue d'erreur bloquant et termine le
/// processus avec un code de sortie non nul.
fn main() {
    init_tracing();

    // Une seule instance par poste : la seconde se termine sans bruit
    if !acquire_single_instance() {
        return;
    }

    match App::new() {
        Ok(mut app) => {
            if let Err(e) = app.run() {
                tracing::error!(error = %e, "fatal error");
                ui::dialog::show_error(NULL_HWND, &format!("Erreur fatale :\n{}", e));
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            ui::dialog::show_error(NULL_HWND, &format!("Demarrage impossible :\n{}", e));
            std::process::exit(1);
        }
    }
}

/// Installe le subscriber tracing (filtre via RUST_LOG, "info" par defaut).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Prend le mutex global d'instance unique.
///
/// Retourne false si une autre instance detient deja le mutex. Le
/// handle n'est volontairement jamais ferme : il doit vivre aussi
/// longtemps que le processus pour garder l'exclusivite.
fn acquire_single_instance() -> bool {
    let wname = to_wstring(SINGLE_INSTANCE_MUTEX);
    // SAFETY: appel FFI Win32 ; le handle retourne reste detenu par
    // le processus jusqu'a sa terminaison.
    unsafe {
        let handle = CreateMutexW(std::ptr::null_mut(), FALSE, wname.as_ptr());
        if handle.is_null() {
            // Impossible de creer le mutex : on continue plutot que
            // d'empecher la protection de demarrer
            return true;
        }
        last_error() != ERROR_ALREADY_EXISTS
    }
}
