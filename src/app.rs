// ClipSentinel - Orchestrateur principal
// Connecte tous les composants : watcher, tray, dialogues
// Gere la boucle de messages Win32 et le cycle de vie de l'application
//
// # Architecture
// L'application est mono-thread : la boucle de messages unique garantit
// que tous les handlers sont appeles sequentiellement. Le wndproc
// retrouve l'App via le pointeur stocke dans GWLP_USERDATA, sans
// recourir a des RefCell ou Mutex.
//
// # Cycle de vie
// 1. `App::new()` : chargement config, signatures, journal d'audit
// 2. `App::run()` : fenetre cachee, tray, watcher, boucle de messages
// 3. `App::cleanup()` : arret du watcher, liberation des ressources
//
// # Messages Win32 geres
// - WM_CLIPBOARDUPDATE : modification du presse-papiers
// - WM_TRAY_CALLBACK   : interaction avec l'icone tray
// - WM_DESTROY         : fermeture de la fenetre cachee

use crate::config::settings::Settings;
use crate::constants::{DONATE_URL, WM_TRAY_CALLBACK};
use crate::error::CsResult;
use crate::patterns;
use crate::system::tray;
use crate::system::win32::*;
use crate::ui::{dialog, window};
use crate::watcher::Watcher;
use tracing::warn;

/// ID du menu contextuel : ouvrir le dossier des journaux
const TRAY_CMD_OPEN_LOGS: u16 = 1;
/// ID du menu contextuel : page de dons
const TRAY_CMD_DONATE: u16 = 2;
/// ID du menu contextuel : a propos
const TRAY_CMD_ABOUT: u16 = 3;
/// ID du menu contextuel : quitter
const TRAY_CMD_QUIT: u16 = 4;

/// Application principale ClipSentinel.
///
/// # Thread Safety
/// Cette structure n'est PAS thread-safe (pas de Sync/Send).
/// Elle est concue pour etre utilisee exclusivement depuis le thread
/// principal de la boucle de messages Win32.
pub struct App {
    /// Handle de la fenetre cachee (boucle de messages)
    hwnd: HWND,
    /// Configuration
    settings: Settings,
    /// Watcher du presse-papiers
    watcher: Watcher,
}

impl App {
    /// Cree et initialise l'application.
    ///
    /// Au premier lancement, ecrit le fichier de configuration et le
    /// fichier de signatures par defaut. Charge ensuite les signatures
    /// et prepare le journal d'audit.
    ///
    /// # Errors
    /// - `CsError::PatternSource` / `CsError::NoValidPatterns` :
    ///   signatures inutilisables
    /// - `CsError::Audit` : journal d'audit impossible a creer
    pub fn new() -> CsResult<Self> {
        // Charger la configuration
        let default_settings = Settings::default();
        let config_path = default_settings.config_path();
        if !config_path.exists() {
            if let Err(e) = Settings::save_default(&config_path) {
                warn!(error = %e, "failed to write default config");
            }
        }
        let settings = Settings::load(&config_path);

        // Ecrire les signatures par defaut au premier lancement,
        // uniquement quand aucun chemin personnalise n'est configure
        if settings.patterns_file.is_none() {
            let patterns_path = settings.patterns_path();
            if !patterns_path.exists() {
                if let Some(parent) = patterns_path.parent() {
                    let _ = std::fs::create_dir_all(parent);
                }
                if let Err(e) = std::fs::write(&patterns_path, patterns::default_patterns_text()) {
                    warn!(error = %e, "failed to write default patterns");
                }
            }
        }

        let watcher = Watcher::new(&settings)?;

        Ok(Self {
            hwnd: NULL_HWND,
            settings,
            watcher,
        })
    }

    /// Initialise les composants Win32 et demarre la boucle de messages.
    ///
    /// Sequence d'initialisation :
    /// 1. Enregistrement de la classe de fenetre
    /// 2. Creation de la fenetre cachee (receptrice de messages)
    /// 3. Ajout de l'icone tray
    /// 4. Demarrage du watcher (listener clipboard + shims de hook)
    /// 5. Analyse initiale du presse-papiers (si configuree)
    /// 6. Boucle de messages (bloquante)
    /// 7. Nettoyage des ressources
    ///
    /// # Errors
    /// - `CsError::Win32` : echec d'enregistrement de classe ou creation
    ///   de fenetre
    /// - `CsError::Clipboard` : echec d'enregistrement du listener
    pub fn run(&mut self) -> CsResult<()> {
        window::register_class(window::MAIN_CLASS, Self::wndproc_main)?;
        self.hwnd = window::create_hidden_window(window::MAIN_CLASS)?;

        // Stocker le pointeur this dans GWLP_USERDATA
        // SAFETY: On stocke un pointeur raw vers self. Il reste valide
        // tant que la boucle de messages tourne dans le meme scope.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, self as *mut App as isize);
        }

        tray::add_tray_icon(self.hwnd, "ClipSentinel")?;

        self.watcher.start(self.hwnd)?;

        // Signaler les signatures invalides (non fatal)
        let skipped = self.watcher.skipped_patterns();
        if !skipped.is_empty() {
            let lines: Vec<String> = skipped
                .iter()
                .map(|s| format!("ligne {} : {}", s.line_no, s.raw))
                .collect();
            dialog::show_error(
                self.hwnd,
                &format!("Signatures invalides ignorees :\n{}", lines.join("\n")),
            );
        }

        if self.settings.initial_scan {
            self.watcher.force_initial_scan();
        }

        // Boucle de messages Win32
        self.message_loop();

        // Nettoyage
        self.cleanup();

        Ok(())
    }

    /// Boucle de messages Win32.
    fn message_loop(&self) {
        // SAFETY: boucle de messages standard Win32.
        unsafe {
            let mut msg: MSG = std::mem::zeroed();
            while GetMessageW(&mut msg, NULL_HWND, 0, 0) > 0 {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }

    /// Gere les clics sur l'icone tray.
    fn on_tray_message(&mut self, lparam: LPARAM) {
        if loword_l(lparam) != WM_RBUTTONDOWN {
            return;
        }

        let items = [
            ("Ouvrir les journaux", TRAY_CMD_OPEN_LOGS),
            ("Faire un don", TRAY_CMD_DONATE),
            ("A propos...", TRAY_CMD_ABOUT),
            ("", 0),
            ("Quitter", TRAY_CMD_QUIT),
        ];
        match tray::show_tray_menu(self.hwnd, &items) {
            TRAY_CMD_OPEN_LOGS => {
                let log_dir = self.settings.log_dir();
                let _ = std::fs::create_dir_all(&log_dir);
                tray::shell_open(&log_dir.to_string_lossy());
            }
            TRAY_CMD_DONATE => {
                tray::shell_open(DONATE_URL);
            }
            TRAY_CMD_ABOUT => {
                self.show_about_dialog();
            }
            TRAY_CMD_QUIT => {
                // SAFETY: appel FFI Win32.
                unsafe { PostQuitMessage(0) };
            }
            _ => {}
        }
    }

    /// Affiche la boite de dialogue "A propos".
    fn show_about_dialog(&self) {
        let version = env!("CARGO_PKG_VERSION");
        let text = format!(
            "ClipSentinel v{}\n\n\
             Surveillance du presse-papiers contre les\n\
             attaques par collage (paste-and-run)\n\n\
             Signatures : {} chargees\n\n\
             (c) 2026 ClipSentinel Team",
            version,
            self.watcher.pattern_count(),
        );
        dialog::show_info(self.hwnd, "ClipSentinel - A propos", &text);
    }

    /// Nettoyage des ressources Win32 a la fermeture.
    ///
    /// Sequence de nettoyage :
    /// 1. Arret du watcher (hooks, listener clipboard)
    /// 2. Retrait de l'icone tray
    /// 3. Destruction de la fenetre cachee
    fn cleanup(&mut self) {
        self.watcher.stop();
        tray::remove_tray_icon(self.hwnd);
        window::destroy(self.hwnd);
        self.hwnd = NULL_HWND;
    }

    // --- Window procedure ---

    /// WndProc de la fenetre principale cachee.
    ///
    /// Recoit les messages systeme (clipboard, tray) et les dispatche
    /// vers les handlers de l'App.
    ///
    /// # Safety
    /// - Le pointeur `app` est recupere depuis GWLP_USERDATA, valide
    ///   tant que la boucle de messages tourne dans `run()`.
    /// - Fonction appelee exclusivement par le dispatch Win32 (mono-thread).
    unsafe extern "system" fn wndproc_main(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        let app = window::get_user_data::<App>(hwnd);
        if app.is_null() {
            return DefWindowProcW(hwnd, msg, wparam, lparam);
        }
        let app = &mut *app;

        match msg {
            WM_CLIPBOARDUPDATE => {
                app.watcher.on_clipboard_update();
                0
            }
            WM_TRAY_CALLBACK => {
                app.on_tray_message(lparam);
                0
            }
            WM_DESTROY => {
                PostQuitMessage(0);
                0
            }
            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}
