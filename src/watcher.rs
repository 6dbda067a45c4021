// ClipSentinel - Watcher du presse-papiers
// Pivot de la detection : relie moniteur, signatures, barriere et audit
//
// Le watcher recoit chaque notification de changement du presse-papiers,
// la passe au magasin de signatures, et pilote le cycle de decision
// quand un contenu suspect est detecte :
//
//   detection -> armement des hooks -> alerte modale
//     -> Rejeter : vidage du presse-papiers, audit "Discard"
//     -> Garder  : un seul collage autorise, restauration du contenu,
//                  audit "Keep"
//
// # Reentrance
// La table de transitions de GateCore n'accepte une detection que
// depuis l'etat Idle : une copie suspecte survenant pendant un cycle
// est abandonnee, jamais mise en file. Les ecritures du watcher dans
// le presse-papiers (vidage, restauration) levent aussi une
// notification ; le drapeau `ignore_next_clipboard` les neutralise
// pour ne pas reevaluer notre propre contenu.
//
// # Threading
// Toutes les methodes sont appelees depuis le thread de la boucle de
// messages (wndproc ou shim de hook) : etat a ecrivain unique.

use crate::audit::{AuditAction, AuditLogger};
use crate::clipboard::{injector, monitor};
use crate::config::settings::Settings;
use crate::constants::NO_DEST_APP;
use crate::error::CsResult;
use crate::gate::admission;
use crate::gate::state::{Admission, ClickKind, GateCore, GateState, Gesture, PendingIncident};
use crate::patterns::{PatternSet, SkippedLine};
use crate::system::win32::*;
use crate::system::{identity, process, tray};
use crate::ui::dialog::{self, Decision};
use tracing::{info, warn};

/// Origine du collage autorise, pour la resolution de l'application
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOrigin {
    /// Ctrl+V ou Maj+Inser : destination = fenetre au premier plan
    Keyboard,
    /// Clic droit : destination = fenetre sous le curseur
    Mouse,
}

/// Watcher du presse-papiers : detection et cycle de decision.
pub struct Watcher {
    /// Fenetre cachee (acces presse-papiers, dialogues, bulles tray)
    hwnd: HWND,
    /// Signatures compilees au demarrage
    patterns: PatternSet,
    /// Machine a etats du cycle de decision
    gate: GateCore,
    /// Journal d'audit des verdicts
    audit: AuditLogger,
    /// Nom d'utilisateur mis en cache au demarrage
    user: String,
    /// Nom de machine mis en cache au demarrage
    host: String,
    /// Longueur de l'apercu presente a l'utilisateur
    preview_len: usize,
    /// Ignorer la prochaine notification clipboard
    /// (quand c'est notre propre ecriture)
    ignore_next_clipboard: bool,
    /// Vrai entre start() et stop()
    started: bool,
}

impl Watcher {
    /// Charge les signatures et prepare le journal d'audit.
    ///
    /// # Errors
    /// - `CsError::PatternSource` / `CsError::NoValidPatterns` : fichier
    ///   de signatures inutilisable (fatal au demarrage)
    /// - `CsError::Audit` : journal d'audit impossible a creer
    pub fn new(settings: &Settings) -> CsResult<Self> {
        let patterns = PatternSet::load(&settings.patterns_path())?;
        let audit = AuditLogger::new(&settings.audit_log_path(), settings.audit_content_length)?;

        Ok(Self {
            hwnd: NULL_HWND,
            patterns,
            gate: GateCore::new(),
            audit,
            user: identity::user_name(),
            host: identity::host_name(),
            preview_len: settings.preview_length,
            ignore_next_clipboard: false,
            started: false,
        })
    }

    /// Demarre la surveillance sur la fenetre cachee donnee.
    ///
    /// Enregistre l'ecouteur clipboard et injecte la reference du
    /// watcher dans les shims de hook.
    ///
    /// # Errors
    /// Retourne `CsError::Clipboard` si l'enregistrement echoue.
    pub fn start(&mut self, hwnd: HWND) -> CsResult<()> {
        monitor::register_listener(hwnd)?;
        self.hwnd = hwnd;
        admission::bind(self as *mut Watcher);
        self.started = true;
        info!(patterns = self.patterns.len(), "clipboard watcher started");
        Ok(())
    }

    /// Arrete la surveillance. Idempotent : un second appel est sans
    /// effet et ne libere rien deux fois.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;
        admission::disarm();
        admission::unbind();
        self.gate.reset();
        monitor::unregister_listener(self.hwnd);
        self.hwnd = NULL_HWND;
    }

    /// Analyse immediate du contenu deja present dans le presse-papiers.
    pub fn force_initial_scan(&mut self) {
        self.on_clipboard_update();
    }

    /// Nombre de signatures chargees.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Lignes de signatures ignorees au chargement.
    pub fn skipped_patterns(&self) -> &[SkippedLine] {
        self.patterns.skipped()
    }

    /// Etat courant du cycle de decision.
    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Gere le message WM_CLIPBOARDUPDATE.
    ///
    /// Ignore la notification si elle provient de notre propre ecriture
    /// ou si un cycle de decision est deja en cours. Un presse-papiers
    /// inaccessible (tenu par un autre processus) abandonne silencieusement
    /// la notification : la prochaine modification relancera l'analyse.
    pub fn on_clipboard_update(&mut self) {
        if self.ignore_next_clipboard {
            self.ignore_next_clipboard = false;
            return;
        }
        if self.gate.state() != GateState::Idle {
            return;
        }

        let text = match monitor::read_clipboard_text(self.hwnd) {
            Some(t) => t,
            None => return,
        };
        let source = process::clipboard_owner_process_name();
        self.evaluate(&text, source);
    }

    /// Evalue un instantane de texte contre les signatures.
    ///
    /// Sans correspondance : aucun changement d'etat, aucune trace.
    /// Avec correspondance : ouverture d'un incident, armement des
    /// hooks en mode blocage, alerte modale, puis application du
    /// verdict de l'utilisateur.
    pub fn evaluate(&mut self, text: &str, source_app: String) {
        if !self.patterns.matches(text) {
            return;
        }

        let incident = PendingIncident::new(
            text,
            source_app,
            self.user.clone(),
            self.host.clone(),
            self.preview_len,
        );
        let preview = incident.preview.clone();
        let source = incident.source_app.clone();

        if !self.gate.open_incident(incident) {
            return;
        }
        info!(source = %source, "suspicious clipboard content detected");

        // Blocage total pendant la decision. Si l'installation echoue,
        // la garantie "un seul collage" ne peut pas etre tenue :
        // rejet d'office, aucun collage n'est autorise.
        if let Err(e) = admission::arm() {
            warn!(error = %e, "input interception unavailable, forcing discard");
            self.apply_discard();
            return;
        }

        let prompt = format!(
            "Contenu suspect detecte dans le presse-papiers.\n\
             Source : {}\n\n\
             Apercu :\n{}\n\n\
             Oui : rejeter le contenu.\n\
             Non : autoriser un collage unique.",
            source, preview,
        );
        let decision = dialog::ask_discard_keep(
            self.hwnd,
            "ClipSentinel - Alerte de securite",
            &prompt,
        );

        match decision {
            Decision::Discard => self.apply_discard(),
            Decision::Keep => self.apply_keep(),
        }
    }

    /// Verdict d'admission d'un geste clavier, appele par le shim du
    /// hook. Retourne true si l'evenement doit etre avale.
    pub fn handle_key_gesture(&mut self, gesture: Gesture) -> bool {
        match self.gate.admit_key(gesture) {
            Admission::Pass => false,
            Admission::Swallow => true,
            Admission::Complete => {
                self.finish_authorized_paste(PasteOrigin::Keyboard);
                true
            }
        }
    }

    /// Verdict d'admission d'un clic souris, appele par le shim du
    /// hook. Retourne true si l'evenement doit etre avale.
    pub fn handle_click(&mut self, click: ClickKind) -> bool {
        match self.gate.admit_click(click) {
            Admission::Pass => false,
            Admission::Swallow => true,
            Admission::Complete => {
                self.finish_authorized_paste(PasteOrigin::Mouse);
                true
            }
        }
    }

    /// Resolution par rejet : vide le presse-papiers, notifie, audite.
    fn apply_discard(&mut self) {
        let incident = match self.gate.resolve_discard() {
            Some(i) => i,
            None => return,
        };
        admission::disarm();

        match injector::clear_clipboard(self.hwnd) {
            Ok(()) => self.ignore_next_clipboard = true,
            Err(e) => warn!(error = %e, "failed to clear clipboard on discard"),
        }

        tray::show_balloon(
            self.hwnd,
            "Verdict presse-papiers",
            "Contenu rejete.",
            tray::BalloonKind::Error,
        );

        self.write_audit(&incident, NO_DEST_APP, AuditAction::Discard);
    }

    /// Resolution par conservation : un seul collage sera admis.
    ///
    /// Les hooks restent installes ; seul l'etat de la machine change
    /// (mode collage unique, jeton disponible).
    fn apply_keep(&mut self) {
        if !self.gate.authorize_single_paste() {
            return;
        }
        // Rearmement sans effet si les hooks sont deja en place : les
        // memes interceptions servent au mode collage unique.
        if let Err(e) = admission::arm() {
            warn!(error = %e, "hook re-arm failed");
        }
        tray::show_balloon(
            self.hwnd,
            "Verdict presse-papiers",
            "Collez maintenant (Ctrl+V / Maj+Inser / clic droit).",
            tray::BalloonKind::Info,
        );
    }

    /// Fin du collage autorise : restauration du presse-papiers,
    /// resolution de la destination, audit, desarmement.
    ///
    /// La restauration est defensive : l'interrogation du presse-papiers
    /// pendant le cycle peut en avoir deplace la propriete, on reecrit
    /// donc le contenu signale tel quel.
    fn finish_authorized_paste(&mut self, origin: PasteOrigin) {
        let incident = match self.gate.complete_paste() {
            Some(i) => i,
            None => return,
        };
        admission::disarm();

        match injector::set_clipboard_text(self.hwnd, &incident.full_content) {
            Ok(()) => self.ignore_next_clipboard = true,
            Err(e) => warn!(error = %e, "failed to restore clipboard after paste"),
        }

        let dest = match origin {
            PasteOrigin::Keyboard => process::foreground_process_name(),
            PasteOrigin::Mouse => process::process_name_at_cursor(),
        };
        info!(dest = %dest, "authorized paste completed");

        self.write_audit(&incident, &dest, AuditAction::Keep);
    }

    /// Ecrit le verdict dans le journal d'audit.
    ///
    /// Un echec est signale par un dialogue d'erreur puis absorbe :
    /// la surveillance continue.
    fn write_audit(&self, incident: &PendingIncident, dest_app: &str, action: AuditAction) {
        if let Err(e) = self.audit.log_event(
            &incident.user,
            &incident.host,
            &incident.source_app,
            dest_app,
            &incident.full_content,
            action,
        ) {
            warn!(error = %e, "audit write failed");
            dialog::show_error(
                self.hwnd,
                &format!("Echec d'ecriture du journal d'audit :\n{}", e),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Construit un watcher sur un repertoire temporaire, sans fenetre.
    fn watcher_in(dir: &std::path::Path, patterns: &str) -> Watcher {
        let patterns_path = dir.join("patterns.txt");
        std::fs::write(&patterns_path, patterns).unwrap();
        let settings = Settings {
            initial_scan: true,
            patterns_file: Some(patterns_path),
            preview_length: 100,
            audit_content_length: 1000,
            data_dir: PathBuf::from(dir),
        };
        Watcher::new(&settings).unwrap()
    }

    #[test]
    fn test_new_fails_without_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            patterns_file: Some(dir.path().join("absent.txt")),
            data_dir: PathBuf::from(dir.path()),
            ..Settings::default()
        };
        assert!(Watcher::new(&settings).is_err());
    }

    #[test]
    fn test_evaluate_clean_text_stays_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = watcher_in(dir.path(), "mshta\\s+javascript:\n");
        w.evaluate("rien de suspect ici", "notepad.exe".into());
        assert_eq!(w.gate_state(), GateState::Idle);

        // Aucun verdict : le journal ne contient que l'en-tete
        let log = std::fs::read_to_string(dir.path().join("LogFiles").join("audit_log.txt")).unwrap();
        assert!(!log.contains("Time       : "));
    }

    #[test]
    fn test_gestures_pass_when_idle() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = watcher_in(dir.path(), "mshta\\s+javascript:\n");
        assert!(!w.handle_key_gesture(Gesture::Paste));
        assert!(!w.handle_click(ClickKind::RightUp));
    }

    #[test]
    fn test_stop_twice_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = watcher_in(dir.path(), "mshta\\s+javascript:\n");
        // Jamais demarre : stop ne doit rien liberer
        w.stop();
        w.stop();
        assert_eq!(w.gate_state(), GateState::Idle);
    }

    #[test]
    fn test_pattern_count_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let w = watcher_in(dir.path(), "good\n(unclosed\n");
        assert_eq!(w.pattern_count(), 1);
        assert_eq!(w.skipped_patterns().len(), 1);
        assert_eq!(w.skipped_patterns()[0].line_no, 2);
    }
}
