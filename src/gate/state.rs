// ClipSentinel - Machine a etats de decision
// Cycle Idle -> AwaitingDecision -> AwaitingAuthorizedPaste -> Idle
//
// Ce module contient le coeur pur de la barriere de decision :
// l'etat global du cycle, l'incident en cours et le jeton de collage
// unique. Aucun appel Win32 ici ; les effets (hooks, presse-papiers,
// dialogues, audit) sont pilotes par le watcher a partir des verdicts
// retournes par `GateCore`.
//
// # Invariants
// - Au plus un `PendingIncident` existe a la fois : `open_incident`
//   n'accepte une detection que depuis l'etat `Idle`. Une detection
//   qui survient pendant un cycle est rejetee, jamais mise en file.
// - Le jeton (`token_used`) ne passe de false a true qu'une seule fois
//   par incident, dans le meme appel qui rend le verdict `Complete`.
//   Tous les appelants sont serialises par la boucle de messages, le
//   test-puis-affectation est donc atomique.
// - `reset` ramene toujours a `Idle` et peut etre appele plusieurs
//   fois sans effet (arret ou desarmement redondant).

use crate::constants::PREVIEW_ELLIPSIS;

/// Etat du cycle de decision. Une seule instance par processus,
/// portee par le watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Aucun incident en cours, les gestes circulent librement.
    Idle,
    /// Alerte affichee, tous les gestes copier/couper/coller sont bloques.
    AwaitingDecision,
    /// L'utilisateur a garde le contenu : un seul collage est autorise.
    AwaitingAuthorizedPaste,
}

/// L'incident en cours : le contenu signale et son contexte.
#[derive(Debug, Clone)]
pub struct PendingIncident {
    /// Apercu tronque presente a l'utilisateur
    pub preview: String,
    /// Contenu complet, restaure lors du collage autorise
    pub full_content: String,
    /// Application a l'origine du contenu
    pub source_app: String,
    /// Utilisateur de la session
    pub user: String,
    /// Nom de la machine
    pub host: String,
    /// Horodatage de la detection (secondes UTC depuis epoch)
    pub created_at: i64,
}

impl PendingIncident {
    /// Cree un incident en capturant le contenu et son contexte.
    pub fn new(
        content: &str,
        source_app: String,
        user: String,
        host: String,
        preview_len: usize,
    ) -> Self {
        let created_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        Self {
            preview: make_preview(content, preview_len),
            full_content: content.to_string(),
            source_app,
            user,
            host,
            created_at,
        }
    }
}

/// Tronque un contenu pour l'apercu utilisateur.
///
/// Au-dela de `max_len` caracteres, le texte est coupe et suffixe
/// d'un marqueur de troncature.
pub fn make_preview(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let mut s: String = content.chars().take(max_len).collect();
        s.push(PREVIEW_ELLIPSIS);
        s
    }
}

/// Geste clavier reconnu, issu de la classification de gate::gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Copy,
    Cut,
    Paste,
}

/// Clic souris soumis au controleur d'admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
}

/// Verdict d'admission d'un geste intercepte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Laisser l'evenement atteindre l'application cible.
    Pass,
    /// Avaler l'evenement, aucun changement d'etat.
    Swallow,
    /// Avaler l'evenement et executer l'action de fin de collage
    /// autorise (le jeton vient d'etre consomme).
    Complete,
}

/// Coeur de la barriere de decision : etat + incident + jeton.
#[derive(Debug)]
pub struct GateCore {
    state: GateState,
    incident: Option<PendingIncident>,
    token_used: bool,
}

impl GateCore {
    pub fn new() -> Self {
        Self {
            state: GateState::Idle,
            incident: None,
            token_used: false,
        }
    }

    /// Etat courant du cycle.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Incident en cours, s'il existe.
    pub fn incident(&self) -> Option<&PendingIncident> {
        self.incident.as_ref()
    }

    /// Ouvre un incident : Idle -> AwaitingDecision.
    ///
    /// Retourne false si un cycle est deja en cours ; la detection est
    /// alors abandonnee (garde de reentrance de la table de transitions).
    pub fn open_incident(&mut self, incident: PendingIncident) -> bool {
        if self.state != GateState::Idle {
            return false;
        }
        self.state = GateState::AwaitingDecision;
        self.incident = Some(incident);
        self.token_used = false;
        true
    }

    /// Resolution par rejet : AwaitingDecision -> Idle.
    ///
    /// Rend l'incident a l'appelant pour l'ecriture d'audit.
    pub fn resolve_discard(&mut self) -> Option<PendingIncident> {
        if self.state != GateState::AwaitingDecision {
            return None;
        }
        self.state = GateState::Idle;
        self.token_used = false;
        self.incident.take()
    }

    /// L'utilisateur garde le contenu : AwaitingDecision -> AwaitingAuthorizedPaste.
    ///
    /// Le jeton est remis a zero : exactement un collage pourra passer.
    pub fn authorize_single_paste(&mut self) -> bool {
        if self.state != GateState::AwaitingDecision {
            return false;
        }
        self.state = GateState::AwaitingAuthorizedPaste;
        self.token_used = false;
        true
    }

    /// Verdict d'admission pour un geste clavier.
    pub fn admit_key(&mut self, gesture: Gesture) -> Admission {
        match self.state {
            GateState::Idle => Admission::Pass,
            GateState::AwaitingDecision => Admission::Swallow,
            GateState::AwaitingAuthorizedPaste => {
                if self.token_used {
                    return Admission::Swallow;
                }
                match gesture {
                    // Seul un collage consomme le jeton ; copier/couper
                    // restent bloques pendant la fenetre autorisee.
                    Gesture::Paste => {
                        self.token_used = true;
                        Admission::Complete
                    }
                    Gesture::Copy | Gesture::Cut => Admission::Swallow,
                }
            }
        }
    }

    /// Verdict d'admission pour un clic souris.
    ///
    /// Le collage souris est declenche sur le relachement du bouton
    /// droit ; l'appui correspondant passe pour que l'application cible
    /// garde un etat bouton coherent. Le bouton du milieu est toujours
    /// avale pendant un cycle.
    pub fn admit_click(&mut self, click: ClickKind) -> Admission {
        match self.state {
            GateState::Idle => Admission::Pass,
            GateState::AwaitingDecision => Admission::Swallow,
            GateState::AwaitingAuthorizedPaste => {
                if self.token_used {
                    return Admission::Swallow;
                }
                match click {
                    ClickKind::RightUp => {
                        self.token_used = true;
                        Admission::Complete
                    }
                    ClickKind::RightDown => Admission::Pass,
                    ClickKind::MiddleDown | ClickKind::MiddleUp => Admission::Swallow,
                }
            }
        }
    }

    /// Fin du collage autorise : AwaitingAuthorizedPaste -> Idle.
    ///
    /// Rend l'incident pour la restauration du presse-papiers et
    /// l'ecriture d'audit.
    pub fn complete_paste(&mut self) -> Option<PendingIncident> {
        if self.state != GateState::AwaitingAuthorizedPaste {
            return None;
        }
        self.state = GateState::Idle;
        self.token_used = false;
        self.incident.take()
    }

    /// Retour inconditionnel a Idle (arret, desarmement force).
    /// Idempotent.
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
        self.incident = None;
        self.token_used = false;
    }
}

impl Default for GateCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(content: &str) -> PendingIncident {
        PendingIncident::new(
            content,
            "evil.exe".into(),
            "alice".into(),
            "desktop-01".into(),
            100,
        )
    }

    #[test]
    fn test_open_incident_only_from_idle() {
        let mut gate = GateCore::new();
        assert!(gate.open_incident(incident("powershell -enc AAAA")));
        assert_eq!(gate.state(), GateState::AwaitingDecision);

        // Une seconde detection pendant le cycle est abandonnee
        assert!(!gate.open_incident(incident("mshta javascript:x")));
        assert_eq!(gate.state(), GateState::AwaitingDecision);
        assert_eq!(gate.incident().unwrap().full_content, "powershell -enc AAAA");
    }

    #[test]
    fn test_discard_path() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        let resolved = gate.resolve_discard().unwrap();
        assert_eq!(resolved.full_content, "bad");
        assert_eq!(gate.state(), GateState::Idle);
        assert!(gate.incident().is_none());
    }

    #[test]
    fn test_discard_requires_pending_decision() {
        let mut gate = GateCore::new();
        assert!(gate.resolve_discard().is_none());
        gate.open_incident(incident("bad"));
        gate.authorize_single_paste();
        assert!(gate.resolve_discard().is_none());
    }

    #[test]
    fn test_keep_then_single_paste() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        assert!(gate.authorize_single_paste());
        assert_eq!(gate.state(), GateState::AwaitingAuthorizedPaste);

        // Premier collage : jeton consomme, action de fin demandee
        assert_eq!(gate.admit_key(Gesture::Paste), Admission::Complete);
        // Tout geste suivant est avale tant que la fin n'est pas actee
        assert_eq!(gate.admit_key(Gesture::Paste), Admission::Swallow);
        assert_eq!(gate.admit_click(ClickKind::RightUp), Admission::Swallow);

        let resolved = gate.complete_paste().unwrap();
        assert_eq!(resolved.full_content, "bad");
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_copy_cut_never_consume_token() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        gate.authorize_single_paste();

        assert_eq!(gate.admit_key(Gesture::Copy), Admission::Swallow);
        assert_eq!(gate.admit_key(Gesture::Cut), Admission::Swallow);
        assert_eq!(gate.admit_click(ClickKind::MiddleDown), Admission::Swallow);
        // Le jeton est toujours disponible
        assert_eq!(gate.admit_key(Gesture::Paste), Admission::Complete);
    }

    #[test]
    fn test_all_gestures_blocked_during_decision() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        assert_eq!(gate.admit_key(Gesture::Copy), Admission::Swallow);
        assert_eq!(gate.admit_key(Gesture::Cut), Admission::Swallow);
        assert_eq!(gate.admit_key(Gesture::Paste), Admission::Swallow);
        assert_eq!(gate.admit_click(ClickKind::RightDown), Admission::Swallow);
        assert_eq!(gate.admit_click(ClickKind::RightUp), Admission::Swallow);
        assert_eq!(gate.admit_click(ClickKind::MiddleUp), Admission::Swallow);
        assert_eq!(gate.state(), GateState::AwaitingDecision);
    }

    #[test]
    fn test_idle_passes_everything() {
        let mut gate = GateCore::new();
        assert_eq!(gate.admit_key(Gesture::Paste), Admission::Pass);
        assert_eq!(gate.admit_click(ClickKind::RightUp), Admission::Pass);
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_right_down_passes_before_authorized_paste() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        gate.authorize_single_paste();
        assert_eq!(gate.admit_click(ClickKind::RightDown), Admission::Pass);
        assert_eq!(gate.admit_click(ClickKind::RightUp), Admission::Complete);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut gate = GateCore::new();
        gate.open_incident(incident("bad"));
        gate.reset();
        assert_eq!(gate.state(), GateState::Idle);
        assert!(gate.incident().is_none());
        gate.reset();
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn test_complete_requires_authorized_state() {
        let mut gate = GateCore::new();
        assert!(gate.complete_paste().is_none());
        gate.open_incident(incident("bad"));
        assert!(gate.complete_paste().is_none());
    }

    #[test]
    fn test_preview_truncation() {
        let short = make_preview("hello", 100);
        assert_eq!(short, "hello");

        let long_content = "x".repeat(150);
        let preview = make_preview(&long_content, 100);
        assert_eq!(preview.chars().count(), 101);
        assert!(preview.ends_with('\u{2026}'));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let content = "é".repeat(150);
        let preview = make_preview(&content, 100);
        assert_eq!(preview.chars().count(), 101);
    }

    #[test]
    fn test_incident_captures_context() {
        let inc = incident("powershell -enc AAAA");
        assert_eq!(inc.source_app, "evil.exe");
        assert_eq!(inc.user, "alice");
        assert_eq!(inc.host, "desktop-01");
        assert!(inc.created_at > 0);
        assert_eq!(inc.preview, "powershell -enc AAAA");
    }
}
