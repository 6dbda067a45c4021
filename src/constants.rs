// ClipSentinel - Constantes globales
//
// Ce module centralise toutes les constantes de l'application :
// - Valeurs par defaut de la configuration (apercu, journal d'audit)
// - Identifiants systeme (tray, messages Windows, mutex d'instance)
// - Noms de fichiers et repertoires
//
// Les constantes sont utilisees par les modules patterns, audit,
// config, system et watcher pour garantir la coherence des valeurs.

/// Longueur max de l'apercu affiche a l'utilisateur (caracteres)
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

/// Longueur max du contenu ecrit dans le journal d'audit (caracteres)
pub const DEFAULT_AUDIT_CONTENT_LENGTH: usize = 1000;

/// Marqueur de troncature de l'apercu
pub const PREVIEW_ELLIPSIS: char = '\u{2026}';

/// Nom du dossier application dans %APPDATA%
pub const APP_DIR_NAME: &str = "ClipSentinel";

/// Nom du fichier de configuration
pub const CONFIG_FILENAME: &str = "config.txt";

/// Nom du fichier de signatures par defaut
pub const PATTERNS_FILENAME: &str = "patterns.txt";

/// Nom du sous-dossier des journaux d'audit
pub const LOG_DIR_NAME: &str = "LogFiles";

/// Nom du fichier journal d'audit
pub const AUDIT_LOG_FILENAME: &str = "audit_log.txt";

/// En-tete ecrit a la creation du fichier journal
pub const AUDIT_LOG_HEADER: &str =
    "==================== ClipSentinel Audit Log ====================\n\n";

/// Nom sentinel quand la resolution de processus echoue
pub const UNKNOWN_APP: &str = "unknown";

/// Valeur du champ DestApp pour un contenu rejete
pub const NO_DEST_APP: &str = "N/A";

/// ID de l'icone de notification
pub const TRAY_ICON_ID: u32 = 1;

/// Message custom pour l'icone tray
pub const WM_TRAY_CALLBACK: u32 = 0x0400 + 100;

/// Nom du mutex global garantissant l'instance unique
pub const SINGLE_INSTANCE_MUTEX: &str = "Global\\ClipSentinel_Mutex";

/// URL de la page de dons (menu tray)
pub const DONATE_URL: &str = "https://clipsentinel.example.com/donate";
