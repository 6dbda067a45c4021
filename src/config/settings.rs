// ClipSentinel - Structure de configuration et valeurs par defaut
//
// Ce module definit la structure `Settings` qui centralise tous les
// parametres de l'application : fichier de signatures, longueur
// d'apercu, plafond du contenu journalise et chemins de fichiers.
//
// # Chargement
// `Settings::load(path)` lit le fichier de configuration et applique
// les valeurs parsees. Les valeurs manquantes conservent leur defaut.
// Les valeurs hors bornes sont clampees (ex: preview_length 20..400).
//
// # Fichier par defaut
// `Settings::save_default(path)` genere un fichier de configuration
// commente avec toutes les options disponibles et leurs valeurs.
//
// # Portabilite
// Dependance Windows limitee a `get_env_var("APPDATA")` pour le
// repertoire de donnees. Le reste est en pur Rust.

use crate::config::parser::{self, ParsedConfig};
use crate::constants::*;
use crate::system::win32;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration complete de l'application.
#[derive(Debug, Clone)]
pub struct Settings {
    // general
    pub initial_scan: bool,
    // patterns
    pub patterns_file: Option<PathBuf>,
    // display
    pub preview_length: usize,
    // audit
    pub audit_content_length: usize,
    // paths
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_scan: true,
            patterns_file: None,
            preview_length: DEFAULT_PREVIEW_LENGTH,
            audit_content_length: DEFAULT_AUDIT_CONTENT_LENGTH,
            data_dir: get_app_data_dir(),
        }
    }
}

impl Settings {
    /// Charge la configuration depuis un fichier. Utilise les defauts pour les valeurs manquantes.
    pub fn load(path: &Path) -> Self {
        let mut settings = Settings::default();
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(_) => return settings,
        };

        let config = parser::parse_config(&text);
        settings.apply_parsed(&config);
        settings
    }

    /// Applique les valeurs parsees sur les parametres.
    fn apply_parsed(&mut self, config: &ParsedConfig) {
        if let Some(gen) = config.get("general") {
            if let Some(v) = gen.get("initial_scan").and_then(|v| parser::parse_bool(v)) {
                self.initial_scan = v;
            }
        }

        if let Some(pat) = config.get("patterns") {
            if let Some(f) = pat.get("file") {
                if !f.is_empty() {
                    self.patterns_file = Some(PathBuf::from(f));
                }
            }
        }

        if let Some(disp) = config.get("display") {
            if let Some(v) = disp.get("preview_length").and_then(|v| parser::parse_usize(v)) {
                self.preview_length = v.clamp(20, 400);
            }
        }

        if let Some(audit) = config.get("audit") {
            if let Some(v) = audit.get("max_content_length").and_then(|v| parser::parse_usize(v)) {
                self.audit_content_length = v.clamp(100, 16384);
            }
        }
    }

    /// Sauvegarde la configuration avec commentaires par defaut.
    pub fn save_default(path: &Path) -> std::io::Result<()> {
        let content = default_config_text();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }

    /// Retourne le chemin du fichier de configuration.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILENAME)
    }

    /// Retourne le chemin du fichier de signatures.
    ///
    /// Utilise le chemin configure dans `[patterns] file` s'il est
    /// renseigne, sinon `<data_dir>\patterns.txt`.
    pub fn patterns_path(&self) -> PathBuf {
        match &self.patterns_file {
            Some(p) => p.clone(),
            None => self.data_dir.join(PATTERNS_FILENAME),
        }
    }

    /// Retourne le repertoire des journaux d'audit.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    /// Retourne le chemin du fichier journal d'audit.
    pub fn audit_log_path(&self) -> PathBuf {
        self.log_dir().join(AUDIT_LOG_FILENAME)
    }
}

/// Retourne le repertoire de donnees de l'application.
fn get_app_data_dir() -> PathBuf {
    win32::get_env_var("APPDATA")
        .map(|p| PathBuf::from(p).join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

/// Texte par defaut du fichier de configuration.
fn default_config_text() -> String {
    r#"# ClipSentinel Configuration
# Emplacement : %APPDATA%\ClipSentinel\config.txt

[general]
# Analyser le contenu deja present dans le presse-papiers au lancement
initial_scan = true

[patterns]
# Chemin du fichier de signatures ; vide = %APPDATA%\ClipSentinel\patterns.txt
file = ""

[display]
# Longueur de l'apercu affiche dans l'alerte (caracteres, 20..400)
preview_length = 100

[audit]
# Longueur max du contenu conserve dans le journal (caracteres, 100..16384)
max_content_length = 1000
"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.initial_scan);
        assert_eq!(s.preview_length, 100);
        assert_eq!(s.audit_content_length, 1000);
        assert!(s.patterns_file.is_none());
    }

    #[test]
    fn test_apply_parsed_clamps() {
        let mut s = Settings::default();
        let config = parser::parse_config(
            "[display]\npreview_length = 5\n[audit]\nmax_content_length = 999999\n",
        );
        s.apply_parsed(&config);
        assert_eq!(s.preview_length, 20);
        assert_eq!(s.audit_content_length, 16384);
    }

    #[test]
    fn test_patterns_path_override() {
        let mut s = Settings::default();
        assert!(s.patterns_path().ends_with(PATTERNS_FILENAME));
        s.patterns_file = Some(PathBuf::from("C:\\sig\\custom.txt"));
        assert_eq!(s.patterns_path(), PathBuf::from("C:\\sig\\custom.txt"));
    }

    #[test]
    fn test_initial_scan_off() {
        let mut s = Settings::default();
        let config = parser::parse_config("[general]\ninitial_scan = off\n");
        s.apply_parsed(&config);
        assert!(!s.initial_scan);
    }

    #[test]
    fn test_save_default_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        Settings::save_default(&path).unwrap();
        let s = Settings::load(&path);
        assert!(s.initial_scan);
        assert_eq!(s.preview_length, 100);
        assert!(s.patterns_file.is_none());
    }
}
