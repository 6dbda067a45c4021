// ClipSentinel - Journal d'audit
// Trace durable et horodatee de chaque verdict de decision
//
// Chaque incident resolu (rejet ou collage autorise) produit un bloc
// dans le fichier journal :
//
//   Time       : 2026-08-05 14:03:21
//   User       : alice
//   Host       : desktop-01
//   SourceApp  : chrome.exe
//   DestApp    : cmd.exe
//   Content    : powershell -EncodedCommand ...
//   Action     : Keep
//   Length     : 41
//   -------------------------------------------------------
//
// Le contenu est plafonne a `max_content_len` caracteres (independant
// de l'apercu utilisateur). Les ecritures sont serialisees par un
// mutex : c'est la seule ressource partagee verrouillee du programme,
// le reste vit sur l'unique thread de la boucle de messages.
//
// Un echec d'ecriture remonte a l'appelant qui le signale par un
// dialogue d'erreur ; il n'est jamais fatal a la surveillance.

use crate::constants::AUDIT_LOG_HEADER;
use crate::error::{CsError, CsResult};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Action consignee pour un incident resolu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// L'utilisateur a autorise un collage unique
    Keep,
    /// L'utilisateur a rejete le contenu
    Discard,
}

impl AuditAction {
    /// Libelle ecrit dans le champ Action du journal.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Keep => "Keep",
            AuditAction::Discard => "Discard",
        }
    }
}

/// Ecrivain du journal d'audit.
pub struct AuditLogger {
    log_path: PathBuf,
    max_content_len: usize,
    file_guard: Mutex<()>,
}

impl AuditLogger {
    /// Prepare le journal : cree les repertoires et l'en-tete du fichier.
    ///
    /// # Errors
    /// Retourne `CsError::Audit` si le repertoire ou le fichier ne peut
    /// pas etre cree.
    pub fn new(log_path: &Path, max_content_len: usize) -> CsResult<Self> {
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| CsError::Audit(format!("create {}: {}", parent.display(), e)))?;
        }
        if !log_path.exists() {
            fs::write(log_path, AUDIT_LOG_HEADER)
                .map_err(|e| CsError::Audit(format!("create {}: {}", log_path.display(), e)))?;
        }
        Ok(Self {
            log_path: log_path.to_path_buf(),
            max_content_len,
            file_guard: Mutex::new(()),
        })
    }

    /// Chemin du fichier journal.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Consigne un verdict de decision.
    ///
    /// Le contenu est tronque a `max_content_len` caracteres avec un
    /// marqueur "..." ; le champ Length reflete la longueur consignee.
    ///
    /// # Errors
    /// Retourne `CsError::Audit` si l'ouverture ou l'ecriture echoue.
    pub fn log_event(
        &self,
        user: &str,
        host: &str,
        source_app: &str,
        dest_app: &str,
        content: &str,
        action: AuditAction,
    ) -> CsResult<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let recorded = cap_content(content, self.max_content_len);
        let length = recorded.chars().count();

        let entry = format!(
            "Time       : {}\n\
             User       : {}\n\
             Host       : {}\n\
             SourceApp  : {}\n\
             DestApp    : {}\n\
             Content    : {}\n\
             Action     : {}\n\
             Length     : {}\n\
             -------------------------------------------------------\n\n",
            timestamp, user, host, source_app, dest_app, recorded, action.as_str(), length,
        );

        // Serialiser les ajouts au fichier
        let _guard = self.file_guard.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.log_path)
            .map_err(|e| CsError::Audit(format!("open {}: {}", self.log_path.display(), e)))?;
        file.write_all(entry.as_bytes())
            .map_err(|e| CsError::Audit(format!("append {}: {}", self.log_path.display(), e)))?;
        Ok(())
    }
}

/// Plafonne le contenu consigne et neutralise les sauts de ligne
/// pour preserver le format en blocs du journal.
fn cap_content(content: &str, max_len: usize) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max_len {
        flat
    } else {
        let mut s: String = flat.chars().take(max_len).collect();
        s.push_str("...");
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger_in(dir: &Path, max: usize) -> AuditLogger {
        AuditLogger::new(&dir.join("LogFiles").join("audit_log.txt"), max).unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), 1000);
        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert!(text.starts_with("==================== ClipSentinel Audit Log"));

        // Reouverture : l'en-tete n'est pas reecrit
        logger
            .log_event("alice", "desktop-01", "chrome.exe", "N/A", "bad", AuditAction::Discard)
            .unwrap();
        let _logger2 = logger_in(dir.path(), 1000);
        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(text.matches("Audit Log").count(), 1);
    }

    #[test]
    fn test_log_event_block_format() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), 1000);
        logger
            .log_event(
                "alice",
                "desktop-01",
                "chrome.exe",
                "cmd.exe",
                "powershell -EncodedCommand JABhAGIAYwA=",
                AuditAction::Keep,
            )
            .unwrap();

        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert!(text.contains("User       : alice"));
        assert!(text.contains("Host       : desktop-01"));
        assert!(text.contains("SourceApp  : chrome.exe"));
        assert!(text.contains("DestApp    : cmd.exe"));
        assert!(text.contains("Content    : powershell -EncodedCommand JABhAGIAYwA="));
        assert!(text.contains("Action     : Keep"));
        assert!(text.contains("Length     : 39"));
    }

    #[test]
    fn test_content_capped() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), 50);
        let content = "z".repeat(200);
        logger
            .log_event("u", "h", "s.exe", "d.exe", &content, AuditAction::Keep)
            .unwrap();

        let text = std::fs::read_to_string(logger.path()).unwrap();
        let expected = format!("Content    : {}...", "z".repeat(50));
        assert!(text.contains(&expected));
        assert!(text.contains("Length     : 53"));
    }

    #[test]
    fn test_newlines_flattened() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), 1000);
        logger
            .log_event("u", "h", "s.exe", "N/A", "line1\r\nline2", AuditAction::Discard)
            .unwrap();
        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert!(text.contains("Content    : line1  line2"));
    }

    #[test]
    fn test_two_entries_appended() {
        let dir = tempfile::tempdir().unwrap();
        let logger = logger_in(dir.path(), 1000);
        logger.log_event("u", "h", "a.exe", "N/A", "one", AuditAction::Discard).unwrap();
        logger.log_event("u", "h", "b.exe", "c.exe", "two", AuditAction::Keep).unwrap();
        let text = std::fs::read_to_string(logger.path()).unwrap();
        assert_eq!(text.matches("Time       : ").count(), 2);
        assert!(text.contains("Action     : Discard"));
        assert!(text.contains("Action     : Keep"));
    }
}
