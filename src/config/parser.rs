// ClipSentinel - Parseur format cle-valeur
// Format simple : sections [nom], cle = valeur, commentaires #
//
// Ce module implemente un parseur de configuration minimaliste pour
// le fichier config.txt de ClipSentinel.
//
// # Format supporte
// - Sections : `[section_name]`
// - Cle-valeur : `key = value`
// - Guillemets : `key = "value with spaces"`
// - Commentaires : `# ligne entiere` ou `key = value # inline`
// - Valeurs sans section sont affectees a la section "general"
//
// # Portabilite
// Ce module est en pur Rust, sans dependance Win32.

use std::collections::HashMap;

/// Resultat du parsing : sections contenant des paires cle-valeur.
pub type ParsedConfig = HashMap<String, HashMap<String, String>>;

/// Parse un fichier de configuration au format cle-valeur avec sections.
pub fn parse_config(text: &str) -> ParsedConfig {
    let mut config = ParsedConfig::new();
    let mut current_section = String::from("general");

    for line in text.lines() {
        let trimmed = line.trim();

        // Ignorer les lignes vides et commentaires
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        // Detection de section
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            current_section = trimmed[1..trimmed.len() - 1].trim().to_string();
            continue;
        }

        // Parsing cle = valeur
        if let Some(eq_pos) = trimmed.find('=') {
            let key = trimmed[..eq_pos].trim().to_string();
            let raw_value = trimmed[eq_pos + 1..].trim();

            // Supprimer les commentaires inline (apres #, mais pas dans les strings)
            let value = strip_inline_comment(raw_value);
            let value = strip_quotes(&value);

            config
                .entry(current_section.clone())
                .or_default()
                .insert(key, value);
        }
    }

    config
}

/// Supprime les commentaires inline (apres #) en respectant les guillemets.
fn strip_inline_comment(s: &str) -> String {
    let mut in_quotes = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => {
                return s[..i].trim().to_string();
            }
            _ => {}
        }
    }
    s.to_string()
}

/// Supprime les guillemets autour d'une valeur.
fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse une valeur comme booleen.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Parse une valeur comme usize.
pub fn parse_usize(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let text = r#"
[general]
initial_scan = true

[display]
preview_length = 100
"#;
        let config = parse_config(text);
        assert_eq!(config["general"]["initial_scan"], "true");
        assert_eq!(config["display"]["preview_length"], "100");
    }

    #[test]
    fn test_parse_comments() {
        let text = "# This is a comment\nkey = value # inline comment\n";
        let config = parse_config(text);
        assert_eq!(config["general"]["key"], "value");
    }

    #[test]
    fn test_parse_quoted_value() {
        let text = "file = \"C:\\Signatures\\patterns.txt\"\n";
        let config = parse_config(text);
        assert_eq!(config["general"]["file"], "C:\\Signatures\\patterns.txt");
    }

    #[test]
    fn test_quoted_hash_is_not_comment() {
        let text = "file = \"dossier # special\\patterns.txt\"\n";
        let config = parse_config(text);
        assert_eq!(config["general"]["file"], "dossier # special\\patterns.txt");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("invalid"), None);
    }

    #[test]
    fn test_parse_usize() {
        assert_eq!(parse_usize(" 1000 "), Some(1000));
        assert_eq!(parse_usize("abc"), None);
    }
}
