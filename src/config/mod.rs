// ClipSentinel - Module config
// Lecture/ecriture de la configuration utilisateur
//
// Ce module gere la configuration de ClipSentinel via un fichier texte
// au format cle-valeur avec sections, situe dans
// %APPDATA%\ClipSentinel\config.txt.
//
// # Sous-modules
// - `parser`   : parseur generique de fichiers cle-valeur avec sections,
//                commentaires et guillemets.
// - `settings` : structure Settings contenant tous les parametres de
//                l'application (signatures, apercu, audit) avec valeurs
//                par defaut robustes et validation des plages.

/// Parseur de fichiers de configuration au format cle-valeur avec sections.
pub mod parser;
/// Structure de configuration et valeurs par defaut de l'application.
pub mod settings;
