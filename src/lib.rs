// ClipSentinel - Arbre de modules (crate library)
//
// Ce fichier constitue le point d'entree de la crate library de
// ClipSentinel. Il re-exporte tous les modules pour permettre l'acces
// depuis le binaire et faciliter les tests d'integration.
//
// # Modules
// - `app`       : orchestrateur principal, boucle de messages Win32
// - `audit`     : journal d'audit des verdicts (fichier horodate)
// - `clipboard` : surveillance et ecriture du presse-papiers
// - `config`    : lecture/ecriture de la configuration utilisateur
// - `constants` : constantes globales (tailles, identifiants, chemins)
// - `error`     : types d'erreur centralises (CsError, CsResult)
// - `gate`      : machine a etats de decision et hooks d'admission
// - `patterns`  : magasin de signatures (regex insensibles a la casse)
// - `system`    : bindings Win32, processus, identite, tray icon
// - `ui`        : fenetre cachee et dialogues modaux
// - `watcher`   : pivot de la detection et du cycle de decision

#![allow(non_snake_case, non_camel_case_types, dead_code)]
#![cfg(target_os = "windows")]

/// Orchestrateur principal de l'application.
pub mod app;
/// Journal d'audit des verdicts de decision.
pub mod audit;
/// Surveillance et ecriture du presse-papiers Windows.
pub mod clipboard;
/// Configuration utilisateur et parseur de fichiers.
pub mod config;
/// Constantes globales de l'application.
pub mod constants;
/// Types d'erreur centralises.
pub mod error;
/// Machine a etats de decision et controleur d'admission des collages.
pub mod gate;
/// Magasin de signatures de detection.
pub mod patterns;
/// Bindings Win32 et composants systeme.
pub mod system;
/// Fenetre cachee et dialogues modaux.
pub mod ui;
/// Watcher du presse-papiers.
pub mod watcher;
