//! Noyau de calcul
//!
//! Organisation interne :
//! - erreurs.rs  : erreurs structurées (genre + code stable + équation)
//! - reglages.rs : instantané de réglages par appel
//! - jetons.rs   : tokenisation + multiplication implicite
//! - science.rs  : fonctions scientifiques (énum fermée + trait) et
//!                 outillage exact (π de Machin, racine de Newton)
//! - arbre.rs    : AST + évaluation + collecte linéaire
//! - analyse.rs  : normalisation + descente récursive
//! - solveur.rs  : résolution A·x + B = C·x + D
//! - format.rs   : fractions / point fixe + drapeau d'arrondi
//! - moteur.rs   : pipeline complet

pub mod analyse;
pub mod arbre;
pub mod erreurs;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod reglages;
pub mod science;
pub mod solveur;

#[cfg(test)]
mod tests_moteur;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::{Erreur, Genre};
pub use moteur::{calculer, calculer_defaut};
pub use reglages::Reglages;
pub use science::{FonctionSci, MoteurScientifique, ScienceStd};
