//! Moteur d'expressions et d'équations linéaires à une inconnue.
//!
//! Entrée : une chaîne brute ("2+3*4", "2x+3=7", "sin(π)"…).
//! Sortie : une chaîne d'affichage ("= 14", "x = 2", "≈ 0.33") ou une
//! erreur structurée (genre, code stable, message, équation d'origine).
//!
//! L'arithmétique interne est exacte (rationnels sur grands entiers) ;
//! l'arrondi n'intervient qu'à la mise en forme, piloté par l'instantané
//! de réglages passé à chaque appel.

pub mod noyau;

pub use noyau::{calculer, calculer_defaut, Erreur, Genre, Reglages, ScienceStd};
