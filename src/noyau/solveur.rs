// src/noyau/solveur.rs
//
// Solveur linéaire à une inconnue.
// Concept de base : A·x + B = C·x + D  =>  x = (D - B) / (A - C)

use num_rational::BigRational;
use num_traits::Zero;

use super::arbre::{Arbre, Op};
use super::erreurs::Erreur;

/// Issue d'une résolution.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Racine unique.
    Unique(BigRational),
    /// Coefficients égaux, constantes différentes : aucune solution.
    Aucune,
    /// Les deux côtés sont identiques : une infinité de solutions.
    Infinite,
}

/// Résout l'équation pour la variable d'indice `cible`.
/// La racine de l'arbre doit être un '='.
pub fn resoudre(arbre: &Arbre, cible: usize) -> Result<Resolution, Erreur> {
    let (gauche, droite) = match arbre {
        Arbre::BinOp {
            gauche,
            op: Op::Egal,
            droite,
        } => (gauche, droite),
        _ => return Err(Erreur::solveur(3012, "Aucune équation valide à résoudre.")),
    };

    let (a, b) = gauche.collecter(cible)?;
    let (c, d) = droite.collecter(cible)?;

    let denominateur = a - c;
    let numerateur = d - b;

    if denominateur.is_zero() {
        if numerateur.is_zero() {
            return Ok(Resolution::Infinite);
        }
        return Ok(Resolution::Aucune);
    }

    Ok(Resolution::Unique(numerateur / denominateur))
}
