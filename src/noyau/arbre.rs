// src/noyau/arbre.rs
//
// AST du moteur (exact, sans flottants) :
// - Nombre   : feuille numérique rationnelle
// - Variable : feuille symbolique (indice de la table des variables)
// - BinOp    : opération binaire, arbre strict (chaque enfant possédé)
//
// Un arbre est construit une fois par appel, consommé une fois par
// l'évaluateur ou le collecteur linéaire, puis jeté.

use std::fmt;

use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreurs::Erreur;
use super::science::puissance_rationnelle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Division,
    Puissance,
    Egal,
}

impl Op {
    pub fn symbole(&self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Division => '/',
            Op::Puissance => '^',
            Op::Egal => '=',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Arbre {
    Nombre(BigRational),
    Variable(usize),
    BinOp {
        gauche: Box<Arbre>,
        op: Op,
        droite: Box<Arbre>,
    },
}

impl Arbre {
    pub fn binop(gauche: Arbre, op: Op, droite: Arbre) -> Arbre {
        Arbre::BinOp {
            gauche: Box::new(gauche),
            op,
            droite: Box::new(droite),
        }
    }

    /// Évaluation numérique pure (parcours postfixe).
    ///
    /// Une variable rend l'évaluation impossible : ce mode n'est valide
    /// qu'à zéro variable, le solveur prend le relais sinon. L'égalité ne
    /// vit qu'à la racine et se décide au niveau du pipeline ; la croiser
    /// ici est une incohérence interne.
    pub fn evaluer(&self) -> Result<BigRational, Erreur> {
        match self {
            Arbre::Nombre(v) => Ok(v.clone()),

            Arbre::Variable(_) => Err(Erreur::solveur(3005, "Problème non linéaire.")),

            Arbre::BinOp { gauche, op, droite } => {
                let g = gauche.evaluer()?;
                let d = droite.evaluer()?;

                match op {
                    Op::Plus => Ok(g + d),
                    Op::Moins => Ok(g - d),
                    Op::Fois => Ok(g * d),
                    Op::Puissance => puissance_rationnelle(&g, &d),
                    Op::Division => {
                        if d.is_zero() {
                            return Err(Erreur::calcul(3003, "Division par zéro."));
                        }
                        Ok(g / d)
                    }
                    Op::Egal => Err(Erreur::solveur(
                        3720,
                        "Ne devrait pas se produire : '=' sous la racine.",
                    )),
                }
            }
        }
    }

    /// Collecte linéaire : réduit le sous-arbre en un couple
    /// (coefficient, constante) décrivant coefficient·x + constante,
    /// où x est la variable d'indice `cible`.
    pub fn collecter(&self, cible: usize) -> Result<(BigRational, BigRational), Erreur> {
        match self {
            Arbre::Nombre(v) => Ok((BigRational::zero(), v.clone())),

            Arbre::Variable(ix) => {
                if *ix == cible {
                    Ok((BigRational::one(), BigRational::zero()))
                } else {
                    // Une seule inconnue supportée : un second symbole est fatal.
                    Err(Erreur::solveur(
                        3002,
                        format!("Plusieurs variables trouvées : var{ix}"),
                    ))
                }
            }

            Arbre::BinOp { gauche, op, droite } => {
                let (gf, gk) = gauche.collecter(cible)?;
                let (df, dk) = droite.collecter(cible)?;

                match op {
                    Op::Plus => Ok((gf + df, gk + dk)),
                    Op::Moins => Ok((gf - df, gk - dk)),

                    Op::Fois => {
                        // Seul constante * (A·x + B) reste linéaire.
                        if !gf.is_zero() && !df.is_zero() {
                            return Err(Erreur::syntaxe(3005, "Terme quadratique (x·x)."));
                        }
                        if gf.is_zero() {
                            // B * (C·x + D) = (B·C)·x + (B·D)
                            Ok((&gk * df, gk * dk))
                        } else {
                            // (A·x + B) * D = (A·D)·x + (B·D)
                            Ok((&dk * gf, dk * gk))
                        }
                    }

                    Op::Division => {
                        if !df.is_zero() {
                            return Err(Erreur::solveur(
                                3006,
                                "Équation non linéaire (division par la variable).",
                            ));
                        }
                        if dk.is_zero() {
                            return Err(Erreur::solveur(3003, "Solveur : division par zéro."));
                        }
                        // (A·x + B) / D = (A/D)·x + (B/D)
                        Ok((gf / &dk, gk / dk))
                    }

                    Op::Puissance => Err(Erreur::solveur(
                        3007,
                        "Les puissances ne sont pas supportées par le solveur linéaire.",
                    )),

                    Op::Egal => Err(Erreur::solveur(
                        3720,
                        "Ne devrait pas se produire : '=' dans la collecte.",
                    )),
                }
            }
        }
    }

    /// Détecte si le sous-arbre contient au moins une variable (itératif).
    pub fn contient_variable(&self) -> bool {
        let mut pile: Vec<&Arbre> = vec![self];

        while let Some(n) = pile.pop() {
            match n {
                Arbre::Variable(_) => return true,
                Arbre::Nombre(_) => {}
                Arbre::BinOp { gauche, droite, .. } => {
                    pile.push(gauche.as_ref());
                    pile.push(droite.as_ref());
                }
            }
        }

        false
    }
}

/* ------------------------ Affichage debug (traces) ------------------------ */

impl fmt::Display for Arbre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arbre::Nombre(r) => {
                if r.is_integer() {
                    write!(f, "{}", r.numer())
                } else {
                    write!(f, "{}/{}", r.numer(), r.denom())
                }
            }
            Arbre::Variable(ix) => write!(f, "var{ix}"),
            Arbre::BinOp { gauche, op, droite } => {
                write!(f, "({gauche}{}{droite})", op.symbole())
            }
        }
    }
}
