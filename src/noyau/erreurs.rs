// src/noyau/erreurs.rs
//
// Erreurs structurées du moteur : un genre, un code stable à 4 chiffres,
// un message lisible, et l'équation d'origine (attachée à la frontière
// publique par `calculer`).
//
// Table des codes (stables, ne pas renuméroter) :
//   2000  dispatch scientifique incohérent (arité)
//   2002  logarithme : nombre ou base invalide
//   2003  résultat scientifique non fini
//   2007  racine carrée d'un nombre négatif
//   3002  plusieurs variables dans le problème
//   3003  division par zéro
//   3005  problème non linéaire (variable hors équation / terme quadratique)
//   3006  division par la variable
//   3007  puissance refusée par le solveur linéaire
//   3008  double point décimal dans un nombre
//   3009  parenthèse fermante manquante
//   3010  parenthèse ouvrante manquante après une fonction
//   3012  jeton inattendu / équation invalide
//   3022  un des côtés de l'équation est vide
//   3023  nom de fonction en fin d'entrée sans parenthèse
//   3025  '=' en bord de flux alors qu'une variable est présente
//   3026  nombre trop grand (dépassement)
//   3027  nombre manquant
//   3028  nombre manquant avant un opérateur / '='
//   3029  nombre manquant après un opérateur
//   3030  affectation composée interdite avec des variables
//   3218  échec d'une fonction scientifique
//   3720  '=' imbriqué sous la racine (incohérence interne)

use std::fmt;

use thiserror::Error;

/// Les trois familles d'erreurs que le moteur peut produire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Genre {
    /// Flux de jetons malformé (parenthèses, jetons inattendus, doubles points…).
    Syntaxe,
    /// Entrée bien formée mais numériquement invalide (division par zéro, opérande manquant…).
    Calcul,
    /// Expression hors du domaine du solveur linéaire (plusieurs variables, puissances…).
    Solveur,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::Syntaxe => write!(f, "syntaxe"),
            Genre::Calcul => write!(f, "calcul"),
            Genre::Solveur => write!(f, "solveur"),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("[{code}] {genre} : {message}")]
pub struct Erreur {
    pub genre: Genre,
    pub code: u16,
    pub message: String,
    /// Équation d'origine, attachée par la frontière publique.
    pub equation: Option<String>,
}

impl Erreur {
    pub fn syntaxe(code: u16, message: impl Into<String>) -> Self {
        Erreur {
            genre: Genre::Syntaxe,
            code,
            message: message.into(),
            equation: None,
        }
    }

    pub fn calcul(code: u16, message: impl Into<String>) -> Self {
        Erreur {
            genre: Genre::Calcul,
            code,
            message: message.into(),
            equation: None,
        }
    }

    pub fn solveur(code: u16, message: impl Into<String>) -> Self {
        Erreur {
            genre: Genre::Solveur,
            code,
            message: message.into(),
            equation: None,
        }
    }

    /// Attache l'entrée d'origine (sans écraser une équation déjà posée).
    pub fn avec_equation(mut self, equation: &str) -> Self {
        if self.equation.is_none() {
            self.equation = Some(equation.to_string());
        }
        self
    }
}
