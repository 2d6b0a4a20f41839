// src/noyau/moteur.rs
//
// Pipeline complet :
//   texte -> jetons -> normalisation -> arbre
//        -> { évaluation | solveur | test d'égalité }
//        -> mise en forme -> chaîne d'affichage
//
// Un appel = un pipeline, synchrone, sans état ambiant : les réglages
// sont un instantané et l'arithmétique est exacte de bout en bout.
// Toute erreur qui franchit cette frontière porte l'équation d'origine.

use log::debug;

use super::analyse::analyser;
use super::arbre::{Arbre, Op};
use super::erreurs::Erreur;
use super::format::nettoyer;
use super::reglages::Reglages;
use super::science::{MoteurScientifique, ScienceStd};
use super::solveur::{resoudre, Resolution};

const SIGNE_APPROX: char = '\u{2248}'; // ≈

/// Point d'entrée du moteur.
///
/// Chaînes de succès possibles : "= v", "≈ v", "x = v", "x ≈ v",
/// "= True", "= False", "x = No Solution", "x = Inf. Solutions".
pub fn calculer(
    probleme: &str,
    reglages: &Reglages,
    science: &dyn MoteurScientifique,
) -> Result<String, Erreur> {
    calculer_interne(probleme, reglages, science).map_err(|e| e.avec_equation(probleme))
}

/// Variante de confort : réglages par défaut, collaborateur standard.
pub fn calculer_defaut(probleme: &str) -> Result<String, Erreur> {
    calculer(probleme, &Reglages::default(), &ScienceStd::default())
}

fn calculer_interne(
    probleme: &str,
    reglages: &Reglages,
    science: &dyn MoteurScientifique,
) -> Result<String, Erreur> {
    let (arbre, cas, nb_variables) = analyser(probleme, reglages, science)?;

    // Mode solveur : racine '=' et exactement une inconnue.
    if cas && nb_variables > 0 {
        return match resoudre(&arbre, 0)? {
            Resolution::Aucune => Ok("x = No Solution".to_string()),
            Resolution::Infinite => Ok("x = Inf. Solutions".to_string()),
            Resolution::Unique(valeur) => {
                debug!("racine exacte : {valeur}");
                let (texte, arrondi) = nettoyer(&valeur, reglages);
                if arrondi {
                    Ok(format!("x {SIGNE_APPROX} {texte}"))
                } else {
                    Ok(format!("x = {texte}"))
                }
            }
        };
    }

    // Calcul numérique pur.
    if !cas && nb_variables == 0 {
        let valeur = arbre.evaluer()?;
        let (texte, arrondi) = nettoyer(&valeur, reglages);
        return if arrondi {
            Ok(format!("{SIGNE_APPROX} {texte}"))
        } else {
            Ok(format!("= {texte}"))
        };
    }

    // Test d'égalité sans inconnue : comparaison exacte des deux côtés.
    if cas && nb_variables == 0 {
        if let Arbre::BinOp {
            gauche,
            op: Op::Egal,
            droite,
        } = &arbre
        {
            let g = gauche.evaluer()?;
            let d = droite.evaluer()?;
            let verdict = if g == d { "True" } else { "False" };
            return Ok(format!("= {verdict}"));
        }
        return Err(Erreur::solveur(
            3720,
            "Ne devrait pas se produire : égalité sans '=' à la racine.",
        ));
    }

    // Restent les états mixtes invalides : variable(s) sans mode solveur.
    if matches!(&arbre, Arbre::BinOp { op: Op::Egal, .. }) {
        // '=' présent mais plus d'une inconnue.
        Err(Erreur::solveur(3002, "Plusieurs variables trouvées."))
    } else {
        Err(Erreur::solveur(
            3012,
            "Aucun '=' trouvé alors qu'une variable est présente.",
        ))
    }
}
