//! Tests moteur (campagne) : propriétés de bout en bout du pipeline.
//!
//! Chaque section couvre un mode du moteur : évaluation pure, arrondi,
//! solveur, test d'égalité, fonctions scientifiques, fractions,
//! affectation composée, et la table d'erreurs stable.

use super::erreurs::{Erreur, Genre};
use super::moteur::{calculer, calculer_defaut};
use super::reglages::Reglages;
use super::science::ScienceStd;

fn ok(s: &str) -> String {
    calculer_defaut(s).unwrap_or_else(|e| panic!("calculer({s:?}) erreur : {e}"))
}

fn ok_avec(reglages: &Reglages, s: &str) -> String {
    calculer(s, reglages, &ScienceStd::default())
        .unwrap_or_else(|e| panic!("calculer({s:?}) erreur : {e}"))
}

fn err(s: &str) -> Erreur {
    match calculer_defaut(s) {
        Ok(r) => panic!("calculer({s:?}) aurait dû échouer, a rendu {r:?}"),
        Err(e) => e,
    }
}

fn reglages_fractions() -> Reglages {
    Reglages {
        fractions: true,
        ..Reglages::default()
    }
}

/* ------------------------ Évaluation pure ------------------------ */

#[test]
fn evaluation_arithmetique() {
    assert_eq!(ok("2+2"), "= 4");
    assert_eq!(ok("2+3*4"), "= 14");
    assert_eq!(ok("(2+3)*4"), "= 20");
    assert_eq!(ok("10-4-3"), "= 3");
    assert_eq!(ok("5/2"), "= 2.5");
    assert_eq!(ok("-(3+4)"), "= -7");
}

#[test]
fn multiplication_implicite_de_bout_en_bout() {
    assert_eq!(ok("2(3)"), "= 6");
    assert_eq!(ok("(1+1)(2+2)"), "= 8");
}

#[test]
fn puissances_pliees() {
    assert_eq!(ok("2^10"), "= 1024");
    assert_eq!(ok("2^-2"), "= 0.25");
    assert_eq!(ok("4^0.5"), "= 2");
}

#[test]
fn sentinelles_egal() {
    assert_eq!(ok("=5+3"), "= 8");
    assert_eq!(ok("5+3≈"), "= 8");
    assert_eq!(ok("5+3="), "= 8");
}

/* ------------------------ Arrondi & drapeau ------------------------ */

#[test]
fn arrondi_non_representable() {
    let r = Reglages {
        decimales: 2,
        ..Reglages::default()
    };
    assert_eq!(ok_avec(&r, "1/3"), "≈ 0.33");
    assert_eq!(ok_avec(&r, "2/3"), "≈ 0.67");
}

#[test]
fn entier_jamais_marque_approche() {
    // idempotence : un résultat entier ne déclenche jamais le drapeau
    assert_eq!(ok("4"), "= 4");
    assert_eq!(ok("8/2"), "= 4");
}

#[test]
fn valeur_exacte_reproduite() {
    // représentable à la précision configurée : chiffres reproduits à l'identique
    assert_eq!(ok("0.25"), "= 0.25");
    assert_eq!(ok("1/2"), "= 0.5");
}

#[test]
fn pi_arrondi() {
    let r = Reglages {
        decimales: 2,
        ..Reglages::default()
    };
    assert_eq!(ok_avec(&r, "π"), "≈ 3.14");
}

/* ------------------------ Solveur ------------------------ */

#[test]
fn resolutions_lineaires() {
    assert_eq!(ok("2x+3=7"), "x = 2");
    assert_eq!(ok("4=2x"), "x = 2");
    assert_eq!(ok("x/2=1"), "x = 2");
    assert_eq!(ok("2(x+1)=6"), "x = 2");
    assert_eq!(ok("7-x=2x+1"), "x = 2");
}

#[test]
fn solution_fractionnaire() {
    assert_eq!(ok("2x=1"), "x = 0.5");
    assert_eq!(ok("3x=1"), "x ≈ 0.33");

    let r = reglages_fractions();
    assert_eq!(ok_avec(&r, "3x=1"), "x = 1/3");
}

#[test]
fn aucune_et_infinite_de_solutions() {
    assert_eq!(ok("2x+1=2x+5"), "x = No Solution");
    assert_eq!(ok("2x+1=2x+1"), "x = Inf. Solutions");
}

#[test]
fn domaines_du_solveur() {
    // terme quadratique : x·x
    let e = err("x*x=4");
    assert_eq!(e.genre, Genre::Syntaxe);
    assert_eq!(e.code, 3005);

    // puissance sur l'inconnue
    let e = err("x^2=4");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3007);

    // division par l'inconnue
    let e = err("1/x=2");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3006);

    // division par zéro côté collecte
    let e = err("x/0=1");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3003);
}

#[test]
fn plusieurs_variables() {
    let e = err("x+y=5");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3002);
}

#[test]
fn variable_sans_equation() {
    let e = err("5x");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3012);
}

/* ------------------------ Égalité sans inconnue ------------------------ */

#[test]
fn egalite_exacte() {
    assert_eq!(ok("1+1=2"), "= True");
    assert_eq!(ok("2=3"), "= False");
    // l'arithmétique exacte rend (1/3)*3 strictement égal à 1
    assert_eq!(ok("(1/3)*3=1"), "= True");
}

/* ------------------------ Fonctions scientifiques ------------------------ */

#[test]
fn fonctions_numeriques() {
    assert_eq!(ok("√(49)"), "= 7");
    assert_eq!(ok("sin(0)"), "= 0");
    assert_eq!(ok("cos(0)"), "= 1");
    assert_eq!(ok("log(1)"), "= 0");
    assert_eq!(ok("e^(0)"), "= 1");
}

#[test]
fn log_avec_base() {
    let r = ok("log(8,2)");
    assert!(r == "= 3" || r == "≈ 3", "résultat inattendu : {r:?}");
}

#[test]
fn fonction_sur_variable_refusee() {
    let e = err("sin(x)");
    assert_eq!(e.genre, Genre::Solveur);
    assert_eq!(e.code, 3005);
}

#[test]
fn echec_scientifique_enveloppe() {
    // log d'un négatif : l'échec du collaborateur remonte en erreur de syntaxe 3218
    let e = err("log(0-3)");
    assert_eq!(e.genre, Genre::Syntaxe);
    assert_eq!(e.code, 3218);
}

/* ------------------------ Mode fractions ------------------------ */

#[test]
fn rendu_fractionnaire() {
    let r = reglages_fractions();
    assert_eq!(ok_avec(&r, "1/2"), "= 1/2");
    assert_eq!(ok_avec(&r, "0.5"), "= 1/2");
    assert_eq!(ok_avec(&r, "7/3"), "= 2 1/3");
    assert_eq!(ok_avec(&r, "-1.5"), "= -1 1/2");
    assert_eq!(ok_avec(&r, "4"), "= 4");
}

/* ------------------------ Affectation composée ------------------------ */

#[test]
fn affectation_composee() {
    let active = Reglages {
        affectation_composee: true,
        ..Reglages::default()
    };
    assert_eq!(ok_avec(&active, "5+=3"), "= 8");
    assert_eq!(ok_avec(&active, "5*=3"), "= 15");

    // désactivée : nombre manquant avant '='
    let e = err("5+=3");
    assert_eq!(e.code, 3028);

    // avec variable : interdite
    let e = calculer("x+=1", &active, &ScienceStd::default()).unwrap_err();
    assert_eq!(e.code, 3030);
}

/* ------------------------ Table d'erreurs ------------------------ */

#[test]
fn erreurs_de_syntaxe() {
    assert_eq!(err("1.2.3").code, 3008);
    assert_eq!(err("(2+3").code, 3009);
    assert_eq!(err("sin5").code, 3010);
    assert_eq!(err("2=3=4").code, 3012);
    assert_eq!(err("2+cos").code, 3023);
}

#[test]
fn erreurs_de_calcul() {
    let e = err("5/0");
    assert_eq!(e.genre, Genre::Calcul);
    assert_eq!(e.code, 3003);

    assert_eq!(err("").code, 3027);
    assert_eq!(err("*5").code, 3028);
    assert_eq!(err("5+").code, 3029);
    assert_eq!(err("x=").code, 3025);
    assert_eq!(err("2^99999999").code, 3026);
}

#[test]
fn equation_toujours_attachee() {
    for probleme in ["5/0", "x+y=5", "1.2.3", "sin(x)"] {
        let e = err(probleme);
        assert_eq!(e.equation.as_deref(), Some(probleme), "pour {probleme:?}");
    }
}
