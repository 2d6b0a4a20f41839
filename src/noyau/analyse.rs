// src/noyau/analyse.rs
//
// Normalisation de grammaire + descente récursive.
//
// Le curseur est explicite (tranche immuable + position) : les cinq
// routines de précédence partagent le même Analyseur au lieu de muter
// une file commune. Précédence, du plus fort au plus faible :
//   facteur > unaire > puissance > terme > somme > équation

use log::debug;
use num_rational::BigRational;
use num_traits::Zero;

use super::arbre::{Arbre, Op};
use super::erreurs::Erreur;
use super::jetons::{format_jetons, tokeniser, Jeton};
use super::reglages::Reglages;
use super::science::{puissance_rationnelle, FonctionSci, MoteurScientifique};

/// Analyse complète : jetons -> normalisation -> arbre.
/// Retourne (arbre, cas, nombre de variables distinctes) ; `cas` est vrai
/// quand la racine est un '=' et qu'au plus une variable est présente
/// (l'arbre est alors éligible au solveur).
pub fn analyser(
    probleme: &str,
    reglages: &Reglages,
    science: &dyn MoteurScientifique,
) -> Result<(Arbre, bool, usize), Erreur> {
    let (mut jetons, variables) = tokeniser(probleme)?;
    let nb_variables = variables.len();
    debug!("jetons : {}", format_jetons(&jetons));

    normaliser(&mut jetons, nb_variables, reglages, probleme)?;

    let mut analyseur = Analyseur {
        jetons: &jetons,
        pos: 0,
        science,
    };
    let arbre = analyseur.equation()?;

    // Des jetons restants trahissent une entrée malformée ("2=3=4", "1)"…).
    if let Some(reste) = analyseur.regarder() {
        return Err(Erreur::syntaxe(
            3012,
            format!(
                "Jeton inattendu : {}",
                format_jetons(std::slice::from_ref(reste))
            ),
        ));
    }

    let cas = matches!(
        &arbre,
        Arbre::BinOp { op: Op::Egal, .. }
    ) && nb_variables <= 1;

    debug!("arbre final : {arbre}");

    Ok((arbre, cas, nb_variables))
}

/* ------------------------ Normalisation ------------------------ */

/// Nettoie le flux de jetons avant la descente :
/// 1. retire un '=' sentinelle en tête/queue quand aucune variable n'est là
///    (tolère les artefacts '≈' d'une saisie naturelle) ;
/// 2. refuse '*' ou '/' en tête (opérande gauche manquant) ;
/// 3. traite l'affectation composée "A op = B" => "( A ) op B" ;
/// 4. refuse un '=' en bord de flux quand une variable est présente ;
/// 5. refuse un opérateur en queue (opérande droit manquant).
fn normaliser(
    jetons: &mut Vec<Jeton>,
    nb_variables: usize,
    reglages: &Reglages,
    probleme: &str,
) -> Result<(), Erreur> {
    if nb_variables == 0 {
        if jetons.first() == Some(&Jeton::Egal) {
            jetons.remove(0);
            debug!("signe égal retiré en tête");
        }
        if jetons.last() == Some(&Jeton::Egal) {
            jetons.pop();
            debug!("signe égal retiré en queue");
        }
    }

    if matches!(jetons.first(), Some(Jeton::Star | Jeton::Slash)) {
        return Err(Erreur::calcul(3028, "Nombre manquant."));
    }

    // Affectation composée : un opérateur (hors '=') immédiatement suivi de '='.
    let mut b = 0;
    while b + 1 < jetons.len() {
        let paire = jetons[b].est_operateur()
            && jetons[b] != Jeton::Egal
            && jetons[b + 1] == Jeton::Egal;
        if paire {
            if !reglages.affectation_composee {
                return Err(Erreur::calcul(3028, "Nombre manquant avant '='."));
            }
            if nb_variables > 0 {
                return Err(Erreur::calcul(
                    3030,
                    "Affectation composée interdite avec des variables.",
                ));
            }
            // "A op = B" => "( A ) op B" : la partie gauche est parenthésée,
            // le '=' disparaît, l'opération s'évalue comme un calcul simple.
            jetons.insert(b, Jeton::RPar);
            jetons.insert(0, Jeton::LPar);
            jetons.remove(b + 3);
            debug!("affectation composée réécrite : {}", format_jetons(jetons));
            b += 2;
        }
        b += 1;
    }

    if nb_variables > 0
        && (jetons.first() == Some(&Jeton::Egal) || jetons.last() == Some(&Jeton::Egal))
    {
        return Err(Erreur::calcul(3025, probleme));
    }

    if let Some(dernier) = jetons.last() {
        if dernier.est_operateur() {
            return Err(Erreur::calcul(
                3029,
                format!(
                    "Nombre manquant après '{}'.",
                    format_jetons(std::slice::from_ref(dernier))
                ),
            ));
        }
    }

    Ok(())
}

/* ------------------------ Descente récursive ------------------------ */

struct Analyseur<'a> {
    jetons: &'a [Jeton],
    pos: usize,
    science: &'a dyn MoteurScientifique,
}

impl Analyseur<'_> {
    fn regarder(&self) -> Option<&Jeton> {
        self.jetons.get(self.pos)
    }

    fn avancer(&mut self) -> Option<Jeton> {
        let j = self.jetons.get(self.pos).cloned();
        if j.is_some() {
            self.pos += 1;
        }
        j
    }

    /// Littéral, sous-expression parenthésée, ou appel de fonction.
    fn facteur(&mut self) -> Result<Arbre, Erreur> {
        let jeton = self
            .avancer()
            .ok_or_else(|| Erreur::calcul(3027, "Nombre manquant."))?;

        match jeton {
            Jeton::LPar => {
                let interieur = self.somme()?;
                if self.avancer() != Some(Jeton::RPar) {
                    return Err(Erreur::syntaxe(3009, "Parenthèse fermante ')' manquante."));
                }
                Ok(interieur)
            }

            Jeton::Fonction(f) => self.appel_fonction(f),

            Jeton::Num(v) => Ok(Arbre::Nombre(v)),
            Jeton::Var(ix) => Ok(Arbre::Variable(ix)),

            autre => Err(Erreur::syntaxe(
                3012,
                format!(
                    "Jeton inattendu : {}",
                    format_jetons(std::slice::from_ref(&autre))
                ),
            )),
        }
    }

    /// Appel de fonction scientifique. L'argument est analysé au niveau
    /// somme puis évalué immédiatement : il doit déjà se réduire à un
    /// nombre concret, une variable sous une fonction échoue ici.
    /// log accepte une base en second argument, séparée par une virgule.
    fn appel_fonction(&mut self, fonction: FonctionSci) -> Result<Arbre, Erreur> {
        if self.avancer() != Some(Jeton::LPar) {
            return Err(Erreur::syntaxe(
                3010,
                format!(
                    "Parenthèse ouvrante manquante après la fonction {}",
                    fonction.nom()
                ),
            ));
        }

        let argument = self.somme()?;
        let mut args: Vec<BigRational> = Vec::with_capacity(2);

        if fonction == FonctionSci::Log && self.regarder() == Some(&Jeton::Virgule) {
            self.pos += 1;
            let base = self.somme()?;
            if self.avancer() != Some(Jeton::RPar) {
                return Err(Erreur::syntaxe(
                    3009,
                    "Parenthèse fermante manquante après la base du logarithme.",
                ));
            }
            args.push(argument.evaluer()?);
            args.push(base.evaluer()?);
        } else {
            if self.avancer() != Some(Jeton::RPar) {
                return Err(Erreur::syntaxe(
                    3009,
                    format!(
                        "Parenthèse fermante manquante après la fonction '{}'",
                        fonction.nom()
                    ),
                ));
            }
            args.push(argument.evaluer()?);
        }

        match self.science.evaluer(fonction, &args) {
            Ok(v) => Ok(Arbre::Nombre(v)),
            Err(e) => Err(Erreur::syntaxe(
                3218,
                format!("Erreur dans la fonction scientifique : {}", e.message),
            )),
        }
    }

    /// Signes unaires en tête. Un moins sur un littéral produit le littéral
    /// négué directement, sans nœud supplémentaire.
    fn unaire(&mut self) -> Result<Arbre, Erreur> {
        match self.regarder() {
            Some(Jeton::Plus) => {
                self.pos += 1;
                self.unaire()
            }
            Some(Jeton::Minus) => {
                self.pos += 1;
                let operande = self.unaire()?;
                Ok(match operande {
                    Arbre::Nombre(v) => Arbre::Nombre(-v),
                    autre => Arbre::binop(
                        Arbre::Nombre(BigRational::zero()),
                        Op::Moins,
                        autre,
                    ),
                })
            }
            _ => self.puissance(),
        }
    }

    /// '^', associatif à droite. Quand aucun des deux côtés ne contient de
    /// variable, le résultat est replié en littéral dès l'analyse ; sinon le
    /// nœud reste symbolique (et le collecteur linéaire le refusera).
    fn puissance(&mut self) -> Result<Arbre, Erreur> {
        let mut courant = self.facteur()?;
        while self.regarder() == Some(&Jeton::Caret) {
            self.pos += 1;
            let droite = self.unaire()?;
            if !courant.contient_variable() && !droite.contient_variable() {
                let base = courant.evaluer()?;
                let exposant = droite.evaluer()?;
                courant = Arbre::Nombre(puissance_rationnelle(&base, &exposant)?);
            } else {
                courant = Arbre::binop(courant, Op::Puissance, droite);
            }
        }
        Ok(courant)
    }

    /// '*' et '/', associatifs à gauche.
    fn terme(&mut self) -> Result<Arbre, Erreur> {
        let mut courant = self.unaire()?;
        loop {
            let op = match self.regarder() {
                Some(Jeton::Star) => Op::Fois,
                Some(Jeton::Slash) => Op::Division,
                _ => break,
            };
            self.pos += 1;
            let droite = self.unaire()?;
            courant = Arbre::binop(courant, op, droite);
        }
        Ok(courant)
    }

    /// '+' et '-', associatifs à gauche.
    fn somme(&mut self) -> Result<Arbre, Erreur> {
        let mut courant = self.terme()?;
        loop {
            let op = match self.regarder() {
                Some(Jeton::Plus) => Op::Plus,
                Some(Jeton::Minus) => Op::Moins,
                _ => break,
            };
            self.pos += 1;
            let droite = self.terme()?;
            courant = Arbre::binop(courant, op, droite);
        }
        Ok(courant)
    }

    /// Un '=' optionnel au sommet ; sans lui, l'arbre de la somme remonte tel quel.
    fn equation(&mut self) -> Result<Arbre, Erreur> {
        let gauche = self.somme()?;
        if self.regarder() == Some(&Jeton::Egal) {
            self.pos += 1;
            let droite = self.somme()?;
            return Ok(Arbre::binop(gauche, Op::Egal, droite));
        }
        Ok(gauche)
    }
}
