// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;

use super::erreurs::Erreur;
use super::science::{pi_rationnel, pow10, FonctionSci, PI_DECIMALES};

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Num(BigRational),

    // Variables libres : indice stable attribué à la première apparition
    // du caractère (var0, var1, …).
    Var(usize),

    // Fonctions scientifiques reconnues au lexage (le '(' suit toujours).
    Fonction(FonctionSci),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Egal,  // = (≈ est replié dessus)

    LPar,
    RPar,
    Virgule,
}

impl Jeton {
    /// Opérateur infixe au sens de la grammaire (y compris '=').
    pub fn est_operateur(&self) -> bool {
        matches!(
            self,
            Jeton::Plus | Jeton::Minus | Jeton::Star | Jeton::Slash | Jeton::Caret | Jeton::Egal
        )
    }
}

/// Tokenize une chaîne en jetons + table des variables rencontrées.
/// Supporte :
/// - nombres décimaux (12, 12.5, .5) convertis exactement en rationnels
/// - opérateurs + - * / ^ = (et ≈, replié sur =)
/// - parenthèses, virgule d'argument
/// - sin( cos( tan( log( — le '(' doit suivre immédiatement le nom
/// - √( et e^( (lookahead 2 et 3 caractères)
/// - π, résolu immédiatement en constante rationnelle
/// - tout autre caractère : symbole de variable (indice d'ordre d'apparition)
///
/// La passe de multiplication implicite est appliquée avant le retour.
pub fn tokeniser(s: &str) -> Result<(Vec<Jeton>, Vec<char>), Erreur> {
    let mut out = Vec::new();
    let mut variables: Vec<char> = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre décimal : suite de chiffres avec au plus un point.
        if c.is_ascii_digit() || c == '.' {
            let mut entier = String::new();
            let mut fraction = String::new();
            let mut apres_point = false;

            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if apres_point {
                        return Err(Erreur::syntaxe(3008, "Double point décimal dans le nombre."));
                    }
                    apres_point = true;
                } else if apres_point {
                    fraction.push(chars[i]);
                } else {
                    entier.push(chars[i]);
                }
                i += 1;
            }

            // '.' isolé : aucun jeton, le parseur signalera le nombre manquant.
            if entier.is_empty() && fraction.is_empty() {
                continue;
            }

            let chiffres = format!("{entier}{fraction}");
            let n = BigInt::parse_bytes(chiffres.as_bytes(), 10)
                .ok_or_else(|| Erreur::syntaxe(3012, format!("Nombre invalide : '{chiffres}'")))?;
            let rat = if fraction.is_empty() {
                BigRational::from_integer(n)
            } else {
                BigRational::new(n, pow10(fraction.len()))
            };
            out.push(Jeton::Num(rat));
            continue;
        }

        // Opérateurs et ponctuation
        match c {
            '+' => {
                out.push(Jeton::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Jeton::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Jeton::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Jeton::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Jeton::Caret);
                i += 1;
                continue;
            }
            '=' | '≈' => {
                out.push(Jeton::Egal);
                i += 1;
                continue;
            }
            '(' => {
                out.push(Jeton::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Jeton::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Jeton::Virgule);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Fonctions à 3 lettres : le '(' doit suivre immédiatement.
        if matches!(c, 's' | 'c' | 't' | 'l') && i + 3 <= chars.len() {
            let nom: String = chars[i..i + 3].iter().collect();
            let fonction = match nom.as_str() {
                "sin" => Some(FonctionSci::Sin),
                "cos" => Some(FonctionSci::Cos),
                "tan" => Some(FonctionSci::Tan),
                "log" => Some(FonctionSci::Log),
                _ => None,
            };
            if let Some(f) = fonction {
                if i + 3 == chars.len() {
                    return Err(Erreur::calcul(
                        3023,
                        format!("Parenthèse manquante après : '{nom}'"),
                    ));
                }
                if chars[i + 3] != '(' {
                    return Err(Erreur::calcul(
                        3010,
                        format!("Parenthèse manquante après : '{nom}'"),
                    ));
                }
                out.push(Jeton::Fonction(f));
                out.push(Jeton::LPar);
                i += 4;
                continue;
            }
            // pas un nom de fonction : retombe sur la variable
        }

        // Racine carrée unicode : √( => fonction racine
        if c == '√' {
            if i + 1 < chars.len() && chars[i + 1] == '(' {
                out.push(Jeton::Fonction(FonctionSci::Racine));
                out.push(Jeton::LPar);
                i += 2;
                continue;
            }
            return Err(Erreur::calcul(3010, "Parenthèse manquante après : '√'"));
        }

        // Exponentielle : e^( => fonction exp ; un 'e' seul reste une variable.
        if c == 'e' && i + 2 < chars.len() && chars[i + 1] == '^' && chars[i + 2] == '(' {
            out.push(Jeton::Fonction(FonctionSci::Exp));
            out.push(Jeton::LPar);
            i += 3;
            continue;
        }

        // π : résolu tout de suite en constante rationnelle.
        if c == 'π' {
            out.push(Jeton::Num(pi_rationnel(PI_DECIMALES)));
            i += 1;
            continue;
        }

        // Tout le reste est un symbole de variable.
        let indice = match variables.iter().position(|&v| v == c) {
            Some(ix) => ix,
            None => {
                variables.push(c);
                variables.len() - 1
            }
        };
        out.push(Jeton::Var(indice));
        i += 1;
    }

    inserer_multiplications(&mut out);

    Ok((out, variables))
}

/// Passe de multiplication implicite : insère '*' entre deux jetons adjacents
/// A, B quand A ∈ {nombre, variable, ')'} et B ∈ {'(', nombre, variable,
/// fonction}. Couvre "5x", "2(3)", "x(x+1)", ")(".
pub fn inserer_multiplications(jetons: &mut Vec<Jeton>) {
    let mut b = 0;
    while b + 1 < jetons.len() {
        let gauche_ok = matches!(jetons[b], Jeton::Num(_) | Jeton::Var(_) | Jeton::RPar);
        let droite_ok = matches!(
            jetons[b + 1],
            Jeton::LPar | Jeton::Num(_) | Jeton::Var(_) | Jeton::Fonction(_)
        );
        if gauche_ok && droite_ok {
            jetons.insert(b + 1, Jeton::Star);
            b += 1;
        }
        b += 1;
    }
}

/// Format utilitaire (traces) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    let mut out = Vec::new();
    for j in jetons {
        let s = match j {
            Jeton::Num(r) => {
                if r.is_integer() {
                    format!("{}", r.numer())
                } else {
                    format!("{}/{}", r.numer(), r.denom())
                }
            }
            Jeton::Var(ix) => format!("var{ix}"),
            Jeton::Fonction(f) => f.nom().to_string(),

            Jeton::Plus => "+".to_string(),
            Jeton::Minus => "-".to_string(),
            Jeton::Star => "*".to_string(),
            Jeton::Slash => "/".to_string(),
            Jeton::Caret => "^".to_string(),
            Jeton::Egal => "=".to_string(),

            Jeton::LPar => "(".to_string(),
            Jeton::RPar => ")".to_string(),
            Jeton::Virgule => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
