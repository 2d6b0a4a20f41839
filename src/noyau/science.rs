// src/noyau/science.rs
//
// Collaborateur scientifique du moteur :
// - FonctionSci : énumération fermée des fonctions nommées
// - MoteurScientifique : l'interface étroite vue par le parseur
// - ScienceStd : implémentation par défaut (flottants machine, réglage
//   degrés/radians côté collaborateur, invisible pour le moteur)
//
// Le module porte aussi l'outillage exact partagé : π (série de Machin,
// avec cache), racine carrée (exacte ou approchée par Newton), puissance
// entière rationnelle.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreurs::Erreur;

/// Précision (en chiffres décimaux) de la constante π fournie au lexeur.
pub const PI_DECIMALES: usize = 50;

/// Précision des racines carrées non exactes.
const RACINE_DECIMALES: usize = 50;

/// Borne sur |exposant| pour la puissance entière exacte.
const MAX_EXPOSANT: u64 = 10_000;

/* ------------------------ Fonctions nommées ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionSci {
    Sin,
    Cos,
    Tan,
    Log,
    Racine, // √(
    Exp,    // e^(
}

impl FonctionSci {
    pub fn nom(&self) -> &'static str {
        match self {
            FonctionSci::Sin => "sin",
            FonctionSci::Cos => "cos",
            FonctionSci::Tan => "tan",
            FonctionSci::Log => "log",
            FonctionSci::Racine => "√",
            FonctionSci::Exp => "e^",
        }
    }
}

/// Interface du collaborateur scientifique : les arguments arrivent déjà
/// évalués (jamais symboliques), le résultat revient dans le domaine exact.
pub trait MoteurScientifique {
    fn evaluer(&self, fonction: FonctionSci, args: &[BigRational]) -> Result<BigRational, Erreur>;
}

/// Implémentation standard : flottants machine pour les transcendantes,
/// racine exacte quand elle existe.
#[derive(Clone, Debug, Default)]
pub struct ScienceStd {
    /// true : sin/cos/tan reçoivent des degrés ; false : des radians.
    pub degres: bool,
}

impl MoteurScientifique for ScienceStd {
    fn evaluer(&self, fonction: FonctionSci, args: &[BigRational]) -> Result<BigRational, Erreur> {
        match fonction {
            FonctionSci::Sin | FonctionSci::Cos | FonctionSci::Tan => {
                let x = arg_unique(fonction, args)?;
                let mut v = vers_f64(x)?;
                if self.degres {
                    v = v.to_radians();
                }
                let r = match fonction {
                    FonctionSci::Sin => v.sin(),
                    FonctionSci::Cos => v.cos(),
                    _ => v.tan(),
                };
                depuis_f64(r)
            }

            FonctionSci::Log => {
                let (x, base) = match args {
                    [x] => (x, None),
                    [x, b] => (x, Some(b)),
                    _ => return Err(arite(fonction, args.len())),
                };
                if !x.is_positive() {
                    return Err(Erreur::calcul(
                        2002,
                        "Nombre ou base invalide dans le logarithme.",
                    ));
                }
                let xf = vers_f64(x)?;
                let r = match base {
                    // log(x) sans base : logarithme naturel
                    None => xf.ln(),
                    Some(b) => {
                        if !b.is_positive() || b.is_one() {
                            return Err(Erreur::calcul(
                                2002,
                                "Nombre ou base invalide dans le logarithme.",
                            ));
                        }
                        xf.ln() / vers_f64(b)?.ln()
                    }
                };
                depuis_f64(r)
            }

            FonctionSci::Racine => {
                let x = arg_unique(fonction, args)?;
                if x.is_negative() {
                    return Err(Erreur::calcul(2007, "Racine carrée d'un nombre négatif."));
                }
                if let Some(exacte) = racine_exacte(x) {
                    return Ok(exacte);
                }
                let scalee = racine_scalee(x, RACINE_DECIMALES);
                Ok(BigRational::new(scalee, pow10(RACINE_DECIMALES)))
            }

            FonctionSci::Exp => {
                let x = arg_unique(fonction, args)?;
                depuis_f64(vers_f64(x)?.exp())
            }
        }
    }
}

fn arg_unique<'a>(
    fonction: FonctionSci,
    args: &'a [BigRational],
) -> Result<&'a BigRational, Erreur> {
    match args {
        [x] => Ok(x),
        _ => Err(arite(fonction, args.len())),
    }
}

fn arite(fonction: FonctionSci, recu: usize) -> Erreur {
    Erreur::calcul(
        2000,
        format!(
            "Fonction '{}' reconnue mais mal dispatchée ({recu} argument(s)).",
            fonction.nom()
        ),
    )
}

/* ------------------------ Passerelle flottants ------------------------ */

fn vers_f64(r: &BigRational) -> Result<f64, Erreur> {
    match r.to_f64() {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(Erreur::calcul(3026, "Nombre trop grand (dépassement).")),
    }
}

fn depuis_f64(v: f64) -> Result<BigRational, Erreur> {
    if !v.is_finite() {
        return Err(Erreur::calcul(2003, "Résultat scientifique non fini."));
    }
    BigRational::from_float(v)
        .ok_or_else(|| Erreur::calcul(2003, "Résultat scientifique non fini."))
}

/* ------------------------ Puissance rationnelle ------------------------ */

/// base^exposant dans le domaine exact quand l'exposant est entier,
/// par flottants machine sinon (comme les autres transcendantes).
pub fn puissance_rationnelle(
    base: &BigRational,
    exposant: &BigRational,
) -> Result<BigRational, Erreur> {
    if exposant.is_integer() {
        let e = exposant
            .numer()
            .to_i64()
            .ok_or_else(|| Erreur::calcul(3026, "Nombre trop grand (dépassement)."))?;
        if e.unsigned_abs() > MAX_EXPOSANT {
            return Err(Erreur::calcul(3026, "Nombre trop grand (dépassement)."));
        }
        if e < 0 && base.is_zero() {
            return Err(Erreur::calcul(3003, "Division par zéro."));
        }
        return Ok(puissance_entiere(base.clone(), e));
    }

    // Exposant fractionnaire : hors du domaine exact.
    let b = vers_f64(base)?;
    let e = vers_f64(exposant)?;
    let r = b.powf(e);
    if !r.is_finite() {
        return Err(Erreur::calcul(3026, "Puissance non représentable."));
    }
    BigRational::from_float(r)
        .ok_or_else(|| Erreur::calcul(3026, "Puissance non représentable."))
}

fn puissance_entiere(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = puissance_entiere(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

/* ------------------------ Outils entiers scalés ------------------------ */

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/* ------------------------ π (Machin) + cache ------------------------ */

/// arctan(1/q) en entier scalé (troncature) via série :
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scalee(q: i64, echelle: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut signe_pos = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut somme = BigInt::zero();

    loop {
        let denom = BigInt::from((2 * k + 1) as i64);
        let d = &q_pow * &denom;

        let terme = echelle / &d;
        if terme.is_zero() {
            break;
        }

        if signe_pos {
            somme += &terme;
        } else {
            somme -= &terme;
        }

        // q_pow *= q^2
        q_pow *= &q;
        q_pow *= &q;

        signe_pos = !signe_pos;
        k += 1;
    }

    somme
}

fn pi_scalee_calcul(chiffres: usize) -> BigInt {
    // marge pour amortir les erreurs de troncature
    let extra = 10usize;
    let echelle = pow10(chiffres + extra);

    // Machin : π = 16*atan(1/5) - 4*atan(1/239)
    let a = arctan_inv_q_scalee(5, &echelle);
    let b = arctan_inv_q_scalee(239, &echelle);

    let mut pi = BigInt::from(16) * a - BigInt::from(4) * b;

    // retire les chiffres de marge
    pi /= pow10(extra);
    pi
}

static PI_CACHE: OnceLock<Mutex<HashMap<usize, BigInt>>> = OnceLock::new();

fn pi_scalee_cache(chiffres: usize) -> BigInt {
    let m = PI_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = m.lock().expect("mutex π");

    if let Some(v) = guard.get(&chiffres) {
        return v.clone();
    }

    let v = pi_scalee_calcul(chiffres);
    guard.insert(chiffres, v.clone());
    v
}

/// π en rationnel, tronqué à `chiffres` décimales.
pub fn pi_rationnel(chiffres: usize) -> BigRational {
    BigRational::new(pi_scalee_cache(chiffres), pow10(chiffres))
}

/* ------------------------ Racine carrée ------------------------ */

/// Racine exacte si le rationnel est un carré parfait (numérateur et
/// dénominateur), None sinon.
pub fn racine_exacte(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let sn = racine_entiere_exacte(r.numer())?;
    let sd = racine_entiere_exacte(r.denom())?;
    Some(BigRational::new(sn, sd))
}

fn racine_entiere_exacte(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = racine_entiere_plancher(x);
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

fn racine_entiere_plancher(x: &BigInt) -> BigInt {
    if x.is_zero() || x.is_negative() {
        return BigInt::zero();
    }

    let mut y = depart_racine(x);
    loop {
        let y_suiv = (&y + (x / &y)) >> 1;
        if y_suiv >= y {
            let mut z = y_suiv;
            while (&z + 1u32) * (&z + 1u32) <= *x {
                z += 1u32;
            }
            while &z * &z > *x {
                z -= 1u32;
            }
            return z;
        }
        y = y_suiv;
    }
}

fn depart_racine(x: &BigInt) -> BigInt {
    let bits = x.bits();
    let moitie = bits.div_ceil(2);
    BigInt::one() << moitie
}

/// sqrt(r) en entier scalé : floor( sqrt(r) * 10^chiffres ), Newton.
/// r = n/d, n >= 0.
fn racine_scalee(r: &BigRational, chiffres: usize) -> BigInt {
    let n = r.numer().clone();
    let d = r.denom().clone();

    if n.is_zero() {
        return BigInt::zero();
    }

    // On veut y ≈ sqrt(n/d) * 10^chiffres
    // => y^2 ≈ (n * 10^(2*chiffres)) / d
    let echelle2 = pow10(2 * chiffres);
    let cible = n * echelle2;

    let mut y = pow10(chiffres);
    if y.is_zero() {
        y = BigInt::one();
    }

    loop {
        let denom = &d * &y;
        if denom.is_zero() {
            break;
        }

        let q = &cible / denom;
        let y_suiv = (&y + q) >> 1;

        if y_suiv == y || y_suiv == (&y - 1u32) {
            // ajustement final (plancher)
            let mut y_adj = y_suiv;

            while (&y_adj + 1u32) * (&y_adj + 1u32) * &d <= cible {
                y_adj += 1u32;
            }
            while &y_adj * &y_adj * &d > cible {
                y_adj -= 1u32;
            }
            return y_adj;
        }

        y = y_suiv;
    }

    y
}
