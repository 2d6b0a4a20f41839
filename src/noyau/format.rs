// src/noyau/format.rs
//
// Mise en forme du résultat brut :
// - mode fractions : réduction sous borne de dénominateur, rendu entier /
//   fraction simple / forme mixte (signe normalisé, reste positif)
// - mode point fixe : arrondi pair (banquier) au nombre de décimales
//   demandé, calculé exactement sur entiers scalés
// Le booléen retourné est le drapeau d'arrondi : vrai dès que la valeur
// affichée diffère de la valeur exacte.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::reglages::Reglages;
use super::science::pow10;

/// Borne de dénominateur du mode fractions.
pub const DENOMINATEUR_MAX: u64 = 100_000;

/// Formate une valeur exacte selon les réglages.
pub fn nettoyer(valeur: &BigRational, reglages: &Reglages) -> (String, bool) {
    if reglages.fractions {
        let bornee = limite_denominateur(valeur, DENOMINATEUR_MAX);
        let arrondi = bornee != *valeur;
        return (format_fraction(&bornee), arrondi);
    }

    // Valeur entière : rendu tel quel, jamais de drapeau.
    if valeur.is_integer() {
        return (valeur.numer().to_string(), false);
    }

    let decimales = reglages.decimales as usize;
    let scalee = arrondir_scalee(valeur, decimales);
    let arrondie = BigRational::new(scalee.clone(), pow10(decimales));
    let drapeau = arrondie != *valeur;
    (scalee_vers_decimal(scalee, decimales), drapeau)
}

/* ------------------------ Rendu fractionnaire ------------------------ */

fn format_fraction(r: &BigRational) -> String {
    let numer = r.numer();
    let denom = r.denom(); // toujours > 0, fraction toujours réduite

    if denom.is_one() {
        return numer.to_string();
    }

    if numer.abs() > *denom {
        // Forme mixte (3/2 -> "1 1/2") ; pour les négatifs, le signe reste
        // sur la partie entière et le reste affiché est positif.
        let (mut entier, mut reste) = numer.div_mod_floor(denom);
        if entier.is_negative() && reste.is_positive() {
            entier += 1u32;
            reste = denom - &reste;
        }
        return format!("{entier} {reste}/{denom}");
    }

    format!("{numer}/{denom}")
}

/// Meilleure approximation de r avec un dénominateur <= borne
/// (fractions continues). Identité quand le dénominateur tient déjà
/// sous la borne.
pub fn limite_denominateur(r: &BigRational, borne: u64) -> BigRational {
    let borne = BigInt::from(borne);
    if *r.denom() <= borne {
        return r.clone();
    }

    let (mut p0, mut q0, mut p1, mut q1) = (
        BigInt::zero(),
        BigInt::one(),
        BigInt::one(),
        BigInt::zero(),
    );
    let mut n = r.numer().clone();
    let mut d = r.denom().clone();

    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if q2 > borne {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let reste = &n - &a * &d;
        n = std::mem::replace(&mut d, reste);
        if d.is_zero() {
            break;
        }
    }

    // Demi-convergent le plus serré sous la borne, puis choix du plus proche.
    let k = (&borne - &q0).div_floor(&q1);
    let candidat1 = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let candidat2 = BigRational::new(p1, q1);

    if (&candidat2 - r).abs() <= (&candidat1 - r).abs() {
        candidat2
    } else {
        candidat1
    }
}

/* ------------------------ Rendu point fixe ------------------------ */

/// floor/arrondi pair de r * 10^decimales, exact sur entiers.
fn arrondir_scalee(r: &BigRational, decimales: usize) -> BigInt {
    let num = r.numer() * pow10(decimales);
    let (q, reste) = num.div_mod_floor(r.denom());

    // reste ∈ [0, denom) ; au plus proche, égalité vers le pair.
    let double = &reste << 1;
    if &double > r.denom() || (&double == r.denom() && q.is_odd()) {
        q + 1u32
    } else {
        q
    }
}

/// Convertit un entier scalé (×10^chiffres) en texte décimal,
/// zéros de queue retirés.
pub fn scalee_vers_decimal(mut scalee: BigInt, chiffres: usize) -> String {
    let negatif = scalee.is_negative();
    if negatif {
        scalee = -scalee;
    }

    let echelle = pow10(chiffres);
    let partie_entiere = &scalee / &echelle;
    let partie_frac = &scalee % &echelle;

    let mut frac = if chiffres == 0 {
        String::new()
    } else {
        let mut f = partie_frac.to_str_radix(10);
        while f.len() < chiffres {
            f.insert(0, '0');
        }
        f
    };

    while frac.ends_with('0') {
        frac.pop();
    }

    let texte = if frac.is_empty() {
        format!("{partie_entiere}")
    } else {
        format!("{partie_entiere}.{frac}")
    };

    if negatif {
        format!("-{texte}")
    } else {
        texte
    }
}
